//! Runtime environment facts used to pick a backend.

use std::fmt;
use std::io::IsTerminal;

use serde::Serialize;

/// Operating system family, as far as dialog mechanisms are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// macOS (AppleScript via `osascript`)
    MacOs,
    /// Windows (MsgBox via `cscript`)
    Windows,
    /// Linux and other freedesktop-style unix-likes
    Linux,
    /// Anything else, carrying the raw identifier
    Unknown(String),
}

impl Platform {
    /// Classify an OS identifier.
    ///
    /// Accepts both Rust's `std::env::consts::OS` values and the common
    /// short forms (`darwin`, `win32`).
    pub fn from_os(os: &str) -> Self {
        match os.to_lowercase().as_str() {
            "macos" | "darwin" | "osx" => Platform::MacOs,
            "windows" | "win32" | "cygwin" => Platform::Windows,
            "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" | "solaris"
            | "illumos" => Platform::Linux,
            other => Platform::Unknown(other.to_string()),
        }
    }

    /// The platform this process was compiled for.
    pub fn current() -> Self {
        Platform::from_os(std::env::consts::OS)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::MacOs => write!(f, "macos"),
            Platform::Windows => write!(f, "windows"),
            Platform::Linux => write!(f, "linux"),
            Platform::Unknown(os) => write!(f, "{}", os),
        }
    }
}

/// Snapshot of the environment at probe time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Environment {
    /// Operating system family
    pub platform: Platform,

    /// Standard input is attached to an interactive terminal
    pub stdin_is_terminal: bool,

    /// A graphical session is reachable (always true off Linux)
    pub has_display: bool,
}

impl Environment {
    /// Create an environment description by hand.
    pub fn new(platform: Platform, stdin_is_terminal: bool) -> Self {
        Environment {
            platform,
            stdin_is_terminal,
            has_display: true,
        }
    }

    /// Set whether a graphical session is reachable.
    pub fn with_display(mut self, has_display: bool) -> Self {
        self.has_display = has_display;
        self
    }

    /// Detect the environment of the running process.
    pub fn detect() -> Self {
        let platform = Platform::current();
        let has_display = match platform {
            Platform::Linux => display_from_env(
                std::env::var_os("DISPLAY").is_some(),
                std::env::var_os("WAYLAND_DISPLAY").is_some(),
            ),
            _ => true,
        };

        Environment {
            platform,
            stdin_is_terminal: std::io::stdin().is_terminal(),
            has_display,
        }
    }
}

fn display_from_env(x11: bool, wayland: bool) -> bool {
    x11 || wayland
}
