//! Backend detection.
//!
//! Candidates are tried in order until one constructs:
//! 1. The native backend for the platform (macOS, Windows, Linux)
//! 2. Terminal, when stdin is an interactive terminal
//! 3. Stub, which always constructs
//!
//! A candidate that fails to construct is skipped and never cached.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::backend::{
    Backend, BackendKind, LinuxBackend, LinuxTool, MacBackend, StubBackend, TerminalBackend,
    WindowsBackend,
};
use crate::core::{Environment, Platform};
use crate::util::config::DialiteConfig;
use crate::util::process::{CommandRunner, SystemRunner};

/// Where the fallback chain starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendPreference {
    /// Native, then terminal, then stub
    #[default]
    Auto,
    /// Terminal (even without a tty), then stub
    Terminal,
    /// Stub only
    Stub,
}

impl BackendPreference {
    /// Get the preference name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendPreference::Auto => "auto",
            BackendPreference::Terminal => "terminal",
            BackendPreference::Stub => "stub",
        }
    }
}

impl fmt::Display for BackendPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendPreference {
    type Err = BackendPreferenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" | "" => Ok(BackendPreference::Auto),
            "terminal" => Ok(BackendPreference::Terminal),
            "stub" | "none" => Ok(BackendPreference::Stub),
            _ => Err(BackendPreferenceParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid backend preference.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid backend '{0}', valid values: auto, terminal, stub")]
pub struct BackendPreferenceParseError(pub String);

type TerminalFactory = Arc<dyn Fn() -> TerminalBackend + Send + Sync>;

/// Capability probe: knows the environment and how to build each backend.
#[derive(Clone)]
pub struct Probe {
    env: Environment,
    runner: Arc<dyn CommandRunner>,
    preference: BackendPreference,
    linux_tools: Vec<LinuxTool>,
    terminal: TerminalFactory,
}

impl Probe {
    /// Probe for the given environment, spawning real processes.
    pub fn new(env: Environment) -> Self {
        Probe {
            env,
            runner: Arc::new(SystemRunner),
            preference: BackendPreference::Auto,
            linux_tools: LinuxTool::DEFAULT_ORDER.to_vec(),
            terminal: Arc::new(TerminalBackend::stdio),
        }
    }

    /// Probe for the running process, honoring configuration.
    pub fn from_config(config: &DialiteConfig) -> Self {
        Probe::new(Environment::detect())
            .with_preference(config.backend)
            .with_linux_tools(config.linux_tools.clone())
    }

    /// Use a different command runner.
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Set where the fallback chain starts.
    pub fn with_preference(mut self, preference: BackendPreference) -> Self {
        self.preference = preference;
        self
    }

    /// Set the Linux tool probe order. An empty list keeps the default.
    pub fn with_linux_tools(mut self, tools: Vec<LinuxTool>) -> Self {
        if !tools.is_empty() {
            self.linux_tools = tools;
        }
        self
    }

    /// Set how terminal backends are created.
    pub fn with_terminal<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> TerminalBackend + Send + Sync + 'static,
    {
        self.terminal = Arc::new(factory);
        self
    }

    /// The environment being probed.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// The configured preference.
    pub fn preference(&self) -> BackendPreference {
        self.preference
    }

    /// The command runner shared with backends.
    pub fn runner(&self) -> Arc<dyn CommandRunner> {
        Arc::clone(&self.runner)
    }

    /// Candidate backends, in the order they will be tried.
    pub fn candidates(&self) -> Vec<BackendKind> {
        let mut candidates = Vec::new();

        match self.preference {
            BackendPreference::Stub => {}
            BackendPreference::Terminal => candidates.push(BackendKind::Terminal),
            BackendPreference::Auto => {
                match self.env.platform {
                    Platform::MacOs => candidates.push(BackendKind::NativeMac),
                    Platform::Windows => candidates.push(BackendKind::NativeWindows),
                    Platform::Linux => candidates.push(BackendKind::NativeLinux),
                    Platform::Unknown(_) => {}
                }
                if self.env.stdin_is_terminal {
                    candidates.push(BackendKind::Terminal);
                }
            }
        }

        candidates.push(BackendKind::Stub);
        candidates
    }

    /// Construct one backend, failing if its mechanism is unavailable.
    pub fn build(&self, kind: BackendKind) -> Result<Backend> {
        let backend = match kind {
            BackendKind::NativeMac => Backend::Mac(MacBackend::probe(self.runner())?),
            BackendKind::NativeWindows => Backend::Windows(WindowsBackend::probe(self.runner())?),
            BackendKind::NativeLinux => {
                if !self.env.has_display {
                    bail!("no graphical session (DISPLAY and WAYLAND_DISPLAY are unset)");
                }
                Backend::Linux(LinuxBackend::probe(self.runner(), &self.linux_tools)?)
            }
            BackendKind::Terminal => {
                if !self.env.stdin_is_terminal && self.preference != BackendPreference::Terminal {
                    bail!("stdin is not an interactive terminal");
                }
                Backend::Terminal((self.terminal)())
            }
            BackendKind::Stub => Backend::Stub(StubBackend::new()),
        };
        Ok(backend)
    }

    /// Walk the candidates and return the first backend that constructs.
    pub fn select(&self) -> Backend {
        for kind in self.candidates() {
            match self.build(kind) {
                Ok(backend) => {
                    tracing::debug!("selected {} dialog backend", kind);
                    return backend;
                }
                Err(e) => {
                    tracing::debug!("{} dialog backend unavailable: {:#}", kind, e);
                }
            }
        }

        Backend::Stub(StubBackend::new())
    }
}

impl fmt::Debug for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Probe")
            .field("env", &self.env)
            .field("preference", &self.preference)
            .field("linux_tools", &self.linux_tools)
            .finish_non_exhaustive()
    }
}
