//! Dialog backends.
//!
//! Every backend implements the six-operation [`DialogBackend`] contract.
//! The set of backends is closed, so the selector hands out a [`Backend`]
//! enum rather than a trait object.
//!
//! Fallback order is native GUI, then terminal, then stub. See
//! [`detect`] for how candidates are chosen.

pub mod detect;
pub mod linux;
pub mod mac;
pub mod stub;
pub mod terminal;
pub mod windows;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{DialogError, DialogKind, DialogRequest};

pub use detect::{BackendPreference, Probe};
pub use linux::{LinuxBackend, LinuxTool};
pub use mac::MacBackend;
pub use stub::StubBackend;
pub use terminal::TerminalBackend;
pub use windows::WindowsBackend;

/// Identifier for a backend variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// AppleScript dialogs via `osascript`
    #[serde(rename = "macos")]
    NativeMac,
    /// MsgBox via the Windows Script Host
    #[serde(rename = "windows")]
    NativeWindows,
    /// zenity, kdialog or notify-send
    #[serde(rename = "linux")]
    NativeLinux,
    /// Prompts on stdin, notifications through the log
    Terminal,
    /// No I/O at all
    Stub,
}

impl BackendKind {
    /// Get the backend name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::NativeMac => "macos",
            BackendKind::NativeWindows => "windows",
            BackendKind::NativeLinux => "linux",
            BackendKind::Terminal => "terminal",
            BackendKind::Stub => "stub",
        }
    }

    /// Whether this is one of the native GUI backends.
    pub fn is_native(&self) -> bool {
        matches!(
            self,
            BackendKind::NativeMac | BackendKind::NativeWindows | BackendKind::NativeLinux
        )
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The dialog contract.
///
/// Notifications are best-effort and never fail from the caller's point of
/// view. Confirmations return the user's choice; a failed invocation counts
/// as "declined". Only a backend that structurally cannot ask returns an
/// error.
pub trait DialogBackend: Send + Sync {
    /// Which variant this is.
    fn kind(&self) -> BackendKind;

    /// Whether this backend can put something in front of a human.
    fn supports_dialogs(&self) -> bool;

    /// Whether this backend uses a native GUI mechanism.
    fn is_gui(&self) -> bool;

    /// One-button informational dialog.
    fn notify_info(&self, title: &str, message: &str);

    /// One-button warning dialog.
    fn notify_warning(&self, title: &str, message: &str);

    /// One-button error dialog.
    fn notify_error(&self, title: &str, message: &str);

    /// OK/Cancel dialog. `true` if accepted.
    fn confirm_ok(&self, title: &str, message: &str) -> Result<bool, DialogError>;

    /// Retry/Cancel dialog. `true` if the user chose to retry.
    fn confirm_retry(&self, title: &str, message: &str) -> Result<bool, DialogError>;

    /// Yes/No dialog. `true` for yes.
    fn confirm_yes_no(&self, title: &str, message: &str) -> Result<bool, DialogError>;
}

/// Outcome of presenting a [`DialogRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    /// A notification was handed to the backend
    Notified,
    /// A confirmation was answered
    Answered(bool),
}

/// Present a request on any backend, dispatching on its kind.
pub fn present(
    backend: &dyn DialogBackend,
    request: &DialogRequest,
) -> Result<DialogResult, DialogError> {
    let (title, message) = (request.title.as_str(), request.message.as_str());
    let answer = match request.kind {
        DialogKind::Confirm => backend.confirm_ok(title, message),
        DialogKind::Retry => backend.confirm_retry(title, message),
        DialogKind::Question => backend.confirm_yes_no(title, message),
        DialogKind::Info => {
            backend.notify_info(title, message);
            return Ok(DialogResult::Notified);
        }
        DialogKind::Warning => {
            backend.notify_warning(title, message);
            return Ok(DialogResult::Notified);
        }
        DialogKind::Error => {
            backend.notify_error(title, message);
            return Ok(DialogResult::Notified);
        }
    };
    answer.map(DialogResult::Answered)
}

/// A constructed backend of any variant.
pub enum Backend {
    Mac(MacBackend),
    Windows(WindowsBackend),
    Linux(LinuxBackend),
    Terminal(TerminalBackend),
    Stub(StubBackend),
}

impl Backend {
    fn inner(&self) -> &dyn DialogBackend {
        match self {
            Backend::Mac(b) => b,
            Backend::Windows(b) => b,
            Backend::Linux(b) => b,
            Backend::Terminal(b) => b,
            Backend::Stub(b) => b,
        }
    }

    /// The Linux sub-mechanism, if this is the Linux backend.
    pub fn linux_tool(&self) -> Option<LinuxTool> {
        match self {
            Backend::Linux(b) => Some(b.tool()),
            _ => None,
        }
    }

    /// Check if this is the stub backend.
    pub fn is_stub(&self) -> bool {
        matches!(self, Backend::Stub(_))
    }
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Backend");
        dbg.field("kind", &self.kind());
        if let Some(tool) = self.linux_tool() {
            dbg.field("tool", &tool);
        }
        dbg.finish()
    }
}

impl DialogBackend for Backend {
    fn kind(&self) -> BackendKind {
        self.inner().kind()
    }

    fn supports_dialogs(&self) -> bool {
        self.inner().supports_dialogs()
    }

    fn is_gui(&self) -> bool {
        self.inner().is_gui()
    }

    fn notify_info(&self, title: &str, message: &str) {
        self.inner().notify_info(title, message)
    }

    fn notify_warning(&self, title: &str, message: &str) {
        self.inner().notify_warning(title, message)
    }

    fn notify_error(&self, title: &str, message: &str) {
        self.inner().notify_error(title, message)
    }

    fn confirm_ok(&self, title: &str, message: &str) -> Result<bool, DialogError> {
        self.inner().confirm_ok(title, message)
    }

    fn confirm_retry(&self, title: &str, message: &str) -> Result<bool, DialogError> {
        self.inner().confirm_retry(title, message)
    }

    fn confirm_yes_no(&self, title: &str, message: &str) -> Result<bool, DialogError> {
        self.inner().confirm_yes_no(title, message)
    }
}

impl From<StubBackend> for Backend {
    fn from(b: StubBackend) -> Self {
        Backend::Stub(b)
    }
}

impl From<TerminalBackend> for Backend {
    fn from(b: TerminalBackend) -> Self {
        Backend::Terminal(b)
    }
}
