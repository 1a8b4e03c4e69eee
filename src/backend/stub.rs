//! Last-resort backend with no I/O.
//!
//! Notifications vanish. Confirmations fail with
//! [`DialogError::DialogRequired`]: guessing an answer on the user's behalf
//! is worse than stopping.

use crate::backend::{BackendKind, DialogBackend};
use crate::core::{DialogError, Operation};

/// Backend used when there is neither a GUI nor an interactive terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubBackend;

impl StubBackend {
    /// Create the stub. Never fails.
    pub fn new() -> Self {
        StubBackend
    }

    fn refuse(&self, operation: Operation) -> Result<bool, DialogError> {
        Err(DialogError::DialogRequired { operation })
    }
}

impl DialogBackend for StubBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Stub
    }

    fn supports_dialogs(&self) -> bool {
        false
    }

    fn is_gui(&self) -> bool {
        false
    }

    fn notify_info(&self, _title: &str, _message: &str) {}

    fn notify_warning(&self, _title: &str, _message: &str) {}

    fn notify_error(&self, _title: &str, _message: &str) {}

    fn confirm_ok(&self, _title: &str, _message: &str) -> Result<bool, DialogError> {
        self.refuse(Operation::ConfirmOk)
    }

    fn confirm_retry(&self, _title: &str, _message: &str) -> Result<bool, DialogError> {
        self.refuse(Operation::ConfirmRetry)
    }

    fn confirm_yes_no(&self, _title: &str, _message: &str) -> Result<bool, DialogError> {
        self.refuse(Operation::ConfirmYesNo)
    }
}
