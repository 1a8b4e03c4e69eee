//! Errors surfaced by the dialog contract.
//!
//! Probe and invocation failures are recovered inside the backends and
//! never reach this type. Only requests that structurally cannot be
//! answered do.

use thiserror::Error;

use crate::backend::BackendKind;
use crate::core::request::Operation;

/// Error returned by a confirmation operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogError {
    /// The backend exists but has no way to ask this kind of question
    /// (e.g. a notification-only Linux tool).
    #[error("`{operation}` is not supported by the {backend} backend")]
    Unsupported {
        backend: BackendKind,
        operation: Operation,
    },

    /// A user answer was required but there is no way to ask the user.
    ///
    /// The host application should treat this as fatal and exit with a
    /// non-zero status rather than guess an answer.
    #[error("`{operation}` requires a dialog, but neither a GUI nor an interactive terminal is available")]
    DialogRequired { operation: Operation },
}

impl DialogError {
    /// Whether the host is expected to terminate on this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DialogError::DialogRequired { .. })
    }

    /// The operation that failed.
    pub fn operation(&self) -> Operation {
        match self {
            DialogError::Unsupported { operation, .. } => *operation,
            DialogError::DialogRequired { operation } => *operation,
        }
    }
}
