//! The calling layer.
//!
//! Free functions over the process-wide [`DialogContext`]. An empty title is
//! replaced with the label of the dialog kind (`Info`, `Warning`, `Error`,
//! `Confirm`, `Retry`, `Question`).
//!
//! ```rust,no_run
//! use dialite::ops::dialogs;
//!
//! dialogs::inform("", "Build finished");
//! match dialogs::ask_yesno("Deploy", "Push to production?") {
//!     Ok(true) => println!("deploying"),
//!     Ok(false) => println!("skipped"),
//!     Err(e) => eprintln!("error: {}", e),
//! }
//! ```

use std::sync::Arc;

use crate::backend::Backend;
use crate::core::DialogError;
use crate::util::context::{DialogContext, ForcedStub};

/// Show an informational message.
pub fn inform(title: &str, message: &str) {
    DialogContext::global().inform(title, message)
}

/// Show a warning.
pub fn warn(title: &str, message: &str) {
    DialogContext::global().warn(title, message)
}

/// Show an error.
pub fn fail(title: &str, message: &str) {
    DialogContext::global().fail(title, message)
}

/// Ask the user to confirm with OK or Cancel.
pub fn ask_ok(title: &str, message: &str) -> Result<bool, DialogError> {
    DialogContext::global().ask_ok(title, message)
}

/// Ask the user whether to retry.
pub fn ask_retry(title: &str, message: &str) -> Result<bool, DialogError> {
    DialogContext::global().ask_retry(title, message)
}

/// Ask a yes/no question.
pub fn ask_yesno(title: &str, message: &str) -> Result<bool, DialogError> {
    DialogContext::global().ask_yesno(title, message)
}

/// Whether dialogs are shown by a native GUI.
pub fn is_supported() -> bool {
    DialogContext::global().is_supported()
}

/// Whether dialogs can reach a human at all (GUI or terminal).
pub fn supports_dialogs() -> bool {
    DialogContext::global().supports_dialogs()
}

/// The backend in use, re-probing when `force_refresh` is set.
pub fn active_backend(force_refresh: bool) -> Arc<Backend> {
    DialogContext::global().active_backend(force_refresh)
}

/// Suppress all dialogs until the guard drops.
pub fn no_dialogs() -> ForcedStub<'static> {
    DialogContext::global().force_stub()
}
