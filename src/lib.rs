//! dialite - Lightweight native dialogs with graceful fallback
//!
//! This crate shows simple message and confirmation dialogs using whatever
//! the host offers: AppleScript on macOS, `MsgBox` on Windows, zenity,
//! kdialog or notify-send on Linux. Without a GUI it falls back to the
//! terminal, and without a terminal to a silent stub that refuses to guess
//! answers to confirmations.

pub mod backend;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for dialite unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a mock command runner, log capture, and
/// canned environments.
#[cfg(test)]
pub mod test_support;

pub use backend::{Backend, BackendKind, BackendPreference, DialogBackend, Probe};
pub use core::{DialogError, DialogKind, DialogRequest, Environment, Platform};
pub use ops::dialogs::{
    ask_ok, ask_retry, ask_yesno, fail, inform, is_supported, no_dialogs, supports_dialogs, warn,
};
pub use util::context::{DialogContext, ForcedStub};
