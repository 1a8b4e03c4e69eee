//! Command implementations
//!
//! Every command returns the process exit code.

pub mod completions;
pub mod dialog;
pub mod probe;

/// Notification shown, or confirmation answered affirmatively.
pub const EXIT_OK: i32 = 0;

/// Confirmation declined.
pub const EXIT_DECLINED: i32 = 1;

/// No answer could be obtained.
pub const EXIT_NO_ANSWER: i32 = 2;
