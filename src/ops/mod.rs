//! High-level operations.
//!
//! This module contains the functions applications call and the reporting
//! behind `dialite probe`.

pub mod dialogs;
pub mod report;

pub use dialogs::{
    active_backend, ask_ok, ask_retry, ask_yesno, fail, inform, is_supported, no_dialogs,
    supports_dialogs, warn,
};
pub use report::{format_report, BackendReport};
