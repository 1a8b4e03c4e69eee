//! Dialog request types.
//!
//! A [`DialogRequest`] lives for exactly one call: it is built by the
//! calling layer, handed to a backend, and dropped when the backend returns.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The six kinds of dialog a backend can be asked to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    /// Informational notification
    Info,
    /// Warning notification
    Warning,
    /// Error notification
    Error,
    /// OK/Cancel confirmation
    Confirm,
    /// Retry/Cancel confirmation
    Retry,
    /// Yes/No question
    Question,
}

impl DialogKind {
    /// All kinds, notifications first.
    pub const ALL: [DialogKind; 6] = [
        DialogKind::Info,
        DialogKind::Warning,
        DialogKind::Error,
        DialogKind::Confirm,
        DialogKind::Retry,
        DialogKind::Question,
    ];

    /// Label used when the caller passes an empty title.
    pub fn default_title(&self) -> &'static str {
        match self {
            DialogKind::Info => "Info",
            DialogKind::Warning => "Warning",
            DialogKind::Error => "Error",
            DialogKind::Confirm => "Confirm",
            DialogKind::Retry => "Retry",
            DialogKind::Question => "Question",
        }
    }

    /// Whether this kind returns a user choice.
    pub fn is_confirmation(&self) -> bool {
        matches!(
            self,
            DialogKind::Confirm | DialogKind::Retry | DialogKind::Question
        )
    }

    /// The contract operation that presents this kind.
    pub fn operation(&self) -> Operation {
        match self {
            DialogKind::Info => Operation::NotifyInfo,
            DialogKind::Warning => Operation::NotifyWarning,
            DialogKind::Error => Operation::NotifyError,
            DialogKind::Confirm => Operation::ConfirmOk,
            DialogKind::Retry => Operation::ConfirmRetry,
            DialogKind::Question => Operation::ConfirmYesNo,
        }
    }

    /// Button labels for confirmations as `(affirmative, negative)`.
    ///
    /// Notifications have a single acknowledgment button, reported as
    /// `("OK", "")`.
    pub fn button_labels(&self) -> (&'static str, &'static str) {
        match self {
            DialogKind::Info | DialogKind::Warning | DialogKind::Error => ("OK", ""),
            DialogKind::Confirm => ("OK", "Cancel"),
            DialogKind::Retry => ("Retry", "Cancel"),
            DialogKind::Question => ("Yes", "No"),
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_title())
    }
}

/// Name of a contract operation, used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    NotifyInfo,
    NotifyWarning,
    NotifyError,
    ConfirmOk,
    ConfirmRetry,
    ConfirmYesNo,
}

impl Operation {
    /// Get the operation name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::NotifyInfo => "notify_info",
            Operation::NotifyWarning => "notify_warning",
            Operation::NotifyError => "notify_error",
            Operation::ConfirmOk => "confirm_ok",
            Operation::ConfirmRetry => "confirm_retry",
            Operation::ConfirmYesNo => "confirm_yes_no",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single dialog to present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    /// What kind of dialog
    pub kind: DialogKind,
    /// Window title
    pub title: String,
    /// Body text
    pub message: String,
}

impl DialogRequest {
    /// Create a new request.
    pub fn new(kind: DialogKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogRequest {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Replace an empty title with the kind's default label.
    pub fn with_default_title(mut self) -> Self {
        if self.title.is_empty() {
            self.title = self.kind.default_title().to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_titles() {
        let titles: Vec<_> = DialogKind::ALL.iter().map(|k| k.default_title()).collect();
        assert_eq!(
            titles,
            ["Info", "Warning", "Error", "Confirm", "Retry", "Question"]
        );
    }

    #[test]
    fn test_with_default_title() {
        let req = DialogRequest::new(DialogKind::Retry, "", "disk busy").with_default_title();
        assert_eq!(req.title, "Retry");
        assert_eq!(req.message, "disk busy");

        let req = DialogRequest::new(DialogKind::Retry, "Upload", "").with_default_title();
        assert_eq!(req.title, "Upload");
    }

    #[test]
    fn test_confirmation_kinds() {
        assert!(!DialogKind::Info.is_confirmation());
        assert!(!DialogKind::Error.is_confirmation());
        assert!(DialogKind::Confirm.is_confirmation());
        assert!(DialogKind::Question.is_confirmation());
        assert_eq!(DialogKind::Retry.button_labels(), ("Retry", "Cancel"));
        assert_eq!(DialogKind::Question.operation(), Operation::ConfirmYesNo);
    }
}
