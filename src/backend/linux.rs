//! Linux backend: one of zenity, kdialog or notify-send.
//!
//! The tool is chosen once, when the backend is constructed. notify-send
//! can only show notifications; asking it a question is an error, not a
//! silent default.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::backend::{BackendKind, DialogBackend};
use crate::core::{DialogError, DialogKind, DialogRequest};
use crate::util::process::{CommandRunner, ProcessBuilder, ProcessOutput};

/// Command-line dialog tools, in default priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinuxTool {
    /// GTK dialogs
    Zenity,
    /// KDE dialogs
    #[serde(rename = "kdialog")]
    KDialog,
    /// Desktop notifications only
    NotifySend,
}

impl LinuxTool {
    /// Default probe order.
    pub const DEFAULT_ORDER: [LinuxTool; 3] =
        [LinuxTool::Zenity, LinuxTool::KDialog, LinuxTool::NotifySend];

    /// Executable name.
    pub fn program(&self) -> &'static str {
        match self {
            LinuxTool::Zenity => "zenity",
            LinuxTool::KDialog => "kdialog",
            LinuxTool::NotifySend => "notify-send",
        }
    }

    /// Whether the tool can return a user choice.
    pub fn can_confirm(&self) -> bool {
        !matches!(self, LinuxTool::NotifySend)
    }

    /// Arguments that present `request` with this tool.
    pub fn args(&self, request: &DialogRequest) -> Vec<String> {
        let title = request.title.clone();
        let message = request.message.clone();
        let (yes, no) = request.kind.button_labels();

        match self {
            LinuxTool::Zenity => {
                let flag = match request.kind {
                    DialogKind::Info => "--info",
                    DialogKind::Warning => "--warning",
                    DialogKind::Error => "--error",
                    DialogKind::Confirm | DialogKind::Retry | DialogKind::Question => {
                        "--question"
                    }
                };
                let mut args = vec![
                    flag.to_string(),
                    "--no-markup".to_string(),
                    "--title".to_string(),
                    title,
                    "--text".to_string(),
                    message,
                ];
                if matches!(request.kind, DialogKind::Confirm | DialogKind::Retry) {
                    args.extend([
                        "--ok-label".to_string(),
                        yes.to_string(),
                        "--cancel-label".to_string(),
                        no.to_string(),
                    ]);
                }
                args
            }
            LinuxTool::KDialog => {
                let flag = match request.kind {
                    DialogKind::Info => "--msgbox",
                    DialogKind::Warning => "--sorry",
                    DialogKind::Error => "--error",
                    DialogKind::Confirm | DialogKind::Retry | DialogKind::Question => "--yesno",
                };
                let mut args = vec!["--title".to_string(), title, flag.to_string(), message];
                if matches!(request.kind, DialogKind::Confirm | DialogKind::Retry) {
                    args.extend([
                        "--yes-label".to_string(),
                        yes.to_string(),
                        "--no-label".to_string(),
                        no.to_string(),
                    ]);
                }
                args
            }
            LinuxTool::NotifySend => {
                let (urgency, icon) = match request.kind {
                    DialogKind::Warning => ("normal", "dialog-warning"),
                    DialogKind::Error => ("critical", "dialog-error"),
                    _ => ("normal", "dialog-information"),
                };
                vec![
                    "--urgency".to_string(),
                    urgency.to_string(),
                    "--icon".to_string(),
                    icon.to_string(),
                    title,
                    message,
                ]
            }
        }
    }
}

impl fmt::Display for LinuxTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl FromStr for LinuxTool {
    type Err = LinuxToolParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zenity" => Ok(LinuxTool::Zenity),
            "kdialog" => Ok(LinuxTool::KDialog),
            "notify-send" | "notify_send" => Ok(LinuxTool::NotifySend),
            _ => Err(LinuxToolParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown tool name.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid dialog tool '{0}', valid values: zenity, kdialog, notify-send")]
pub struct LinuxToolParseError(pub String);

/// Native Linux dialogs through an external tool.
pub struct LinuxBackend {
    runner: Arc<dyn CommandRunner>,
    tool: LinuxTool,
    program: PathBuf,
}

impl LinuxBackend {
    /// Try each tool in `order` and keep the first that answers `--version`.
    pub fn probe(runner: Arc<dyn CommandRunner>, order: &[LinuxTool]) -> Result<Self> {
        for &tool in order {
            let Some(program) = runner.locate(tool.program()) else {
                tracing::debug!("{} not found on PATH", tool);
                continue;
            };

            match runner.run(&ProcessBuilder::new(&program).arg("--version")) {
                Ok(output) if output.success() => {
                    tracing::debug!("using {} for dialogs", tool);
                    return Ok(LinuxBackend {
                        runner,
                        tool,
                        program,
                    });
                }
                Ok(output) => {
                    tracing::debug!("{} --version exited with {:?}", tool, output.code);
                }
                Err(e) => {
                    tracing::debug!("{} --version failed: {:#}", tool, e);
                }
            }
        }

        let names: Vec<_> = order.iter().map(|t| t.program()).collect();
        bail!("no dialog tool available (tried {})", names.join(", "))
    }

    /// The tool chosen at construction.
    pub fn tool(&self) -> LinuxTool {
        self.tool
    }

    fn show(&self, request: &DialogRequest) -> Result<ProcessOutput> {
        let cmd = ProcessBuilder::new(&self.program).args(self.tool.args(request));
        self.runner.run(&cmd)
    }

    fn notify(&self, kind: DialogKind, title: &str, message: &str) {
        let request = DialogRequest::new(kind, title, message);
        if let Err(e) = self.show(&request) {
            tracing::warn!("could not show {} dialog with {}: {:#}", kind, self.tool, e);
        }
    }

    fn ask(&self, kind: DialogKind, title: &str, message: &str) -> Result<bool, DialogError> {
        if !self.tool.can_confirm() {
            return Err(DialogError::Unsupported {
                backend: BackendKind::NativeLinux,
                operation: kind.operation(),
            });
        }

        let request = DialogRequest::new(kind, title, message);
        match self.show(&request) {
            Ok(output) => Ok(output.success()),
            Err(e) => {
                tracing::warn!(
                    "could not show {} dialog with {}, treating as declined: {:#}",
                    kind,
                    self.tool,
                    e
                );
                Ok(false)
            }
        }
    }
}

impl DialogBackend for LinuxBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::NativeLinux
    }

    fn supports_dialogs(&self) -> bool {
        true
    }

    fn is_gui(&self) -> bool {
        true
    }

    fn notify_info(&self, title: &str, message: &str) {
        self.notify(DialogKind::Info, title, message)
    }

    fn notify_warning(&self, title: &str, message: &str) {
        self.notify(DialogKind::Warning, title, message)
    }

    fn notify_error(&self, title: &str, message: &str) {
        self.notify(DialogKind::Error, title, message)
    }

    fn confirm_ok(&self, title: &str, message: &str) -> Result<bool, DialogError> {
        self.ask(DialogKind::Confirm, title, message)
    }

    fn confirm_retry(&self, title: &str, message: &str) -> Result<bool, DialogError> {
        self.ask(DialogKind::Retry, title, message)
    }

    fn confirm_yes_no(&self, title: &str, message: &str) -> Result<bool, DialogError> {
        self.ask(DialogKind::Question, title, message)
    }
}
