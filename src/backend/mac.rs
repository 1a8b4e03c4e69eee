//! macOS backend: AppleScript `display dialog` through `osascript`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};

use crate::backend::{BackendKind, DialogBackend};
use crate::core::{DialogError, DialogKind, DialogRequest};
use crate::util::process::{CommandRunner, ProcessBuilder, ProcessOutput};

/// Native macOS dialogs.
pub struct MacBackend {
    runner: Arc<dyn CommandRunner>,
    osascript: PathBuf,
}

impl MacBackend {
    /// Locate `osascript` and check that it runs a trivial script.
    pub fn probe(runner: Arc<dyn CommandRunner>) -> Result<Self> {
        let osascript = runner
            .locate("osascript")
            .ok_or_else(|| anyhow!("osascript not found on PATH"))?;

        let output = runner.run(&ProcessBuilder::new(&osascript).args(["-e", "return 0"]))?;
        if !output.success() {
            bail!(
                "osascript probe exited with {:?}: {}",
                output.code,
                output.stderr.trim()
            );
        }

        Ok(MacBackend { runner, osascript })
    }

    /// Build the AppleScript for a request.
    pub fn script(request: &DialogRequest) -> String {
        let icon = match request.kind {
            DialogKind::Info | DialogKind::Confirm | DialogKind::Question => "note",
            DialogKind::Warning | DialogKind::Retry => "caution",
            DialogKind::Error => "stop",
        };
        let (yes, no) = request.kind.button_labels();

        let buttons = if request.kind.is_confirmation() {
            format!(
                "buttons {{\"{no}\", \"{yes}\"}} default button \"{yes}\" cancel button \"{no}\""
            )
        } else {
            format!("buttons {{\"{yes}\"}} default button \"{yes}\"")
        };

        format!(
            "display dialog \"{}\" with title \"{}\" {} with icon {}",
            escape(&request.message),
            escape(&request.title),
            buttons,
            icon
        )
    }

    fn show(&self, request: &DialogRequest) -> Result<ProcessOutput> {
        let cmd = ProcessBuilder::new(&self.osascript).args(["-e", &Self::script(request)]);
        self.runner.run(&cmd)
    }

    fn notify(&self, kind: DialogKind, title: &str, message: &str) {
        let request = DialogRequest::new(kind, title, message);
        if let Err(e) = self.show(&request) {
            tracing::warn!("could not show {} dialog: {:#}", kind, e);
        }
    }

    fn ask(&self, kind: DialogKind, title: &str, message: &str) -> bool {
        let request = DialogRequest::new(kind, title, message);
        match self.show(&request) {
            Ok(output) => is_affirmative(kind, &output),
            Err(e) => {
                tracing::warn!("could not show {} dialog, treating as declined: {:#}", kind, e);
                false
            }
        }
    }
}

/// Cancel makes `osascript` exit non-zero ("User canceled."), so a
/// successful exit with the affirmative button is the only yes.
fn is_affirmative(kind: DialogKind, output: &ProcessOutput) -> bool {
    let (yes, _) = kind.button_labels();
    output.success() && output.stdout.contains(&format!("button returned:{}", yes))
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

impl DialogBackend for MacBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::NativeMac
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
        Ok(self.ask(DialogKind::Confirm, title, message))
    }

    fn confirm_retry(&self, title: &str, message: &str) -> Result<bool, DialogError> {
        Ok(self.ask(DialogKind::Retry, title, message))
    }

    fn confirm_yes_no(&self, title: &str, message: &str) -> Result<bool, DialogError> {
        Ok(self.ask(DialogKind::Question, title, message))
    }
}
