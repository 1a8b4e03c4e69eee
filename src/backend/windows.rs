//! Windows backend: `MsgBox` run by the Windows Script Host.
//!
//! Each dialog is a throwaway `.vbs` file whose exit code is the `MsgBox`
//! return value, so no Win32 bindings are needed.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};

use crate::backend::{BackendKind, DialogBackend};
use crate::core::{DialogError, DialogKind, DialogRequest};
use crate::util::process::{CommandRunner, ProcessBuilder, ProcessOutput};

/// `MsgBox` button and icon flags.
pub mod flags {
    pub const OK_ONLY: u32 = 0;
    pub const OK_CANCEL: u32 = 1;
    pub const YES_NO: u32 = 4;
    pub const RETRY_CANCEL: u32 = 5;

    pub const ICON_CRITICAL: u32 = 16;
    pub const ICON_QUESTION: u32 = 32;
    pub const ICON_EXCLAMATION: u32 = 48;
    pub const ICON_INFORMATION: u32 = 64;

    pub const SYSTEM_MODAL: u32 = 4096;
}

/// `MsgBox` return codes.
pub mod codes {
    pub const OK: i32 = 1;
    pub const CANCEL: i32 = 2;
    pub const ABORT: i32 = 3;
    pub const RETRY: i32 = 4;
    pub const IGNORE: i32 = 5;
    pub const YES: i32 = 6;
    pub const NO: i32 = 7;
}

/// Native Windows message boxes.
pub struct WindowsBackend {
    runner: Arc<dyn CommandRunner>,
    cscript: PathBuf,
}

impl WindowsBackend {
    /// Locate the console script host and check that it runs a trivial
    /// script.
    pub fn probe(runner: Arc<dyn CommandRunner>) -> Result<Self> {
        let cscript = runner
            .locate("cscript")
            .ok_or_else(|| anyhow!("cscript not found on PATH"))?;

        let output = run_script(runner.as_ref(), &cscript, PROBE_SCRIPT)?;
        if !output.success() {
            bail!(
                "cscript probe exited with {:?}: {}",
                output.code,
                output.stderr.trim()
            );
        }

        Ok(WindowsBackend { runner, cscript })
    }

    /// Icon and button flags for a dialog kind.
    pub fn style(kind: DialogKind) -> u32 {
        let style = match kind {
            DialogKind::Info => flags::OK_ONLY | flags::ICON_INFORMATION,
            DialogKind::Warning => flags::OK_ONLY | flags::ICON_EXCLAMATION,
            DialogKind::Error => flags::OK_ONLY | flags::ICON_CRITICAL,
            DialogKind::Confirm => flags::OK_CANCEL | flags::ICON_INFORMATION,
            DialogKind::Retry => flags::RETRY_CANCEL | flags::ICON_EXCLAMATION,
            DialogKind::Question => flags::YES_NO | flags::ICON_QUESTION,
        };
        style | flags::SYSTEM_MODAL
    }

    /// Map a `MsgBox` return code to an answer.
    ///
    /// Unknown codes, and no code at all, decline.
    pub fn is_affirmative(code: Option<i32>) -> bool {
        matches!(code, Some(codes::OK | codes::RETRY | codes::YES))
    }

    /// The `MsgBox` return code reported by a script run.
    ///
    /// The script prints the code and exits 0. Any other exit status means
    /// the script host failed, and there is no answer.
    pub fn returned_code(output: &ProcessOutput) -> Option<i32> {
        if !output.success() {
            return None;
        }
        output.stdout.trim().parse().ok()
    }

    /// Build the VBScript source for a request.
    pub fn script(request: &DialogRequest) -> String {
        format!(
            "result = MsgBox({}, {}, {})\r\nWScript.StdOut.Write result\r\nWScript.Quit 0\r\n",
            vbs_string(&request.message),
            Self::style(request.kind),
            vbs_string(&request.title)
        )
    }

    fn show(&self, request: &DialogRequest) -> Result<ProcessOutput> {
        run_script(self.runner.as_ref(), &self.cscript, &Self::script(request))
    }

    fn notify(&self, kind: DialogKind, title: &str, message: &str) {
        let request = DialogRequest::new(kind, title, message);
        match self.show(&request) {
            Ok(output) if output.success() => {}
            Ok(output) => {
                tracing::warn!(
                    "{} message box script exited with {:?}: {}",
                    kind,
                    output.code,
                    output.stderr.trim()
                );
            }
            Err(e) => tracing::warn!("could not show {} message box: {:#}", kind, e),
        }
    }

    fn ask(&self, kind: DialogKind, title: &str, message: &str) -> bool {
        let request = DialogRequest::new(kind, title, message);
        match self.show(&request) {
            Ok(output) => {
                let code = Self::returned_code(&output);
                if code.is_none() {
                    tracing::warn!(
                        "{} message box gave no answer (exit {:?}), treating as declined: {}",
                        kind,
                        output.code,
                        output.stderr.trim()
                    );
                }
                Self::is_affirmative(code)
            }
            Err(e) => {
                tracing::warn!(
                    "could not show {} message box, treating as declined: {:#}",
                    kind,
                    e
                );
                false
            }
        }
    }
}

const PROBE_SCRIPT: &str = "WScript.Quit 0\r\n";

/// Write `source` to a temporary `.vbs` file and run it with `cscript`.
fn run_script(runner: &dyn CommandRunner, cscript: &Path, source: &str) -> Result<ProcessOutput> {
    let mut file = tempfile::Builder::new()
        .prefix("dialite-")
        .suffix(".vbs")
        .tempfile()
        .context("failed to create temporary script")?;

    // cscript reads UTF-16LE with a BOM without mangling non-ASCII text.
    let mut bytes = vec![0xFF, 0xFE];
    for unit in source.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    file.write_all(&bytes).context("failed to write temporary script")?;
    file.flush().context("failed to write temporary script")?;

    let cmd = ProcessBuilder::new(cscript).arg("//Nologo").arg(file.path());
    runner.run(&cmd)
}

/// Quote a string as a VBScript expression, splicing line breaks in as
/// `vbCrLf`.
fn vbs_string(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let parts: Vec<String> = normalized
        .split('\n')
        .map(|line| format!("\"{}\"", line.replace('"', "\"\"")))
        .collect();
    parts.join(" & vbCrLf & ")
}

impl DialogBackend for WindowsBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::NativeWindows
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CommandExpectation, CommandPattern, MockExecutor, MockProcessOutput};

    const SCRIPT_RUN: &str = r"^cscript //Nologo .*dialite-.*\.vbs$";

    /// Expect exactly one script run producing `output`.
    fn expect_run(exec: &MockExecutor, output: MockProcessOutput) {
        exec.expect_pattern(
            CommandExpectation::new(CommandPattern::Regex(SCRIPT_RUN.to_string()), output)
                .times(1),
        );
    }

    fn answered(code: i32) -> MockProcessOutput {
        MockProcessOutput::success(code.to_string())
    }

    fn backend() -> (MockExecutor, WindowsBackend) {
        let exec = MockExecutor::new();
        exec.add_program("cscript");
        expect_run(&exec, MockProcessOutput::success(""));
        let win = WindowsBackend::probe(Arc::new(exec.clone())).unwrap();
        exec.verify().unwrap();
        exec.clear_calls();
        (exec, win)
    }

    #[test]
    fn test_probe_requires_cscript() {
        assert!(WindowsBackend::probe(Arc::new(MockExecutor::new())).is_err());
    }

    #[test]
    fn test_probe_requires_working_script_host() {
        let exec = MockExecutor::new();
        exec.add_program("cscript");
        expect_run(
            &exec,
            MockProcessOutput::failure(1, "Windows Script Host access is disabled on this machine."),
        );

        let err = WindowsBackend::probe(Arc::new(exec.clone())).err().unwrap();
        assert!(err.to_string().contains("disabled"));
        exec.verify().unwrap();
    }

    #[test]
    fn test_style_flags() {
        assert_eq!(WindowsBackend::style(DialogKind::Info), 64 | 4096);
        assert_eq!(WindowsBackend::style(DialogKind::Error), 16 | 4096);
        assert_eq!(WindowsBackend::style(DialogKind::Retry), 5 | 48 | 4096);
        assert_eq!(WindowsBackend::style(DialogKind::Question), 4 | 32 | 4096);
    }

    #[test]
    fn test_code_table() {
        assert!(WindowsBackend::is_affirmative(Some(codes::OK)));
        assert!(WindowsBackend::is_affirmative(Some(codes::RETRY)));
        assert!(WindowsBackend::is_affirmative(Some(codes::YES)));
        assert!(!WindowsBackend::is_affirmative(Some(codes::CANCEL)));
        assert!(!WindowsBackend::is_affirmative(Some(codes::ABORT)));
        assert!(!WindowsBackend::is_affirmative(Some(codes::IGNORE)));
        assert!(!WindowsBackend::is_affirmative(Some(codes::NO)));
        assert!(!WindowsBackend::is_affirmative(Some(0)));
        assert!(!WindowsBackend::is_affirmative(None));
    }

    #[test]
    fn test_returned_code_needs_clean_exit() {
        let out = |code, stdout: &str| ProcessOutput {
            code,
            stdout: stdout.to_string(),
            stderr: String::new(),
        };

        assert_eq!(WindowsBackend::returned_code(&out(Some(0), "6")), Some(codes::YES));
        assert_eq!(WindowsBackend::returned_code(&out(Some(0), " 1\r\n")), Some(codes::OK));
        // A failed script host exits 1, the same number as IDOK
        assert_eq!(WindowsBackend::returned_code(&out(Some(1), "")), None);
        assert_eq!(WindowsBackend::returned_code(&out(Some(0), "")), None);
        assert_eq!(WindowsBackend::returned_code(&out(None, "1")), None);
    }

    #[test]
    fn test_script_quoting() {
        let req = DialogRequest::new(DialogKind::Confirm, "Save \"draft\"?", "line one\nline two");
        let script = WindowsBackend::script(&req);
        assert_eq!(
            script,
            "result = MsgBox(\"line one\" & vbCrLf & \"line two\", 4161, \"Save \"\"draft\"\"?\")\r\n\
             WScript.StdOut.Write result\r\nWScript.Quit 0\r\n"
        );
    }

    #[test]
    fn test_every_line_break_style_is_spliced() {
        let req = DialogRequest::new(DialogKind::Confirm, "t", "a\rb\r\nc\nd");
        let script = WindowsBackend::script(&req);
        assert!(script.starts_with(
            "result = MsgBox(\"a\" & vbCrLf & \"b\" & vbCrLf & \"c\" & vbCrLf & \"d\", 4161"
        ));
        // No raw line break inside the MsgBox line
        let first_line = script.split("\r\n").next().unwrap();
        assert!(!first_line.contains('\r') && !first_line.contains('\n'));
    }

    #[test]
    fn test_each_operation_is_one_message_box() {
        let (exec, win) = backend();

        expect_run(&exec, answered(codes::OK));
        win.notify_info("", "");
        expect_run(&exec, answered(codes::OK));
        win.notify_warning("", "");
        expect_run(&exec, answered(codes::OK));
        win.notify_error("", "");
        expect_run(&exec, answered(codes::OK));
        assert!(win.confirm_ok("", "").unwrap());
        expect_run(&exec, answered(codes::RETRY));
        assert!(win.confirm_retry("", "").unwrap());
        expect_run(&exec, answered(codes::YES));
        assert!(win.confirm_yes_no("", "").unwrap());

        exec.verify().unwrap();
        assert_eq!(exec.calls().len(), 6);
    }

    #[test]
    fn test_negative_codes() {
        let (exec, win) = backend();

        exec.set_default(answered(codes::CANCEL));
        assert!(!win.confirm_ok("t", "m").unwrap());
        assert!(!win.confirm_retry("t", "m").unwrap());

        exec.set_default(answered(codes::NO));
        assert!(!win.confirm_yes_no("t", "m").unwrap());
    }

    #[test]
    fn test_failed_script_host_declines() {
        let (exec, win) = backend();
        exec.set_default(MockProcessOutput::failure(
            1,
            "Windows Script Host access is disabled on this machine.",
        ));

        assert!(!win.confirm_ok("Delete", "Erase everything?").unwrap());
        assert!(!win.confirm_retry("Delete", "Erase everything?").unwrap());
        win.notify_info("t", "m");
    }

    #[test]
    fn test_invocation_failure_declines() {
        let (exec, win) = backend();
        exec.fail_spawns();
        win.notify_info("t", "m");
        assert!(!win.confirm_yes_no("t", "m").unwrap());
    }
}
