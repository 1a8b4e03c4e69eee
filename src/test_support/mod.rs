//! Test utilities and mocks for dialite unit tests.
//!
//! This module provides stand-ins for the parts of the system that would
//! otherwise pop up real dialogs: a mock [`CommandRunner`], a log capture,
//! and scripted terminal input.
//!
//! # Example
//!
//! ```rust,ignore
//! use dialite::test_support::{MockExecutor, MockProcessOutput};
//!
//! #[test]
//! fn test_example() {
//!     let exec = MockExecutor::new();
//!     exec.add_program("zenity");
//!     exec.expect("zenity --version", MockProcessOutput::success("4.0"));
//!
//!     // Hand `Arc::new(exec.clone())` to a probe or backend...
//! }
//! ```

pub mod fixtures;

use std::collections::HashSet;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use tracing_subscriber::fmt::MakeWriter;

use crate::util::process::{CommandRunner, ProcessBuilder, ProcessOutput};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Create an output that only carries an exit code.
    pub fn exit(status: i32) -> Self {
        MockProcessOutput {
            status,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

impl From<MockProcessOutput> for ProcessOutput {
    fn from(mock: MockProcessOutput) -> Self {
        ProcessOutput {
            code: Some(mock.status),
            stdout: mock.stdout,
            stderr: mock.stderr,
        }
    }
}

/// Pattern for matching commands in MockExecutor.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
    /// Match using a regex pattern.
    Regex(String),
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
            CommandPattern::Regex(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(cmd))
                .unwrap_or(false),
        }
    }
}

/// Expectation for a command execution.
#[derive(Debug, Clone)]
pub struct CommandExpectation {
    /// Pattern to match against commands.
    pub pattern: CommandPattern,
    /// Output to return when matched.
    pub output: MockProcessOutput,
    /// Number of times this expectation can be used (None = unlimited).
    pub times: Option<usize>,
    /// Number of times this expectation has been used.
    pub used: usize,
}

impl CommandExpectation {
    /// Create a new expectation.
    pub fn new(pattern: CommandPattern, output: MockProcessOutput) -> Self {
        CommandExpectation {
            pattern,
            output,
            times: None,
            used: 0,
        }
    }

    /// Set the number of times this expectation can be used.
    pub fn times(mut self, n: usize) -> Self {
        self.times = Some(n);
        self
    }

    /// Check if this expectation can still be used.
    pub fn available(&self) -> bool {
        match self.times {
            Some(n) => self.used < n,
            None => true,
        }
    }
}

#[derive(Debug, Default)]
struct ExecutorState {
    expectations: Vec<CommandExpectation>,
    calls: Vec<String>,
    default_output: Option<MockProcessOutput>,
    programs: HashSet<String>,
    fail_spawns: bool,
}

/// Mock process executor for testing command execution.
///
/// Clones share state, so a test can keep one handle while a backend owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct MockExecutor {
    state: Arc<Mutex<ExecutorState>>,
}

impl MockExecutor {
    /// Create a new mock executor with an empty `PATH`.
    pub fn new() -> Self {
        MockExecutor::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut ExecutorState) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    /// Make `program` discoverable on the mock `PATH`.
    pub fn add_program(&self, program: &str) -> &Self {
        self.with_state(|s| s.programs.insert(program.to_string()));
        self
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&self, cmd: &str, output: MockProcessOutput) -> &Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::Exact(cmd.to_string()),
            output,
        ))
    }

    /// Add an expectation for a command starting with a prefix.
    pub fn expect_prefix(&self, prefix: &str, output: MockProcessOutput) -> &Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::StartsWith(prefix.to_string()),
            output,
        ))
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(&self, substring: &str, output: MockProcessOutput) -> &Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::Contains(substring.to_string()),
            output,
        ))
    }

    /// Add a custom expectation.
    pub fn expect_pattern(&self, expectation: CommandExpectation) -> &Self {
        self.with_state(|s| s.expectations.push(expectation));
        self
    }

    /// Set a default output for commands that don't match any expectation.
    pub fn set_default(&self, output: MockProcessOutput) -> &Self {
        self.with_state(|s| s.default_output = Some(output));
        self
    }

    /// Make every subsequent run fail as if the program could not start.
    pub fn fail_spawns(&self) -> &Self {
        self.with_state(|s| s.fail_spawns = true);
        self
    }

    /// Get all commands that were called.
    pub fn calls(&self) -> Vec<String> {
        self.with_state(|s| s.calls.clone())
    }

    /// Clear all recorded calls.
    pub fn clear_calls(&self) {
        self.with_state(|s| s.calls.clear());
    }

    /// Verify that all expectations with a specific count were satisfied.
    pub fn verify(&self) -> Result<()> {
        self.with_state(|s| {
            for (i, exp) in s.expectations.iter().enumerate() {
                if let Some(expected) = exp.times {
                    if exp.used != expected {
                        bail!(
                            "expectation {} was used {} times, expected {}",
                            i,
                            exp.used,
                            expected
                        );
                    }
                }
            }
            Ok(())
        })
    }
}

impl CommandRunner for MockExecutor {
    fn run(&self, cmd: &ProcessBuilder) -> Result<ProcessOutput> {
        let full_cmd = cmd.display_command();

        self.with_state(|s| {
            s.calls.push(full_cmd.clone());

            if s.fail_spawns {
                bail!("failed to spawn `{}`", cmd.get_program().display());
            }

            for exp in &mut s.expectations {
                if exp.pattern.matches(&full_cmd) && exp.available() {
                    exp.used += 1;
                    return Ok(exp.output.clone().into());
                }
            }

            if let Some(ref default) = s.default_output {
                return Ok(default.clone().into());
            }

            bail!("unexpected command: {}", full_cmd)
        })
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.with_state(|s| s.programs.contains(program).then(|| PathBuf::from(program)))
    }
}

/// Cloneable in-memory sink, usable as an `io::Write` and as a tracing
/// writer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        SharedBuffer::default()
    }

    /// Everything written so far, as lossy UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = SharedBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Captures log lines emitted at INFO and above while a closure runs.
#[derive(Debug, Default)]
pub struct CaptureLog {
    buffer: SharedBuffer,
}

impl CaptureLog {
    /// Create an empty capture.
    pub fn new() -> Self {
        CaptureLog::default()
    }

    /// Run `f` with this capture as the thread's subscriber.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.buffer.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    /// Captured lines, as they would have appeared on the console.
    pub fn lines(&self) -> Vec<String> {
        self.buffer.contents().lines().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_executor_expectations() {
        let exec = MockExecutor::new();
        exec.expect_pattern(
            CommandExpectation::new(
                CommandPattern::Exact("zenity --version".to_string()),
                MockProcessOutput::success("4.0"),
            )
            .times(1),
        );
        exec.expect_contains("--question", MockProcessOutput::failure(1, ""));

        let out = exec.run(&ProcessBuilder::new("zenity").arg("--version")).unwrap();
        assert_eq!(out.stdout, "4.0");
        assert!(exec.verify().is_ok());

        // Used up
        assert!(exec.run(&ProcessBuilder::new("zenity").arg("--version")).is_err());

        let out = exec
            .run(&ProcessBuilder::new("zenity").args(["--question", "--text", "ok?"]))
            .unwrap();
        assert_eq!(out.code, Some(1));
        assert_eq!(exec.calls().len(), 3);
    }

    #[test]
    fn test_mock_executor_locate() {
        let exec = MockExecutor::new();
        assert!(exec.locate("kdialog").is_none());
        exec.add_program("kdialog");
        assert_eq!(exec.locate("kdialog"), Some(PathBuf::from("kdialog")));
    }

    #[test]
    fn test_regex_pattern() {
        let pattern = CommandPattern::Regex(r"^cscript //Nologo .*\.vbs$".to_string());
        assert!(pattern.matches("cscript //Nologo /tmp/dialite-abc.vbs"));
        assert!(!pattern.matches("wscript /tmp/dialite-abc.vbs"));
    }

    #[test]
    fn test_capture_log() {
        let log = CaptureLog::new();
        log.run(|| {
            tracing::debug!("hidden");
            tracing::info!("shown");
        });
        assert_eq!(log.lines().len(), 1);
        assert!(log.lines()[0].contains("shown"));
    }
}
