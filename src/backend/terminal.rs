//! Terminal fallback.
//!
//! Notifications go to the log at a level matching their kind. Questions
//! are printed and answered with one line from the input; anything that is
//! not an affirmative token (including EOF) is "no".

use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::backend::{BackendKind, DialogBackend};
use crate::core::{DialogError, DialogKind};

type Output = Box<dyn Write + Send>;

/// Line source that several backends can read from in turn.
pub type SharedInput = Arc<Mutex<Box<dyn BufRead + Send>>>;

/// Wrap a reader so backends built from it share one buffer.
pub fn shared_input(reader: impl BufRead + Send + 'static) -> SharedInput {
    let reader: Box<dyn BufRead + Send> = Box::new(reader);
    Arc::new(Mutex::new(reader))
}

enum Input {
    /// The process's stdin. Its buffer is process-wide, so input read ahead
    /// by one backend is still there for the next.
    Stdin(io::Stdin),
    Shared(SharedInput),
}

impl Input {
    fn read_line(&self, buf: &mut String) -> io::Result<usize> {
        match self {
            Input::Stdin(stdin) => stdin.read_line(buf),
            Input::Shared(reader) => reader
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .read_line(buf),
        }
    }
}

/// Text-mode dialogs on stdin/stdout.
pub struct TerminalBackend {
    input: Input,
    output: Mutex<Output>,
}

impl TerminalBackend {
    /// Terminal backend over arbitrary streams.
    pub fn new(input: impl BufRead + Send + 'static, output: impl Write + Send + 'static) -> Self {
        TerminalBackend::with_shared_input(shared_input(input), output)
    }

    /// Terminal backend reading from an input other backends may share.
    pub fn with_shared_input(input: SharedInput, output: impl Write + Send + 'static) -> Self {
        TerminalBackend {
            input: Input::Shared(input),
            output: Mutex::new(Box::new(output)),
        }
    }

    /// Terminal backend over the process's stdin and stdout.
    pub fn stdio() -> Self {
        TerminalBackend {
            input: Input::Stdin(io::stdin()),
            output: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Answers accepted as affirmative for a confirmation kind.
    pub fn affirmative_tokens(kind: DialogKind) -> &'static [&'static str] {
        match kind {
            DialogKind::Confirm => &["y", "yes", "ok"],
            DialogKind::Retry => &["y", "yes", "r", "retry"],
            DialogKind::Question => &["y", "yes"],
            DialogKind::Info | DialogKind::Warning | DialogKind::Error => &[],
        }
    }

    /// Interpret one line of input.
    pub fn is_affirmative(kind: DialogKind, answer: &str) -> bool {
        let answer = answer.trim().to_lowercase();
        Self::affirmative_tokens(kind).contains(&answer.as_str())
    }

    fn notify(&self, kind: DialogKind, title: &str, message: &str) {
        let text = line(kind, title, message);
        match kind {
            DialogKind::Warning => tracing::warn!("{}", text),
            DialogKind::Error => tracing::error!("{}", text),
            _ => tracing::info!("{}", text),
        }
    }

    fn ask(&self, kind: DialogKind, title: &str, message: &str) -> bool {
        let hint = match kind {
            DialogKind::Confirm => "[ok/N]",
            DialogKind::Retry => "[retry/N]",
            _ => "[y/N]",
        };
        let prompt = format!("{} {} ", line(kind, title, message), hint);

        {
            let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
            if let Err(e) = output.write_all(prompt.as_bytes()).and_then(|_| output.flush()) {
                tracing::debug!("could not write prompt: {}", e);
            }
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => Self::is_affirmative(kind, &answer),
            Err(e) => {
                tracing::warn!("could not read answer, treating as declined: {}", e);
                false
            }
        }
    }
}

/// `"<Label>: <message>"`, with the title spliced in when it says more
/// than the label.
fn line(kind: DialogKind, title: &str, message: &str) -> String {
    let label = kind.default_title();
    if title.is_empty() || title == label {
        format!("{}: {}", label, message)
    } else {
        format!("{}: {}: {}", label, title, message)
    }
}

impl DialogBackend for TerminalBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Terminal
    }

    fn supports_dialogs(&self) -> bool {
        true
    }

    fn is_gui(&self) -> bool {
        false
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
