//! Canned environments and terminals.

use std::io;

use crate::backend::terminal::{shared_input, SharedInput};
use crate::backend::TerminalBackend;
use crate::core::{Environment, Platform};

/// An unrecognized OS with no terminal and no display.
pub fn headless_env() -> Environment {
    Environment::new(Platform::Unknown("meh".to_string()), false).with_display(false)
}

/// A Linux desktop session.
pub fn linux_env(stdin_is_terminal: bool) -> Environment {
    Environment::new(Platform::Linux, stdin_is_terminal)
}

/// Terminal backend that answers from `input` and discards prompts.
pub fn scripted_terminal(input: &str) -> TerminalBackend {
    TerminalBackend::new(io::Cursor::new(input.to_string()), io::sink())
}

/// Input that several terminal backends can answer from in turn.
pub fn scripted_input(input: &str) -> SharedInput {
    shared_input(io::Cursor::new(input.to_string()))
}
