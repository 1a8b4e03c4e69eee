//! Shared utilities

pub mod browser;
pub mod config;
pub mod context;
pub mod process;

pub use config::DialiteConfig;
pub use context::{DialogContext, ForcedStub};
pub use process::{CommandRunner, ProcessBuilder, ProcessOutput, SystemRunner};
