//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use dialite::BackendPreference;

/// dialite - Show a dialog with whatever the platform provides
#[derive(Parser)]
#[command(name = "dialite")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Where the backend fallback chain starts (auto, terminal, stub)
    #[arg(long, global = true, value_name = "BACKEND")]
    pub backend: Option<BackendPreference>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show an informational message
    Info(MessageArgs),

    /// Show a warning
    Warn(MessageArgs),

    /// Show an error
    Error(MessageArgs),

    /// Ask OK/Cancel (exit 0 on OK, 1 on Cancel)
    AskOk(MessageArgs),

    /// Ask Retry/Cancel (exit 0 on Retry, 1 on Cancel)
    AskRetry(MessageArgs),

    /// Ask Yes/No (exit 0 on Yes, 1 on No)
    AskYesno(MessageArgs),

    /// Show which backend would handle dialogs
    Probe(ProbeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct MessageArgs {
    /// Dialog title (defaults to the dialog kind)
    #[arg(default_value = "")]
    pub title: String,

    /// Dialog text
    #[arg(default_value = "")]
    pub message: String,
}

#[derive(Args)]
pub struct ProbeArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
