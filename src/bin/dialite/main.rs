//! dialite CLI - show native dialogs from scripts

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dialite::util::DialiteConfig;
use dialite::{DialogContext, DialogKind, Probe};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(commands::EXIT_NO_ANSWER);
        }
    }
}

fn run() -> Result<i32> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("dialite=debug")
    } else {
        EnvFilter::new("dialite=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .with_target(false)
        .without_time()
        .init();

    // Configuration, then the command-line override
    let mut config = DialiteConfig::discover();
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }

    DialogContext::init_global(Probe::from_config(&config));
    let ctx = DialogContext::global();

    let show = |kind, args| commands::dialog::execute(ctx, &config, kind, args);

    // Execute command
    match cli.command {
        Commands::Info(args) => show(DialogKind::Info, args),
        Commands::Warn(args) => show(DialogKind::Warning, args),
        Commands::Error(args) => show(DialogKind::Error, args),
        Commands::AskOk(args) => show(DialogKind::Confirm, args),
        Commands::AskRetry(args) => show(DialogKind::Retry, args),
        Commands::AskYesno(args) => show(DialogKind::Question, args),
        Commands::Probe(args) => commands::probe::execute(ctx, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
