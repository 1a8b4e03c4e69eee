//! `dialite probe` command

use anyhow::{Context, Result};

use super::EXIT_OK;
use crate::cli::ProbeArgs;
use dialite::ops::{format_report, BackendReport};
use dialite::DialogContext;

pub fn execute(ctx: &DialogContext, args: ProbeArgs) -> Result<i32> {
    let report = BackendReport::from_context(ctx);

    if args.json {
        let json =
            serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{}", json);
    } else {
        print!("{}", format_report(&report));
    }

    Ok(EXIT_OK)
}
