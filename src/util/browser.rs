//! Open a URL in the user's browser.
//!
//! Only used to point the user at the help page when a required dialog
//! cannot be shown. Failures are logged and swallowed.

use crate::core::Platform;
use crate::util::process::{CommandRunner, ProcessBuilder};

/// Command that opens `url` on `platform`.
pub fn open_command(platform: &Platform, url: &str) -> ProcessBuilder {
    match platform {
        Platform::MacOs => ProcessBuilder::new("open").arg(url),
        Platform::Windows => ProcessBuilder::new("cmd").args(["/C", "start", "", url]),
        Platform::Linux | Platform::Unknown(_) => ProcessBuilder::new("xdg-open").arg(url),
    }
}

/// Try to open `url`. Returns whether the opener reported success.
pub fn open(runner: &dyn CommandRunner, platform: &Platform, url: &str) -> bool {
    let cmd = open_command(platform, url);
    match runner.run(&cmd) {
        Ok(output) if output.success() => {
            tracing::debug!("opened {}", url);
            true
        }
        Ok(output) => {
            tracing::warn!(
                "`{}` exited with {:?}",
                cmd.display_command(),
                output.code
            );
            false
        }
        Err(e) => {
            tracing::warn!("could not open {}: {:#}", url, e);
            false
        }
    }
}
