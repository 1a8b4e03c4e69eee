//! `dialite info|warn|error|ask-*` commands

use anyhow::Result;

use super::{EXIT_DECLINED, EXIT_NO_ANSWER, EXIT_OK};
use crate::cli::MessageArgs;
use dialite::backend::{present, DialogResult};
use dialite::util::{browser, DialiteConfig};
use dialite::{DialogContext, DialogKind, DialogRequest};

pub fn execute(
    ctx: &DialogContext,
    config: &DialiteConfig,
    kind: DialogKind,
    args: MessageArgs,
) -> Result<i32> {
    let request = DialogRequest::new(kind, args.title, args.message).with_default_title();
    let backend = ctx.active_backend(false);

    match present(&*backend, &request) {
        Ok(DialogResult::Notified) | Ok(DialogResult::Answered(true)) => Ok(EXIT_OK),
        Ok(DialogResult::Answered(false)) => Ok(EXIT_DECLINED),
        Err(e) => {
            tracing::error!("{}", e);

            if e.is_fatal() && config.open_help_on_unsupported {
                tracing::info!("see {} for how to enable dialogs", config.help_url);
                let probe = ctx.probe();
                browser::open(
                    probe.runner().as_ref(),
                    &probe.environment().platform,
                    &config.help_url,
                );
            }

            Ok(EXIT_NO_ANSWER)
        }
    }
}
