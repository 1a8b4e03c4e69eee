//! Describe the active backend.
//!
//! Used by `dialite probe` to show what would handle a dialog on this
//! machine without showing one.

use std::fmt::Write as _;

use serde::Serialize;

use crate::backend::{BackendKind, BackendPreference, DialogBackend, LinuxTool};
use crate::util::context::DialogContext;

/// Snapshot of backend selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendReport {
    /// Backend that would handle the next dialog
    pub backend: BackendKind,

    /// Linux sub-mechanism, when `backend` is `linux`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux_tool: Option<LinuxTool>,

    /// A human can be reached (GUI or terminal)
    pub supports_dialogs: bool,

    /// The backend is a native GUI
    pub is_gui: bool,

    /// Detected operating system family
    pub platform: String,

    /// Standard input is an interactive terminal
    pub stdin_is_terminal: bool,

    /// A graphical session was detected
    pub has_display: bool,

    /// Configured start of the fallback chain
    pub preference: BackendPreference,

    /// A [`ForcedStub`](crate::util::ForcedStub) guard is alive
    pub forced_stub: bool,
}

impl BackendReport {
    /// Build a report from `ctx`, selecting a backend if none is cached.
    pub fn from_context(ctx: &DialogContext) -> Self {
        let backend = ctx.active_backend(false);
        let env = ctx.probe().environment();

        BackendReport {
            backend: backend.kind(),
            linux_tool: backend.linux_tool(),
            supports_dialogs: backend.supports_dialogs(),
            is_gui: backend.is_gui(),
            platform: env.platform.to_string(),
            stdin_is_terminal: env.stdin_is_terminal,
            has_display: env.has_display,
            preference: ctx.probe().preference(),
            forced_stub: ctx.is_overridden(),
        }
    }
}

/// Format a report for the terminal.
pub fn format_report(report: &BackendReport) -> String {
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    let mut out = String::new();

    let backend = match report.linux_tool {
        Some(tool) => format!("{} ({})", report.backend, tool),
        None => report.backend.to_string(),
    };

    let _ = writeln!(out, "Backend:     {}", backend);
    let _ = writeln!(out, "Dialogs:     {}", yes_no(report.supports_dialogs));
    let _ = writeln!(out, "GUI:         {}", yes_no(report.is_gui));
    let _ = writeln!(out, "Platform:    {}", report.platform);
    let _ = writeln!(out, "Terminal:    {}", yes_no(report.stdin_is_terminal));
    let _ = writeln!(out, "Display:     {}", yes_no(report.has_display));
    let _ = writeln!(out, "Preference:  {}", report.preference);
    if report.forced_stub {
        let _ = writeln!(out, "Override:    stub forced");
    }

    out
}
