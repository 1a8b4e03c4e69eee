//! Backend selection and caching.
//!
//! A [`DialogContext`] owns the active backend. The first request probes the
//! environment and caches the winner; later requests reuse it until a forced
//! refresh. While a [`ForcedStub`] guard is alive every request resolves to
//! the stub instead, and the previous backend comes back when the last guard
//! drops.
//!
//! The lock only covers selection. Dialogs themselves run unlocked, so
//! showing two at once from different threads is the caller's problem.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crate::backend::{Backend, DialogBackend, Probe, StubBackend};
use crate::core::{DialogError, DialogKind};
use crate::util::config::DialiteConfig;

static GLOBAL: OnceLock<DialogContext> = OnceLock::new();

#[derive(Default)]
struct CacheState {
    /// Backend chosen by probing
    active: Option<Arc<Backend>>,
    /// Stub handed out while overridden
    forced: Option<Arc<Backend>>,
    /// Number of live [`ForcedStub`] guards
    override_depth: usize,
}

/// Process-scoped dialog state: the probe and the cached backend.
pub struct DialogContext {
    probe: Probe,
    state: Mutex<CacheState>,
}

impl DialogContext {
    /// Create a context that selects backends with `probe`.
    pub fn new(probe: Probe) -> Self {
        DialogContext {
            probe,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// The process-wide context, created from the user's configuration on
    /// first use.
    pub fn global() -> &'static DialogContext {
        GLOBAL.get_or_init(|| DialogContext::new(Probe::from_config(&DialiteConfig::discover())))
    }

    /// Install the process-wide context.
    ///
    /// Returns `false` if it was already initialized, in which case `probe`
    /// is dropped.
    pub fn init_global(probe: Probe) -> bool {
        GLOBAL.set(DialogContext::new(probe)).is_ok()
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The probe used for selection.
    pub fn probe(&self) -> &Probe {
        &self.probe
    }

    /// Return the active backend, selecting one if needed.
    ///
    /// With `force_refresh` the cache is discarded and the environment is
    /// probed again.
    pub fn active_backend(&self, force_refresh: bool) -> Arc<Backend> {
        let mut state = self.lock();

        if state.override_depth > 0 {
            if force_refresh || state.forced.is_none() {
                state.forced = Some(Arc::new(Backend::Stub(StubBackend::new())));
            }
            if let Some(ref forced) = state.forced {
                return Arc::clone(forced);
            }
        }

        if !force_refresh {
            if let Some(ref active) = state.active {
                return Arc::clone(active);
            }
        }

        let backend = Arc::new(self.probe.select());
        tracing::debug!("active dialog backend: {:?}", backend);
        state.active = Some(Arc::clone(&backend));
        backend
    }

    /// Replace the cached backend.
    pub fn install(&self, backend: Backend) -> Arc<Backend> {
        let backend = Arc::new(backend);
        self.lock().active = Some(Arc::clone(&backend));
        backend
    }

    /// Forget the cached backend; the next request probes again.
    pub fn reset(&self) {
        self.lock().active = None;
    }

    /// Force the stub backend until the returned guard is dropped.
    ///
    /// Guards nest; the override ends when the last one drops.
    pub fn force_stub(&self) -> ForcedStub<'_> {
        self.lock().override_depth += 1;
        ForcedStub { ctx: self }
    }

    /// Run `f` with the stub backend forced.
    pub fn with_forced_stub<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.force_stub();
        f()
    }

    /// Whether a [`ForcedStub`] guard is alive.
    pub fn is_overridden(&self) -> bool {
        self.lock().override_depth > 0
    }

    /// Whether the active backend can reach a human at all.
    pub fn supports_dialogs(&self) -> bool {
        self.active_backend(false).supports_dialogs()
    }

    /// Whether the active backend is a native GUI.
    pub fn is_supported(&self) -> bool {
        self.active_backend(false).is_gui()
    }

    /// Show an informational dialog.
    pub fn inform(&self, title: &str, message: &str) {
        let title = title_or(title, DialogKind::Info);
        self.active_backend(false).notify_info(title, message)
    }

    /// Show a warning dialog.
    pub fn warn(&self, title: &str, message: &str) {
        let title = title_or(title, DialogKind::Warning);
        self.active_backend(false).notify_warning(title, message)
    }

    /// Show an error dialog.
    pub fn fail(&self, title: &str, message: &str) {
        let title = title_or(title, DialogKind::Error);
        self.active_backend(false).notify_error(title, message)
    }

    /// Ask OK/Cancel.
    pub fn ask_ok(&self, title: &str, message: &str) -> Result<bool, DialogError> {
        let title = title_or(title, DialogKind::Confirm);
        self.active_backend(false).confirm_ok(title, message)
    }

    /// Ask Retry/Cancel.
    pub fn ask_retry(&self, title: &str, message: &str) -> Result<bool, DialogError> {
        let title = title_or(title, DialogKind::Retry);
        self.active_backend(false).confirm_retry(title, message)
    }

    /// Ask Yes/No.
    pub fn ask_yesno(&self, title: &str, message: &str) -> Result<bool, DialogError> {
        let title = title_or(title, DialogKind::Question);
        self.active_backend(false).confirm_yes_no(title, message)
    }
}

fn title_or(title: &str, kind: DialogKind) -> &str {
    if title.is_empty() {
        kind.default_title()
    } else {
        title
    }
}

/// Guard returned by [`DialogContext::force_stub`].
#[must_use = "the override ends when the guard is dropped"]
pub struct ForcedStub<'a> {
    ctx: &'a DialogContext,
}

impl Drop for ForcedStub<'_> {
    fn drop(&mut self) {
        let mut state = self.ctx.lock();
        state.override_depth = state.override_depth.saturating_sub(1);
        if state.override_depth == 0 {
            state.forced = None;
        }
    }
}
