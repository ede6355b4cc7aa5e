//! Simulated git sync.
//!
//! There is no real git integration: a triggered sync announces itself,
//! waits `sync.delay_ms`, and reports how many tracked branches it
//! "checked". Pending timers stop when the shell's cancellation token fires.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, Instrument};

use crate::models::NotificationKind;
use crate::notify::Notifier;
use crate::store::TaskStore;

/// Handle that starts simulated syncs. Cheap to clone.
#[derive(Debug, Clone)]
pub struct GitSync {
    store: Arc<TaskStore>,
    notifier: Notifier,
    delay: Duration,
    running: Arc<AtomicBool>,
    cancel: CancellationToken,
}

impl GitSync {
    /// Create a sync trigger.
    #[must_use]
    pub fn new(
        store: Arc<TaskStore>,
        notifier: Notifier,
        delay: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            store,
            notifier,
            delay,
            running: Arc::new(AtomicBool::new(false)),
            cancel,
        }
    }

    /// Whether a sync is in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start a sync. A trigger while one is already running is ignored.
    ///
    /// Outside a tokio runtime the sync completes immediately.
    pub fn trigger(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            debug!("git sync already running");
            return;
        }

        info!("git sync started");
        self.notifier.notify("⟳ Git Sync started", NotificationKind::Git);

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            self.finish();
            return;
        };

        let this = self.clone();
        handle.spawn(
            async move {
                tokio::select! {
                    () = this.cancel.cancelled() => {
                        this.running.store(false, Ordering::SeqCst);
                        debug!("git sync cancelled");
                    }
                    () = tokio::time::sleep(this.delay) => this.finish(),
                }
            }
            .instrument(info_span!("git_sync")),
        );
    }

    fn finish(&self) {
        let branches = self
            .store
            .snapshot()
            .iter()
            .filter(|t| t.git.is_some())
            .count();
        self.running.store(false, Ordering::SeqCst);
        info!(branches, "git sync finished");
        self.notifier.notify(
            format!("⚡ Git Sync: {branches} branches up to date"),
            NotificationKind::Git,
        );
    }
}
