//! Notification bus.
//!
//! Components that want to tell the user something receive a cloned
//! [`Notifier`] from the owning [`crate::shell::Shell`]; the shell keeps the
//! single [`NotificationFeed`] the presentation layer drains. Nothing reaches
//! into shared module state.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::models::{Notification, NotificationKind};

/// Send half of the bus. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
    cancel: CancellationToken,
}

/// Receive half of the bus, owned by the shell.
#[derive(Debug)]
pub struct NotificationFeed {
    rx: mpsc::UnboundedReceiver<Notification>,
}

/// Create a connected notifier/feed pair.
///
/// Delayed notifications scheduled through the notifier are dropped once
/// `cancel` fires.
#[must_use]
pub fn channel(cancel: CancellationToken) -> (Notifier, NotificationFeed) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Notifier { tx, cancel }, NotificationFeed { rx })
}

impl Notifier {
    /// Deliver a notification now.
    ///
    /// Sending after the feed is dropped is silently ignored.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) {
        let notification = Notification::new(message, kind);
        trace!(message = %notification.message, ?kind, "notify");
        if self.tx.send(notification).is_err() {
            debug!("notification feed closed; dropping notification");
        }
    }

    /// Deliver a notification after `delay`.
    ///
    /// Runs on the current tokio runtime. Outside a runtime the notification
    /// is delivered immediately.
    pub fn notify_after(&self, delay: Duration, message: impl Into<String>, kind: NotificationKind) {
        let message = message.into();
        if delay.is_zero() {
            self.notify(message, kind);
            return;
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("no tokio runtime; delivering delayed notification immediately");
            self.notify(message, kind);
            return;
        };

        let notifier = self.clone();
        handle.spawn(async move {
            tokio::select! {
                () = notifier.cancel.cancelled() => {
                    debug!(%message, "delayed notification cancelled");
                }
                () = tokio::time::sleep(delay) => {
                    notifier.notify(message, kind);
                }
            }
        });
    }
}

impl NotificationFeed {
    /// Wait for the next notification.
    ///
    /// Returns `None` once every [`Notifier`] has been dropped.
    pub async fn recv(&mut self) -> Option<Notification> {
        self.rx.recv().await
    }

    /// Take every notification that is already queued.
    pub fn drain(&mut self) -> Vec<Notification> {
        let mut out = Vec::new();
        while let Ok(notification) = self.rx.try_recv() {
            out.push(notification);
        }
        out
    }
}
