//! # Toasts
//!
//! `Notifier` adapters. The view layer drains `ToastQueue` on each frame
//! and renders whatever is pending.
//!
//! ```text
//! FavoritesManager ──notify()──► ToastQueue ──drain(max)──► view renders
//!                                    │
//!                                    └── tracing::info!(toast)
//! ```

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ts_rs::TS;
use uuid::Uuid;
use vitastore_core::{Notifier, Severity};

/// Pending toasts kept before the oldest are dropped.
pub const DEFAULT_TOAST_CAPACITY: usize = 16;

/// One notification waiting to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Toast {
    #[ts(as = "String")]
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Buffers toasts for the view layer.
///
/// Bounded: if the view stops draining, the oldest toasts are discarded so
/// a burst of taps never grows memory without limit.
#[derive(Debug)]
pub struct ToastQueue {
    pending: Mutex<VecDeque<Toast>>,
    capacity: usize,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TOAST_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        ToastQueue {
            pending: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Removes and returns up to `max` toasts, oldest first.
    pub fn drain(&self, max: usize) -> Vec<Toast> {
        let mut pending = self.lock();
        let n = max.min(pending.len());
        pending.drain(..n).collect()
    }

    /// Number of toasts waiting.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Oldest pending toast without removing it.
    pub fn peek(&self) -> Option<Toast> {
        self.lock().front().cloned()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Toast>> {
        self.pending.lock().unwrap_or_else(|poisoned| {
            warn!("toast queue mutex poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, message: &str, severity: Severity) {
        let toast = Toast {
            id: Uuid::new_v4(),
            message: message.to_string(),
            severity,
            created_at: Utc::now(),
        };
        info!(toast_id = %toast.id, severity = %severity, text = message, "toast");

        let mut pending = self.lock();
        if pending.len() >= self.capacity {
            pending.pop_front();
        }
        pending.push_back(toast);
    }
}

/// Notifier that only logs. Useful for headless sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Warning | Severity::Error => warn!(severity = %severity, text = message, "notification"),
            Severity::Success | Severity::Info => info!(severity = %severity, text = message, "notification"),
        }
    }
}
