//! User Feedback Notifications
//!
//! The shop state reports the outcome of user actions through a
//! fire-and-forget [`Notifier`]. It never reads anything back.

use serde::Serialize;
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }
}

/// Sink for user-facing notifications. Must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        tracing::info!(
            severity = ?notification.severity,
            message = %notification.message,
            "notification"
        );
    }
}

/// Number of notifications a [`NotificationQueue`] keeps by default.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Buffers notifications until a client drains them. When full, the oldest
/// entry is dropped.
#[derive(Debug)]
pub struct NotificationQueue {
    pending: Mutex<VecDeque<Notification>>,
    capacity: usize,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }
}

impl NotificationQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    /// Removes and returns everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NotificationQueue {
    fn notify(&self, notification: Notification) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if pending.len() == self.capacity {
            pending.pop_front();
        }
        pending.push_back(notification);
    }
}

/// Delivers every notification to each of its sinks.
#[derive(Default)]
pub struct Fanout {
    sinks: Vec<Arc<dyn Notifier>>,
}

impl Fanout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn Notifier>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl Notifier for Fanout {
    fn notify(&self, notification: Notification) {
        for sink in &self.sinks {
            sink.notify(notification.clone());
        }
    }
}
