use std::collections::VecDeque;
use std::sync::Mutex;

use super::{Notification, NotificationLevel, Notifier};

const DEFAULT_CAPACITY: usize = 64;

/// In-process notifier: mirrors every notification into the log and keeps the
/// most recent ones until the UI drains them.
#[derive(Debug)]
pub struct NotificationLog {
    pending: Mutex<VecDeque<Notification>>,
    capacity: usize,
}

impl Default for NotificationLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl NotificationLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    /// Removes and returns every pending notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.drain(..).collect()
    }

    pub fn pending(&self) -> Vec<Notification> {
        let pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.iter().cloned().collect()
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => tracing::info!(text = %notification.message, "notification"),
            NotificationLevel::Error => tracing::warn!(text = %notification.message, "notification"),
        }

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if pending.len() == self.capacity {
            pending.pop_front();
        }
        pending.push_back(notification);
    }
}
