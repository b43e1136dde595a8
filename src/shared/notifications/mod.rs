mod notification_log;
mod notifier;

pub use notification_log::NotificationLog;
pub use notifier::{Notification, NotificationLevel, Notifier};
