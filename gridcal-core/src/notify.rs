//! One-shot user notifications.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Notification {
            level: NotificationLevel::Success,
            title: title.into(),
            description: None,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notification {
            level: NotificationLevel::Error,
            title: title.into(),
            description: Some(description.into()),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {}", self.title, description),
            None => write!(f, "{}", self.title),
        }
    }
}

/// Receives notifications raised by the controller.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}
