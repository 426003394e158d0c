//! Decode diagnostics.
//!
//! The map format has a few lenient paths: unknown terrain codes fall back
//! to grass, odd presence bytes count as absent, a set game-state flag is
//! skipped. None of these abort a decode; each one is recorded as a
//! [`Notification`] so the caller can tell a clean file from a patched-up
//! one. Every notification is also emitted through `tracing::warn!`.

use std::fmt;

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// A lossy fallback was applied to keep decoding (e.g. unknown terrain code).
    Fallback,
    /// Data present in the file that this library does not interpret.
    NotSupported,
    /// Anything else worth surfacing (malformed text, trailing bytes).
    Warning,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fallback => write!(f, "Fallback"),
            Self::NotSupported => write!(f, "NotSupported"),
            Self::Warning => write!(f, "Warning"),
        }
    }
}

/// A single notification produced while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The category.
    pub notification_type: NotificationType,
    /// Byte offset in the raw record where the issue was seen.
    pub offset: usize,
    /// A human-readable description of the issue.
    pub message: String,
}

impl Notification {
    /// Create a new notification.
    pub fn new(
        notification_type: NotificationType,
        offset: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            notification_type,
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] @{}: {}",
            self.notification_type, self.offset, self.message
        )
    }
}

/// Collects notifications during a decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification and log it.
    pub fn notify(
        &mut self,
        notification_type: NotificationType,
        offset: usize,
        message: impl Into<String>,
    ) {
        let notification = Notification::new(notification_type, offset, message);
        tracing::warn!("{}", notification);
        self.items.push(notification);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Get all notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items
            .iter()
            .filter(|n| n.notification_type == nt)
            .collect()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Consume the collection into a `Vec`.
    pub fn into_vec(self) -> Vec<Notification> {
        self.items
    }
}

impl IntoIterator for NotificationCollection {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
