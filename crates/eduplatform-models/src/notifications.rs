//! Per-user notifications.
//!
//! Each [`UserProfile`](crate::users::UserProfile) owns an [`Inbox`]. Ids are
//! local to the inbox, start at 1 and are never reused, even after a
//! notification is deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::{IdSequence, NotificationId, UserId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::High => "high",
        })
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            _ => Err(format!("{:?} is not a valid priority.", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub recipient_id: UserId,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
    pub priority: Priority,
}

impl Notification {
    pub fn new(
        id: NotificationId,
        message: impl Into<String>,
        recipient_id: UserId,
        priority: Priority,
    ) -> Self {
        Self {
            id,
            message: message.into(),
            recipient_id,
            created_at: Utc::now(),
            is_read: false,
            priority,
        }
    }

    pub fn mark_as_read(&mut self) {
        self.is_read = true;
    }

    pub fn is_high_priority(&self) -> bool {
        self.priority == Priority::High
    }
}

/// Ordered, append-only list of notifications for one recipient.
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    items: Vec<Notification>,
    sequence: IdSequence,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        recipient_id: UserId,
        message: impl Into<String>,
        priority: Priority,
    ) -> NotificationId {
        let id: NotificationId = self.sequence.next_id();
        self.items
            .push(Notification::new(id, message, recipient_id, priority));
        id
    }

    /// All notifications, high priority first. The sort is stable, so
    /// insertion order is preserved within each priority.
    pub fn sorted(&self) -> Vec<&Notification> {
        let mut view: Vec<&Notification> = self.items.iter().collect();
        view.sort_by_key(|n| !n.is_high_priority());
        view
    }

    /// Removes the first notification with `id`.
    pub fn remove(&mut self, id: NotificationId) -> bool {
        match self.items.iter().position(|n| n.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn mark_as_read(&mut self, id: NotificationId) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.mark_as_read();
                true
            }
            None => false,
        }
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Notifications in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }
}
