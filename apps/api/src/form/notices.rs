//! User-facing notices raised by a form.
//!
//! At most one notice per key is active at a time. A notice stays active
//! until dismissed or until its time-to-live elapses, so a repeated failure
//! with the same key does not stack a second message.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub key: String,
    pub level: NoticeLevel,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NoticeCenter {
    ttl: Duration,
    notices: Vec<Notice>,
}

impl NoticeCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            notices: Vec::new(),
        }
    }

    /// Returns `false` when a notice with the same key is still active.
    pub fn raise(
        &mut self,
        key: &str,
        level: NoticeLevel,
        message: &str,
        now: DateTime<Utc>,
    ) -> bool {
        self.expire(now);
        if self.notices.iter().any(|n| n.key == key) {
            return false;
        }
        self.notices.push(Notice {
            key: key.to_string(),
            level,
            message: message.to_string(),
            raised_at: now,
        });
        true
    }

    pub fn dismiss(&mut self, key: &str) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.key != key);
        self.notices.len() != before
    }

    pub fn active(&self, now: DateTime<Utc>) -> Vec<Notice> {
        self.notices
            .iter()
            .filter(|n| now - n.raised_at < self.ttl)
            .cloned()
            .collect()
    }

    fn expire(&mut self, now: DateTime<Utc>) {
        let ttl = self.ttl;
        self.notices.retain(|n| now - n.raised_at < ttl);
    }
}
