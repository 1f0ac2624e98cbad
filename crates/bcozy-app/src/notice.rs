//! Transient info notices shown over the current screen

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default time a notice stays visible
pub const NOTICE_DURATION: Duration = Duration::from_secs(5);

/// Keep at most this many notices around at once
const MAX_NOTICES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfoNotice {
    /// Monotonic sequence number, unique per [`Notices`]
    pub seq: u64,
    pub text: String,
    pub severity: Severity,
    pub created_at: Instant,
    pub hide_after: Duration,
}

impl InfoNotice {
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.hide_after
    }
}

/// Queue of visible notices, newest last
#[derive(Debug)]
pub struct Notices {
    items: VecDeque<InfoNotice>,
    /// Every notice shown since the last [`Notices::take_shown`],
    /// including ones already evicted from `items`
    shown: Vec<InfoNotice>,
    hide_after: Duration,
    next_seq: u64,
}

impl Default for Notices {
    fn default() -> Self {
        Self::new(NOTICE_DURATION)
    }
}

impl Notices {
    pub fn new(hide_after: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            shown: Vec::new(),
            hide_after,
            next_seq: 1,
        }
    }

    pub fn success(&mut self, text: impl Into<String>) -> u64 {
        self.show(text.into(), Severity::Success, Instant::now())
    }

    pub fn error(&mut self, text: impl Into<String>) -> u64 {
        self.show(text.into(), Severity::Error, Instant::now())
    }

    pub fn show(&mut self, text: String, severity: Severity, now: Instant) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        if self.items.len() == MAX_NOTICES {
            self.items.pop_front();
        }
        let notice = InfoNotice {
            seq,
            text,
            severity,
            created_at: now,
            hide_after: self.hide_after,
        };
        self.shown.push(notice.clone());
        self.items.push_back(notice);
        seq
    }

    /// Drop notices whose time is up. Returns how many were removed.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        self.items.retain(|n| !n.is_expired_at(now));
        before - self.items.len()
    }

    /// Most recent visible notice
    pub fn current(&self) -> Option<&InfoNotice> {
        self.items.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InfoNotice> {
        self.items.iter()
    }

    /// Notices shown since the previous call, oldest first
    pub fn take_shown(&mut self) -> Vec<InfoNotice> {
        std::mem::take(&mut self.shown)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
