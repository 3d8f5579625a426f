use tokio::time::{Duration, Instant};

/// How long a notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Success,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub raised_at: Instant,
}

/// Transient messages for the user. Nothing here is ever fatal.
#[derive(Debug)]
pub struct Notifications {
    notices: Vec<Notice>,
    unseen: usize,
    ttl: Duration,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            notices: Vec::new(),
            unseen: 0,
            ttl,
        }
    }

    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
            raised_at: Instant::now(),
        });
        self.unseen += 1;
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    /// Notices raised since the last call, oldest first.
    pub fn take_unseen(&mut self) -> Vec<Notice> {
        let start = self.notices.len() - self.unseen;
        self.unseen = 0;
        self.notices[start..].to_vec()
    }

    /// Drop notices older than the TTL. Notices are kept in the order they
    /// were raised, so the expired ones form a prefix.
    pub fn dismiss_expired(&mut self) {
        let now = Instant::now();
        let expired = self
            .notices
            .iter()
            .take_while(|n| now.duration_since(n.raised_at) >= self.ttl)
            .count();
        self.notices.drain(..expired);
        self.unseen = self.unseen.min(self.notices.len());
    }

    pub fn last_error(&self) -> Option<&str> {
        self.notices
            .iter()
            .rev()
            .find(|n| n.level == NoticeLevel::Error)
            .map(|n| n.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn clear(&mut self) {
        self.notices.clear();
        self.unseen = 0;
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(NOTICE_TTL)
    }
}
