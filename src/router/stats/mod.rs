use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Per-user usage counters.
#[derive(Debug, Clone)]
pub struct UserStats {
    pub stickers_made: u64,
    pub scans_run: u64,
    pub last_active: DateTime<Utc>,
}

impl UserStats {
    fn new() -> Self {
        Self {
            stickers_made: 0,
            scans_run: 0,
            last_active: Utc::now(),
        }
    }
}

/// Process-wide user statistics. Like the cooldown map, entries live for
/// the process lifetime.
#[derive(Default)]
pub struct StatsStore {
    inner: Mutex<HashMap<String, UserStats>>,
}

impl StatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn update(&self, user: &str, f: impl FnOnce(&mut UserStats)) {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = map.entry(user.to_string()).or_insert_with(UserStats::new);
        entry.last_active = Utc::now();
        f(entry);
    }

    pub fn touch(&self, user: &str) {
        self.update(user, |_| {});
    }

    pub fn record_sticker(&self, user: &str) {
        self.update(user, |s| s.stickers_made += 1);
    }

    pub fn record_scan(&self, user: &str) {
        self.update(user, |s| s.scans_run += 1);
    }

    pub fn get(&self, user: &str) -> Option<UserStats> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user)
            .cloned()
    }
}
