use crate::config::CooldownsConfig;
use crate::errors::BotError;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Rate-limited action kinds, each with its own window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    General,
    Sticker,
    Scan,
}

/// Per-(user, action) cooldown gate.
///
/// Entries are created on first use and never evicted — the map grows for
/// the process lifetime, which is acceptable at bot scale.
pub struct CooldownTracker {
    windows: CooldownsConfig,
    last: Mutex<HashMap<(String, ActionKind), Instant>>,
}

impl CooldownTracker {
    pub fn new(windows: CooldownsConfig) -> Self {
        Self {
            windows,
            last: Mutex::new(HashMap::new()),
        }
    }

    fn window(&self, kind: ActionKind) -> Duration {
        let secs = match kind {
            ActionKind::General => self.windows.general_secs,
            ActionKind::Sticker => self.windows.sticker_secs,
            ActionKind::Scan => self.windows.scan_secs,
        };
        Duration::from_secs(secs)
    }

    /// Atomic check-and-record: the lock spans both the read and the
    /// update, so two near-simultaneous requests from the same user cannot
    /// both pass. Rejected attempts do not refresh the window.
    pub fn check(&self, user: &str, kind: ActionKind) -> Result<(), BotError> {
        let window = self.window(kind);
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let key = (user.to_string(), kind);

        if let Some(prev) = last.get(&key) {
            let elapsed = now.duration_since(*prev);
            if elapsed < window {
                let remaining_secs = (window - elapsed).as_secs().max(1);
                return Err(BotError::CooldownActive { remaining_secs });
            }
        }
        last.insert(key, now);
        Ok(())
    }
}
