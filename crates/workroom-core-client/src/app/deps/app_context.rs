// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use anyhow::Result;
use parking_lot::RwLock;

use crate::domain::shared::models::UserId;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// How often the local participant writes its activity timestamp.
    pub activity_pulse_interval: Duration,
    /// How often the participants of the room are checked for inactivity.
    pub inactivity_sweep_interval: Duration,
    /// The time without activity after which a participant is moved to `away`.
    pub away_threshold: Duration,
    pub memo_highlight_duration: Duration,
    pub join_leave_highlight_duration: Duration,
    /// The quiet period after the last edit of the room name before it is written.
    pub room_name_debounce_window: Duration,
}

pub struct AppContext {
    pub user_id: RwLock<Option<UserId>>,
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            user_id: Default::default(),
            config,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            activity_pulse_interval: Duration::from_secs(30),
            inactivity_sweep_interval: Duration::from_secs(60),
            away_threshold: Duration::from_secs(10 * 60),
            memo_highlight_duration: Duration::from_secs(3),
            join_leave_highlight_duration: Duration::from_secs(10),
            room_name_debounce_window: Duration::from_millis(1500),
        }
    }
}

impl AppContext {
    pub fn connected_user_id(&self) -> Result<UserId> {
        self.user_id.read().clone().ok_or(anyhow::anyhow!(
            "Failed to read the user's id since no user is signed in."
        ))
    }

    pub fn set_user_id(&self, user_id: UserId) {
        self.user_id.write().replace(user_id);
    }

    pub fn reset_user_id(&self) {
        self.user_id.write().take();
    }
}
