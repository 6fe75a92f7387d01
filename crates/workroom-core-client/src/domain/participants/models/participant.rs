// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::shared::models::{RoomId, UserId};

use super::{Appearance, ParticipantPatch, ParticipantStatus};

/// One row of the participants table.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: UserId,
    pub display_name: Option<String>,
    /// The room the participant is currently in. `None` means they are not in any room.
    pub room_id: Option<RoomId>,
    pub status: ParticipantStatus,
    /// The status to restore once the participant becomes active again after being away.
    pub pre_away_status: Option<ParticipantStatus>,
    pub last_activity: Option<DateTime<Utc>>,
    pub memo: String,
    pub appearance: Appearance,
}

impl Participant {
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            room_id: None,
            status: ParticipantStatus::default(),
            pre_away_status: None,
            last_activity: None,
            memo: String::new(),
            appearance: Appearance::default(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_room(mut self, room_id: impl Into<RoomId>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    pub fn without_room(mut self) -> Self {
        self.room_id = None;
        self
    }

    pub fn with_status(mut self, status: ParticipantStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_pre_away_status(mut self, status: Option<ParticipantStatus>) -> Self {
        self.pre_away_status = status;
        self
    }

    pub fn with_last_activity(mut self, timestamp: DateTime<Utc>) -> Self {
        self.last_activity = Some(timestamp);
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }
}

impl Participant {
    pub fn is_in_room(&self, room_id: &RoomId) -> bool {
        self.room_id.as_ref() == Some(room_id)
    }

    /// Returns true if the last recorded activity is at least `threshold` old. Participants that
    /// never reported any activity are not considered inactive.
    pub fn is_inactive(&self, now: &DateTime<Utc>, threshold: Duration) -> bool {
        let Some(last_activity) = self.last_activity else {
            return false;
        };

        now.signed_duration_since(last_activity)
            .to_std()
            .map(|elapsed| elapsed >= threshold)
            .unwrap_or(false)
    }

    /// The name to show for the participant.
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(self.id.as_ref())
    }

    pub fn apply(&mut self, patch: &ParticipantPatch) {
        if let Some(display_name) = &patch.display_name {
            self.display_name = display_name.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(pre_away_status) = patch.pre_away_status {
            self.pre_away_status = pre_away_status;
        }
        if let Some(last_activity) = patch.last_activity {
            self.last_activity = Some(last_activity);
        }
        if let Some(memo) = &patch.memo {
            self.memo = memo.clone();
        }
        if let Some(appearance) = &patch.appearance {
            self.appearance = appearance.clone();
        }
    }
}
