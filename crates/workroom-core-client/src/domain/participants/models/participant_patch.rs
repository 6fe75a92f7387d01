// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};

use super::{Appearance, ParticipantStatus};

/// A partial update of a participant row. `None` leaves a column untouched, nullable columns use
/// a nested `Option` so that they can be written as null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticipantPatch {
    pub display_name: Option<Option<String>>,
    pub status: Option<ParticipantStatus>,
    pub pre_away_status: Option<Option<ParticipantStatus>>,
    pub last_activity: Option<DateTime<Utc>>,
    pub memo: Option<String>,
    pub appearance: Option<Appearance>,
}

impl ParticipantPatch {
    /// The self pulse.
    pub fn activity(now: DateTime<Utc>) -> Self {
        Self {
            last_activity: Some(now),
            ..Default::default()
        }
    }

    /// Moves a participant into `away`, remembering `current` for the restore.
    pub fn mark_away(current: ParticipantStatus) -> Self {
        Self {
            status: Some(ParticipantStatus::Away),
            pre_away_status: Some(Some(current)),
            ..Default::default()
        }
    }

    /// Moves a participant out of `away` back to `saved`.
    pub fn restore(saved: ParticipantStatus) -> Self {
        Self {
            status: Some(saved),
            pre_away_status: Some(None),
            ..Default::default()
        }
    }

    pub fn set_display_name(mut self, name: Option<String>) -> Self {
        self.display_name = Some(name);
        self
    }

    pub fn set_status(mut self, status: ParticipantStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn set_pre_away_status(mut self, status: Option<ParticipantStatus>) -> Self {
        self.pre_away_status = Some(status);
        self
    }

    pub fn set_last_activity(mut self, timestamp: DateTime<Utc>) -> Self {
        self.last_activity = Some(timestamp);
        self
    }

    pub fn set_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn set_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = Some(appearance);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
