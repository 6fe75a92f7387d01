// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use strum_macros::Display;

use crate::domain::shared::models::{RoomId, UserId};

use super::Participant;

/// A single row change reported by the change feed. The feed is table wide, so the change may
/// concern any room.
#[derive(Debug, Clone, PartialEq)]
pub enum RowChange {
    Insert { new: Participant },
    /// `old` is only populated when the backing table publishes full old rows. Without it a
    /// participant moving out of a room can only be detected from the local copy.
    Update {
        new: Participant,
        old: Option<Participant>,
    },
    Delete { old: Participant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RowChangeKind {
    Insert,
    Update,
    Delete,
}

/// What a change feed subscriber receives.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Change(RowChange),
    /// The connection dropped or failed. No further events will be delivered.
    Lost { reason: String },
}

impl RowChange {
    pub fn kind(&self) -> RowChangeKind {
        match self {
            Self::Insert { .. } => RowChangeKind::Insert,
            Self::Update { .. } => RowChangeKind::Update,
            Self::Delete { .. } => RowChangeKind::Delete,
        }
    }

    pub fn participant_id(&self) -> &UserId {
        match self {
            Self::Insert { new } | Self::Update { new, .. } => &new.id,
            Self::Delete { old } => &old.id,
        }
    }

    pub fn new_row(&self) -> Option<&Participant> {
        match self {
            Self::Insert { new } | Self::Update { new, .. } => Some(new),
            Self::Delete { .. } => None,
        }
    }

    pub fn old_row(&self) -> Option<&Participant> {
        match self {
            Self::Insert { .. } => None,
            Self::Update { old, .. } => old.as_ref(),
            Self::Delete { old } => Some(old),
        }
    }

    /// Returns true if either the new or the old row is associated with `room_id`.
    pub fn concerns_room(&self, room_id: &RoomId) -> bool {
        self.new_row().is_some_and(|row| row.is_in_room(room_id))
            || self.old_row().is_some_and(|row| row.is_in_room(room_id))
    }
}
