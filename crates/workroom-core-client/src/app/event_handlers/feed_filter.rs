// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::participants::models::{FeedEvent, RowChange};
use crate::domain::shared::models::RoomId;

/// Decides which events of the table-wide change feed are forwarded to a room session.
///
/// Changes where either row belongs to the room are admitted. Changes without a usable old row
/// (missing, or without a room because the table only publishes primary keys for old rows) are
/// admitted as well, since a participant leaving the room can then only be recognized against the
/// local state. The final decision is made by `RoomPresence::is_relevant`.
#[derive(Debug, Clone)]
pub struct RoomFeedFilter {
    room_id: RoomId,
}

impl RoomFeedFilter {
    pub fn new(room_id: RoomId) -> Self {
        Self { room_id }
    }

    pub fn admits(&self, event: &FeedEvent) -> bool {
        match event {
            FeedEvent::Lost { .. } => true,
            FeedEvent::Change(change) => {
                change.concerns_room(&self.room_id)
                    || match change {
                        RowChange::Insert { .. } => false,
                        RowChange::Update { old, .. } => {
                            old.as_ref().map_or(true, |old| old.room_id.is_none())
                        }
                        RowChange::Delete { old } => old.room_id.is_none(),
                    }
            }
        }
    }
}
