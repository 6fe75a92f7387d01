// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::{RoomId, UserId};

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// Something changed in the room the client is currently in.
    RoomChanged {
        room_id: RoomId,
        r#type: ClientRoomEventType,
    },

    /// The client left `room_id`. No further events for this room will be dispatched.
    PresenceStopped { room_id: RoomId },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientRoomEventType {
    /// The initial list of participants was loaded after entering the room.
    ParticipantsLoaded,

    /// A participant entered the room.
    ParticipantJoined { id: UserId },

    /// A participant left the room or was deleted.
    ParticipantLeft { id: UserId },

    /// A participant changed their memo.
    MemoChanged { id: UserId },

    /// Any other attribute of a participant changed, like the status or the appearance.
    ParticipantUpdated { id: UserId },

    /// The set of highlighted participants changed.
    HighlightsChanged { ids: Vec<UserId> },

    /// A new room name was written.
    NameCommitted { name: String },

    /// The change feed dropped. The room needs to be entered again to receive updates.
    FeedLost,
}
