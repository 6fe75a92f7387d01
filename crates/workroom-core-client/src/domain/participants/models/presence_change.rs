// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::general::models::Cue;
use crate::domain::shared::models::UserId;

/// How a feed event changed the local view of the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenceChange {
    Joined(UserId),
    Left(UserId),
    MemoChanged(UserId),
    /// Any other field changed. Does not trigger a side effect.
    Updated(UserId),
}

impl PresenceChange {
    pub fn user_id(&self) -> &UserId {
        match self {
            Self::Joined(id) | Self::Left(id) | Self::MemoChanged(id) | Self::Updated(id) => id,
        }
    }

    pub fn cue(&self) -> Option<Cue> {
        match self {
            Self::Joined(_) => Some(Cue::Join),
            Self::Left(_) => Some(Cue::Leave),
            Self::MemoChanged(_) => Some(Cue::Memo),
            Self::Updated(_) => None,
        }
    }
}
