// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::{RoomId, UserId};

/// A room bookmarked by a user. Maintained by the room selection UI, the presence core never
/// touches favorites.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Favorite {
    pub user_id: UserId,
    pub room_id: RoomId,
}
