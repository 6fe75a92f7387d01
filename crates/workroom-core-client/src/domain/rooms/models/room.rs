// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::{RoomId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub owner_id: Option<UserId>,
}

impl Room {
    pub fn new(id: impl Into<RoomId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            owner_id: None,
        }
    }

    pub fn with_owner(mut self, owner_id: impl Into<UserId>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }
}
