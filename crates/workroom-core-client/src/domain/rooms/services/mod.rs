// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use room_attributes_service::RoomAttributesService;

mod room_attributes_service;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::room_attributes_service::MockRoomAttributesService;
}
