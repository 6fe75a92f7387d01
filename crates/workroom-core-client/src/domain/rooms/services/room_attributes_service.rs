// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use workroom_wasm_utils::{SendUnlessWasm, SyncUnlessWasm};

use crate::domain::rooms::models::Room;
use crate::domain::shared::models::RoomId;

#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait RoomAttributesService: SendUnlessWasm + SyncUnlessWasm {
    /// Fails with `StoreError::LookupFailure` if the room does not exist.
    async fn load_room(&self, room_id: &RoomId) -> Result<Room>;
    async fn set_name(&self, room_id: &RoomId, name: &str) -> Result<()>;
}
