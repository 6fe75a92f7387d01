// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use workroom_wasm_utils::{SendUnlessWasm, SyncUnlessWasm};

use crate::domain::participants::models::{Participant, ParticipantPatch};
use crate::domain::shared::models::{RoomId, UserId};

/// Reads and writes rows of the participants table.
#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait ParticipantsService: SendUnlessWasm + SyncUnlessWasm {
    /// Returns all participants whose room is `room_id`.
    async fn load_participants(&self, room_id: &RoomId) -> Result<Vec<Participant>>;

    /// Fails with `StoreError::LookupFailure` if there is no row for `user_id`.
    async fn load_participant(&self, user_id: &UserId) -> Result<Participant>;

    /// Writes the columns set in `patch` and leaves all others untouched.
    async fn update_participant(&self, user_id: &UserId, patch: &ParticipantPatch) -> Result<()>;
}
