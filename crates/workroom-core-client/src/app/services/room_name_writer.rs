// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::pin::pin;

use futures::{Stream, StreamExt};
use tracing::{debug, error, info};

use workroom_proc_macros::DependenciesStruct;

use crate::app::deps::{DynClientEventDispatcher, DynRoomAttributesService};
use crate::domain::shared::models::RoomId;
use crate::ClientRoomEventType;

/// Writes the room name from a stream of already debounced drafts.
#[derive(DependenciesStruct)]
pub(super) struct RoomNameWriter {
    room_id: RoomId,
    /// The last name known to be stored.
    committed: String,
    client_event_dispatcher: DynClientEventDispatcher,
    room_attributes_service: DynRoomAttributesService,
}

impl RoomNameWriter {
    pub async fn run(mut self, drafts: impl Stream<Item = String>) {
        let mut drafts = pin!(drafts);
        while let Some(draft) = drafts.next().await {
            self.commit(draft).await;
        }
    }

    async fn commit(&mut self, draft: String) {
        if draft.is_empty() || draft == self.committed {
            debug!("Skipping write of unchanged or empty room name.");
            return;
        }

        if let Err(err) = self
            .room_attributes_service
            .set_name(&self.room_id, &draft)
            .await
        {
            error!(
                "Failed to write name of room {}. {}",
                self.room_id,
                err.to_string()
            );
            return;
        }

        info!("Renamed room {} to '{draft}'.", self.room_id);
        self.committed = draft.clone();
        self.client_event_dispatcher.dispatch_room_event(
            self.room_id.clone(),
            ClientRoomEventType::NameCommitted { name: draft },
        );
    }
}
