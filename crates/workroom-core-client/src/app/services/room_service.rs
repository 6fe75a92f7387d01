// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::{bail, Result};
use parking_lot::Mutex;
use tracing::info;

use crate::app::deps::AppDependencies;
use crate::app::dtos::ParticipantInfo;
use crate::domain::shared::models::{RoomId, UserId};
use crate::{ClientEvent, ClientRoomEventType};

use super::room_session::RoomSession;

/// Entering and leaving rooms, and everything that happens while being in one.
pub struct RoomService {
    deps: AppDependencies,
    session: Mutex<Option<RoomSession>>,
}

impl From<&AppDependencies> for RoomService {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            deps: deps.clone(),
            session: Default::default(),
        }
    }
}

impl RoomService {
    /// Leaves the current room (if any) and enters `room_id`.
    ///
    /// Loads the participants of the room and subscribes to the change feed. Failures of either
    /// are returned, in which case the client is not in any room afterwards.
    #[tracing::instrument(skip(self))]
    pub async fn enter_room(&self, room_id: &RoomId) -> Result<()> {
        self.leave_room().await;

        let session = RoomSession::start(room_id.clone(), &self.deps).await?;
        let previous_session = self.session.lock().replace(session);

        if let Some(previous_session) = previous_session {
            previous_session.close().await;
        }

        info!("Entered room {room_id}.");
        self.deps
            .client_event_dispatcher
            .dispatch_room_event(room_id.clone(), ClientRoomEventType::ParticipantsLoaded);

        Ok(())
    }

    /// Stops all room activity and releases the change feed subscription.
    #[tracing::instrument(skip(self))]
    pub async fn leave_room(&self) {
        let Some(session) = self.session.lock().take() else {
            return;
        };

        let room_id = session.room_id().clone();
        session.close().await;

        info!("Left room {room_id}.");
        self.deps
            .client_event_dispatcher
            .dispatch_event(ClientEvent::PresenceStopped { room_id });
    }

    /// Reports local input activity, which is written as the local participant's activity
    /// timestamp right away.
    pub fn record_activity(&self) {
        if let Some(session) = self.session.lock().as_ref() {
            session.record_activity();
        }
    }

    /// Updates the draft of the room name. The name is written once no further drafts arrived
    /// for the debounce window.
    pub fn set_room_name(&self, draft: impl Into<String>) -> Result<()> {
        let guard = self.session.lock();
        let Some(session) = guard.as_ref() else {
            bail!("Cannot rename the room since the client is not in a room.")
        };
        session.set_room_name(draft.into());
        Ok(())
    }

    /// The participants of the current room, the local participant first.
    pub fn participants(&self) -> Vec<ParticipantInfo> {
        let Some((viewer_id, snapshot)) = self
            .session
            .lock()
            .as_ref()
            .map(|session| (session.viewer_id().clone(), session.snapshot()))
        else {
            return vec![];
        };

        let now = self.deps.time_provider.now();
        let threshold = self.deps.ctx.config.away_threshold;
        let highlighted_ids = snapshot.highlighted_ids;

        snapshot
            .participants
            .into_iter()
            .map(|participant| ParticipantInfo {
                is_self: participant.id == viewer_id,
                is_highlighted: highlighted_ids.contains(&participant.id),
                is_inactive: participant.is_inactive(&now, threshold),
                participant,
            })
            .collect()
    }

    pub fn highlighted_ids(&self) -> Vec<UserId> {
        self.session
            .lock()
            .as_ref()
            .map(|session| session.snapshot().highlighted_ids)
            .unwrap_or_default()
    }

    pub fn current_room_id(&self) -> Option<RoomId> {
        self.session
            .lock()
            .as_ref()
            .map(|session| session.room_id().clone())
    }
}
