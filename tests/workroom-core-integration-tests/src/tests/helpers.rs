// workroom/workroom-core-integration-tests
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;

use workroom_core_client::domain::general::services::CuePlayer;
use workroom_core_client::dtos::{Cue, ParticipantPatch, UserId};
use workroom_core_client::test::MockAppDependencies;
use workroom_core_client::{Client, ClientDelegate, ClientEvent, ClientRoomEventType};

/// Gives spawned tasks the chance to run until they are blocked.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

/// Collects the events a client dispatches to its delegate.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<ClientEvent>>>);

impl EventLog {
    pub fn take(&self) -> Vec<ClientEvent> {
        std::mem::take(&mut *self.0.lock())
    }

    pub fn take_room_events(&self) -> Vec<ClientRoomEventType> {
        self.take()
            .into_iter()
            .filter_map(|event| match event {
                ClientEvent::RoomChanged { r#type, .. } => Some(r#type),
                ClientEvent::PresenceStopped { .. } => None,
            })
            .collect()
    }
}

impl ClientDelegate for EventLog {
    fn handle_event(&self, _client: Client, event: ClientEvent) {
        self.0.lock().push(event)
    }
}

#[derive(Clone, Default)]
pub struct CueLog(Arc<Mutex<Vec<Cue>>>);

impl CueLog {
    pub fn take(&self) -> Vec<Cue> {
        std::mem::take(&mut *self.0.lock())
    }
}

impl CuePlayer for CueLog {
    fn play(&self, cue: Cue) -> Result<()> {
        self.0.lock().push(cue);
        Ok(())
    }
}

pub type Recorded<T> = Arc<Mutex<Vec<T>>>;

pub fn record_room_events(deps: &mut MockAppDependencies) -> Recorded<ClientRoomEventType> {
    let events = Recorded::default();
    {
        let events = events.clone();
        deps.client_event_dispatcher
            .expect_dispatch_room_event()
            .returning(move |_, event| events.lock().push(event));
    }
    events
}

pub fn record_cues(deps: &mut MockAppDependencies) -> Recorded<Cue> {
    let cues = Recorded::default();
    {
        let cues = cues.clone();
        deps.cue_player.expect_play().returning(move |cue| {
            cues.lock().push(cue);
            Ok(())
        });
    }
    cues
}

pub fn record_writes(deps: &mut MockAppDependencies) -> Recorded<(UserId, ParticipantPatch)> {
    let writes = Recorded::default();
    {
        let writes = writes.clone();
        deps.participants_service
            .expect_update_participant()
            .returning(move |user_id, patch| {
                writes.lock().push((user_id.clone(), patch.clone()));
                Box::pin(async { Ok(()) })
            });
    }
    writes
}
