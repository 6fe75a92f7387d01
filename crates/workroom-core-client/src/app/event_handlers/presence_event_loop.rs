// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tracing::{debug, error, info};

use workroom_wasm_utils::spawn;

use crate::app::deps::{
    AppDependencies, DynClientEventDispatcher, DynParticipantsService, DynTimeProvider,
};
use crate::app::event_handlers::{SessionEvent, SideEffectDispatcher};
use crate::domain::participants::models::{
    FeedEvent, Participant, ParticipantPatch, PresenceChange, RestoreRequest, RoomPresence,
    RowChange,
};
use crate::domain::shared::models::{RoomId, UserId};
use crate::ClientRoomEventType;

/// What the rest of the client gets to see of a running session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomSnapshot {
    /// The participants of the room, the local participant first.
    pub participants: Vec<Participant>,
    pub highlighted_ids: Vec<UserId>,
}

/// Owns the presence state of a room session and processes all of its inputs sequentially.
///
/// Writes to the backing store are spawned and never awaited by the loop. Their failures are
/// logged and otherwise ignored. The feed delivers the outcome of every write back to the loop.
pub struct PresenceEventLoop {
    presence: RoomPresence,
    side_effects: SideEffectDispatcher,
    /// Participants for which this client issued a restore that was not yet observed. They are
    /// skipped by the next inactivity sweep.
    pending_restores: HashSet<UserId>,
    /// When this client last wrote the activity timestamp of the local participant.
    last_pulse: Option<DateTime<Utc>>,
    snapshot: watch::Sender<RoomSnapshot>,
    away_threshold: Duration,
    client_event_dispatcher: DynClientEventDispatcher,
    participants_service: DynParticipantsService,
    time_provider: DynTimeProvider,
}

impl PresenceEventLoop {
    /// `events` is the sender side of the queue the loop is run with. It is used to deliver
    /// highlight expirations.
    pub fn new(
        presence: RoomPresence,
        deps: &AppDependencies,
        events: UnboundedSender<SessionEvent>,
    ) -> (Self, watch::Receiver<RoomSnapshot>) {
        let (snapshot, snapshot_receiver) = watch::channel(RoomSnapshot {
            participants: presence.sorted(),
            highlighted_ids: vec![],
        });

        let event_loop = Self {
            presence,
            side_effects: SideEffectDispatcher::new(
                deps.cue_player.clone(),
                &deps.ctx.config,
                events,
            ),
            pending_restores: Default::default(),
            last_pulse: None,
            snapshot,
            away_threshold: deps.ctx.config.away_threshold,
            client_event_dispatcher: deps.client_event_dispatcher.clone(),
            participants_service: deps.participants_service.clone(),
            time_provider: deps.time_provider.clone(),
        };

        (event_loop, snapshot_receiver)
    }

    pub async fn run(mut self, mut events: UnboundedReceiver<SessionEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event);
        }
        debug!("Event loop for room {} finished.", self.presence.room_id());
    }

    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Feed(FeedEvent::Change(change)) => self.handle_row_change(change),
            SessionEvent::Feed(FeedEvent::Lost { reason }) => {
                error!(
                    "Change feed for room {} was lost. {reason}",
                    self.presence.room_id()
                );
                self.dispatch(ClientRoomEventType::FeedLost);
            }
            SessionEvent::LocalActivity | SessionEvent::ActivityPulse => self.pulse(),
            SessionEvent::InactivitySweep => self.sweep(),
            SessionEvent::HighlightExpired(token) => {
                if self.side_effects.expire(&token) {
                    self.dispatch_highlights();
                    self.publish();
                }
            }
        }
    }

    pub fn presence(&self) -> &RoomPresence {
        &self.presence
    }

    pub fn room_id(&self) -> &RoomId {
        self.presence.room_id()
    }

    pub fn is_highlighted(&self, user_id: &UserId) -> bool {
        self.side_effects.is_highlighted(user_id)
    }

    pub fn pending_restores(&self) -> &HashSet<UserId> {
        &self.pending_restores
    }
}

impl PresenceEventLoop {
    fn handle_row_change(&mut self, change: RowChange) {
        let reconciliation = self.presence.apply(&change);

        if let Some(new) = change.new_row() {
            if !new.status.is_away() {
                self.pending_restores.remove(&new.id);
            }
        }

        if let Some(request) = reconciliation.restore {
            self.restore(request);
        }

        let Some(presence_change) = reconciliation.change else {
            return;
        };

        self.dispatch(match &presence_change {
            PresenceChange::Joined(id) => ClientRoomEventType::ParticipantJoined { id: id.clone() },
            PresenceChange::Left(id) => ClientRoomEventType::ParticipantLeft { id: id.clone() },
            PresenceChange::MemoChanged(id) => ClientRoomEventType::MemoChanged { id: id.clone() },
            PresenceChange::Updated(id) => {
                ClientRoomEventType::ParticipantUpdated { id: id.clone() }
            }
        });

        if self.side_effects.handle_change(&presence_change) {
            self.dispatch_highlights();
        }

        self.publish();
    }

    fn restore(&mut self, request: RestoreRequest) {
        if !self.pending_restores.insert(request.user_id.clone()) {
            debug!("Restore of {} is already pending.", request.user_id);
            return;
        }

        info!(
            "Restoring status of {} to {}.",
            request.user_id, request.status
        );
        self.write_patch(
            request.user_id,
            ParticipantPatch::restore(request.status),
            "restored status",
        );
    }

    fn pulse(&mut self) {
        let now = self.time_provider.now();
        self.last_pulse = Some(now);
        self.write_patch(
            self.presence.viewer_id().clone(),
            ParticipantPatch::activity(now),
            "activity timestamp",
        );
    }

    fn sweep(&mut self) {
        let now = self.time_provider.now();
        let pending_restores = std::mem::take(&mut self.pending_restores);
        let viewer_pulsed_recently = self.last_pulse.is_some_and(|last_pulse| {
            now.signed_duration_since(last_pulse)
                .to_std()
                .map(|elapsed| elapsed < self.away_threshold)
                .unwrap_or(true)
        });

        for (user_id, status) in self.presence.stale_participants(&now, self.away_threshold) {
            if pending_restores.contains(&user_id) {
                debug!("Skipping {user_id} since a restore is pending.");
                continue;
            }
            // The stored timestamp of the viewer lags behind pulses that are still in flight.
            if viewer_pulsed_recently && &user_id == self.presence.viewer_id() {
                continue;
            }

            info!("Marking {user_id} as away after inactivity.");
            self.write_patch(user_id, ParticipantPatch::mark_away(status), "away status");
        }
    }

    fn write_patch(&self, user_id: UserId, patch: ParticipantPatch, description: &'static str) {
        let participants_service = self.participants_service.clone();

        spawn(async move {
            if let Err(err) = participants_service
                .update_participant(&user_id, &patch)
                .await
            {
                error!(
                    "Failed to write {description} of {user_id}. {}",
                    err.to_string()
                );
            }
        });
    }

    fn dispatch(&self, event: ClientRoomEventType) {
        self.client_event_dispatcher
            .dispatch_room_event(self.presence.room_id().clone(), event);
    }

    fn dispatch_highlights(&self) {
        self.dispatch(ClientRoomEventType::HighlightsChanged {
            ids: self.side_effects.highlighted_ids(),
        });
    }

    fn publish(&self) {
        self.snapshot.send_replace(RoomSnapshot {
            participants: self.presence.sorted(),
            highlighted_ids: self.side_effects.highlighted_ids(),
        });
    }
}
