// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tokio::sync::watch;
use tracing::{error, info, warn};

use workroom_wasm_utils::{spawn, ScheduledTasks, UnboundedReceiverStream, WorkroomStreamExt};

use crate::app::deps::{AppConfig, AppDependencies, DynChangeFeedService};
use crate::app::event_handlers::{
    PresenceEventLoop, RoomFeedFilter, RoomSnapshot, SessionEvent,
};
use crate::domain::participants::models::RoomPresence;
use crate::domain::shared::models::{RoomId, SubscriptionId, UserId};

use super::room_name_writer::{RoomNameWriter, RoomNameWriterDependencies};

/// Everything that runs while the local user is in a room: the change feed subscription, the
/// event loop, the heartbeat timers and the room name writer.
///
/// Closing or dropping the session stops all of them and releases the subscription.
pub(super) struct RoomSession {
    room_id: RoomId,
    viewer_id: UserId,
    events: UnboundedSender<SessionEvent>,
    room_names: UnboundedSender<String>,
    snapshot: watch::Receiver<RoomSnapshot>,
    subscription_id: Option<SubscriptionId>,
    change_feed_service: DynChangeFeedService,
    tasks: ScheduledTasks,
}

impl RoomSession {
    /// Loads the participants of `room_id`, subscribes to the change feed and starts all tasks.
    /// Fails if either the initial read or the subscription fails.
    pub async fn start(room_id: RoomId, deps: &AppDependencies) -> Result<Self> {
        let viewer_id = deps.ctx.connected_user_id()?;
        let config = &deps.ctx.config;

        let mut presence = RoomPresence::new(room_id.clone(), viewer_id.clone());
        presence.seed(
            deps.participants_service
                .load_participants(&room_id)
                .await?,
        );
        info!(
            "Loaded {} participants of room {room_id}.",
            presence.participants().len()
        );

        let (events, events_receiver) = unbounded_channel();

        let subscription_id = {
            let filter = RoomFeedFilter::new(room_id.clone());
            let events = events.clone();
            deps.change_feed_service
                .subscribe(Box::new(move |event| {
                    if filter.admits(&event) {
                        _ = events.send(SessionEvent::Feed(event));
                    }
                }))
                .await?
        };

        let room_name = match deps.room_attributes_service.load_room(&room_id).await {
            Ok(room) => room.name,
            Err(err) => {
                warn!(
                    "Failed to load room {room_id}. Starting without a room name. {}",
                    err.to_string()
                );
                String::new()
            }
        };

        let (event_loop, snapshot) = PresenceEventLoop::new(presence, deps, events.clone());
        let (room_names, room_names_receiver) = unbounded_channel();
        let mut tasks = ScheduledTasks::new();

        // Entering the room counts as activity. The pulse is queued ahead of the first sweep.
        _ = events.send(SessionEvent::LocalActivity);
        tasks.spawn(event_loop.run(events_receiver));
        schedule_heartbeat(&mut tasks, config, &events);
        let room_name_writer = RoomNameWriter::from(RoomNameWriterDependencies {
            room_id: room_id.clone(),
            committed: room_name,
            client_event_dispatcher: deps.client_event_dispatcher.clone(),
            room_attributes_service: deps.room_attributes_service.clone(),
        });
        tasks.spawn(
            room_name_writer.run(
                UnboundedReceiverStream::new(room_names_receiver)
                    .debounced(config.room_name_debounce_window),
            ),
        );

        Ok(Self {
            room_id,
            viewer_id,
            events,
            room_names,
            snapshot,
            subscription_id: Some(subscription_id),
            change_feed_service: deps.change_feed_service.clone(),
            tasks,
        })
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn viewer_id(&self) -> &UserId {
        &self.viewer_id
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn record_activity(&self) {
        _ = self.events.send(SessionEvent::LocalActivity);
    }

    pub fn set_room_name(&self, draft: String) {
        _ = self.room_names.send(draft);
    }

    pub async fn close(mut self) {
        self.tasks.cancel_all();

        let Some(subscription_id) = self.subscription_id.take() else {
            return;
        };

        if let Err(err) = self.change_feed_service.unsubscribe(&subscription_id).await {
            error!(
                "Failed to unsubscribe from change feed of room {}. {}",
                self.room_id,
                err.to_string()
            );
        }
    }
}

impl Drop for RoomSession {
    fn drop(&mut self) {
        self.tasks.cancel_all();

        let Some(subscription_id) = self.subscription_id.take() else {
            return;
        };

        let change_feed_service = self.change_feed_service.clone();
        let release = async move {
            if let Err(err) = change_feed_service.unsubscribe(&subscription_id).await {
                error!("Failed to unsubscribe from change feed. {}", err.to_string());
            }
        };

        // Without a runtime to spawn on (e.g. when the client is dropped after its runtime
        // returned) the subscription is released on the dropping thread.
        #[cfg(not(target_arch = "wasm32"))]
        if tokio::runtime::Handle::try_current().is_err() {
            futures::executor::block_on(release);
            return;
        }

        spawn(release);
    }
}

/// Schedules the self pulse and the inactivity sweep. The sweep runs once right away so that
/// participants who went stale while nobody watched are caught on entry.
fn schedule_heartbeat(
    tasks: &mut ScheduledTasks,
    config: &AppConfig,
    events: &UnboundedSender<SessionEvent>,
) {
    let pulse = events.clone();
    tasks.spawn_repeating(config.activity_pulse_interval, false, move || {
        let pulse = pulse.clone();
        async move {
            _ = pulse.send(SessionEvent::ActivityPulse);
        }
    });

    let sweep = events.clone();
    tasks.spawn_repeating(config.inactivity_sweep_interval, true, move || {
        let sweep = sweep.clone();
        async move {
            _ = sweep.send(SessionEvent::InactivitySweep);
        }
    });
}
