// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::domain::participants::models::{FeedEvent, Participant, ParticipantPatch, RowChange};
use crate::domain::participants::services::{
    ChangeFeedService, FeedEventHandler, ParticipantsService,
};
use crate::domain::rooms::models::Room;
use crate::domain::rooms::services::RoomAttributesService;
use crate::domain::shared::models::{RoomId, StoreError, SubscriptionId, UserId};

use super::{PARTICIPANTS_TABLE, ROOMS_TABLE};

/// A backing store that keeps its tables in memory.
///
/// Every committed change is delivered synchronously to all subscribers, in commit order, while
/// the store is locked. Handlers must therefore not call back into the store. Cloning the store
/// yields another handle to the same tables, which allows multiple clients to share it.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    tables: Mutex<Tables>,
    omit_old_rows: AtomicBool,
    fail_writes: AtomicBool,
}

#[derive(Default)]
struct Tables {
    participants: IndexMap<UserId, Participant>,
    rooms: HashMap<RoomId, Room>,
    subscribers: IndexMap<SubscriptionId, FeedEventHandler>,
    next_subscription_id: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes update events carry no old row, like a table that only publishes primary keys of
    /// changed rows.
    pub fn omit_old_rows(self) -> Self {
        self.inner.omit_old_rows.store(true, Ordering::SeqCst);
        self
    }

    /// Lets every subsequent write fail with `StoreError::WriteFailure` until reset.
    pub fn set_failing_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn insert_participant(&self, participant: Participant) {
        let mut tables = self.inner.tables.lock();
        let change = match tables
            .participants
            .insert(participant.id.clone(), participant.clone())
        {
            None => RowChange::Insert { new: participant },
            Some(old) => RowChange::Update {
                new: participant,
                old: self.old_row(old),
            },
        };
        tables.publish(change);
    }

    /// Moves a participant into `room_id`, or out of any room for `None`.
    pub fn set_room(&self, user_id: &UserId, room_id: Option<RoomId>) -> Result<(), StoreError> {
        let mut tables = self.inner.tables.lock();
        let Some(row) = tables.participants.get_mut(user_id) else {
            return Err(StoreError::lookup_failure(PARTICIPANTS_TABLE, user_id));
        };
        let old = row.clone();
        row.room_id = room_id;
        let new = row.clone();
        tables.publish(RowChange::Update {
            new,
            old: self.old_row(old),
        });
        Ok(())
    }

    pub fn delete_participant(&self, user_id: &UserId) -> Option<Participant> {
        let mut tables = self.inner.tables.lock();
        let old = tables.participants.shift_remove(user_id)?;
        tables.publish(RowChange::Delete { old: old.clone() });
        Some(old)
    }

    pub fn insert_room(&self, room: Room) {
        self.inner
            .tables
            .lock()
            .rooms
            .insert(room.id.clone(), room);
    }

    pub fn participant(&self, user_id: &UserId) -> Option<Participant> {
        self.inner.tables.lock().participants.get(user_id).cloned()
    }

    pub fn room(&self, room_id: &RoomId) -> Option<Room> {
        self.inner.tables.lock().rooms.get(room_id).cloned()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.tables.lock().subscribers.len()
    }

    /// Reports `FeedEvent::Lost` to every subscriber and drops all subscriptions.
    pub fn drop_feed(&self, reason: &str) {
        let mut tables = self.inner.tables.lock();
        for (_, handler) in tables.subscribers.drain(..) {
            handler(FeedEvent::Lost {
                reason: reason.to_string(),
            });
        }
    }

    fn old_row(&self, old: Participant) -> Option<Participant> {
        (!self.inner.omit_old_rows.load(Ordering::SeqCst)).then_some(old)
    }

    fn check_writable(&self, table: &'static str) -> Result<(), StoreError> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::write_failure(table, "writes are disabled"));
        }
        Ok(())
    }
}

impl Tables {
    fn publish(&self, change: RowChange) {
        debug!(
            "Publishing {} of {} to {} subscribers.",
            change.kind(),
            change.participant_id(),
            self.subscribers.len()
        );
        for handler in self.subscribers.values() {
            handler(FeedEvent::Change(change.clone()));
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[async_trait]
impl ParticipantsService for InMemoryStore {
    async fn load_participants(&self, room_id: &RoomId) -> Result<Vec<Participant>> {
        Ok(self
            .inner
            .tables
            .lock()
            .participants
            .values()
            .filter(|participant| participant.is_in_room(room_id))
            .cloned()
            .collect())
    }

    async fn load_participant(&self, user_id: &UserId) -> Result<Participant> {
        self.participant(user_id)
            .ok_or_else(|| StoreError::lookup_failure(PARTICIPANTS_TABLE, user_id).into())
    }

    async fn update_participant(&self, user_id: &UserId, patch: &ParticipantPatch) -> Result<()> {
        self.check_writable(PARTICIPANTS_TABLE)?;

        let mut tables = self.inner.tables.lock();
        let Some(row) = tables.participants.get_mut(user_id) else {
            return Err(StoreError::lookup_failure(PARTICIPANTS_TABLE, user_id).into());
        };

        let old = row.clone();
        row.apply(patch);
        let new = row.clone();

        tables.publish(RowChange::Update {
            new,
            old: self.old_row(old),
        });
        Ok(())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[async_trait]
impl ChangeFeedService for InMemoryStore {
    async fn subscribe(&self, handler: FeedEventHandler) -> Result<SubscriptionId> {
        let mut tables = self.inner.tables.lock();
        tables.next_subscription_id += 1;
        let subscription_id = SubscriptionId::from(format!("sub-{}", tables.next_subscription_id));
        tables.subscribers.insert(subscription_id.clone(), handler);
        Ok(subscription_id)
    }

    async fn unsubscribe(&self, subscription_id: &SubscriptionId) -> Result<()> {
        let removed = self
            .inner
            .tables
            .lock()
            .subscribers
            .shift_remove(subscription_id);

        if removed.is_none() {
            return Err(StoreError::SubscriptionFailure(format!(
                "Unknown subscription {subscription_id}"
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[async_trait]
impl RoomAttributesService for InMemoryStore {
    async fn load_room(&self, room_id: &RoomId) -> Result<Room> {
        self.room(room_id)
            .ok_or_else(|| StoreError::lookup_failure(ROOMS_TABLE, room_id).into())
    }

    async fn set_name(&self, room_id: &RoomId, name: &str) -> Result<()> {
        self.check_writable(ROOMS_TABLE)?;

        let mut tables = self.inner.tables.lock();
        let Some(room) = tables.rooms.get_mut(room_id) else {
            return Err(StoreError::lookup_failure(ROOMS_TABLE, room_id).into());
        };
        room.name = name.to_string();
        Ok(())
    }
}
