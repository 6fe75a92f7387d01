// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::participants::models::{Participant, ParticipantPatch};
use crate::domain::participants::services::{
    ChangeFeedService, FeedEventHandler, ParticipantsService,
};
use crate::domain::rooms::models::Room;
use crate::domain::rooms::services::RoomAttributesService;
use crate::domain::shared::models::{RoomId, SubscriptionId, UserId};

use super::{PostgrestClient, RealtimeChangeFeed, SupabaseConfig};

/// The complete backing store of a Supabase project.
pub struct SupabaseStore {
    rest: PostgrestClient,
    realtime: RealtimeChangeFeed,
}

impl SupabaseStore {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            rest: PostgrestClient::new(config.clone()),
            realtime: RealtimeChangeFeed::new(config),
        }
    }
}

#[async_trait]
impl ParticipantsService for SupabaseStore {
    async fn load_participants(&self, room_id: &RoomId) -> Result<Vec<Participant>> {
        self.rest.load_participants(room_id).await
    }

    async fn load_participant(&self, user_id: &UserId) -> Result<Participant> {
        self.rest.load_participant(user_id).await
    }

    async fn update_participant(&self, user_id: &UserId, patch: &ParticipantPatch) -> Result<()> {
        self.rest.update_participant(user_id, patch).await
    }
}

#[async_trait]
impl ChangeFeedService for SupabaseStore {
    async fn subscribe(&self, handler: FeedEventHandler) -> Result<SubscriptionId> {
        self.realtime.subscribe(handler).await
    }

    async fn unsubscribe(&self, subscription_id: &SubscriptionId) -> Result<()> {
        self.realtime.unsubscribe(subscription_id).await
    }
}

#[async_trait]
impl RoomAttributesService for SupabaseStore {
    async fn load_room(&self, room_id: &RoomId) -> Result<Room> {
        self.rest.load_room(room_id).await
    }

    async fn set_name(&self, room_id: &RoomId, name: &str) -> Result<()> {
        self.rest.set_name(room_id, name).await
    }
}
