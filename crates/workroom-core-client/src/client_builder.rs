// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use crate::app::deps::{
    AppConfig, AppContext, AppDependencies, DynCuePlayer, DynTimeProvider,
};
use crate::app::services::{ProfileService, RoomService};
use crate::client::ClientInner;
use crate::domain::general::services::{CuePlayer, TimeProvider};
use crate::domain::participants::services::{ChangeFeedService, ParticipantsService};
use crate::domain::rooms::services::RoomAttributesService;
use crate::domain::shared::models::UserId;
use crate::infra::events::ImmediateClientEventDispatcher;
use crate::infra::general::{LoggingCuePlayer, SystemTimeProvider};
use crate::{Client, ClientDelegate};

pub struct UndefinedStore;

pub struct ClientBuilder<S> {
    app_config: AppConfig,
    cue_player: DynCuePlayer,
    delegate: Option<Box<dyn ClientDelegate>>,
    store: S,
    time_provider: DynTimeProvider,
    user_id: Option<UserId>,
}

impl ClientBuilder<UndefinedStore> {
    pub(crate) fn new() -> Self {
        ClientBuilder {
            app_config: Default::default(),
            cue_player: Arc::new(LoggingCuePlayer::default()),
            delegate: None,
            store: UndefinedStore,
            time_provider: Arc::new(SystemTimeProvider::default()),
            user_id: None,
        }
    }

    /// Sets the backing store which provides the participants table, its change feed and the
    /// rooms table.
    pub fn set_store<S>(self, store: S) -> ClientBuilder<Arc<S>>
    where
        S: ParticipantsService + ChangeFeedService + RoomAttributesService + 'static,
    {
        ClientBuilder {
            app_config: self.app_config,
            cue_player: self.cue_player,
            delegate: self.delegate,
            store: Arc::new(store),
            time_provider: self.time_provider,
            user_id: self.user_id,
        }
    }
}

impl<S> ClientBuilder<S> {
    pub fn set_cue_player<P: CuePlayer + 'static>(mut self, cue_player: P) -> Self {
        self.cue_player = Arc::new(cue_player);
        self
    }

    pub fn set_time_provider<T: TimeProvider + 'static>(mut self, time_provider: T) -> Self {
        self.time_provider = Arc::new(time_provider);
        self
    }

    pub fn set_config(mut self, config: AppConfig) -> Self {
        self.app_config = config;
        self
    }

    pub fn set_delegate(mut self, delegate: Option<Box<dyn ClientDelegate>>) -> Self {
        self.delegate = delegate;
        self
    }

    pub fn set_user_id(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

impl<S> ClientBuilder<Arc<S>>
where
    S: ParticipantsService + ChangeFeedService + RoomAttributesService + 'static,
{
    pub fn build(self) -> Client {
        let event_dispatcher = Arc::new(ImmediateClientEventDispatcher::new(self.delegate));

        let ctx = AppContext::new(self.app_config);
        if let Some(user_id) = self.user_id {
            ctx.set_user_id(user_id);
        }

        let dependencies = AppDependencies {
            change_feed_service: self.store.clone(),
            client_event_dispatcher: event_dispatcher.clone(),
            ctx: Arc::new(ctx),
            cue_player: self.cue_player,
            participants_service: self.store.clone(),
            room_attributes_service: self.store,
            time_provider: self.time_provider,
        };

        let client_inner = Arc::new(ClientInner {
            profile: ProfileService::from(&dependencies),
            room: RoomService::from(&dependencies),
            ctx: dependencies.ctx.clone(),
        });

        event_dispatcher.set_client_inner(Arc::downgrade(&client_inner));

        Client::from(client_inner)
    }
}
