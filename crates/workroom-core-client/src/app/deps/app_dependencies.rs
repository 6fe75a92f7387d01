// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use crate::app::deps::app_context::AppContext;
use crate::app::event_handlers::ClientEventDispatcherTrait;
use crate::domain::general::services::{CuePlayer, TimeProvider};
use crate::domain::participants::services::{ChangeFeedService, ParticipantsService};
use crate::domain::rooms::services::RoomAttributesService;

pub type DynAppContext = Arc<AppContext>;
pub type DynChangeFeedService = Arc<dyn ChangeFeedService>;
pub type DynClientEventDispatcher = Arc<dyn ClientEventDispatcherTrait>;
pub type DynCuePlayer = Arc<dyn CuePlayer>;
pub type DynParticipantsService = Arc<dyn ParticipantsService>;
pub type DynRoomAttributesService = Arc<dyn RoomAttributesService>;
pub type DynTimeProvider = Arc<dyn TimeProvider>;

#[derive(Clone)]
pub struct AppDependencies {
    pub change_feed_service: DynChangeFeedService,
    pub client_event_dispatcher: DynClientEventDispatcher,
    pub ctx: DynAppContext,
    pub cue_player: DynCuePlayer,
    pub participants_service: DynParticipantsService,
    pub room_attributes_service: DynRoomAttributesService,
    pub time_provider: DynTimeProvider,
}
