// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use change_feed_service::{ChangeFeedService, FeedEventHandler};
pub use participants_service::ParticipantsService;

mod change_feed_service;
mod participants_service;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::change_feed_service::MockChangeFeedService;
    pub use super::participants_service::MockParticipantsService;
}
