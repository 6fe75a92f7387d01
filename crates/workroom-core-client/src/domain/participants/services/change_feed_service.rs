// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use workroom_wasm_utils::{SendUnlessWasm, SyncUnlessWasm};

use crate::domain::participants::models::FeedEvent;
use crate::domain::shared::models::SubscriptionId;

#[cfg(not(target_arch = "wasm32"))]
pub type FeedEventHandler = Box<dyn Fn(FeedEvent) + Send + Sync>;
#[cfg(target_arch = "wasm32")]
pub type FeedEventHandler = Box<dyn Fn(FeedEvent)>;

/// The change notifications of the participants table.
///
/// The feed is not filtered by room, `handler` receives changes of every row in the table.
/// Changes of a single row are delivered in commit order, changes of different rows may arrive in
/// any order.
#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait ChangeFeedService: SendUnlessWasm + SyncUnlessWasm {
    async fn subscribe(&self, handler: FeedEventHandler) -> Result<SubscriptionId>;

    /// Releases a subscription. Must be called exactly once per successful `subscribe`.
    async fn unsubscribe(&self, subscription_id: &SubscriptionId) -> Result<()>;
}
