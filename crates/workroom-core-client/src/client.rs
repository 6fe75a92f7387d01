// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Deref;
use std::sync::Arc;

use workroom_wasm_utils::{SendUnlessWasm, SyncUnlessWasm};

use crate::app::deps::DynAppContext;
use crate::client_builder::{ClientBuilder, UndefinedStore};
use crate::domain::shared::models::UserId;
use crate::services::{ProfileService, RoomService};
use crate::ClientEvent;

#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

pub trait ClientDelegate: SendUnlessWasm + SyncUnlessWasm {
    fn handle_event(&self, client: Client, event: ClientEvent);
}

impl Client {
    pub fn builder() -> ClientBuilder<UndefinedStore> {
        ClientBuilder::new()
    }
}

pub struct ClientInner {
    pub profile: ProfileService,
    pub room: RoomService,
    pub(crate) ctx: DynAppContext,
}

impl From<Arc<ClientInner>> for Client {
    fn from(inner: Arc<ClientInner>) -> Self {
        Client { inner }
    }
}

impl Deref for Client {
    type Target = ClientInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Client {
    /// Sets the user on whose behalf the client acts. Signing in is handled elsewhere, the
    /// client only needs the resulting id.
    pub fn set_user_id(&self, user_id: impl Into<UserId>) {
        self.ctx.set_user_id(user_id.into())
    }

    /// Leaves the current room and forgets the user.
    pub async fn sign_out(&self) {
        self.room.leave_room().await;
        self.ctx.reset_user_id();
    }

    pub fn connected_user_id(&self) -> Option<UserId> {
        self.ctx.connected_user_id().ok()
    }
}
