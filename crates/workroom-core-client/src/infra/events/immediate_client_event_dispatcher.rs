// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::{OnceLock, Weak};

use tracing::error;

use crate::app::event_handlers::ClientEventDispatcherTrait;
use crate::client::ClientInner;
use crate::domain::shared::models::RoomId;
use crate::{Client, ClientDelegate, ClientEvent, ClientRoomEventType};

/// Forwards every event to the delegate as soon as it is dispatched.
pub struct ImmediateClientEventDispatcher {
    client_inner: OnceLock<Weak<ClientInner>>,
    delegate: Option<Box<dyn ClientDelegate>>,
}

impl ImmediateClientEventDispatcher {
    pub fn new(delegate: Option<Box<dyn ClientDelegate>>) -> Self {
        Self {
            client_inner: Default::default(),
            delegate,
        }
    }

    pub(crate) fn set_client_inner(&self, client_inner: Weak<ClientInner>) {
        if self.client_inner.set(client_inner).is_err() {
            error!("Tried to set client_inner on ImmediateClientEventDispatcher more than once.");
        }
    }
}

impl ClientEventDispatcherTrait for ImmediateClientEventDispatcher {
    fn dispatch_event(&self, event: ClientEvent) {
        let Some(delegate) = &self.delegate else {
            return;
        };

        let Some(client_inner) = self.client_inner.get().and_then(Weak::upgrade) else {
            return;
        };

        delegate.handle_event(Client::from(client_inner), event);
    }

    fn dispatch_room_event(&self, room_id: RoomId, event: ClientRoomEventType) {
        self.dispatch_event(ClientEvent::RoomChanged {
            room_id,
            r#type: event,
        })
    }
}
