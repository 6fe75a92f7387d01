// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use feed_filter::RoomFeedFilter;
pub use presence_event_loop::{PresenceEventLoop, RoomSnapshot};
pub use session_event::SessionEvent;
pub use side_effect_dispatcher::SideEffectDispatcher;

use workroom_wasm_utils::{SendUnlessWasm, SyncUnlessWasm};

use crate::domain::shared::models::RoomId;
use crate::{ClientEvent, ClientRoomEventType};

mod feed_filter;
mod presence_event_loop;
mod session_event;
mod side_effect_dispatcher;

#[cfg_attr(feature = "test", mockall::automock)]
pub trait ClientEventDispatcherTrait: SendUnlessWasm + SyncUnlessWasm {
    fn dispatch_event(&self, event: ClientEvent);
    fn dispatch_room_event(&self, room_id: RoomId, event: ClientRoomEventType);
}
