// workroom/workroom-core-integration-tests
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

mod helpers;
mod presence_event_loop;
mod room_service;
