// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use profile_service::ProfileService;
pub use room_service::RoomService;

mod profile_service;
mod room_name_writer;
mod room_service;
mod room_session;
