// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use in_memory_store::InMemoryStore;

mod in_memory_store;

pub const PARTICIPANTS_TABLE: &str = "participants";
pub const ROOMS_TABLE: &str = "rooms";
