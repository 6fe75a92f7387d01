// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

//! Adapters for a Supabase project: PostgREST for reads and writes, the Realtime websocket for
//! the change feed.
//!
//! The feed detects participants leaving a room most reliably if the `users` table publishes
//! complete old rows (`ALTER TABLE users REPLICA IDENTITY FULL`). Otherwise old rows only carry
//! the primary key and leaving is recognized against the local state.

pub use config::SupabaseConfig;
pub use postgrest_client::PostgrestClient;
pub use realtime_change_feed::RealtimeChangeFeed;
pub use supabase_store::SupabaseStore;

mod config;
mod postgrest_client;
mod realtime_change_feed;
mod records;
mod supabase_store;

pub(crate) const USERS_TABLE: &str = "users";
pub(crate) const ROOMS_TABLE: &str = "rooms";
