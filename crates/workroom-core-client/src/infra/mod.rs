// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub mod events;
pub mod general;
pub mod store;
#[cfg(all(feature = "supabase", not(target_arch = "wasm32")))]
pub mod supabase;
