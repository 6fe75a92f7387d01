// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use room_id::RoomId;
pub use store_error::StoreError;
pub use subscription_id::SubscriptionId;
pub use user_id::UserId;

mod room_id;
mod store_error;
mod subscription_id;
mod user_id;
