// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use constant_time_provider::ConstantTimeProvider;
pub use mock_app_dependencies::MockAppDependencies;


pub mod mock_data {
    pub use super::mock_app_dependencies::{
        mock_room_id as room_id, mock_user_id as user_id, mock_reference_date as reference_date,
    };
}
