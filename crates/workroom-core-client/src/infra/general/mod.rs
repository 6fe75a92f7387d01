// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use logging_cue_player::LoggingCuePlayer;
pub use system_time_provider::SystemTimeProvider;

mod logging_cue_player;
mod system_time_provider;
