// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use cue_player::CuePlayer;
pub use time_provider::TimeProvider;

mod cue_player;
mod time_provider;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::cue_player::MockCuePlayer;
}
