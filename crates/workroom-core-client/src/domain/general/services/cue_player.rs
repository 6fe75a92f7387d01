// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;

use workroom_wasm_utils::{SendUnlessWasm, SyncUnlessWasm};

use crate::domain::general::models::Cue;

/// Plays audible cues. Playback is fire and forget, implementations must not wait for a cue to
/// finish.
#[cfg_attr(feature = "test", mockall::automock)]
pub trait CuePlayer: SendUnlessWasm + SyncUnlessWasm {
    fn play(&self, cue: Cue) -> Result<()>;
}
