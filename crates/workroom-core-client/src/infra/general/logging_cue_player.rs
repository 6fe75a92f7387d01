// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use tracing::debug;

use crate::domain::general::models::Cue;
use crate::domain::general::services::CuePlayer;

/// A `CuePlayer` for environments without audio output. Cues are only logged.
#[derive(Default)]
pub struct LoggingCuePlayer {}

impl CuePlayer for LoggingCuePlayer {
    fn play(&self, cue: Cue) -> Result<()> {
        debug!("Playing {cue} cue.");
        Ok(())
    }
}
