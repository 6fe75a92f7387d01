// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use cue::Cue;
pub use highlight_set::{HighlightSet, HighlightToken};

mod cue;
mod highlight_set;
