// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ParticipantStatus {
    #[default]
    Working,
    Distracted,
    Idle,
    /// Set by the inactivity sweep only. Leaving it requires renewed activity.
    Away,
}

impl ParticipantStatus {
    pub fn is_away(&self) -> bool {
        self == &Self::Away
    }
}
