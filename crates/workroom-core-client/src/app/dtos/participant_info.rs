// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::participants::models::Participant;

/// A participant as it should be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantInfo {
    pub participant: Participant,
    /// True for the signed-in user.
    pub is_self: bool,
    /// True while a join, leave or memo highlight is active.
    pub is_highlighted: bool,
    /// True if the last activity is older than the away threshold.
    pub is_inactive: bool,
}
