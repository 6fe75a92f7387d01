// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::general::models::HighlightToken;
use crate::domain::participants::models::FeedEvent;

/// The inputs of a room session. All of them are processed one at a time by the
/// `PresenceEventLoop`.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// An event from the change feed that passed the room filter.
    Feed(FeedEvent),
    /// The local user interacted with the client.
    LocalActivity,
    /// The periodic self pulse is due.
    ActivityPulse,
    /// The periodic inactivity sweep is due.
    InactivitySweep,
    /// The highlight identified by the token ran out.
    HighlightExpired(HighlightToken),
}
