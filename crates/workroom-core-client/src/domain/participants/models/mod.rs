// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use appearance::Appearance;
pub use participant::Participant;
pub use participant_list::ParticipantList;
pub use participant_patch::ParticipantPatch;
pub use participant_status::ParticipantStatus;
pub use presence_change::PresenceChange;
pub use profile_error::ProfileError;
pub use room_presence::{Reconciliation, RestoreRequest, RoomPresence};
pub use row_change::{FeedEvent, RowChange, RowChangeKind};

mod appearance;
mod participant;
mod participant_list;
mod participant_patch;
mod participant_status;
mod presence_change;
mod profile_error;
mod room_presence;
mod row_change;
