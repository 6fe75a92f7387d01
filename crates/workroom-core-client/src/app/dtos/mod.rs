// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use participant_info::ParticipantInfo;

pub use crate::domain::{
    general::models::Cue,
    participants::models::{
        Appearance, FeedEvent, Participant, ParticipantPatch, ParticipantStatus, ProfileError,
        RowChange, RowChangeKind,
    },
    rooms::models::{Favorite, Room},
    shared::models::{RoomId, StoreError, SubscriptionId, UserId},
};

mod participant_info;
