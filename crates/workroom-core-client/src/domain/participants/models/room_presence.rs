// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::shared::models::{RoomId, UserId};

use super::{Participant, ParticipantList, ParticipantStatus, PresenceChange, RowChange};

/// The local view of who is in a room, maintained from the bulk read on entry and the change
/// feed afterwards.
#[derive(Debug, Clone)]
pub struct RoomPresence {
    room_id: RoomId,
    viewer_id: UserId,
    participants: ParticipantList,
}

/// A participant that came back from `away` and needs its saved status written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreRequest {
    pub user_id: UserId,
    pub status: ParticipantStatus,
}

/// The outcome of applying a single row change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub change: Option<PresenceChange>,
    pub restore: Option<RestoreRequest>,
}

impl RoomPresence {
    pub fn new(room_id: RoomId, viewer_id: UserId) -> Self {
        Self {
            room_id,
            viewer_id,
            participants: Default::default(),
        }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn viewer_id(&self) -> &UserId {
        &self.viewer_id
    }

    pub fn participants(&self) -> &ParticipantList {
        &self.participants
    }

    /// Replaces the current state with the result of a bulk read. Rows that belong to another
    /// room are dropped.
    pub fn seed(&mut self, participants: impl IntoIterator<Item = Participant>) {
        let room_id = self.room_id.clone();
        self.participants.replace_all(
            participants
                .into_iter()
                .filter(|participant| participant.is_in_room(&room_id)),
        );
    }

    /// Returns true if the change touches this room or a participant we currently know about.
    pub fn is_relevant(&self, change: &RowChange) -> bool {
        change.concerns_room(&self.room_id) || self.participants.contains(change.participant_id())
    }

    /// The participants with the viewer first.
    pub fn sorted(&self) -> Vec<Participant> {
        self.participants.sorted_for_viewer(&self.viewer_id)
    }

    /// Participants whose last activity is at least `threshold` old and who are not yet away,
    /// together with the status they currently have.
    pub fn stale_participants(
        &self,
        now: &DateTime<Utc>,
        threshold: Duration,
    ) -> Vec<(UserId, ParticipantStatus)> {
        self.participants
            .iter()
            .filter(|participant| {
                !participant.status.is_away() && participant.is_inactive(now, threshold)
            })
            .map(|participant| (participant.id.clone(), participant.status))
            .collect()
    }

    /// Applies a row change. Applying the same change twice leaves the state as it was after the
    /// first application.
    pub fn apply(&mut self, change: &RowChange) -> Reconciliation {
        if !self.is_relevant(change) {
            return Default::default();
        }

        match change {
            RowChange::Insert { new } | RowChange::Update { new, .. }
                if new.is_in_room(&self.room_id) =>
            {
                let restore = self.restore_request(change);
                let change = match self.participants.insert_or_update(new.clone()) {
                    None => Some(PresenceChange::Joined(new.id.clone())),
                    Some(previous) if previous.memo != new.memo => {
                        Some(PresenceChange::MemoChanged(new.id.clone()))
                    }
                    Some(previous) if &previous == new => None,
                    Some(_) => Some(PresenceChange::Updated(new.id.clone())),
                };
                Reconciliation { change, restore }
            }
            RowChange::Insert { .. } | RowChange::Update { .. } | RowChange::Delete { .. } => {
                let id = change.participant_id();
                Reconciliation {
                    change: self
                        .participants
                        .remove(id)
                        .map(|_| PresenceChange::Left(id.clone())),
                    restore: None,
                }
            }
        }
    }

    /// An away participant whose activity timestamp moved needs to be restored. The previous
    /// timestamp comes from the old row if the feed provides one, otherwise from the local copy.
    fn restore_request(&self, change: &RowChange) -> Option<RestoreRequest> {
        let RowChange::Update { new, old } = change else {
            return None;
        };

        if !new.status.is_away() || new.last_activity.is_none() {
            return None;
        }

        let saved_status = new.pre_away_status.filter(|status| !status.is_away())?;
        let previous = old.as_ref().or_else(|| self.participants.get(&new.id))?;

        if previous.last_activity == new.last_activity {
            return None;
        }

        Some(RestoreRequest {
            user_id: new.id.clone(),
            status: saved_status,
        })
    }
}
