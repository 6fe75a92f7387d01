// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use indexmap::IndexMap;
use itertools::Itertools;

use crate::domain::shared::models::UserId;

use super::Participant;

/// Participants keyed by id, kept in the order in which they first appeared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticipantList {
    participants: IndexMap<UserId, Participant>,
}

impl ParticipantList {
    pub fn replace_all(&mut self, participants: impl IntoIterator<Item = Participant>) {
        self.participants = participants
            .into_iter()
            .map(|participant| (participant.id.clone(), participant))
            .collect();
    }

    /// Inserts or replaces the participant. Replacing keeps the original position.
    pub fn insert_or_update(&mut self, participant: Participant) -> Option<Participant> {
        self.participants
            .insert(participant.id.clone(), participant)
    }

    pub fn remove(&mut self, id: &UserId) -> Option<Participant> {
        self.participants.shift_remove(id)
    }

    pub fn get(&self, id: &UserId) -> Option<&Participant> {
        self.participants.get(id)
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.participants.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Returns the participants with `viewer` first, followed by everyone else in arrival order.
    pub fn sorted_for_viewer(&self, viewer: &UserId) -> Vec<Participant> {
        self.participants
            .values()
            .sorted_by_key(|participant| &participant.id != viewer)
            .cloned()
            .collect()
    }
}
