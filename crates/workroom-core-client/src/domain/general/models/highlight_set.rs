// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use indexmap::IndexMap;

use crate::domain::shared::models::UserId;

/// The set of currently highlighted participants.
///
/// Every highlight hands out a token. Only the token of the most recent highlight of a
/// participant is able to remove it again, so that highlighting an id that is already highlighted
/// effectively restarts its expiry.
#[derive(Debug, Default)]
pub struct HighlightSet {
    generation: u64,
    entries: IndexMap<UserId, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightToken {
    pub user_id: UserId,
    generation: u64,
}

impl HighlightSet {
    pub fn insert(&mut self, user_id: UserId) -> HighlightToken {
        self.generation += 1;
        self.entries.insert(user_id.clone(), self.generation);
        HighlightToken {
            user_id,
            generation: self.generation,
        }
    }

    /// Removes the highlight if `token` belongs to its latest insertion. Returns true if the set
    /// changed.
    pub fn expire(&mut self, token: &HighlightToken) -> bool {
        if self.entries.get(&token.user_id) != Some(&token.generation) {
            return false;
        }
        self.entries.shift_remove(&token.user_id);
        true
    }

    pub fn contains(&self, user_id: &UserId) -> bool {
        self.entries.contains_key(user_id)
    }

    pub fn ids(&self) -> Vec<UserId> {
        self.entries.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
