// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use workroom_wasm_utils::{sleep, ScheduledTasks};

use crate::app::deps::{AppConfig, DynCuePlayer};
use crate::app::event_handlers::SessionEvent;
use crate::domain::general::models::{Cue, HighlightSet, HighlightToken};
use crate::domain::participants::models::PresenceChange;
use crate::domain::shared::models::UserId;

/// Turns presence changes into highlights and audible cues.
///
/// Every highlight schedules its own expiry, which is delivered back to the event loop as
/// `SessionEvent::HighlightExpired`. Pending expiries are cancelled when the dispatcher is dropped.
pub struct SideEffectDispatcher {
    cue_player: DynCuePlayer,
    highlights: HighlightSet,
    expiries: HashMap<UserId, ScheduledTasks>,
    memo_highlight_duration: Duration,
    join_leave_highlight_duration: Duration,
    expirations: UnboundedSender<SessionEvent>,
}

impl SideEffectDispatcher {
    pub fn new(
        cue_player: DynCuePlayer,
        config: &AppConfig,
        expirations: UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            cue_player,
            highlights: Default::default(),
            expiries: Default::default(),
            memo_highlight_duration: config.memo_highlight_duration,
            join_leave_highlight_duration: config.join_leave_highlight_duration,
            expirations,
        }
    }

    /// Plays the cue and highlights the participant for joins, leaves and memo changes. Returns
    /// true if the set of highlighted participants changed.
    pub fn handle_change(&mut self, change: &PresenceChange) -> bool {
        let Some(cue) = change.cue() else {
            return false;
        };

        self.play_cue(cue);

        let duration = match cue {
            Cue::Memo => self.memo_highlight_duration,
            Cue::Join | Cue::Leave => self.join_leave_highlight_duration,
        };
        self.highlight(change.user_id().clone(), duration);
        true
    }

    /// Highlights `user_id` for `duration`. Highlighting an already highlighted participant
    /// restarts its expiry.
    pub fn highlight(&mut self, user_id: UserId, duration: Duration) {
        let token = self.highlights.insert(user_id.clone());
        let expirations = self.expirations.clone();

        let mut expiry = ScheduledTasks::new();
        expiry.spawn(async move {
            sleep(duration).await;
            _ = expirations.send(SessionEvent::HighlightExpired(token));
        });
        // Replacing the previous group cancels its timer.
        self.expiries.insert(user_id, expiry);
    }

    /// Cues are neither queued nor deduplicated. A failure to play is not an error of the session.
    pub fn play_cue(&self, cue: Cue) {
        if let Err(err) = self.cue_player.play(cue) {
            warn!("Failed to play {cue} cue. {}", err.to_string());
        }
    }

    pub fn expire(&mut self, token: &HighlightToken) -> bool {
        if !self.highlights.expire(token) {
            return false;
        }
        self.expiries.remove(&token.user_id);
        true
    }

    pub fn is_highlighted(&self, user_id: &UserId) -> bool {
        self.highlights.contains(user_id)
    }

    pub fn highlighted_ids(&self) -> Vec<UserId> {
        self.highlights.ids()
    }
}
