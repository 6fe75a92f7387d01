// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;

use workroom_proc_macros::InjectDependencies;

use crate::app::deps::{DynAppContext, DynParticipantsService, DynTimeProvider};
use crate::domain::participants::models::{
    Appearance, Participant, ParticipantPatch, ParticipantStatus, ProfileError,
};

/// Edits of the local participant.
#[derive(InjectDependencies)]
pub struct ProfileService {
    #[inject]
    ctx: DynAppContext,
    #[inject(from = participants_service)]
    store: DynParticipantsService,
    #[inject]
    time_provider: DynTimeProvider,
}

impl ProfileService {
    /// Fails with `StoreError::LookupFailure` if there is no row for the signed-in user.
    pub async fn load_profile(&self) -> Result<Participant> {
        self.store
            .load_participant(&self.ctx.connected_user_id()?)
            .await
    }

    pub async fn set_display_name(&self, name: Option<String>) -> Result<()> {
        self.update(ParticipantPatch::default().set_display_name(name))
            .await
    }

    pub async fn set_appearance(&self, appearance: Appearance) -> Result<()> {
        self.update(ParticipantPatch::default().set_appearance(appearance))
            .await
    }

    /// A memo consisting only of whitespace is stored as the empty memo.
    #[tracing::instrument(skip(self))]
    pub async fn set_memo(&self, memo: &str) -> Result<()> {
        let memo = if memo.trim().is_empty() { "" } else { memo };
        self.update(ParticipantPatch::default().set_memo(memo))
            .await
    }

    /// Sets the status of the local participant.
    ///
    /// `away` can't be chosen. While the participant is away the chosen status becomes the
    /// status to restore, and the activity timestamp is bumped so that the restore happens right
    /// away.
    #[tracing::instrument(skip(self))]
    pub async fn set_status(&self, status: ParticipantStatus) -> Result<()> {
        if status.is_away() {
            return Err(ProfileError::AwayIsAutomatic.into());
        }

        let current = self.load_profile().await?;

        let patch = if current.status.is_away() {
            ParticipantPatch::default()
                .set_pre_away_status(Some(status))
                .set_last_activity(self.time_provider.now())
        } else {
            ParticipantPatch::default().set_status(status)
        };

        self.update(patch).await
    }
}

impl ProfileService {
    async fn update(&self, patch: ParticipantPatch) -> Result<()> {
        let user_id = self.ctx.connected_user_id()?;
        self.store.update_participant(&user_id, &patch).await
    }
}
