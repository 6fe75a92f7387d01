// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

/// Rejected edits of the local participant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("The away status is set automatically after a period of inactivity.")]
    AwayIsAutomatic,
}
