// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

/// Failures reported by the backing store adapters.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// An expected row was missing on a point read.
    #[error("No row with id '{id}' found in table '{table}'.")]
    LookupFailure { table: &'static str, id: String },
    /// The store rejected or failed a write.
    #[error("Write to table '{table}' failed: {message}")]
    WriteFailure { table: &'static str, message: String },
    /// The change feed could not be established or was dropped.
    #[error("Change feed failed: {0}")]
    SubscriptionFailure(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[cfg(all(feature = "supabase", not(target_arch = "wasm32")))]
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[cfg(all(feature = "supabase", not(target_arch = "wasm32")))]
    #[error(transparent)]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl StoreError {
    pub fn lookup_failure(table: &'static str, id: impl ToString) -> Self {
        Self::LookupFailure {
            table,
            id: id.to_string(),
        }
    }

    pub fn write_failure(table: &'static str, message: impl ToString) -> Self {
        Self::WriteFailure {
            table,
            message: message.to_string(),
        }
    }

    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::LookupFailure { .. })
    }
}
