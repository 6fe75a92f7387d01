// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use crate::domain::participants::models::{Participant, ParticipantPatch};
use crate::domain::participants::services::ParticipantsService;
use crate::domain::rooms::models::Room;
use crate::domain::rooms::services::RoomAttributesService;
use crate::domain::shared::models::{RoomId, StoreError, UserId};

use super::records::{patch_body, RoomRecord, UserRecord};
use super::{SupabaseConfig, ROOMS_TABLE, USERS_TABLE};

/// Reads and writes the `users` and `rooms` tables through PostgREST.
#[derive(Clone)]
pub struct PostgrestClient {
    http: Client,
    config: SupabaseConfig,
}

impl PostgrestClient {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let api_key = self.config.api_key.expose_secret();
        request.header("apikey", api_key).bearer_auth(api_key)
    }

    fn url(&self, table: &str, filters: &[(&str, String)]) -> Result<Url> {
        let mut url = self.config.rest_url(table)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("select", "*");
            for (column, filter) in filters {
                query.append_pair(column, filter);
            }
        }
        Ok(url)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &'static str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = self.url(table, filters)?;
        debug!("GET {}", url.path());

        let response = self
            .authorized(self.http.get(url))
            .send()
            .await
            .map_err(StoreError::from)?;
        let response = checked(response)
            .await
            .map_err(|message| anyhow::anyhow!("Read of table '{table}' failed: {message}"))?;
        Ok(response.json::<Vec<T>>().await.map_err(StoreError::from)?)
    }

    /// Updates the row with `id` and returns the number of updated rows.
    async fn update(&self, table: &'static str, id: &str, body: Value) -> Result<usize> {
        let url = self.url(table, &[("id", format!("eq.{id}"))])?;
        debug!("PATCH {} {body}", url.path());

        let response = self
            .authorized(self.http.patch(url))
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await
            .map_err(|err| StoreError::write_failure(table, err))?;
        let response = checked(response)
            .await
            .map_err(|message| StoreError::write_failure(table, message))?;
        let rows = response
            .json::<Vec<Value>>()
            .await
            .map_err(|err| StoreError::write_failure(table, err))?;
        Ok(rows.len())
    }
}

/// Turns responses with an error status into a message containing the status and the body.
async fn checked(response: Response) -> Result<Response, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(format!("unexpected status {status}: {body}"))
}

#[async_trait]
impl ParticipantsService for PostgrestClient {
    async fn load_participants(&self, room_id: &RoomId) -> Result<Vec<Participant>> {
        Ok(self
            .select::<UserRecord>(USERS_TABLE, &[("current_room", format!("eq.{room_id}"))])
            .await?
            .into_iter()
            .map(Participant::from)
            .collect())
    }

    async fn load_participant(&self, user_id: &UserId) -> Result<Participant> {
        self.select::<UserRecord>(USERS_TABLE, &[("id", format!("eq.{user_id}"))])
            .await?
            .into_iter()
            .next()
            .map(Participant::from)
            .ok_or_else(|| StoreError::lookup_failure(USERS_TABLE, user_id).into())
    }

    async fn update_participant(&self, user_id: &UserId, patch: &ParticipantPatch) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }
        if self.update(USERS_TABLE, user_id.as_str(), patch_body(patch)).await? == 0 {
            return Err(StoreError::lookup_failure(USERS_TABLE, user_id).into());
        }
        Ok(())
    }
}

#[async_trait]
impl RoomAttributesService for PostgrestClient {
    async fn load_room(&self, room_id: &RoomId) -> Result<Room> {
        self.select::<RoomRecord>(ROOMS_TABLE, &[("id", format!("eq.{room_id}"))])
            .await?
            .into_iter()
            .next()
            .map(Room::from)
            .ok_or_else(|| StoreError::lookup_failure(ROOMS_TABLE, room_id).into())
    }

    async fn set_name(&self, room_id: &RoomId, name: &str) -> Result<()> {
        if self
            .update(ROOMS_TABLE, room_id.as_str(), json!({ "name": name }))
            .await?
            == 0
        {
            return Err(StoreError::lookup_failure(ROOMS_TABLE, room_id).into());
        }
        Ok(())
    }
}
