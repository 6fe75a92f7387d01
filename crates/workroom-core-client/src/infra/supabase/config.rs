// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, Secret};
use url::Url;

pub const URL_ENV_VAR: &str = "WORKROOM_SUPABASE_URL";
pub const API_KEY_ENV_VAR: &str = "WORKROOM_SUPABASE_KEY";

/// Location and credentials of a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: Url,
    pub api_key: Secret<String>,
}

impl SupabaseConfig {
    pub fn new(url: Url, api_key: Secret<String>) -> Self {
        Self { url, api_key }
    }

    /// Reads the project url and API key from `WORKROOM_SUPABASE_URL` and
    /// `WORKROOM_SUPABASE_KEY`.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var(URL_ENV_VAR).with_context(|| format!("{URL_ENV_VAR} is not set"))?;
        let api_key =
            std::env::var(API_KEY_ENV_VAR).with_context(|| format!("{API_KEY_ENV_VAR} is not set"))?;

        Ok(Self::new(
            Url::parse(&url).with_context(|| format!("{URL_ENV_VAR} is not a valid url"))?,
            Secret::new(api_key),
        ))
    }

    pub fn rest_url(&self, table: &str) -> Result<Url> {
        Ok(self.url.join(&format!("rest/v1/{table}"))?)
    }

    pub fn realtime_url(&self) -> Result<Url> {
        let mut url = self.url.join("realtime/v1/websocket")?;
        let scheme = if url.scheme() == "http" { "ws" } else { "wss" };
        url.set_scheme(scheme)
            .map_err(|_| anyhow::anyhow!("Cannot derive websocket url from {}", self.url))?;
        url.query_pairs_mut()
            .append_pair("apikey", self.api_key.expose_secret())
            .append_pair("vsn", "1.0.0");
        Ok(url)
    }
}
