use crate::ConfigError;
use facts_sdk::{is_valid_http_url, supabase::SupabaseStoreOptions};
use std::env;

pub const URL_VAR: &str = "SUPABASE_URL";
pub const KEY_VAR: &str = "SUPABASE_KEY";
pub const TABLE_VAR: &str = "FACTS_TABLE";

/// Connection settings of the facts store.
#[derive(Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_key: String,
    pub table: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("supabase_url", &self.supabase_url)
            .field("supabase_key", &"<redacted>")
            .field("table", &self.table)
            .finish()
    }
}

impl AppConfig {
    pub fn new(
        supabase_url: Option<String>,
        supabase_key: Option<String>,
        table: Option<String>,
    ) -> Result<Self, ConfigError> {
        let supabase_url = supabase_url
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing(URL_VAR))?;
        if !is_valid_http_url(&supabase_url) {
            return Err(ConfigError::InvalidUrl(URL_VAR, supabase_url));
        }
        let supabase_key = supabase_key
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::Missing(KEY_VAR))?;

        Ok(Self {
            supabase_url,
            supabase_key,
            table: table.filter(|table| !table.is_empty()),
        })
    }

    /// Read the settings from `SUPABASE_URL`, `SUPABASE_KEY` and the
    /// optional `FACTS_TABLE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(
            env::var(URL_VAR).ok(),
            env::var(KEY_VAR).ok(),
            env::var(TABLE_VAR).ok(),
        )
    }

    pub fn store_options(&self) -> SupabaseStoreOptions {
        SupabaseStoreOptions {
            base_url: self.supabase_url.clone(),
            api_key: self.supabase_key.clone(),
            table: self.table.clone(),
            ..Default::default()
        }
    }
}
