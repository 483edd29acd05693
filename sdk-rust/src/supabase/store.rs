use super::api::{self, InsertFactRow};
use crate::{
    client_utils, opentelemetry::trace_call, Fact, FactId, FactQuery, FactStore, NewFact,
    StoreError, StoreResult, VoteKind,
};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION},
    Client, RequestBuilder,
};
use tracing::debug;

const PROVIDER: &str = "supabase";
const DEFAULT_TABLE: &str = "facts";

/// Client for the `facts` table of a Supabase project, spoken over its
/// PostgREST endpoint (`{base_url}/rest/v1/{table}`).
pub struct SupabaseStore {
    base_url: String,
    api_key: String,
    table: String,
    client: Client,
}

#[derive(Clone, Default)]
pub struct SupabaseStoreOptions {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`.
    pub base_url: String,
    /// The project's anon (or service) key.
    pub api_key: String,
    /// Table name. Defaults to `facts`.
    pub table: Option<String>,
    pub client: Option<Client>,
}

impl SupabaseStore {
    #[must_use]
    pub fn new(options: SupabaseStoreOptions) -> Self {
        let SupabaseStoreOptions {
            base_url,
            api_key,
            table,
            client,
        } = options;

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            table: table.unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            client: client.unwrap_or_else(Client::new),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn request_headers(&self, return_representation: bool) -> StoreResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let mut api_key = HeaderValue::from_str(&self.api_key).map_err(|error| {
            StoreError::InvalidInput(format!("Invalid Supabase API key header value: {error}"))
        })?;
        api_key.set_sensitive(true);
        headers.insert(HeaderName::from_static("apikey"), api_key);

        let mut auth_header = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|error| {
                StoreError::InvalidInput(format!("Invalid Supabase API key header value: {error}"))
            })?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);

        if return_representation {
            headers.insert(
                HeaderName::from_static("prefer"),
                HeaderValue::from_static("return=representation"),
            );
        }

        Ok(headers)
    }

    fn list_request(&self, query: &FactQuery) -> StoreResult<RequestBuilder> {
        Ok(self
            .client
            .get(self.table_url())
            .headers(self.request_headers(false)?)
            .query(&api::list_params(query)))
    }

    fn insert_request(&self, fact: &NewFact) -> StoreResult<RequestBuilder> {
        Ok(self
            .client
            .post(self.table_url())
            .headers(self.request_headers(true)?)
            .query(&[("select", "*")])
            .json(&[InsertFactRow::from(fact)]))
    }

    fn update_request(&self, id: FactId, kind: VoteKind, value: u32) -> StoreResult<RequestBuilder> {
        Ok(self
            .client
            .patch(self.table_url())
            .headers(self.request_headers(true)?)
            .query(&api::row_params(id))
            .json(&api::update_body(kind.column(), value)))
    }

    async fn fetch_rows(&self, query: &FactQuery) -> StoreResult<Vec<Fact>> {
        let facts: Vec<Fact> = client_utils::send_json(self.list_request(query)?).await?;
        debug!(rows = facts.len(), category = ?query.category, "listed facts");
        Ok(facts)
    }

    async fn insert_row(&self, fact: &NewFact) -> StoreResult<Fact> {
        let rows: Vec<Fact> = client_utils::send_json(self.insert_request(fact)?).await?;
        client_utils::first_row(rows, PROVIDER)
    }

    async fn update_row(&self, id: FactId, kind: VoteKind, value: u32) -> StoreResult<Fact> {
        let rows: Vec<Fact> =
            client_utils::send_json(self.update_request(id, kind, value)?).await?;
        client_utils::first_row(rows, PROVIDER).map_err(|_| {
            StoreError::Invariant(PROVIDER, format!("no fact with id {id} was updated"))
        })
    }
}

#[async_trait::async_trait]
impl FactStore for SupabaseStore {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn list(&self, query: &FactQuery) -> StoreResult<Vec<Fact>> {
        trace_call(PROVIDER, &self.table, "select", Vec::len, self.fetch_rows(query)).await
    }

    async fn insert(&self, fact: &NewFact) -> StoreResult<Fact> {
        trace_call(PROVIDER, &self.table, "insert", |_| 1, self.insert_row(fact)).await
    }

    async fn set_votes(&self, id: FactId, kind: VoteKind, value: u32) -> StoreResult<Fact> {
        trace_call(
            PROVIDER,
            &self.table,
            "update",
            |_| 1,
            self.update_row(id, kind, value),
        )
        .await
    }
}
