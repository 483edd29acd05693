use crate::{Fact, FactId, FactQuery, NewFact, StoreResult, VoteKind};

/// A remote store holding the `facts` table.
///
/// Each method is a single request/response call. Implementations do not
/// retry and do not cache.
#[async_trait::async_trait]
pub trait FactStore: Send + Sync {
    /// A short name of the backend, used in logs and spans.
    fn provider(&self) -> &'static str;

    /// List facts matching the query.
    async fn list(&self, query: &FactQuery) -> StoreResult<Vec<Fact>>;

    /// Insert a fact and return the stored row.
    async fn insert(&self, fact: &NewFact) -> StoreResult<Fact>;

    /// Set one vote counter of a fact to `value` and return the updated row.
    async fn set_votes(&self, id: FactId, kind: VoteKind, value: u32) -> StoreResult<Fact>;
}
