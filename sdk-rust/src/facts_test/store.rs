use std::{collections::VecDeque, sync::Mutex};

use futures::channel::oneshot;

use crate::{
    errors::{StoreError, StoreResult},
    fact_store::FactStore,
    Fact, FactId, FactQuery, NewFact, VoteKind,
};

/// Result for a mocked store call.
/// It can either be available right away or be resolved later through a
/// [`MockResponder`].
pub enum MockResult<T> {
    Ready(StoreResult<T>),
    Pending(oneshot::Receiver<StoreResult<T>>),
}

impl<T> MockResult<T> {
    /// Construct a result that yields the provided value.
    pub fn ok(value: T) -> Self {
        Self::Ready(Ok(value))
    }

    /// Construct a result that yields the provided error.
    pub fn error(error: StoreError) -> Self {
        Self::Ready(Err(error))
    }

    async fn resolve(self, provider: &'static str) -> StoreResult<T> {
        match self {
            Self::Ready(result) => result,
            Self::Pending(receiver) => receiver.await.unwrap_or_else(|_| {
                Err(StoreError::Invariant(
                    provider,
                    "mocked responder dropped without a result".into(),
                ))
            }),
        }
    }
}

impl<T> From<StoreResult<T>> for MockResult<T> {
    fn from(result: StoreResult<T>) -> Self {
        Self::Ready(result)
    }
}

impl From<Vec<Fact>> for MockResult<Vec<Fact>> {
    fn from(facts: Vec<Fact>) -> Self {
        Self::ok(facts)
    }
}

impl From<Fact> for MockResult<Fact> {
    fn from(fact: Fact) -> Self {
        Self::ok(fact)
    }
}

/// Completes a call that was enqueued with one of the `defer_*` methods.
pub struct MockResponder<T>(oneshot::Sender<StoreResult<T>>);

impl<T> MockResponder<T> {
    /// Resolve the pending call. Does nothing if the call was abandoned.
    pub fn respond(self, result: StoreResult<T>) {
        let _ = self.0.send(result);
    }
}

/// A call received by the mock store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    List(FactQuery),
    Insert(NewFact),
    SetVotes {
        id: FactId,
        kind: VoteKind,
        value: u32,
    },
}

#[derive(Default)]
struct MockFactStoreState {
    mocked_list_results: VecDeque<MockResult<Vec<Fact>>>,
    mocked_insert_results: VecDeque<MockResult<Fact>>,
    mocked_set_votes_results: VecDeque<MockResult<Fact>>,
    tracked_calls: Vec<StoreCall>,
}

impl MockFactStoreState {
    fn reset(&mut self) {
        self.tracked_calls.clear();
    }

    fn restore(&mut self) {
        self.mocked_list_results.clear();
        self.mocked_insert_results.clear();
        self.mocked_set_votes_results.clear();
        self.reset();
    }
}

/// A mock store for testing that tracks calls and yields predefined
/// results in order.
pub struct MockFactStore {
    provider: &'static str,
    state: Mutex<MockFactStoreState>,
}

impl Default for MockFactStore {
    fn default() -> Self {
        Self {
            provider: "mock",
            state: Mutex::new(MockFactStoreState::default()),
        }
    }
}

impl MockFactStore {
    /// Construct a new mock store instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the provider identifier returned by the mock.
    pub fn set_provider(&mut self, provider: &'static str) {
        self.provider = provider;
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut MockFactStoreState) -> R) -> R {
        let mut state = self.state.lock().expect("mock state poisoned");
        f(&mut state)
    }

    /// Enqueue a mocked `list` result.
    pub fn enqueue_list<R>(&self, result: R) -> &Self
    where
        R: Into<MockResult<Vec<Fact>>>,
    {
        self.with_state(|state| state.mocked_list_results.push_back(result.into()));
        self
    }

    /// Enqueue a mocked `insert` result.
    pub fn enqueue_insert<R>(&self, result: R) -> &Self
    where
        R: Into<MockResult<Fact>>,
    {
        self.with_state(|state| state.mocked_insert_results.push_back(result.into()));
        self
    }

    /// Enqueue a mocked `set_votes` result.
    pub fn enqueue_set_votes<R>(&self, result: R) -> &Self
    where
        R: Into<MockResult<Fact>>,
    {
        self.with_state(|state| state.mocked_set_votes_results.push_back(result.into()));
        self
    }

    /// Enqueue a `list` call that stays pending until the returned
    /// responder is resolved.
    pub fn defer_list(&self) -> MockResponder<Vec<Fact>> {
        let (sender, receiver) = oneshot::channel();
        self.enqueue_list(MockResult::Pending(receiver));
        MockResponder(sender)
    }

    /// Enqueue an `insert` call that stays pending until the returned
    /// responder is resolved.
    pub fn defer_insert(&self) -> MockResponder<Fact> {
        let (sender, receiver) = oneshot::channel();
        self.enqueue_insert(MockResult::Pending(receiver));
        MockResponder(sender)
    }

    /// Enqueue a `set_votes` call that stays pending until the returned
    /// responder is resolved.
    pub fn defer_set_votes(&self) -> MockResponder<Fact> {
        let (sender, receiver) = oneshot::channel();
        self.enqueue_set_votes(MockResult::Pending(receiver));
        MockResponder(sender)
    }

    /// Retrieve the tracked calls accumulated so far.
    pub fn tracked_calls(&self) -> Vec<StoreCall> {
        self.with_state(|state| state.tracked_calls.clone())
    }

    /// Reset tracked calls without touching enqueued results.
    pub fn reset(&self) {
        self.with_state(MockFactStoreState::reset);
    }

    /// Clear both tracked calls and enqueued results.
    pub fn restore(&self) {
        self.with_state(MockFactStoreState::restore);
    }

    fn next_result<T>(
        &self,
        call: StoreCall,
        queue: impl FnOnce(&mut MockFactStoreState) -> Option<MockResult<T>>,
        name: &str,
    ) -> StoreResult<MockResult<T>> {
        self.with_state(|state| {
            state.tracked_calls.push(call);
            queue(state).ok_or_else(|| {
                StoreError::Invariant(self.provider, format!("no mocked {name} results available"))
            })
        })
    }
}

#[async_trait::async_trait]
impl FactStore for MockFactStore {
    fn provider(&self) -> &'static str {
        self.provider
    }

    async fn list(&self, query: &FactQuery) -> StoreResult<Vec<Fact>> {
        let result = self.next_result(
            StoreCall::List(query.clone()),
            |state| state.mocked_list_results.pop_front(),
            "list",
        )?;
        result.resolve(self.provider).await
    }

    async fn insert(&self, fact: &NewFact) -> StoreResult<Fact> {
        let result = self.next_result(
            StoreCall::Insert(fact.clone()),
            |state| state.mocked_insert_results.pop_front(),
            "insert",
        )?;
        result.resolve(self.provider).await
    }

    async fn set_votes(&self, id: FactId, kind: VoteKind, value: u32) -> StoreResult<Fact> {
        let result = self.next_result(
            StoreCall::SetVotes { id, kind, value },
            |state| state.mocked_set_votes_results.pop_front(),
            "set_votes",
        )?;
        result.resolve(self.provider).await
    }
}
