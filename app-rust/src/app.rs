use crate::{AppState, FormState};
use facts_sdk::{CategoryFilter, FactId, FactQuery, FactStore, NewFact, ValidationError, VoteKind};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, error, info};

/// What became of a list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The list was replaced with this many facts.
    Loaded(usize),
    /// The call failed and the list was emptied.
    Failed,
    /// A newer fetch started before this one returned. Nothing changed.
    Stale,
}

/// What became of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The stored fact was put at the front of the list.
    Created(FactId),
    /// The insert failed. The list is unchanged.
    Failed,
    /// The draft did not validate. Nothing was sent.
    Skipped(ValidationError),
    /// Another submission is still uploading. Nothing was sent.
    Busy,
}

/// What became of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The row was replaced; the counter now reads this value.
    Updated(u32),
    /// The update failed. The list is unchanged.
    Failed,
    /// A vote on this fact is still in flight. Nothing was sent.
    Busy,
    /// The fact is not in the current list. Nothing was sent.
    NotFound,
}

/// The application controller. It owns the [`AppState`] and performs every
/// remote call the front-end needs.
///
/// All operations take `&self`, so calls may run concurrently. The state
/// lock is never held across a store call.
pub struct FactsApp {
    store: Arc<dyn FactStore>,
    state: Mutex<AppState>,
}

impl FactsApp {
    pub fn new(store: Arc<dyn FactStore>) -> Self {
        Self {
            store,
            state: Mutex::new(AppState::default()),
        }
    }

    /// A copy of the current state, for rendering.
    pub fn state(&self) -> AppState {
        self.with_state(|state| state.clone())
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Re-fetch the list for the active category.
    pub async fn refresh(&self) -> FetchOutcome {
        let filter = self.with_state(|state| state.current_category);
        self.set_category(filter).await
    }

    /// Make `filter` the active category and replace the list with the
    /// matching facts, most interesting first.
    pub async fn set_category(&self, filter: CategoryFilter) -> FetchOutcome {
        let ticket = self.with_state(|state| state.begin_fetch(filter));
        let query = FactQuery::for_filter(filter);

        let facts = match self.store.list(&query).await {
            Ok(facts) => Some(facts),
            Err(err) => {
                error!(error = %err, category = %filter, "failed to load facts");
                None
            }
        };
        let loaded = facts.as_ref().map(Vec::len);

        let applied = self.with_state(|state| state.finish_fetch(ticket, facts));
        match (applied, loaded) {
            (false, _) => {
                debug!(ticket, category = %filter, "discarding stale fact list");
                FetchOutcome::Stale
            }
            (true, Some(count)) => {
                info!(count, category = %filter, "loaded facts");
                FetchOutcome::Loaded(count)
            }
            (true, None) => FetchOutcome::Failed,
        }
    }

    /// Show or hide the submission form. Returns the new visibility.
    pub fn toggle_form(&self) -> bool {
        self.with_state(|state| {
            state.show_form = !state.show_form;
            state.show_form
        })
    }

    pub fn set_text(&self, text: impl Into<String>) -> bool {
        self.edit_form(|form| form.text = text.into())
    }

    pub fn set_source(&self, source: impl Into<String>) -> bool {
        self.edit_form(|form| form.source = source.into())
    }

    pub fn set_form_category(&self, category: impl Into<String>) -> bool {
        self.edit_form(|form| form.category = category.into())
    }

    /// Apply an edit to the draft unless an upload has the inputs disabled.
    fn edit_form(&self, edit: impl FnOnce(&mut FormState)) -> bool {
        self.with_state(|state| {
            if state.form.is_uploading {
                return false;
            }
            edit(&mut state.form);
            true
        })
    }

    /// Validate the draft and, if it passes, insert it.
    ///
    /// A draft that does not validate is left untouched and nothing is
    /// sent. Once a draft passes, the fields are cleared whatever the
    /// store answers; a stored fact goes to the front of the list.
    pub async fn submit(&self) -> SubmitOutcome {
        let draft = self.with_state(|state| {
            if state.form.is_uploading {
                return Err(SubmitOutcome::Busy);
            }
            let form = &state.form;
            let fact = NewFact::validate(&form.text, &form.source, &form.category)
                .map_err(SubmitOutcome::Skipped)?;
            state.form.is_uploading = true;
            Ok(fact)
        });
        let fact = match draft {
            Ok(fact) => fact,
            Err(outcome) => {
                debug!(?outcome, "fact not submitted");
                return outcome;
            }
        };

        let result = self.store.insert(&fact).await;

        self.with_state(|state| {
            state.form.is_uploading = false;
            state.form.clear();
            match result {
                Ok(created) => {
                    info!(id = %created.id, category = %fact.category, "created fact");
                    let id = created.id;
                    state.prepend(created);
                    SubmitOutcome::Created(id)
                }
                Err(err) => {
                    error!(error = %err, "failed to create fact");
                    SubmitOutcome::Failed
                }
            }
        })
    }

    /// Add one vote of `kind` to a listed fact.
    ///
    /// The store is asked to set the counter to the listed value plus one;
    /// the list shows the new count only once the store returns the row.
    pub async fn vote(&self, id: FactId, kind: VoteKind) -> VoteOutcome {
        let current = self.with_state(|state| {
            let current = state.find(id).map(|fact| fact.votes(kind))?;
            if !state.updating.insert(id) {
                return Some(Err(VoteOutcome::Busy));
            }
            Some(Ok(current))
        });
        let current = match current {
            Some(Ok(current)) => current,
            Some(Err(outcome)) => return outcome,
            None => {
                debug!(%id, "vote on a fact that is not listed");
                return VoteOutcome::NotFound;
            }
        };

        let result = self
            .store
            .set_votes(id, kind, current.saturating_add(1))
            .await;

        self.with_state(|state| {
            state.updating.remove(&id);
            match result {
                Ok(updated) => {
                    let votes = updated.votes(kind);
                    debug!(%id, %kind, votes, "recorded vote");
                    state.replace(&updated);
                    VoteOutcome::Updated(votes)
                }
                Err(err) => {
                    error!(error = %err, %id, %kind, "failed to record vote");
                    VoteOutcome::Failed
                }
            }
        })
    }
}
