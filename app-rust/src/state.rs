use facts_sdk::{CategoryFilter, Fact, FactId, MAX_TEXT_LEN};
use std::collections::HashSet;

/// Everything the front-end shows. Owned by [`FactsApp`](crate::FactsApp)
/// and only changed through the transitions below.
#[derive(Debug, Clone)]
pub struct AppState {
    pub facts: Vec<Fact>,
    pub current_category: CategoryFilter,
    pub is_loading: bool,
    pub show_form: bool,
    pub form: FormState,
    /// Facts with a vote in flight. Their vote buttons are disabled.
    pub updating: HashSet<FactId>,
    latest_fetch: u64,
}

/// The submission form draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub text: String,
    pub source: String,
    pub category: String,
    /// Set while an insert is in flight. The inputs are disabled.
    pub is_uploading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            facts: Vec::new(),
            current_category: CategoryFilter::All,
            is_loading: true,
            show_form: false,
            form: FormState::default(),
            updating: HashSet::new(),
            latest_fetch: 0,
        }
    }
}

impl AppState {
    /// Start a list fetch for `filter` and return its ticket.
    pub(crate) fn begin_fetch(&mut self, filter: CategoryFilter) -> u64 {
        self.latest_fetch += 1;
        self.current_category = filter;
        self.is_loading = true;
        self.latest_fetch
    }

    /// Apply the outcome of the fetch holding `ticket`. A failed fetch
    /// (`None`) empties the list. Returns `false`, leaving the state as
    /// is, when a newer fetch has started since.
    pub(crate) fn finish_fetch(&mut self, ticket: u64, facts: Option<Vec<Fact>>) -> bool {
        if ticket != self.latest_fetch {
            return false;
        }
        self.facts = facts.unwrap_or_default();
        self.is_loading = false;
        true
    }

    pub(crate) fn prepend(&mut self, fact: Fact) {
        self.facts.insert(0, fact);
    }

    /// Swap every listed row with the same id for `fact`.
    pub(crate) fn replace(&mut self, fact: &Fact) {
        for existing in self.facts.iter_mut().filter(|f| f.id == fact.id) {
            existing.clone_from(fact);
        }
    }

    pub fn find(&self, id: FactId) -> Option<&Fact> {
        self.facts.iter().find(|fact| fact.id == id)
    }

    pub fn is_updating(&self, id: FactId) -> bool {
        self.updating.contains(&id)
    }
}

impl FormState {
    /// Characters left before the text limit. Negative once exceeded.
    pub fn remaining_chars(&self) -> i64 {
        let used = i64::try_from(self.text.chars().count()).unwrap_or(i64::MAX);
        i64::try_from(MAX_TEXT_LEN).unwrap_or(i64::MAX) - used
    }

    pub(crate) fn clear(&mut self) {
        self.text.clear();
        self.source.clear();
        self.category.clear();
    }
}
