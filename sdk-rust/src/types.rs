use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a fact row, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactId(pub i64);

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A fact row as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fact {
    pub id: FactId,
    pub text: String,
    pub source: String,
    /// The category as stored. The store does not constrain this column,
    /// use [`Fact::category`] to get the typed value.
    pub category: String,
    #[serde(default)]
    pub votes_interesting: u32,
    #[serde(default)]
    pub votes_mindblowing: u32,
    #[serde(default)]
    pub votes_false: u32,
    /// Year of creation, when the table provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_in: Option<i32>,
    #[serde(default, rename = "created_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// The closed set of categories a fact can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Science,
    Finance,
    Society,
    Entertainment,
    Health,
    History,
    News,
}

/// The active list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

/// One of the three vote counters of a fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteKind {
    Interesting,
    Mindblowing,
    False,
}

/// The fields a client sends to create a fact. The store assigns the
/// identifier, the vote counters and the creation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFact {
    pub text: String,
    pub source: String,
    pub category: Category,
}

/// Parameters of a list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactQuery {
    /// Exact category match. `None` lists every category.
    pub category: Option<Category>,
    /// The counter to order by.
    pub order_by: VoteKind,
    pub ascending: bool,
    /// Maximum number of rows to return.
    pub limit: u32,
}
