use crate::{Category, CategoryFilter, Fact, FactId, FactQuery, NewFact, VoteKind};
use std::{fmt, str::FromStr};

/// Maximum number of rows a list query asks for.
pub const FACT_LIST_LIMIT: u32 = 1000;

impl Fact {
    pub fn new(id: i64, text: impl Into<String>, source: impl Into<String>, category: Category) -> Self {
        Self {
            id: FactId(id),
            text: text.into(),
            source: source.into(),
            category: category.to_string(),
            votes_interesting: 0,
            votes_mindblowing: 0,
            votes_false: 0,
            created_in: None,
            created_at: None,
        }
    }

    #[must_use]
    pub fn with_votes(mut self, interesting: u32, mindblowing: u32, false_votes: u32) -> Self {
        self.votes_interesting = interesting;
        self.votes_mindblowing = mindblowing;
        self.votes_false = false_votes;
        self
    }

    /// The typed category, or `None` if the stored value is not one of the
    /// known categories.
    pub fn category(&self) -> Option<Category> {
        self.category.parse().ok()
    }

    pub fn votes(&self, kind: VoteKind) -> u32 {
        match kind {
            VoteKind::Interesting => self.votes_interesting,
            VoteKind::Mindblowing => self.votes_mindblowing,
            VoteKind::False => self.votes_false,
        }
    }

    /// A fact is disputed when false votes outnumber the interesting and
    /// mindblowing votes combined.
    pub fn is_disputed(&self) -> bool {
        u64::from(self.votes_interesting) + u64::from(self.votes_mindblowing)
            < u64::from(self.votes_false)
    }
}

impl Category {
    pub const ALL: [Self; 8] = [
        Self::Technology,
        Self::Science,
        Self::Finance,
        Self::Society,
        Self::Entertainment,
        Self::Health,
        Self::History,
        Self::News,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Technology => "technology",
            Self::Science => "science",
            Self::Finance => "finance",
            Self::Society => "society",
            Self::Entertainment => "entertainment",
            Self::Health => "health",
            Self::History => "history",
            Self::News => "news",
        }
    }

    /// Hex colour used for the category tag and filter button.
    pub fn color(self) -> &'static str {
        match self {
            Self::Technology => "#3b82f6",
            Self::Science => "#16a34a",
            Self::Finance => "#ef4444",
            Self::Society => "#eab308",
            Self::Entertainment => "#db2777",
            Self::Health => "#14b8a6",
            Self::History => "#f97316",
            Self::News => "#8b5cf6",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {:?}", self.0)
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

impl CategoryFilter {
    pub fn category(self) -> Option<Category> {
        match self {
            Self::All => None,
            Self::Only(category) => Some(category),
        }
    }

    /// Whether a fact passes this filter.
    pub fn matches(self, fact: &Fact) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => fact.category == category.name(),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl VoteKind {
    pub const ALL: [Self; 3] = [Self::Interesting, Self::Mindblowing, Self::False];

    /// The store column holding this counter.
    pub fn column(self) -> &'static str {
        match self {
            Self::Interesting => "votesInteresting",
            Self::Mindblowing => "votesMindblowing",
            Self::False => "votesFalse",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Interesting => "interesting",
            Self::Mindblowing => "mindblowing",
            Self::False => "false",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Interesting => "👍",
            Self::Mindblowing => "🤯",
            Self::False => "⛔️",
        }
    }
}

impl fmt::Display for VoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VoteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == s || kind.column() == s)
            .ok_or_else(|| format!("unknown vote kind: {s:?}"))
    }
}

impl NewFact {
    pub fn new(text: impl Into<String>, source: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            category,
        }
    }
}

impl FactQuery {
    /// The list query issued when the given filter becomes active: every
    /// matching fact, most interesting first, capped at [`FACT_LIST_LIMIT`].
    pub fn for_filter(filter: CategoryFilter) -> Self {
        Self {
            category: filter.category(),
            order_by: VoteKind::Interesting,
            ascending: false,
            limit: FACT_LIST_LIMIT,
        }
    }
}

impl Default for FactQuery {
    fn default() -> Self {
        Self::for_filter(CategoryFilter::All)
    }
}
