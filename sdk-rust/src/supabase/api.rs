//! PostgREST request shapes for the `facts` table.

use crate::{Category, FactId, FactQuery, NewFact};
use serde::Serialize;
use serde_json::{Map, Value};

/// Row body of an insert. Only the client-supplied columns are sent, the
/// store fills in the rest.
#[derive(Debug, Serialize)]
pub struct InsertFactRow<'a> {
    pub text: &'a str,
    pub source: &'a str,
    pub category: Category,
}

impl<'a> From<&'a NewFact> for InsertFactRow<'a> {
    fn from(fact: &'a NewFact) -> Self {
        Self {
            text: &fact.text,
            source: &fact.source,
            category: fact.category,
        }
    }
}

/// Body of a single-column update: `{"<column>": <value>}`.
pub fn update_body(column: &str, value: u32) -> Value {
    let mut body = Map::new();
    body.insert(column.to_string(), Value::from(value));
    Value::Object(body)
}

/// Query string of a list call.
pub fn list_params(query: &FactQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("select", "*".to_string())];
    if let Some(category) = query.category {
        params.push(("category", format!("eq.{category}")));
    }
    let direction = if query.ascending { "asc" } else { "desc" };
    params.push(("order", format!("{}.{direction}", query.order_by.column())));
    params.push(("limit", query.limit.to_string()));
    params
}

/// Query string scoping a call to one row and asking for it back.
pub fn row_params(id: FactId) -> Vec<(&'static str, String)> {
    vec![("id", format!("eq.{id}")), ("select", "*".to_string())]
}
