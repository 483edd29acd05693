mod client_utils;
mod errors;
mod fact_store;
pub mod facts_test;
pub mod opentelemetry;
pub mod supabase;
mod types;
mod types_ext;
mod validation;

pub use errors::*;
pub use fact_store::FactStore;
pub use types::*;
pub use types_ext::{ParseCategoryError, FACT_LIST_LIMIT};
pub use validation::{is_valid_http_url, MAX_TEXT_LEN};
