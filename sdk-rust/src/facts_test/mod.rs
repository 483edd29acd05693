//! Test doubles for code built on [`FactStore`](crate::FactStore).

mod store;

pub use store::{MockFactStore, MockResponder, MockResult, StoreCall};
