mod api;
mod store;

pub use store::{SupabaseStore, SupabaseStoreOptions};
