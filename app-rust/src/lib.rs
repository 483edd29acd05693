mod app;
mod command;
mod config;
mod errors;
mod state;
pub mod view;

pub use app::{FactsApp, FetchOutcome, SubmitOutcome, VoteOutcome};
pub use command::{Command, HELP};
pub use config::AppConfig;
pub use errors::*;
pub use state::{AppState, FormState};
