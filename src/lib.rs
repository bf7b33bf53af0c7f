pub mod config;
pub mod export;
pub mod import;
pub mod models;

pub use models::{CardEntry, Deck, Intent, Session, SessionResult, SessionView};
