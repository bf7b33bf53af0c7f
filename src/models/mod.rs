pub mod card_entry;
pub mod deck;
pub mod session;
pub mod session_result;
pub mod stopwatch;

pub use card_entry::CardEntry;
pub use deck::Deck;
pub use session::{Control, Intent, Phase, Session, SessionError, SessionView, StepState};
pub use session_result::{ResultError, SessionResult, summarize};
pub use stopwatch::Stopwatch;
