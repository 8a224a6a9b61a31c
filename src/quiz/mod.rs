pub mod config;
pub mod session;
pub mod timers;
pub mod types;

pub use config::QuizConfig;
pub use session::QuizSession;
pub use types::{Effect, Instrument, QuizEvent, QuizMode, QuizSnapshot, Variant};
