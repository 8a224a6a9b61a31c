use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("Invalid pitch key: {0}")]
    InvalidPitchKey(String),

    #[error("Unknown string name: {0}")]
    UnknownString(String),

    #[error("Invalid finger label: {0}")]
    InvalidFinger(String),

    #[error("Note catalog is empty")]
    EmptyCatalog,

    #[error("Invalid quiz config: {0}")]
    InvalidConfig(String),

    #[error("No quiz session is running")]
    NoSession,

    #[error("XML write error: {0}")]
    Xml(String),
}
