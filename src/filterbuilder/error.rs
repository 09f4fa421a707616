use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Unknown condition: {0}")]
    UnknownCondition(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Filter builder is closed: events can only be dispatched to an open builder")]
    BuilderClosed,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;
