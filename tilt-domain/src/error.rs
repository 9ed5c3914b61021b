use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("events out of chronological order at index {index}")]
    UnorderedEvents { index: usize },
}

impl DomainError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        DomainError::InvalidConfig(message.into())
    }
}
