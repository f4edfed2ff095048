use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown record kind: {0}")]
    UnknownRecordKind(String),
    #[error("duplicate field identifier in catalog: {0}")]
    DuplicateField(String),
    #[error("field identifier must not be empty")]
    EmptyFieldIdentifier,
}

pub type Result<T> = std::result::Result<T, ModelError>;
