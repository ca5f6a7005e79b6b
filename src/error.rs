use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Treatment already exists: {0}")]
    DuplicateTreatment(String),

    #[error("Price must be at least 1 (got {0})")]
    InvalidPrice(i64),

    #[error("Generate bill and prescription first")]
    NotGenerated,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
