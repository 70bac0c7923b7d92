//! Error types for Sorteador Core

use thiserror::Error;

use crate::draw::DrawError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Draw error: {0}")]
    Draw(#[from] DrawError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
