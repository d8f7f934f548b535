// ABOUTME: Error types for the prompt and template store
// ABOUTME: Covers storage IO, document corruption, and missing records

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Template not found: {id}")]
    TemplateNotFound { id: String },

    #[error("Prompt not found: {id}")]
    PromptNotFound { id: String },

    #[error("Storage file {path} is not a valid store document: {message}")]
    CorruptedDocument { path: PathBuf, message: String },

    #[error("Storage IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
