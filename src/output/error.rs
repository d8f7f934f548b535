// ABOUTME: Error types for output handling operations
// ABOUTME: Defines errors for formatting reports and writing them to destinations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Formatter not found: {format}")]
    FormatterNotFound { format: String },

    #[error("Write error: {message}")]
    WriteError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlSerializationError(#[from] serde_yaml::Error),

    #[error("Text template error: {0}")]
    TemplateError(#[from] handlebars::TemplateError),

    #[error("Text render error: {0}")]
    RenderError(#[from] handlebars::RenderError),
}

pub type Result<T> = std::result::Result<T, OutputError>;
