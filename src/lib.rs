// ABOUTME: Main library module for the aiprompt prompt template toolkit
// ABOUTME: Exports the template engine, the local store, output handling, and the CLI

pub mod cli;
pub mod output;
pub mod store;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use output::{OutputHandler, Report};
pub use store::{PromptService, TemplateService};
pub use template::{
    extract_variables, generate_structured_content, parse_structured_content,
    perform_quality_check, BraceConvention, QualityFinding, Severity, StructuredData,
};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
