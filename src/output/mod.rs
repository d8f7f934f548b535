// ABOUTME: Output handler module for report formatting and delivery
// ABOUTME: Handles JSON/YAML/text formatting and output to stdout or files

pub mod error;
pub mod formatter;
pub mod report;
pub mod writer;

use std::collections::HashMap;

use self::error::{OutputError, Result};
use self::formatter::{JsonFormatter, OutputFormatter, TextFormatter, YamlFormatter};
pub use self::report::Report;
pub use self::writer::OutputDestination;
use self::writer::writer_for;

pub struct OutputHandler {
    formatters: HashMap<String, Box<dyn OutputFormatter>>,
}

impl OutputHandler {
    pub fn new() -> Result<Self> {
        let mut handler = Self {
            formatters: HashMap::new(),
        };

        // Register built-in formatters
        handler.register_formatter("json", Box::new(JsonFormatter::new()));
        handler.register_formatter("pretty", Box::new(JsonFormatter::new_pretty()));
        handler.register_formatter("yaml", Box::new(YamlFormatter::new()));
        handler.register_formatter("text", Box::new(TextFormatter::new()?));

        Ok(handler)
    }

    pub fn register_formatter(&mut self, name: &str, formatter: Box<dyn OutputFormatter>) {
        self.formatters.insert(name.to_string(), formatter);
    }

    pub fn format(&self, report: &Report, format: &str) -> Result<String> {
        let formatter = self
            .formatters
            .get(format)
            .ok_or_else(|| OutputError::FormatterNotFound {
                format: format.to_string(),
            })?;

        formatter.format(report)
    }

    /// Format a report and deliver it to `destination`
    pub async fn emit(
        &self,
        report: &Report,
        format: &str,
        destination: &OutputDestination,
    ) -> Result<()> {
        let formatted = self.format(report, format)?;
        writer_for(destination).write(&formatted).await
    }

    pub fn list_formatters(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.formatters.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }
}
