// ABOUTME: Advisory quality heuristics for prompt content
// ABOUTME: Produces ordered length, paragraphing, and variable findings for display

use serde::{Deserialize, Serialize};
use std::fmt;

use super::variables::{extract_variables, BraceConvention};

pub const DEFAULT_MIN_LENGTH: usize = 10;
pub const DEFAULT_MAX_LENGTH: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Success,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Success => write!(f, "success"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityFinding {
    pub severity: Severity,
    pub message: String,
}

impl QualityFinding {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Length thresholds for the quality heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityChecker {
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

fn default_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

impl Default for QualityChecker {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl QualityChecker {
    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
        }
    }

    /// Run every check against `content`. Lengths are counted in chars.
    pub fn check(&self, content: &str) -> Vec<QualityFinding> {
        let mut findings = Vec::new();

        let trimmed_len = content.trim().chars().count();
        let len = content.chars().count();
        if trimmed_len < self.min_length {
            findings.push(QualityFinding::new(
                Severity::Error,
                format!(
                    "Prompt is too short; add more detail ({} characters or more recommended)",
                    self.min_length
                ),
            ));
        } else if len > self.max_length {
            findings.push(QualityFinding::new(
                Severity::Warning,
                format!(
                    "Prompt may be too long; consider shortening it ({} characters or fewer recommended)",
                    self.max_length
                ),
            ));
        } else {
            findings.push(QualityFinding::new(Severity::Success, "Length is appropriate"));
        }

        if content.contains("\n\n") {
            findings.push(QualityFinding::new(
                Severity::Success,
                "Paragraphs are well separated",
            ));
        } else {
            findings.push(QualityFinding::new(
                Severity::Warning,
                "Consider splitting the prompt into paragraphs",
            ));
        }

        let variables = extract_variables(content, BraceConvention::Double);
        if !variables.is_empty() {
            findings.push(QualityFinding::new(
                Severity::Success,
                format!("{} variable(s) detected", variables.len()),
            ));
        }

        findings
    }
}

/// Run the quality heuristic with the default thresholds.
pub fn perform_quality_check(content: &str) -> Vec<QualityFinding> {
    QualityChecker::default().check(content)
}
