// ABOUTME: Live preview analysis bundling everything the preview panel displays
// ABOUTME: Combines double-brace variables, quality findings, and parsed sections

use serde::Serialize;

use super::quality::{QualityChecker, QualityFinding};
use super::sections::{parse_structured_content, StructuredData};
use super::variables::{extract_variables, BraceConvention};

#[derive(Debug, Clone, Serialize)]
pub struct LivePreview {
    pub char_count: usize,
    pub variables: Vec<String>,
    pub findings: Vec<QualityFinding>,
    pub sections: StructuredData,
}

impl LivePreview {
    pub fn analyze(content: &str) -> Self {
        Self::analyze_with(content, &QualityChecker::default())
    }

    pub fn analyze_with(content: &str, checker: &QualityChecker) -> Self {
        Self {
            char_count: content.chars().count(),
            variables: extract_variables(content, BraceConvention::Double),
            findings: checker.check(content),
            sections: parse_structured_content(content),
        }
    }
}
