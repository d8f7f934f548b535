// ABOUTME: Report payloads produced by CLI commands
// ABOUTME: A single serializable enum so every formatter handles every command's output

use serde::Serialize;

use crate::store::{Prompt, PromptTemplate};
use crate::template::{BraceConvention, LivePreview, QualityFinding, StructuredData};

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    Variables {
        convention: BraceConvention,
        variables: Vec<String>,
    },
    Sections {
        sections: StructuredData,
    },
    Content {
        content: String,
    },
    Findings {
        findings: Vec<QualityFinding>,
    },
    Preview(LivePreview),
    Templates {
        templates: Vec<PromptTemplate>,
    },
    Template {
        template: PromptTemplate,
    },
    Prompts {
        prompts: Vec<Prompt>,
    },
    Prompt {
        prompt: Prompt,
    },
    Message {
        message: String,
    },
}

impl Report {
    /// Name of the text template used to render this report
    pub fn kind(&self) -> &'static str {
        match self {
            Report::Variables { .. } => "variables",
            Report::Sections { .. } => "sections",
            Report::Content { .. } => "content",
            Report::Findings { .. } => "findings",
            Report::Preview(_) => "preview",
            Report::Templates { .. } => "templates",
            Report::Template { .. } => "template",
            Report::Prompts { .. } => "prompts",
            Report::Prompt { .. } => "prompt",
            Report::Message { .. } => "message",
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Report::Message {
            message: message.into(),
        }
    }
}
