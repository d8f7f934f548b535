// ABOUTME: Prompt template engine module
// ABOUTME: Variable extraction, structured section conversion, and quality heuristics

pub mod editor;
pub mod preview;
pub mod quality;
pub mod sections;
pub mod variables;

pub use editor::{SectionElement, StructuredEditor};
pub use preview::LivePreview;
pub use quality::{perform_quality_check, QualityChecker, QualityFinding, Severity};
pub use sections::{generate_structured_content, parse_structured_content, StructuredData};
pub use variables::{
    describe_variables, extract_section_variables, extract_variables, fill_progress,
    fill_template, generate_prompt, substitute_variables, BraceConvention, PromptVariable, VariableKind,
};
