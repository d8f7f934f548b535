// ABOUTME: Placeholder extraction and substitution for prompt templates
// ABOUTME: Handles both {{double}} and {single} brace conventions with one parameterized scanner

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::sections::StructuredData;

static DOUBLE_BRACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("double brace regex"));
static SINGLE_BRACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}]+)\}").expect("single brace regex"));

/// Placeholder syntax used by a call site.
///
/// Live preview and quality checks read `{{name}}`; the creation wizard and
/// stored templates use `{name}`. The two are not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BraceConvention {
    #[default]
    Double,
    Single,
}

impl BraceConvention {
    fn pattern(self) -> &'static Regex {
        match self {
            BraceConvention::Double => &DOUBLE_BRACE_RE,
            BraceConvention::Single => &SINGLE_BRACE_RE,
        }
    }

    /// Wrap a variable name in this convention's braces
    pub fn placeholder(self, name: &str) -> String {
        match self {
            BraceConvention::Double => format!("{{{{{}}}}}", name),
            BraceConvention::Single => format!("{{{}}}", name),
        }
    }
}

impl fmt::Display for BraceConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BraceConvention::Double => write!(f, "double"),
            BraceConvention::Single => write!(f, "single"),
        }
    }
}

impl FromStr for BraceConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "double" | "{{}}" => Ok(BraceConvention::Double),
            "single" | "{}" => Ok(BraceConvention::Single),
            other => Err(format!(
                "unknown brace convention '{}', expected 'double' or 'single'",
                other
            )),
        }
    }
}

/// Input widget kind for a template variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    #[default]
    Text,
    Number,
    Select,
    Textarea,
}

/// Descriptor for a variable a template expects to be filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptVariable {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: VariableKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl PromptVariable {
    /// A required free-text variable with a generated prompt for the user
    pub fn text(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            description: Some(format!("Enter a value for {}", name)),
            name,
            kind: VariableKind::Text,
            required: true,
            default_value: None,
            options: Vec::new(),
        }
    }
}

/// Extract the distinct variable names referenced in `content`, in order of
/// first appearance.
pub fn extract_variables(content: &str, convention: BraceConvention) -> Vec<String> {
    let mut names = IndexSet::new();
    collect_names(content, convention, &mut names);
    names.into_iter().collect()
}

/// Extract variables across every section body of a structured template.
pub fn extract_section_variables(
    structure: &StructuredData,
    convention: BraceConvention,
) -> Vec<String> {
    let mut names = IndexSet::new();
    for body in structure.values() {
        collect_names(body, convention, &mut names);
    }
    names.into_iter().collect()
}

fn collect_names(content: &str, convention: BraceConvention, names: &mut IndexSet<String>) {
    for caps in convention.pattern().captures_iter(content) {
        if let Some(name) = caps.get(1) {
            if !names.contains(name.as_str()) {
                names.insert(name.as_str().to_string());
            }
        }
    }
}

/// Build one required text descriptor per distinct variable in `content`.
pub fn describe_variables(content: &str, convention: BraceConvention) -> Vec<PromptVariable> {
    extract_variables(content, convention)
        .into_iter()
        .map(PromptVariable::text)
        .collect()
}

/// Replace placeholders with their values.
///
/// Each provided name is matched as a literal placeholder, so `{name}` inside
/// `{{name}}` is still filled under the single convention. Placeholders whose
/// value is missing or empty are left as written. Values are inserted
/// literally and never rescanned.
pub fn substitute_variables(
    content: &str,
    convention: BraceConvention,
    values: &HashMap<String, String>,
) -> String {
    let filled = values.iter().filter(|(_, value)| !value.is_empty());
    replace_placeholders(content, convention, filled)
}

/// Fill a stored template: every provided name is replaced, empty values included.
pub fn fill_template(content: &str, values: &HashMap<String, String>) -> String {
    replace_placeholders(content, BraceConvention::Single, values.iter())
}

fn replace_placeholders<'a>(
    content: &str,
    convention: BraceConvention,
    values: impl Iterator<Item = (&'a String, &'a String)>,
) -> String {
    let mut placeholders: Vec<(String, &str)> = values
        .map(|(name, value)| (convention.placeholder(name), value.as_str()))
        .collect();
    if placeholders.is_empty() {
        return content.to_string();
    }
    // longest first so a placeholder never shadows a longer one at the same offset
    placeholders.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut output = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(pos) = rest.find('{') {
        output.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match placeholders
            .iter()
            .find(|(placeholder, _)| tail.starts_with(placeholder.as_str()))
        {
            Some((placeholder, value)) => {
                output.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                output.push('{');
                rest = &tail[1..];
            }
        }
    }
    output.push_str(rest);
    output
}

/// Wizard generation: fill each non-empty section template and join them.
pub fn generate_prompt(structure: &StructuredData, values: &HashMap<String, String>) -> String {
    structure
        .values()
        .filter(|template| !template.is_empty())
        .map(|template| substitute_variables(template, BraceConvention::Single, values))
        .collect::<Vec<_>>()
        .join("\n\n")
        .trim()
        .to_string()
}

/// Percentage of `variables` that have a non-blank value.
pub fn fill_progress(variables: &[String], values: &HashMap<String, String>) -> f64 {
    if variables.is_empty() {
        return 0.0;
    }

    let filled = variables
        .iter()
        .filter(|name| values.get(*name).is_some_and(|v| !v.trim().is_empty()))
        .count();

    filled as f64 / variables.len() as f64 * 100.0
}
