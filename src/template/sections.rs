// ABOUTME: Conversion between flat prompt text and "## Section" structured data
// ABOUTME: Parses section headers into an ordered map and serializes the map back to text

use indexmap::IndexMap;
use tracing::trace;

/// Prefix that starts a named section line.
pub const SECTION_PREFIX: &str = "## ";

/// Section name to trimmed section body, in order of first appearance.
pub type StructuredData = IndexMap<String, String>;

/// Split `content` into named sections.
///
/// `\r\n` line endings are treated as `\n`. Text before the first header is
/// discarded, as is the body under a header with an empty name. A repeated
/// header replaces the earlier body while keeping its original position.
pub fn parse_structured_content(content: &str) -> StructuredData {
    let normalized = content.replace("\r\n", "\n");
    let mut sections = StructuredData::new();
    let mut current: Option<&str> = None;
    let mut body = String::new();

    for line in normalized.split('\n') {
        if let Some(name) = line.strip_prefix(SECTION_PREFIX) {
            if let Some(section) = current {
                sections.insert(section.to_string(), body.trim().to_string());
            }
            current = Some(name).filter(|n| !n.is_empty());
            body.clear();
        } else {
            body.push_str(line);
            body.push('\n');
        }
    }

    if let Some(section) = current {
        sections.insert(section.to_string(), body.trim().to_string());
    }

    trace!("Parsed {} structured sections", sections.len());
    sections
}

/// Serialize sections back to flat text, dropping sections that are blank.
pub fn generate_structured_content(data: &StructuredData) -> String {
    data.iter()
        .filter(|(_, body)| !body.trim().is_empty())
        .map(|(name, body)| format!("{}{}\n{}", SECTION_PREFIX, name, body))
        .collect::<Vec<_>>()
        .join("\n\n")
}
