// ABOUTME: State container that keeps a structured form view and flat prompt text in sync
// ABOUTME: Owned by the caller; every edit regenerates the flat content from section data

use serde::{Deserialize, Serialize};

use super::sections::{generate_structured_content, parse_structured_content, StructuredData};

/// A form field in the structured editor, one per expected section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionElement {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub example: String,
}

impl SectionElement {
    pub fn new(name: impl Into<String>, description: impl Into<String>, example: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            example: example.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StructuredEditor {
    elements: Vec<SectionElement>,
    data: StructuredData,
    content: String,
}

impl StructuredEditor {
    pub fn new(elements: Vec<SectionElement>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            elements,
            data: parse_structured_content(&content),
            content,
        }
    }

    pub fn elements(&self) -> &[SectionElement] {
        &self.elements
    }

    pub fn data(&self) -> &StructuredData {
        &self.data
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Body of a section, empty if it has not been written yet
    pub fn section(&self, name: &str) -> &str {
        self.data.get(name).map(String::as_str).unwrap_or("")
    }

    /// Set one section's body and return the regenerated flat content.
    pub fn update_section(&mut self, name: &str, value: impl Into<String>) -> &str {
        self.data.insert(name.to_string(), value.into());
        self.content = generate_structured_content(&self.data);
        &self.content
    }

    /// Accept flat content edited elsewhere.
    ///
    /// Section data is re-parsed only when the new content differs from what
    /// the current data would generate, so blank sections the user is still
    /// filling in survive an echo of their own edit. Returns true when the
    /// data was replaced.
    pub fn sync_content(&mut self, content: impl Into<String>) -> bool {
        let content = content.into();
        let reparse = content != generate_structured_content(&self.data);
        if reparse {
            self.data = parse_structured_content(&content);
        }
        self.content = content;
        reparse
    }

    /// Character count of each element's section, in element order.
    pub fn section_lengths(&self) -> Vec<(&str, usize)> {
        self.elements
            .iter()
            .map(|element| (element.name.as_str(), self.section(&element.name).chars().count()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements() -> Vec<SectionElement> {
        vec![
            SectionElement::new("Role", "Who the model should be", "You are a copywriter"),
            SectionElement::new("Task", "What to do", "Write a tagline"),
        ]
    }

    #[test]
    fn test_editor_parses_initial_content() {
        let editor = StructuredEditor::new(elements(), "## Role\nEditor\n\n## Task\nProofread");
        assert_eq!(editor.section("Role"), "Editor");
        assert_eq!(editor.section("Task"), "Proofread");
        assert_eq!(editor.section("Missing"), "");
    }

    #[test]
    fn test_update_section_regenerates_content() {
        let mut editor = StructuredEditor::new(elements(), "");
        editor.update_section("Task", "Write a haiku");
        let content = editor.update_section("Role", "Poet").to_string();

        assert_eq!(content, "## Task\nWrite a haiku\n\n## Role\nPoet");
        assert_eq!(editor.content(), content);
    }

    #[test]
    fn test_blank_section_survives_echo() {
        let mut editor = StructuredEditor::new(elements(), "");
        editor.update_section("Role", "");
        let generated = editor.update_section("Task", "Summarize").to_string();

        assert!(!editor.sync_content(generated));
        assert!(editor.data().contains_key("Role"));
    }

    #[test]
    fn test_external_edit_reparses() {
        let mut editor = StructuredEditor::new(elements(), "## Role\nPoet");
        assert!(editor.sync_content("## Task\nRewrite"));
        assert_eq!(editor.section("Role"), "");
        assert_eq!(editor.section("Task"), "Rewrite");
    }

    #[test]
    fn test_section_lengths() {
        let editor = StructuredEditor::new(elements(), "## Role\nあいう");
        assert_eq!(editor.section_lengths(), vec![("Role", 3), ("Task", 0)]);
    }
}
