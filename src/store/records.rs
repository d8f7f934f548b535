// ABOUTME: Persisted record types for prompt templates and prompts
// ABOUTME: Serialized as camelCase JSON arrays under the store's fixed keys

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

use crate::template::PromptVariable;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplate {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub variables: Vec<PromptVariable>,
    #[serde(default)]
    pub metadata: IndexMap<String, JsonValue>,
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub rating_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the caller when saving a new template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub variables: Vec<PromptVariable>,
    #[serde(default)]
    pub metadata: IndexMap<String, JsonValue>,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub variables: Option<Vec<PromptVariable>>,
    pub metadata: Option<IndexMap<String, JsonValue>>,
}

impl PromptTemplate {
    pub(crate) fn from_draft(id: String, draft: TemplateDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            content: draft.content,
            category: draft.category,
            tags: draft.tags,
            variables: draft.variables,
            metadata: draft.metadata,
            usage_count: 0,
            rating: 0.0,
            rating_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn apply(&mut self, update: TemplateUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(category) = update.category {
            self.category = Some(category);
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(variables) = update.variables {
            self.variables = variables;
        }
        if let Some(metadata) = update.metadata {
            self.metadata = metadata;
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Public,
    Team,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Private => write!(f, "private"),
            Visibility::Public => write!(f, "public"),
            Visibility::Team => write!(f, "team"),
        }
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "private" => Ok(Visibility::Private),
            "public" => Ok(Visibility::Public),
            "team" => Ok(Visibility::Team),
            other => Err(format!("unknown visibility '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub ai_model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub rating_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub ai_model: String,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub ai_model: Option<String>,
    pub visibility: Option<Visibility>,
}

impl Prompt {
    pub(crate) fn from_draft(id: String, draft: PromptDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            content: draft.content,
            category: draft.category,
            tags: draft.tags,
            ai_model: draft.ai_model,
            template_id: draft.template_id,
            is_public: draft.visibility == Visibility::Public,
            visibility: draft.visibility,
            usage_count: 0,
            rating: 0.0,
            rating_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn apply(&mut self, update: PromptUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(ai_model) = update.ai_model {
            self.ai_model = ai_model;
        }
        if let Some(visibility) = update.visibility {
            self.visibility = visibility;
            self.is_public = visibility == Visibility::Public;
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_serializes_camel_case() {
        let template = PromptTemplate::from_draft(
            "t1".to_string(),
            TemplateDraft {
                name: "Blog".to_string(),
                content: "Write about {theme}".to_string(),
                ..Default::default()
            },
            Utc::now(),
        );

        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["usageCount"], 0);
        assert_eq!(json["ratingCount"], 0);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_prompt_visibility_tracks_is_public() {
        let mut prompt = Prompt::from_draft(
            "p1".to_string(),
            PromptDraft {
                title: "Greeting".to_string(),
                content: "Say hi".to_string(),
                category: "misc".to_string(),
                ai_model: "gpt-4".to_string(),
                visibility: Visibility::Public,
                ..Default::default()
            },
            Utc::now(),
        );
        assert!(prompt.is_public);

        prompt.apply(
            PromptUpdate {
                visibility: Some(Visibility::Team),
                ..Default::default()
            },
            Utc::now(),
        );
        assert!(!prompt.is_public);
        assert_eq!(prompt.visibility.to_string(), "team");
    }

    #[test]
    fn test_variable_type_field_name() {
        let json = r#"{"name":"theme","type":"textarea","required":true,"defaultValue":"AI"}"#;
        let variable: PromptVariable = serde_json::from_str(json).unwrap();
        assert_eq!(variable.kind, crate::template::VariableKind::Textarea);
        assert_eq!(variable.default_value.as_deref(), Some("AI"));
    }
}
