// ABOUTME: Template and prompt services layered over a storage backend
// ABOUTME: CRUD, template-based prompt generation, and sample data seeding

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::backend::StorageBackend;
use super::error::{Result, StoreError};
use super::records::{
    Prompt, PromptDraft, PromptTemplate, PromptUpdate, TemplateDraft, TemplateUpdate,
};
use crate::template::{fill_template, PromptVariable, VariableKind};

pub const TEMPLATES_STORAGE_KEY: &str = "aiprompt_templates";
pub const PROMPTS_STORAGE_KEY: &str = "aiprompt_prompts";

/// Read a JSON array stored under `key`. A corrupted value is logged and
/// read as an empty collection.
async fn load_collection<B, T>(backend: &B, key: &str) -> Result<Vec<T>>
where
    B: StorageBackend,
    T: DeserializeOwned,
{
    let Some(raw) = backend.get_item(key).await? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str(&raw) {
        Ok(items) => Ok(items),
        Err(e) => {
            warn!("Ignoring corrupted data under '{}': {}", key, e);
            Ok(Vec::new())
        }
    }
}

async fn store_collection<B, T>(backend: &mut B, key: &str, items: &[T]) -> Result<()>
where
    B: StorageBackend,
    T: Serialize,
{
    let raw = serde_json::to_string(items)?;
    backend.set_item(key, raw).await
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub struct TemplateService<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> TemplateService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub async fn templates(&self) -> Result<Vec<PromptTemplate>> {
        load_collection(&self.backend, TEMPLATES_STORAGE_KEY).await
    }

    pub async fn template(&self, id: &str) -> Result<Option<PromptTemplate>> {
        Ok(self.templates().await?.into_iter().find(|t| t.id == id))
    }

    pub async fn save_template(&mut self, draft: TemplateDraft) -> Result<PromptTemplate> {
        let mut templates = self.templates().await?;
        let template = PromptTemplate::from_draft(new_id(), draft, Utc::now());
        templates.push(template.clone());
        store_collection(&mut self.backend, TEMPLATES_STORAGE_KEY, &templates).await?;

        info!("Saved template '{}' ({})", template.name, template.id);
        Ok(template)
    }

    /// Apply `update` to the template with `id`; `None` if there is no such template.
    pub async fn update_template(
        &mut self,
        id: &str,
        update: TemplateUpdate,
    ) -> Result<Option<PromptTemplate>> {
        let mut templates = self.templates().await?;
        let Some(template) = templates.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        template.apply(update, Utc::now());
        let updated = template.clone();
        store_collection(&mut self.backend, TEMPLATES_STORAGE_KEY, &templates).await?;

        debug!("Updated template {}", id);
        Ok(Some(updated))
    }

    /// Returns false if nothing was deleted.
    pub async fn delete_template(&mut self, id: &str) -> Result<bool> {
        let templates = self.templates().await?;
        let before = templates.len();
        let remaining: Vec<PromptTemplate> = templates.into_iter().filter(|t| t.id != id).collect();

        if remaining.len() == before {
            return Ok(false);
        }

        store_collection(&mut self.backend, TEMPLATES_STORAGE_KEY, &remaining).await?;
        info!("Deleted template {}", id);
        Ok(true)
    }

    /// Fill a stored template's `{name}` placeholders with `values`.
    pub async fn generate_from_template(
        &self,
        id: &str,
        values: &HashMap<String, String>,
    ) -> Result<String> {
        let template = self
            .template(id)
            .await?
            .ok_or_else(|| StoreError::TemplateNotFound { id: id.to_string() })?;

        Ok(fill_template(&template.content, values))
    }

    /// Seed the sample template when no templates exist. Returns true if seeded.
    pub async fn initialize_sample_data(&mut self) -> Result<bool> {
        if !self.templates().await?.is_empty() {
            return Ok(false);
        }

        self.save_template(sample_template()).await?;
        info!("Sample template created");
        Ok(true)
    }
}

pub struct PromptService<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> PromptService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub async fn prompts(&self) -> Result<Vec<Prompt>> {
        load_collection(&self.backend, PROMPTS_STORAGE_KEY).await
    }

    pub async fn prompt(&self, id: &str) -> Result<Option<Prompt>> {
        Ok(self.prompts().await?.into_iter().find(|p| p.id == id))
    }

    pub async fn save_prompt(&mut self, draft: PromptDraft) -> Result<Prompt> {
        let mut prompts = self.prompts().await?;
        let prompt = Prompt::from_draft(new_id(), draft, Utc::now());
        prompts.push(prompt.clone());
        store_collection(&mut self.backend, PROMPTS_STORAGE_KEY, &prompts).await?;

        info!("Saved prompt '{}' ({})", prompt.title, prompt.id);
        Ok(prompt)
    }

    pub async fn update_prompt(&mut self, id: &str, update: PromptUpdate) -> Result<Option<Prompt>> {
        let mut prompts = self.prompts().await?;
        let Some(prompt) = prompts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        prompt.apply(update, Utc::now());
        let updated = prompt.clone();
        store_collection(&mut self.backend, PROMPTS_STORAGE_KEY, &prompts).await?;

        debug!("Updated prompt {}", id);
        Ok(Some(updated))
    }

    pub async fn delete_prompt(&mut self, id: &str) -> Result<bool> {
        let prompts = self.prompts().await?;
        let before = prompts.len();
        let remaining: Vec<Prompt> = prompts.into_iter().filter(|p| p.id != id).collect();

        if remaining.len() == before {
            return Ok(false);
        }

        store_collection(&mut self.backend, PROMPTS_STORAGE_KEY, &remaining).await?;
        info!("Deleted prompt {}", id);
        Ok(true)
    }
}

fn sample_template() -> TemplateDraft {
    let variable = |name: &str, kind: VariableKind, description: &str| PromptVariable {
        name: name.to_string(),
        kind,
        description: Some(description.to_string()),
        required: true,
        default_value: None,
        options: Vec::new(),
    };

    let mut word_count = variable("word_count", VariableKind::Number, "Target word count");
    word_count.default_value = Some("800".to_string());

    let mut metadata = indexmap::IndexMap::new();
    metadata.insert("difficulty".to_string(), json!("intermediate"));
    metadata.insert("rating".to_string(), json!(4.7));

    TemplateDraft {
        name: "Blog article".to_string(),
        description: Some("Produce an SEO-friendly blog article from a few inputs".to_string()),
        content: "You are an experienced blog writer.\n\n\
                  Write a blog article of about {word_count} words on the theme below.\n\n\
                  **Theme**: {theme}\n\
                  **Audience**: {target_audience}\n\
                  **SEO keywords**: {seo_keywords}\n\n\
                  Include:\n\
                  - A compelling title\n\
                  - An introduction\n\
                  - A body with headings\n\
                  - A summary\n\n\
                  Make the article useful to readers and effective for search."
            .to_string(),
        category: Some("Writing".to_string()),
        tags: vec!["blog".to_string(), "seo".to_string(), "marketing".to_string()],
        variables: vec![
            variable("theme", VariableKind::Text, "Article theme"),
            variable("target_audience", VariableKind::Text, "Intended readers"),
            variable("seo_keywords", VariableKind::Text, "Keywords to target"),
            word_count,
        ],
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;
    use crate::template::{extract_variables, BraceConvention};

    fn draft(name: &str, content: &str) -> TemplateDraft {
        TemplateDraft {
            name: name.to_string(),
            content: content.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_template_crud() {
        let mut service = TemplateService::new(MemoryBackend::new());
        let saved = service.save_template(draft("Greeting", "Hello {name}")).await.unwrap();

        assert_eq!(service.templates().await.unwrap().len(), 1);
        assert_eq!(service.template(&saved.id).await.unwrap().unwrap().name, "Greeting");

        let updated = service
            .update_template(
                &saved.id,
                TemplateUpdate {
                    name: Some("Hello".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Hello");
        assert_eq!(updated.content, "Hello {name}");
        assert!(updated.updated_at >= saved.updated_at);

        assert!(service.delete_template(&saved.id).await.unwrap());
        assert!(!service.delete_template(&saved.id).await.unwrap());
        assert!(service.templates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_template() {
        let mut service = TemplateService::new(MemoryBackend::new());
        let result = service
            .update_template("nope", TemplateUpdate::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_generate_from_template() {
        let mut service = TemplateService::new(MemoryBackend::new());
        let saved = service
            .save_template(draft("Intro", "I am {name}, a {role}."))
            .await
            .unwrap();

        let mut values = HashMap::new();
        values.insert("name".to_string(), "Ada".to_string());

        let prompt = service.generate_from_template(&saved.id, &values).await.unwrap();
        assert_eq!(prompt, "I am Ada, a {role}.");

        let err = service
            .generate_from_template("missing", &values)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::TemplateNotFound { .. }));
    }

    #[tokio::test]
    async fn test_generate_from_template_with_empty_value() {
        let mut service = TemplateService::new(MemoryBackend::new());
        let saved = service
            .save_template(draft("Greeting", "Hello {name}!"))
            .await
            .unwrap();

        let mut values = HashMap::new();
        values.insert("name".to_string(), String::new());

        let prompt = service.generate_from_template(&saved.id, &values).await.unwrap();
        assert_eq!(prompt, "Hello !");
    }

    #[tokio::test]
    async fn test_corrupted_collection_reads_empty() {
        let mut backend = MemoryBackend::new();
        backend
            .set_item(TEMPLATES_STORAGE_KEY, "{broken".to_string())
            .await
            .unwrap();

        let service = TemplateService::new(backend);
        assert!(service.templates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sample_data_seeded_once() {
        let mut service = TemplateService::new(MemoryBackend::new());
        assert!(service.initialize_sample_data().await.unwrap());
        assert!(!service.initialize_sample_data().await.unwrap());

        let templates = service.templates().await.unwrap();
        assert_eq!(templates.len(), 1);

        let declared: Vec<&str> = templates[0].variables.iter().map(|v| v.name.as_str()).collect();
        let mut referenced = extract_variables(&templates[0].content, BraceConvention::Single);
        referenced.sort();
        let mut declared_sorted = declared.clone();
        declared_sorted.sort();
        assert_eq!(referenced, declared_sorted);
    }

    #[tokio::test]
    async fn test_prompt_crud() {
        let mut service = PromptService::new(MemoryBackend::new());
        let saved = service
            .save_prompt(PromptDraft {
                title: "Summarizer".to_string(),
                content: "Summarize this".to_string(),
                category: "analysis".to_string(),
                ai_model: "claude".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(saved.usage_count, 0);
        assert_eq!(service.prompt(&saved.id).await.unwrap().unwrap().title, "Summarizer");

        let updated = service
            .update_prompt(
                &saved.id,
                PromptUpdate {
                    tags: Some(vec!["short".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.tags, vec!["short"]);

        assert!(service.delete_prompt(&saved.id).await.unwrap());
        assert!(service.prompt(&saved.id).await.unwrap().is_none());
    }
}
