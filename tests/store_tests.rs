// ABOUTME: Integration tests for the file-backed prompt and template store
// ABOUTME: Verifies persistence across service instances and the on-disk document layout

use std::collections::HashMap;

use aiprompt::store::{
    FileBackend, PromptDraft, PromptService, TemplateDraft, TemplateService, TemplateUpdate,
    Visibility, PROMPTS_STORAGE_KEY, TEMPLATES_STORAGE_KEY,
};
use aiprompt::template::{describe_variables, BraceConvention};

mod common;
use common::TestEnvironment;

#[tokio::test]
async fn test_templates_persist_across_instances() {
    let env = TestEnvironment::new();
    let content = "Summarize {document} for {audience}";

    let id = {
        let mut service = TemplateService::new(FileBackend::new(env.store_file()));
        service
            .save_template(TemplateDraft {
                name: "Summary".to_string(),
                content: content.to_string(),
                variables: describe_variables(content, BraceConvention::Single),
                ..Default::default()
            })
            .await
            .unwrap()
            .id
    };

    let service = TemplateService::new(FileBackend::new(env.store_file()));
    let loaded = service.template(&id).await.unwrap().unwrap();
    assert_eq!(loaded.name, "Summary");
    assert_eq!(loaded.variables.len(), 2);
    assert_eq!(loaded.variables[0].name, "document");
}

#[tokio::test]
async fn test_document_uses_fixed_keys() {
    let env = TestEnvironment::new();

    let mut templates = TemplateService::new(FileBackend::new(env.store_file()));
    templates.initialize_sample_data().await.unwrap();

    let mut prompts = PromptService::new(FileBackend::new(env.store_file()));
    prompts
        .save_prompt(PromptDraft {
            title: "Standup".to_string(),
            content: "Summarize yesterday's work".to_string(),
            category: "team".to_string(),
            ai_model: "gpt-4".to_string(),
            visibility: Visibility::Team,
            ..Default::default()
        })
        .await
        .unwrap();

    let raw = tokio::fs::read_to_string(env.store_file()).await.unwrap();
    let document: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let stored_templates: serde_json::Value =
        serde_json::from_str(document[TEMPLATES_STORAGE_KEY].as_str().unwrap()).unwrap();
    let stored_prompts: serde_json::Value =
        serde_json::from_str(document[PROMPTS_STORAGE_KEY].as_str().unwrap()).unwrap();

    assert_eq!(stored_templates.as_array().unwrap().len(), 1);
    assert_eq!(stored_prompts[0]["title"], "Standup");
    assert_eq!(stored_prompts[0]["aiModel"], "gpt-4");
    assert_eq!(stored_prompts[0]["visibility"], "team");
    assert_eq!(stored_prompts[0]["isPublic"], false);
}

#[tokio::test]
async fn test_corrupted_key_is_ignored() {
    let env = TestEnvironment::new();
    let document = serde_json::json!({
        TEMPLATES_STORAGE_KEY: "[{\"broken\": ",
        PROMPTS_STORAGE_KEY: "[]",
    });
    tokio::fs::write(env.store_file(), document.to_string())
        .await
        .unwrap();

    let mut service = TemplateService::new(FileBackend::new(env.store_file()));
    assert!(service.templates().await.unwrap().is_empty());

    // saving replaces the corrupted value with a valid collection
    service
        .save_template(TemplateDraft {
            name: "Fresh".to_string(),
            content: "New {start}".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(service.templates().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_then_generate() {
    let env = TestEnvironment::new();
    let mut service = TemplateService::new(FileBackend::new(env.store_file()));

    let saved = service
        .save_template(TemplateDraft {
            name: "Greeting".to_string(),
            content: "Hi {name}".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    service
        .update_template(
            &saved.id,
            TemplateUpdate {
                content: Some("Dear {name}, welcome to {place}.".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    let mut values = HashMap::new();
    values.insert("name".to_string(), "Sam".to_string());
    values.insert("place".to_string(), "the team".to_string());

    let generated = service.generate_from_template(&saved.id, &values).await.unwrap();
    assert_eq!(generated, "Dear Sam, welcome to the team.");
}

#[tokio::test]
async fn test_sample_template_generation() {
    let env = TestEnvironment::new();
    let mut service = TemplateService::new(FileBackend::new(env.store_file()));
    service.initialize_sample_data().await.unwrap();

    let sample = service.templates().await.unwrap().remove(0);
    let values: HashMap<String, String> = sample
        .variables
        .iter()
        .map(|v| {
            let value = v.default_value.clone().unwrap_or_else(|| format!("<{}>", v.name));
            (v.name.clone(), value)
        })
        .collect();

    let generated = service.generate_from_template(&sample.id, &values).await.unwrap();
    assert!(generated.contains("about 800 words"));
    assert!(generated.contains("**Theme**: <theme>"));
    assert!(!generated.contains('{'));
}
