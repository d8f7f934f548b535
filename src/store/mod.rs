// ABOUTME: Local prompt and template store
// ABOUTME: Persists records as JSON under fixed keys in a file or in-memory backend

pub mod backend;
pub mod error;
pub mod records;
pub mod service;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use error::{Result, StoreError};
pub use records::{
    Prompt, PromptDraft, PromptTemplate, PromptUpdate, TemplateDraft, TemplateUpdate, Visibility,
};
pub use service::{PromptService, TemplateService, PROMPTS_STORAGE_KEY, TEMPLATES_STORAGE_KEY};
