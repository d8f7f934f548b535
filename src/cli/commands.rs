// ABOUTME: Command implementations for the aiprompt CLI
// ABOUTME: Each command reads its input, calls the engine or store, and returns a report

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use super::args::{PromptCommand, TemplateCommand};
use super::config::Config;
use super::Args;
use crate::output::Report;
use crate::store::{
    FileBackend, PromptDraft, PromptService, StoreError, TemplateDraft, TemplateService,
};
use crate::template::{
    describe_variables, extract_variables, generate_structured_content, parse_structured_content,
    substitute_variables, BraceConvention, LivePreview,
};

/// Read prompt text from a file path, or from stdin when the path is "-"
pub async fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut content = String::new();
        tokio::io::stdin()
            .read_to_string(&mut content)
            .await
            .map_err(|e| anyhow!("Failed to read stdin: {}", e))?;
        return Ok(content);
    }

    tokio::fs::read_to_string(input)
        .await
        .map_err(|e| anyhow!("Failed to read '{}': {}", input, e))
}

pub async fn list_variables(input: &str, convention: BraceConvention) -> Result<Report> {
    let content = read_input(input).await?;
    let variables = extract_variables(&content, convention);
    debug!("Found {} {}-brace variables", variables.len(), convention);

    Ok(Report::Variables {
        convention,
        variables,
    })
}

pub async fn split_sections(input: &str) -> Result<Report> {
    let content = read_input(input).await?;
    Ok(Report::Sections {
        sections: parse_structured_content(&content),
    })
}

pub fn compose_sections(sections: &[String]) -> Result<Report> {
    let data = Args::parse_sections(sections)?;
    Ok(Report::Content {
        content: generate_structured_content(&data),
    })
}

pub async fn check_quality(input: &str, config: &Config) -> Result<Report> {
    let content = read_input(input).await?;
    Ok(Report::Findings {
        findings: config.quality.check(&content),
    })
}

pub async fn preview(input: &str, config: &Config) -> Result<Report> {
    let content = read_input(input).await?;
    Ok(Report::Preview(LivePreview::analyze_with(
        &content,
        &config.quality,
    )))
}

pub async fn fill_variables(input: &str, values: &HashMap<String, String>) -> Result<Report> {
    let content = read_input(input).await?;
    Ok(Report::Content {
        content: substitute_variables(&content, BraceConvention::Single, values),
    })
}

pub async fn run_template_command(action: TemplateCommand, config: &Config) -> Result<Report> {
    let mut service = TemplateService::new(FileBackend::new(config.store_path.clone()));

    match action {
        TemplateCommand::List => Ok(Report::Templates {
            templates: service.templates().await?,
        }),

        TemplateCommand::Show { id } => {
            let template = service
                .template(&id)
                .await?
                .ok_or_else(|| StoreError::TemplateNotFound { id: id.clone() })?;
            Ok(Report::Template { template })
        }

        TemplateCommand::Add {
            name,
            input,
            description,
            category,
            tags,
        } => {
            let content = read_input(&input).await?;
            let variables = describe_variables(&content, BraceConvention::Single);
            info!("Detected {} template variables", variables.len());

            let template = service
                .save_template(TemplateDraft {
                    name,
                    description,
                    content,
                    category,
                    tags,
                    variables,
                    ..Default::default()
                })
                .await?;
            Ok(Report::Template { template })
        }

        TemplateCommand::Delete { id } => {
            if service.delete_template(&id).await? {
                Ok(Report::message(format!("Deleted template {}", id)))
            } else {
                Err(StoreError::TemplateNotFound { id }.into())
            }
        }

        TemplateCommand::Generate { id, vars } => {
            let mut values = config.template_vars.clone();
            values.extend(Args::parse_variables(&vars)?);

            let content = service
                .generate_from_template(&id, &values)
                .await
                .map_err(|e| anyhow!("Failed to generate prompt: {}", e))?;
            Ok(Report::Content { content })
        }

        TemplateCommand::Init => {
            if service.initialize_sample_data().await? {
                Ok(Report::message("Sample template created"))
            } else {
                Ok(Report::message("Templates already present, nothing to do"))
            }
        }
    }
}

pub async fn run_prompt_command(action: PromptCommand, config: &Config) -> Result<Report> {
    let mut service = PromptService::new(FileBackend::new(config.store_path.clone()));

    match action {
        PromptCommand::List => Ok(Report::Prompts {
            prompts: service.prompts().await?,
        }),

        PromptCommand::Show { id } => {
            let prompt = service
                .prompt(&id)
                .await?
                .ok_or_else(|| StoreError::PromptNotFound { id: id.clone() })?;
            Ok(Report::Prompt { prompt })
        }

        PromptCommand::Add {
            title,
            input,
            description,
            category,
            tags,
            model,
            template_id,
            visibility,
        } => {
            let content = read_input(&input).await?;
            let prompt = service
                .save_prompt(PromptDraft {
                    title,
                    description,
                    content,
                    category,
                    tags,
                    ai_model: model,
                    template_id,
                    visibility,
                })
                .await?;
            Ok(Report::Prompt { prompt })
        }

        PromptCommand::Delete { id } => {
            if service.delete_prompt(&id).await? {
                Ok(Report::message(format!("Deleted prompt {}", id)))
            } else {
                Err(StoreError::PromptNotFound { id }.into())
            }
        }
    }
}
