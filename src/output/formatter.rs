// ABOUTME: Output formatters for reports (JSON, YAML, text)
// ABOUTME: Text output is rendered from Handlebars templates registered per report kind

use handlebars::Handlebars;

use super::error::{OutputError, Result};
use super::report::Report;

pub trait OutputFormatter: Send + Sync {
    fn format(&self, report: &Report) -> Result<String>;
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct YamlFormatter;

pub struct TextFormatter {
    handlebars: Handlebars<'static>,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn new_pretty() -> Self {
        Self { pretty: true }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(report).map_err(OutputError::SerializationError)
        } else {
            serde_json::to_string(report).map_err(OutputError::SerializationError)
        }
    }
}

impl Default for YamlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl YamlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for YamlFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let yaml = serde_yaml::to_string(report)?;
        Ok(yaml.trim_end().to_string())
    }
}

const VARIABLES_TEMPLATE: &str = "\
{{#if variables}}{{#each variables}}{{this}}
{{/each}}{{else}}No {{convention}}-brace variables found{{/if}}";

const SECTIONS_TEMPLATE: &str = "\
{{#if sections}}{{#each sections}}[{{@key}}]
{{this}}

{{/each}}{{else}}No sections found{{/if}}";

const FINDINGS_TEMPLATE: &str = "\
{{#each findings}}[{{severity}}] {{message}}
{{/each}}";

const PREVIEW_TEMPLATE: &str = "\
Characters: {{char_count}}
Variables: {{#if variables}}{{#each variables}}{{this}}{{#unless @last}}, {{/unless}}{{/each}}{{else}}none{{/if}}
Sections: {{#if sections}}{{#each sections}}{{@key}}{{#unless @last}}, {{/unless}}{{/each}}{{else}}none{{/if}}
{{#each findings}}[{{severity}}] {{message}}
{{/each}}";

const TEMPLATES_TEMPLATE: &str = "\
{{#if templates}}{{#each templates}}{{id}}  {{name}}{{#if category}} [{{category}}]{{/if}}
{{/each}}{{else}}No templates stored{{/if}}";

const TEMPLATE_TEMPLATE: &str = "\
{{#with template}}{{name}} ({{id}})
{{#if description}}{{description}}
{{/if}}{{#if tags}}Tags: {{#each tags}}{{this}}{{#unless @last}}, {{/unless}}{{/each}}
{{/if}}{{#if variables}}Variables: {{#each variables}}{{name}}{{#unless @last}}, {{/unless}}{{/each}}
{{/if}}---
{{content}}{{/with}}";

const PROMPTS_TEMPLATE: &str = "\
{{#if prompts}}{{#each prompts}}{{id}}  {{title}} [{{category}}] ({{aiModel}})
{{/each}}{{else}}No prompts stored{{/if}}";

const PROMPT_TEMPLATE: &str = "\
{{#with prompt}}{{title}} ({{id}})
Category: {{category}}  Model: {{aiModel}}  Visibility: {{visibility}}
{{#if tags}}Tags: {{#each tags}}{{this}}{{#unless @last}}, {{/unless}}{{/each}}
{{/if}}---
{{content}}{{/with}}";

impl TextFormatter {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);

        // Plain text output, nothing to escape
        handlebars.register_escape_fn(handlebars::no_escape);

        let templates = [
            ("variables", VARIABLES_TEMPLATE),
            ("sections", SECTIONS_TEMPLATE),
            ("content", "{{content}}"),
            ("findings", FINDINGS_TEMPLATE),
            ("preview", PREVIEW_TEMPLATE),
            ("templates", TEMPLATES_TEMPLATE),
            ("template", TEMPLATE_TEMPLATE),
            ("prompts", PROMPTS_TEMPLATE),
            ("prompt", PROMPT_TEMPLATE),
            ("message", "{{message}}"),
        ];
        for (name, source) in templates {
            handlebars.register_template_string(name, source)?;
        }

        Ok(Self { handlebars })
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let rendered = self.handlebars.render(report.kind(), report)?;
        Ok(rendered.trim_end().to_string())
    }
}
