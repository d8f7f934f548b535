// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for aiprompt

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::store::Visibility;
use crate::template::{BraceConvention, StructuredData};

#[derive(Parser)]
#[command(name = "aiprompt")]
#[command(about = "Analyze, structure, and store AI prompt templates")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,

    #[arg(
        short,
        long,
        global = true,
        help = "Output format (text, json, pretty, yaml)"
    )]
    pub format: Option<String>,

    #[arg(short, long, global = true, help = "Write output to a file instead of stdout")]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        requires = "output",
        help = "Append to the output file instead of replacing it"
    )]
    pub append: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the variables referenced in a prompt
    Vars {
        #[arg(help = "Prompt file, or - for stdin")]
        input: String,

        #[arg(long, default_value = "double", help = "Brace convention (double or single)")]
        convention: BraceConvention,
    },

    /// Split a prompt into its "## " sections
    Sections {
        #[arg(help = "Prompt file, or - for stdin")]
        input: String,
    },

    /// Build prompt text from named sections
    Compose {
        #[arg(long = "section", value_name = "NAME=BODY", help = "Section to include, in order")]
        sections: Vec<String>,
    },

    /// Run the prompt quality heuristics
    Check {
        #[arg(help = "Prompt file, or - for stdin")]
        input: String,
    },

    /// Show everything the live preview panel would display
    Preview {
        #[arg(help = "Prompt file, or - for stdin")]
        input: String,
    },

    /// Substitute {name} placeholders with values
    Fill {
        #[arg(help = "Prompt file, or - for stdin")]
        input: String,

        #[arg(long = "var", value_name = "KEY=VALUE", help = "Variable value (key=value)")]
        vars: Vec<String>,
    },

    /// Manage stored templates
    Template {
        #[command(subcommand)]
        action: TemplateCommand,
    },

    /// Manage stored prompts
    Prompt {
        #[command(subcommand)]
        action: PromptCommand,
    },
}

#[derive(Subcommand)]
pub enum TemplateCommand {
    /// List stored templates
    List,

    /// Show a single template
    Show { id: String },

    /// Store a new template; variables are detected from {name} placeholders
    Add {
        name: String,

        #[arg(help = "Template file, or - for stdin")]
        input: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Delete a template
    Delete { id: String },

    /// Generate a prompt from a stored template
    Generate {
        id: String,

        #[arg(long = "var", value_name = "KEY=VALUE", help = "Variable value (key=value)")]
        vars: Vec<String>,
    },

    /// Seed the store with a sample template if it has none
    Init,
}

#[derive(Subcommand)]
pub enum PromptCommand {
    /// List stored prompts
    List,

    /// Show a single prompt
    Show { id: String },

    /// Store a new prompt
    Add {
        title: String,

        #[arg(help = "Prompt file, or - for stdin")]
        input: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, default_value = "general")]
        category: String,

        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long, default_value = "gpt-4")]
        model: String,

        #[arg(long)]
        template_id: Option<String>,

        #[arg(long, default_value = "private")]
        visibility: Visibility,
    },

    /// Delete a prompt
    Delete { id: String },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from key=value format
    pub fn parse_variables(vars: &[String]) -> anyhow::Result<HashMap<String, String>> {
        let mut variables = HashMap::new();

        for var in vars {
            if let Some((key, value)) = var.split_once('=') {
                variables.insert(key.to_string(), value.to_string());
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid variable format '{}'. Expected 'key=value'",
                    var
                ));
            }
        }

        Ok(variables)
    }

    /// Parse ordered sections from NAME=BODY format
    pub fn parse_sections(sections: &[String]) -> anyhow::Result<StructuredData> {
        let mut data = StructuredData::new();

        for section in sections {
            if let Some((name, body)) = section.split_once('=') {
                data.insert(name.to_string(), body.to_string());
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid section format '{}'. Expected 'NAME=BODY'",
                    section
                ));
            }
        }

        Ok(data)
    }
}
