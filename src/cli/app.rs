// ABOUTME: Main application orchestration for the aiprompt CLI
// ABOUTME: Coordinates between CLI arguments, configuration, command execution, and output

use anyhow::{anyhow, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use super::commands;
use super::{Args, Commands, Config};
use crate::output::{OutputDestination, OutputHandler, Report};

pub struct App {
    config: Config,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self, verbose: bool, no_color: bool) -> Result<()> {
        let log_level = if verbose {
            "debug"
        } else {
            &self.config.logging.level
        };

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        // Logs go to stderr so stdout carries only command output
        match self.config.logging.format.as_str() {
            "compact" => {
                tracing_subscriber::fmt()
                    .compact()
                    .with_env_filter(env_filter)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .init();
            }
            _ => {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }

        debug!("Logging initialized with level: {}", log_level);
        Ok(())
    }

    /// Run the application with parsed arguments
    pub async fn run(&mut self, args: Args) -> Result<()> {
        self.init_logging(args.verbose, args.no_color)?;

        info!("Starting aiprompt v{}", env!("CARGO_PKG_VERSION"));
        debug!("Configuration loaded from: {:?}", args.config);

        if let Commands::Fill { vars, .. } = &args.command {
            let variables = Args::parse_variables(vars)?;
            self.config.merge_variables(variables);
        }

        let format = args
            .format
            .clone()
            .unwrap_or_else(|| self.config.output_format.clone());
        let destination = match args.output.clone() {
            Some(path) if args.append => OutputDestination::appending(path),
            Some(path) => OutputDestination::file(path),
            None => OutputDestination::Stdout,
        };

        let report = self.execute(args.command).await?;

        let handler =
            OutputHandler::new().map_err(|e| anyhow!("Failed to set up output: {}", e))?;
        handler
            .emit(&report, &format, &destination)
            .await
            .map_err(|e| anyhow!("Failed to write output: {}", e))?;

        Ok(())
    }

    /// Execute a command and return its report without printing it
    pub async fn execute(&self, command: Commands) -> Result<Report> {
        match command {
            Commands::Vars { input, convention } => {
                commands::list_variables(&input, convention).await
            }
            Commands::Sections { input } => commands::split_sections(&input).await,
            Commands::Compose { sections } => commands::compose_sections(&sections),
            Commands::Check { input } => commands::check_quality(&input, &self.config).await,
            Commands::Preview { input } => commands::preview(&input, &self.config).await,
            Commands::Fill { input, .. } => {
                commands::fill_variables(&input, &self.config.template_vars).await
            }
            Commands::Template { action } => {
                commands::run_template_command(action, &self.config).await
            }
            Commands::Prompt { action } => commands::run_prompt_command(action, &self.config).await,
        }
    }

    /// Create application from command line arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let config = Config::load(args.config.clone())?;
        Ok(Self::new(config))
    }
}
