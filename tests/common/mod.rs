// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides prompt builders, isolated store directories, and CLI invocation helpers

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use tokio::fs;

/// Builds "## Section" prompt text for tests.
pub struct TestPromptBuilder {
    preamble: Option<String>,
    sections: Vec<(String, String)>,
}

impl TestPromptBuilder {
    pub fn new() -> Self {
        Self {
            preamble: None,
            sections: Vec::new(),
        }
    }

    pub fn with_preamble(mut self, text: &str) -> Self {
        self.preamble = Some(text.to_string());
        self
    }

    pub fn with_section(mut self, name: &str, body: &str) -> Self {
        self.sections.push((name.to_string(), body.to_string()));
        self
    }

    pub fn build(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ref preamble) = self.preamble {
            parts.push(preamble.clone());
        }
        for (name, body) in &self.sections {
            parts.push(format!("## {}\n{}", name, body));
        }
        parts.join("\n\n")
    }
}

pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn store_file(&self) -> PathBuf {
        self.temp_dir.path().join("store.json")
    }

    pub fn output_file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    pub async fn create_prompt_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content)
            .await
            .expect("Failed to write prompt file");
        path
    }

    /// Run the aiprompt binary isolated to this environment's store and config
    pub fn run_cli(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_aiprompt"))
            .args(["--config", self.output_file("no-config.yaml").to_str().unwrap()])
            .args(args)
            .current_dir(self.path())
            .env("AIPROMPT_STORE_PATH", self.store_file())
            .env_remove("AIPROMPT_OUTPUT_FORMAT")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute aiprompt")
    }
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn json_of(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON")
}
