// ABOUTME: Output writers for report destinations (stdout, files)
// ABOUTME: Handles writing formatted reports to the terminal or to disk

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::error::{OutputError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputDestination {
    #[default]
    Stdout,
    File { path: PathBuf, append: bool },
}

impl OutputDestination {
    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        OutputDestination::File {
            path: path.into(),
            append: false,
        }
    }

    pub fn appending<P: Into<PathBuf>>(path: P) -> Self {
        OutputDestination::File {
            path: path.into(),
            append: true,
        }
    }
}

async fn write_line<W>(writer: &mut W, content: &str) -> std::io::Result<()>
where
    W: AsyncWriteExt + Unpin,
{
    writer.write_all(content.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}

#[async_trait]
pub trait OutputWriter: Send + Sync {
    async fn write(&self, content: &str) -> Result<()>;
}

pub struct StdoutWriter;

pub struct FileWriter {
    path: PathBuf,
    append: bool,
}

impl StdoutWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputWriter for StdoutWriter {
    async fn write(&self, content: &str) -> Result<()> {
        write_line(&mut tokio::io::stdout(), content)
            .await
            .map_err(|e| OutputError::WriteError {
                message: format!("Failed to write to stdout: {}", e),
            })?;

        debug!("Output written to stdout ({} chars)", content.len());
        Ok(())
    }
}

impl FileWriter {
    pub fn new(path: PathBuf, append: bool) -> Self {
        Self { path, append }
    }
}

#[async_trait]
impl OutputWriter for FileWriter {
    async fn write(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| OutputError::WriteError {
                        message: format!("Failed to create directory {}: {}", parent.display(), e),
                    })?;
            }
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .append(self.append)
            .truncate(!self.append)
            .open(&self.path)
            .await
            .map_err(|e| OutputError::WriteError {
                message: format!("Failed to open {}: {}", self.path.display(), e),
            })?;

        write_line(&mut file, content)
            .await
            .map_err(|e| OutputError::WriteError {
                message: format!("Failed to write file {}: {}", self.path.display(), e),
            })?;

        info!(
            "Output written to file: {} ({} bytes)",
            self.path.display(),
            content.len()
        );
        Ok(())
    }
}

pub fn writer_for(destination: &OutputDestination) -> Box<dyn OutputWriter> {
    match destination {
        OutputDestination::Stdout => Box::new(StdoutWriter::new()),
        OutputDestination::File { path, append } => Box::new(FileWriter::new(path.clone(), *append)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_writer_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("report.txt");

        FileWriter::new(path.clone(), false).write("first").await.unwrap();
        FileWriter::new(path.clone(), false).write("second").await.unwrap();

        assert_eq!(fs::read_to_string(&path).await.unwrap(), "second\n");
    }

    #[tokio::test]
    async fn test_file_writer_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");

        let writer = FileWriter::new(path.clone(), true);
        writer.write("one").await.unwrap();
        writer.write("two").await.unwrap();

        assert_eq!(fs::read_to_string(&path).await.unwrap(), "one\ntwo\n");
    }
}
