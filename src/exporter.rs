use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use docx_rs::{BreakType, Docx, Paragraph, Run};
use tracing::{info, warn};

pub const FILE_LABEL: &str = "simple_answer_";
pub const FILE_EXTENSION: &str = "docx";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const HEADING: &str = "Generated Answer";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const MAX_SUFFIX: u32 = 1000;

/// A document written to the output directory
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub path: PathBuf,
    pub file_name: String,
}

/// Writes question/answer pairs as Word documents into one directory.
/// Documents are never rotated or deleted here.
#[derive(Debug, Clone)]
pub struct DocumentExporter {
    output_dir: PathBuf,
}

impl DocumentExporter {
    /// Creates the output directory if it does not exist yet
    pub fn new(output_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).with_context(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;
        let output_dir = output_dir.canonicalize().unwrap_or(output_dir);
        info!("Documents will be written to {}", output_dir.display());
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Renders and writes the document on the blocking pool.
    pub async fn export(
        &self,
        question: String,
        answer: String,
    ) -> anyhow::Result<ExportedDocument> {
        let output_dir = self.output_dir.clone();
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();

        let document = tokio::task::spawn_blocking(move || {
            write_document(&output_dir, &timestamp, &question, &answer)
        })
        .await
        .context("Document export task failed")??;

        info!("Exported document {}", document.path.display());
        Ok(document)
    }
}

fn render(question: &str, answer: &str) -> Docx {
    let heading = Paragraph::new()
        .style("Heading1")
        .add_run(Run::new().add_text(HEADING).bold().size(32));

    Docx::new()
        .add_paragraph(heading)
        .add_paragraph(labeled_paragraph("Question:", question))
        .add_paragraph(labeled_paragraph("Answer:", answer))
}

fn labeled_paragraph(label: &str, text: &str) -> Paragraph {
    let mut paragraph = Paragraph::new().add_run(Run::new().add_text(label).bold());
    for line in text.lines() {
        paragraph = paragraph.add_run(Run::new().add_break(BreakType::TextWrapping).add_text(line));
    }
    paragraph
}

/// Claims a fresh file name for `timestamp`, appending `_1`, `_2`, ... when
/// another export already took the plain name within the same second.
fn claim_file(output_dir: &Path, timestamp: &str) -> anyhow::Result<(File, PathBuf, String)> {
    for suffix in 0..MAX_SUFFIX {
        let file_name = match suffix {
            0 => format!("{FILE_LABEL}{timestamp}.{FILE_EXTENSION}"),
            n => format!("{FILE_LABEL}{timestamp}_{n}.{FILE_EXTENSION}"),
        };
        let path = output_dir.join(&file_name);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((file, path, file_name)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                warn!("{} already exists, trying next suffix", file_name);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to create {}", path.display()));
            }
        }
    }
    Err(anyhow!("No free file name left for timestamp {}", timestamp))
}

fn write_document(
    output_dir: &Path,
    timestamp: &str,
    question: &str,
    answer: &str,
) -> anyhow::Result<ExportedDocument> {
    let (file, path, file_name) = claim_file(output_dir, timestamp)?;

    if let Err(e) = render(question, answer).build().pack(file) {
        // Don't leave a half-written document behind
        let _ = fs::remove_file(&path);
        return Err(anyhow!("Failed to write {}: {}", path.display(), e));
    }

    Ok(ExportedDocument { path, file_name })
}
