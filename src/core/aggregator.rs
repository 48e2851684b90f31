//! Transcript aggregation into combined and batched output files
//!
//! Read-only over the transcript directory; every run rewrites its output
//! files from scratch. The two paths deliberately differ: `group_all`
//! walks the directory in platform order and prefixes each transcript with
//! a filename header, `group_in_batches` sorts by filename and writes no
//! header.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use super::models::AppResult;

/// Divider written between transcripts, framed by blank lines.
fn divider() -> String {
    format!("\n\n{}\n\n", "*".repeat(40))
}

/// Collects per-video transcript files into combined outputs.
pub struct TranscriptAggregator {
    transcript_dir: PathBuf,
}

impl TranscriptAggregator {
    pub fn new(transcript_dir: impl Into<PathBuf>) -> Self {
        Self {
            transcript_dir: transcript_dir.into(),
        }
    }

    /// List the `.txt` files of the transcript directory in platform
    /// `read_dir` order.
    fn transcript_files(&self) -> AppResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.transcript_dir)? {
            let path = entry?.path();
            if path.extension().map(|ext| ext == "txt").unwrap_or(false) {
                files.push(path);
            }
        }
        Ok(files)
    }

    /// Concatenate every transcript into one combined file, each prefixed
    /// with a `--- {filename} ---` header and followed by the divider.
    /// Overwrites any prior combined file.
    pub fn group_all(&self, output_path: &Path) -> AppResult<usize> {
        let files = self.transcript_files()?;

        let mut output = fs::File::create(output_path)?;
        for path in &files {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let content = fs::read_to_string(path)?;

            write!(output, "--- {} ---\n\n", filename)?;
            output.write_all(content.as_bytes())?;
            output.write_all(divider().as_bytes())?;
        }

        info!(
            "Grouped {} transcripts into {:?}",
            files.len(),
            output_path
        );
        Ok(files.len())
    }

    /// Concatenate transcripts in sorted filename order into numbered batch
    /// files of at most `max_per_batch` transcripts each, named
    /// `{base_name}_{N}.txt` with N starting at 1. Prior batch files with
    /// colliding names are overwritten; the last batch may run short.
    pub fn group_in_batches(
        &self,
        output_dir: &Path,
        base_name: &str,
        max_per_batch: usize,
    ) -> AppResult<Vec<PathBuf>> {
        let mut files = self.transcript_files()?;
        files.sort();

        let mut batch_paths = Vec::new();
        let mut output: Option<fs::File> = None;

        for (index, path) in files.iter().enumerate() {
            if index % max_per_batch == 0 {
                let batch_path =
                    output_dir.join(format!("{}_{}.txt", base_name, batch_paths.len() + 1));
                output = Some(fs::File::create(&batch_path)?);
                batch_paths.push(batch_path);
            }

            let content = fs::read_to_string(path)?;
            // `output` is always set by the first iteration.
            if let Some(file) = output.as_mut() {
                file.write_all(content.as_bytes())?;
                file.write_all(divider().as_bytes())?;
            }
        }

        info!(
            "Grouped {} transcripts into {} batch file(s)",
            files.len(),
            batch_paths.len()
        );
        Ok(batch_paths)
    }
}
