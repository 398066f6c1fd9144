use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::AlignmentError;
use crate::types::{BatchOutcome, WordFeatureRow, WordStatus};

const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentSummary {
    pub schema_version: u32,
    pub record_count: usize,
    pub failed_record_count: usize,
    pub word_count: usize,
    /// Mean per-word phoneme correctness; `None` when there are no words.
    pub mean_phoneme_correctness: Option<f32>,
    pub sources: BTreeMap<String, SourceSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceSummary {
    pub correct: usize,
    pub substituted: usize,
    pub deleted: usize,
    pub word_accuracy: f32,
}

impl SourceSummary {
    fn record(&mut self, status: WordStatus) {
        match status {
            WordStatus::Correct => self.correct += 1,
            WordStatus::Substituted => self.substituted += 1,
            WordStatus::Deleted => self.deleted += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.correct + self.substituted + self.deleted
    }
}

pub fn summarize_rows(rows: &[WordFeatureRow]) -> BTreeMap<String, SourceSummary> {
    let mut sources: BTreeMap<String, SourceSummary> = BTreeMap::new();
    for row in rows {
        for (source, features) in &row.sources {
            sources.entry(source.clone()).or_default().record(features.status);
        }
    }
    for summary in sources.values_mut() {
        let total = summary.total();
        summary.word_accuracy = if total == 0 {
            0.0
        } else {
            summary.correct as f32 / total as f32
        };
    }
    sources
}

impl BatchOutcome {
    pub fn summary(&self) -> AlignmentSummary {
        let mean_phoneme_correctness = if self.rows.is_empty() {
            None
        } else {
            let sum: f32 = self.rows.iter().map(|r| r.phoneme.correctness_rate).sum();
            Some(sum / self.rows.len() as f32)
        };

        AlignmentSummary {
            schema_version: SCHEMA_VERSION,
            record_count: self.record_count,
            failed_record_count: self.failures.len(),
            word_count: self.rows.len(),
            mean_phoneme_correctness,
            sources: summarize_rows(&self.rows),
        }
    }
}

/// Pretty-print `value` as JSON to `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AlignmentError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AlignmentError::io("create output directory", e))?;
    }
    let mut file = File::create(path).map_err(|e| AlignmentError::io("create output file", e))?;
    serde_json::to_writer_pretty(&mut file, value)
        .map_err(|e| AlignmentError::json("serialize output", e))?;
    file.write_all(b"\n")
        .map_err(|e| AlignmentError::io("finalize output file", e))?;
    Ok(())
}
