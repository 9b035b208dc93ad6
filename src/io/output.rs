use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{PairInput, SentenceInput};
use crate::align::derive_edits;
use crate::error::InputError;
use crate::models::{split_tokens, AugmentationResult, M2Edit, PairAugmentation, SentenceAugmentation};

/// Outcome of one record: augmented, not augmented with a reason, or
/// rejected as malformed input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Augmented(T),
    NotAugmented { reason: crate::error::NoAugment },
    Invalid { error: String },
}

impl<T> Outcome<T> {
    pub fn is_augmented(&self) -> bool {
        matches!(self, Outcome::Augmented(_))
    }

    /// Status label as written in output records
    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Augmented(_) => "augmented",
            Outcome::NotAugmented { .. } => "not_augmented",
            Outcome::Invalid { .. } => "invalid",
        }
    }
}

impl<T> From<Result<AugmentationResult<T>, InputError>> for Outcome<T> {
    fn from(result: Result<AugmentationResult<T>, InputError>) -> Self {
        match result {
            Ok(AugmentationResult::Augmented(value)) => Outcome::Augmented(value),
            Ok(AugmentationResult::NotAugmented { reason }) => Outcome::NotAugmented { reason },
            Err(error) => Outcome::Invalid {
                error: error.to_string(),
            },
        }
    }
}

/// One line of JSONL output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord<I, T> {
    pub id: String,
    pub input: I,
    #[serde(flatten)]
    pub outcome: Outcome<T>,
}

pub type SentenceRecord = OutputRecord<SentenceInput, SentenceAugmentation>;
pub type PairRecord = OutputRecord<PairInput, PairAugmentation>;

/// Write records as JSONL
pub fn write_jsonl<R: Serialize>(path: &Path, records: &[R]) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = std::io::BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record).context("Failed to serialize record")?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the augmented pairs as an M2 corpus over the swapped sources
pub fn write_m2(path: &Path, records: &[PairRecord]) -> Result<()> {
    let mut content = String::new();
    for record in records {
        if let Outcome::Augmented(pair) = &record.outcome {
            content.push_str(&super::format_m2_block(&pair.swapped_source, &pair.edits));
        }
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

/// Source tokens with each edit rendered inline as `{source=>target}`
pub fn render_aligned(source: &[String], edits: &[M2Edit]) -> String {
    let mut parts = Vec::new();
    let mut cursor = 0;
    for edit in edits {
        let start = edit.start.min(source.len());
        let end = edit.end.min(source.len()).max(start);
        parts.extend(source[cursor.min(start)..start].iter().cloned());
        parts.push(format!("{{{}=>{}}}", source[start..end].join(" "), edit.correction));
        cursor = end;
    }
    parts.extend(source[cursor.min(source.len())..].iter().cloned());
    parts.join(" ")
}

fn aligned(input: &PairInput) -> String {
    let source = split_tokens(&input.source);
    match &input.edits {
        Some(edits) => render_aligned(&source, edits),
        None => render_aligned(&source, &derive_edits(&source, &split_tokens(&input.target))),
    }
}

/// Human-readable report for plain mode
pub fn format_sentence_report(records: &[SentenceRecord]) -> String {
    let mut report = String::from("Singular `they` augmentation:\n");
    for (i, record) in records.iter().enumerate() {
        report.push_str(&format!("{}:\tOriginal: {}\n", i + 1, record.input.text));
        match &record.outcome {
            Outcome::Augmented(sentence) => {
                report.push_str(&format!("\tAugmented: {}\n", sentence.augmented));
            }
            Outcome::NotAugmented { reason } => {
                report.push_str(&format!("\tAugmented: None\n\tReason: {}\n", reason));
            }
            Outcome::Invalid { error } => {
                report.push_str(&format!("\tInvalid input: {}\n", error));
            }
        }
    }
    report
}

/// Human-readable report for GEC mode
pub fn format_pair_report(records: &[PairRecord]) -> String {
    let mut report = String::from("Singular `they` augmentation for GEC:\n");
    for (i, record) in records.iter().enumerate() {
        let input = &record.input;
        match &record.outcome {
            Outcome::Augmented(pair) => {
                report.push_str(&format!("{}\tSource: {}\n", i + 1, input.source));
                report.push_str(&format!("\tTarget: {}\n", input.target));
                report.push_str(&format!("\tAligned: {}\n", aligned(input)));
                report.push_str(&format!("\tAugmented Swapped: {}\n", pair.swapped_source));
                report.push_str(&format!("\tAugmented Target: {}\n", pair.augmented_target));
            }
            Outcome::NotAugmented { reason } => {
                report.push_str(&format!("{}\tNo augment produced!\n", i + 1));
                report.push_str(&format!("\tSource: {}\n", input.source));
                report.push_str(&format!("\tTarget: {}\n", input.target));
                report.push_str(&format!("\tAligned: {}\n", aligned(input)));
                report.push_str(&format!("\tReason: {}\n", reason));
            }
            Outcome::Invalid { error } => {
                report.push_str(&format!("{}\tInvalid input: {}\n", i + 1, error));
                report.push_str(&format!("\tSource: {}\n", input.source));
                report.push_str(&format!("\tTarget: {}\n", input.target));
            }
        }
    }
    report
}

/// Write a report to a file
pub fn write_report(path: &Path, report: &str) -> Result<()> {
    std::fs::write(path, report).with_context(|| format!("Failed to write report to {:?}", path))
}
