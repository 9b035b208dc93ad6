use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::io::{format_pair_report, format_sentence_report, write_jsonl, write_m2, write_report, PairRecord, SentenceRecord};

/// Configuration for Stage 3 rendering
#[derive(Debug, Clone, Default)]
pub struct Stage3Config {
    /// JSONL records
    pub output: Option<PathBuf>,
    /// M2 corpus of augmented pairs (GEC mode only)
    pub m2_output: Option<PathBuf>,
    /// Human-readable report
    pub report: Option<PathBuf>,
}

/// Result of Stage 3 rendering
#[derive(Debug, Default)]
pub struct Stage3Result {
    pub output_path: Option<PathBuf>,
    pub m2_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
}

fn write_output<R: serde::Serialize>(records: &[R], path: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(path) = path else {
        return Ok(None);
    };
    info!("Writing {} records to {:?}", records.len(), path);
    write_jsonl(path, records)?;
    Ok(Some(path.to_path_buf()))
}

fn write_text_report(report: impl FnOnce() -> String, path: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(path) = path else {
        return Ok(None);
    };
    info!("Writing report to {:?}", path);
    write_report(path, &report())?;
    Ok(Some(path.to_path_buf()))
}

/// Execute Stage 3 for plain mode: JSONL records and the optional report
pub fn execute_stage3_sentences(records: &[SentenceRecord], config: &Stage3Config) -> Result<Stage3Result> {
    Ok(Stage3Result {
        output_path: write_output(records, config.output.as_deref())?,
        m2_path: None,
        report_path: write_text_report(|| format_sentence_report(records), config.report.as_deref())?,
    })
}

/// Execute Stage 3 for GEC mode: JSONL records, the augmented M2 corpus and
/// the optional report
pub fn execute_stage3_pairs(records: &[PairRecord], config: &Stage3Config) -> Result<Stage3Result> {
    let m2_path = match config.m2_output.as_deref() {
        Some(path) => {
            info!("Writing augmented M2 corpus to {:?}", path);
            write_m2(path, records)?;
            Some(path.to_path_buf())
        }
        None => None,
    };

    Ok(Stage3Result {
        output_path: write_output(records, config.output.as_deref())?,
        m2_path,
        report_path: write_text_report(|| format_pair_report(records), config.report.as_deref())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{OutputRecord, Outcome, SentenceInput};
    use crate::models::SentenceAugmentation;

    #[test]
    fn test_stage3_config_default_writes_nothing() {
        let result = execute_stage3_sentences(&[], &Stage3Config::default()).unwrap();

        assert!(result.output_path.is_none());
        assert!(result.report_path.is_none());
    }

    #[test]
    fn test_stage3_writes_requested_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = Stage3Config {
            output: Some(dir.path().join("out.jsonl")),
            m2_output: None,
            report: Some(dir.path().join("report.txt")),
        };
        let records = vec![OutputRecord {
            id: "s1".to_string(),
            input: SentenceInput {
                text: "She is a linguist .".to_string(),
            },
            outcome: Outcome::Augmented(SentenceAugmentation {
                original: "She is a linguist .".to_string(),
                augmented: "They are a linguist .".to_string(),
                changes: vec![],
            }),
        }];

        let result = execute_stage3_sentences(&records, &config).unwrap();

        let report = std::fs::read_to_string(result.report_path.unwrap()).unwrap();
        assert!(report.contains("1:\tOriginal: She is a linguist .\n\tAugmented: They are a linguist .\n"));
        let output = std::fs::read_to_string(result.output_path.unwrap()).unwrap();
        assert_eq!(output.lines().count(), 1);
    }
}
