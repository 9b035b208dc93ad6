use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::M2Edit;

/// Plain-mode input: one sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceInput {
    pub text: String,
}

/// GEC-mode input: an errorful source, its correction and optionally the
/// edits between them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairInput {
    pub source: String,
    pub target: String,
    /// Derived by alignment when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edits: Option<Vec<M2Edit>>,
}

/// An input with its record id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord<I> {
    pub id: String,
    pub input: I,
}

impl<I> InputRecord<I> {
    /// Wrap an input, generating an id when none is given
    pub fn new(id: Option<String>, input: I) -> Self {
        Self {
            id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            input,
        }
    }
}

#[derive(Deserialize)]
struct RawRecord<I> {
    #[serde(default)]
    id: Option<String>,
    #[serde(flatten)]
    input: I,
}

/// Read a JSONL file of inputs
pub fn read_jsonl<I: DeserializeOwned>(path: &Path) -> Result<Vec<InputRecord<I>>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_jsonl(&content).with_context(|| format!("Failed to parse {:?}", path))
}

/// Parse JSONL inputs, one record per non-blank line
pub fn parse_jsonl<I: DeserializeOwned>(content: &str) -> Result<Vec<InputRecord<I>>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            let raw: RawRecord<I> = serde_json::from_str(line)
                .with_context(|| format!("Invalid record on line {}", number + 1))?;
            Ok(InputRecord::new(raw.id, raw.input))
        })
        .collect()
}
