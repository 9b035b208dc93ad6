use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::{AnnotatedSentence, Annotator};
use crate::error::{AnnotatorError, InputError};
use crate::models::ParsedSentence;

/// Parses computed ahead of time, looked up by text
#[derive(Debug, Clone, Default)]
pub struct PrecomputedAnnotator {
    parses: HashMap<String, AnnotatedSentence>,
}

/// Lookup key: whitespace-normalised text
fn key(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl PrecomputedAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSONL file with one annotated sentence per line
    pub fn from_jsonl(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).with_context(|| format!("Failed to open parses file: {:?}", path))?;
        let mut annotator = Self::new();

        for (number, line) in std::io::BufReader::new(file).lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read {:?}", path))?;
            if line.trim().is_empty() {
                continue;
            }
            let parse: AnnotatedSentence = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse annotated sentence on line {}", number + 1))?;
            annotator.insert(parse);
        }

        info!("Loaded {} precomputed parses from {:?}", annotator.len(), path);
        Ok(annotator)
    }

    /// Add a parse, replacing any earlier parse of the same text
    pub fn insert(&mut self, parse: AnnotatedSentence) {
        self.parses.insert(key(&parse.text()), parse);
    }

    pub fn len(&self) -> usize {
        self.parses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parses.is_empty()
    }
}

impl FromIterator<AnnotatedSentence> for PrecomputedAnnotator {
    fn from_iter<I: IntoIterator<Item = AnnotatedSentence>>(iter: I) -> Self {
        let mut annotator = Self::new();
        for parse in iter {
            annotator.insert(parse);
        }
        annotator
    }
}

impl Annotator for PrecomputedAnnotator {
    fn annotate(&self, text: &str) -> Result<ParsedSentence, InputError> {
        let parse = self
            .parses
            .get(&key(text))
            .ok_or_else(|| AnnotatorError::MissingParse(text.to_string()))?;
        parse.clone().into_sentence()
    }
}
