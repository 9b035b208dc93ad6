use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::agreement::Role;

/// Why an example produced no augmentation.
///
/// These are ordinary outcomes of the pipeline, returned inside
/// [`AugmentationResult::NotAugmented`](crate::models::AugmentationResult),
/// and never abort a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum NoAugment {
    #[error("no eligible gendered singular-pronoun chain")]
    NoEligibleChain,
    #[error("chain {chain_id} mixes gender or number")]
    MixedGenderChain { chain_id: usize },
    #[error("no agreement rule for {role} form {form:?}")]
    RuleGap { role: Role, form: String },
    #[error("edit conflict: {detail}")]
    EditConflict { detail: String },
}

impl NoAugment {
    /// Stable reason code used in output records and batch statistics
    pub fn code(&self) -> &'static str {
        match self {
            NoAugment::NoEligibleChain => "no_eligible_chain",
            NoAugment::MixedGenderChain { .. } => "mixed_gender_chain",
            NoAugment::RuleGap { .. } => "rule_gap",
            NoAugment::EditConflict { .. } => "edit_conflict",
        }
    }

    pub(crate) fn conflict(detail: impl Into<String>) -> Self {
        NoAugment::EditConflict {
            detail: detail.into(),
        }
    }
}

/// Failures of the parser/coreference collaborator
#[derive(Debug, Error)]
pub enum AnnotatorError {
    #[error("annotator request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("annotator returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("no parse available for {0:?}")]
    MissingParse(String),
}

/// Malformed external input. Reported immediately and kept distinct from
/// the semantic [`NoAugment`] outcomes.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("sentence has no tokens")]
    EmptySentence,
    #[error("token {index} has head {head} outside the sentence ({len} tokens)")]
    HeadOutOfBounds { index: usize, head: usize, len: usize },
    #[error("mention {start}..{end} of chain {chain_id} is outside the sentence ({len} tokens)")]
    MentionOutOfBounds {
        chain_id: usize,
        start: usize,
        end: usize,
        len: usize,
    },
    #[error("edit {index} spans {start}..{end}, outside the source ({len} tokens)")]
    EditOutOfBounds {
        index: usize,
        start: usize,
        end: usize,
        len: usize,
    },
    #[error("edit {index} starts at {start}, before the previous edit starts at {previous_start}")]
    UnorderedEdits {
        index: usize,
        start: usize,
        previous_start: usize,
    },
    #[error("edit {index} ({start}..{end}) overlaps the previous edit ({previous_start}..{previous_end})")]
    OverlappingEdits {
        index: usize,
        start: usize,
        end: usize,
        previous_start: usize,
        previous_end: usize,
    },
    #[error("edits turn the source into {produced:?}, expected {expected:?}")]
    EditReplayMismatch { produced: String, expected: String },
    #[error("target parse {parsed:?} does not match target text {text:?}")]
    TokenMismatch { parsed: String, text: String },
    #[error("malformed M2 line {line}: {reason}")]
    MalformedM2 { line: usize, reason: String },
    #[error(transparent)]
    Annotator(#[from] AnnotatorError),
}
