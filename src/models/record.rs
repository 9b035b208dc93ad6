use serde::{Deserialize, Serialize};

use super::M2Edit;
use crate::agreement::Role;
use crate::error::NoAugment;

/// One token substituted (or confirmed) by the sentence rewriter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenChange {
    /// Token index in the sentence
    pub index: usize,
    /// Grammatical role the rule was chosen by
    pub role: Role,
    pub original: String,
    pub replacement: String,
}

impl TokenChange {
    /// Whether the surface form actually changes. Invariant verbs governed
    /// by a rewritten pronoun are recorded with `original == replacement`.
    pub fn is_substitution(&self) -> bool {
        self.original != self.replacement
    }
}

/// Plain-mode result: one sentence rewritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceAugmentation {
    pub original: String,
    pub augmented: String,
    pub changes: Vec<TokenChange>,
}

/// GEC-mode result: an errorful/corrected pair rewritten in parallel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairAugmentation {
    pub source: String,
    pub target: String,
    /// Source with the same rewrite applied
    pub swapped_source: String,
    pub augmented_target: String,
    /// Edits turning `swapped_source` into `augmented_target`
    pub edits: Vec<M2Edit>,
    /// Changes on the target side
    pub changes: Vec<TokenChange>,
}

/// Outcome of augmenting one example. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AugmentationResult<T> {
    Augmented(T),
    NotAugmented { reason: NoAugment },
}

impl<T> AugmentationResult<T> {
    pub fn is_augmented(&self) -> bool {
        matches!(self, AugmentationResult::Augmented(_))
    }

    pub fn augmented(&self) -> Option<&T> {
        match self {
            AugmentationResult::Augmented(value) => Some(value),
            AugmentationResult::NotAugmented { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&NoAugment> {
        match self {
            AugmentationResult::Augmented(_) => None,
            AugmentationResult::NotAugmented { reason } => Some(reason),
        }
    }
}

impl<T> From<Result<T, NoAugment>> for AugmentationResult<T> {
    fn from(result: Result<T, NoAugment>) -> Self {
        match result {
            Ok(value) => AugmentationResult::Augmented(value),
            Err(reason) => AugmentationResult::NotAugmented { reason },
        }
    }
}
