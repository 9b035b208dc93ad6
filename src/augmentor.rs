//! Augmentation orchestrator: drives one sentence or one source/target pair
//! through chain selection, rewriting and (for pairs) edit realignment.
//!
//! Semantic failures come back as [`AugmentationResult::NotAugmented`];
//! only malformed input is an `Err`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::align::derive_edits;
use crate::annotator::Annotator;
use crate::eligibility::{select_chains, EligibilityConfig};
use crate::error::{InputError, NoAugment};
use crate::models::{
    split_tokens, AugmentationResult, EditList, M2Edit, PairAugmentation, ParsedSentence,
    SentenceAugmentation,
};
use crate::stages::{execute_stage1, execute_stage2, Stage1Result};

/// Configuration for the orchestrator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AugmentorConfig {
    pub eligibility: EligibilityConfig,
}

/// Runs examples through the pipeline using a shared annotator
#[derive(Clone)]
pub struct Augmentor {
    annotator: Arc<dyn Annotator>,
    config: AugmentorConfig,
}

impl Augmentor {
    pub fn new(annotator: Arc<dyn Annotator>, config: AugmentorConfig) -> Self {
        Self { annotator, config }
    }

    pub fn config(&self) -> &AugmentorConfig {
        &self.config
    }

    /// Parse a sentence with the annotator
    pub fn annotate(&self, text: &str) -> Result<ParsedSentence, InputError> {
        self.annotator.annotate(text)
    }

    /// Plain mode: rewrite one sentence
    pub fn augment_sentence(&self, text: &str) -> Result<AugmentationResult<SentenceAugmentation>, InputError> {
        self.annotator
            .annotate(text)
            .and_then(|sentence| augment_parsed(&sentence, &self.config))
            .inspect_err(|e| error!("Invalid input {:?}: {}", text, e))
    }

    /// GEC mode: rewrite a corrected target and carry the rewrite over to
    /// its errorful source. Edits are derived by alignment when `edits` is
    /// `None`.
    pub fn augment_pair(
        &self,
        source: &str,
        target: &str,
        edits: Option<&[M2Edit]>,
    ) -> Result<AugmentationResult<PairAugmentation>, InputError> {
        self.prepare_pair(source, target, edits)
            .and_then(|(source_words, parsed, edit_list)| {
                augment_parsed_pair(&source_words, &parsed, &edit_list, &self.config)
            })
            .inspect_err(|e| error!("Invalid pair {:?} -> {:?}: {}", source, target, e))
    }

    fn prepare_pair(
        &self,
        source: &str,
        target: &str,
        edits: Option<&[M2Edit]>,
    ) -> Result<(Vec<String>, ParsedSentence, EditList), InputError> {
        let source_words = split_tokens(source);
        let target_words = split_tokens(target);

        let m2 = match edits {
            Some(edits) => edits.to_vec(),
            None => derive_edits(&source_words, &target_words),
        };
        let edit_list = EditList::from_m2(source_words.len(), &m2)?;
        let produced = edit_list.apply(&source_words);
        if produced != target_words {
            return Err(InputError::EditReplayMismatch {
                produced: produced.join(" "),
                expected: target_words.join(" "),
            });
        }

        let parsed = self.annotator.annotate(target)?;
        if parsed.words() != target_words {
            return Err(InputError::TokenMismatch {
                parsed: parsed.words().join(" "),
                text: target.to_string(),
            });
        }

        Ok((source_words, parsed, edit_list))
    }
}

/// Select chains and rewrite; a rewrite that changes nothing is not an
/// augmentation
fn rewrite(sentence: &ParsedSentence, config: &AugmentorConfig) -> Result<Stage1Result, NoAugment> {
    let chains = select_chains(sentence, &config.eligibility).into_result()?;
    let rewrite = execute_stage1(sentence, &chains)?;
    if !rewrite.has_substitutions() {
        return Err(NoAugment::NoEligibleChain);
    }
    Ok(rewrite)
}

/// Plain mode over an already parsed sentence
pub fn augment_parsed(
    sentence: &ParsedSentence,
    config: &AugmentorConfig,
) -> Result<AugmentationResult<SentenceAugmentation>, InputError> {
    sentence.validate()?;

    let result = rewrite(sentence, config).map(|rewrite| SentenceAugmentation {
        original: sentence.text(),
        augmented: rewrite.sentence.text(),
        changes: rewrite.changes,
    });
    if let Err(reason) = &result {
        debug!("No augmentation for {:?}: {}", sentence.text(), reason);
    }
    Ok(result.into())
}

/// GEC mode over a whitespace-tokenised source, a parsed target and the
/// edits between them
pub fn augment_parsed_pair(
    source: &[String],
    target: &ParsedSentence,
    edits: &EditList,
    config: &AugmentorConfig,
) -> Result<AugmentationResult<PairAugmentation>, InputError> {
    target.validate()?;
    let produced = edits.apply(source);
    if produced != target.words() {
        return Err(InputError::EditReplayMismatch {
            produced: produced.join(" "),
            expected: target.words().join(" "),
        });
    }

    let result = rewrite(target, config).and_then(|rewrite| {
        let realigned = execute_stage2(source, target, edits, &rewrite)?;
        Ok(PairAugmentation {
            source: source.join(" "),
            target: target.words().join(" "),
            swapped_source: realigned.swapped_source.join(" "),
            augmented_target: rewrite.sentence.words().join(" "),
            edits: realigned.edits.to_m2(),
            changes: rewrite.changes,
        })
    });
    if let Err(reason) = &result {
        debug!("No augmentation for pair {:?}: {}", source.join(" "), reason);
    }
    Ok(result.into())
}
