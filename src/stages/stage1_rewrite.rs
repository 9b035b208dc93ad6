use std::collections::HashSet;

use tracing::debug;

use crate::agreement::{pronoun_role, singular_they_form, verb_role};
use crate::error::NoAugment;
use crate::models::{CoreferenceChain, Number, ParsedSentence, TokenChange};
use crate::syntax;

/// Result of Stage 1 rewriting
#[derive(Debug, Clone)]
pub struct Stage1Result {
    /// The augmented sentence, offsets recomputed, chains unchanged
    pub sentence: ParsedSentence,
    /// Original token index -> augmented token index
    pub alignment: Vec<usize>,
    /// Every token the rewrite touched, in sentence order. Governed verbs
    /// without agreement marking appear with an unchanged form.
    pub changes: Vec<TokenChange>,
}

impl Stage1Result {
    /// Whether any surface form changed
    pub fn has_substitutions(&self) -> bool {
        self.changes.iter().any(TokenChange::is_substitution)
    }

    /// The change recorded for token `index`
    pub fn change_at(&self, index: usize) -> Option<&TokenChange> {
        self.changes.iter().find(|c| c.index == index)
    }
}

/// Execute Stage 1: rewrite the selected chains to singular they.
///
/// Every gendered pronoun mention is replaced by the agreement table rule
/// for its role, and every finite verb it governs takes plural agreement.
/// Mentions that are not gendered pronouns (nominals, forms already
/// rewritten) are left alone, which makes the rewrite idempotent.
/// Fails with [`NoAugment::RuleGap`] when a touched form has no rule.
pub fn execute_stage1(sentence: &ParsedSentence, chains: &[CoreferenceChain]) -> Result<Stage1Result, NoAugment> {
    let mut tokens = sentence.tokens.clone();
    let mut changes = Vec::new();
    let mut seen = HashSet::new();

    for chain in chains {
        for mention in &chain.mentions {
            let index = mention.root;
            let token = &sentence.tokens[index];
            let Some(role) = pronoun_role(token) else {
                continue;
            };
            if !seen.insert(index) {
                continue;
            }

            let replacement = singular_they_form(role, &token.text, &token.lemma, token.tense()).ok_or_else(|| {
                NoAugment::RuleGap {
                    role,
                    form: token.text.clone(),
                }
            })?;
            tokens[index].lemma = replacement.to_lowercase();
            tokens[index].morph.number = Some(Number::Plural);
            tokens[index].text = replacement.clone();
            changes.push(TokenChange {
                index,
                role,
                original: token.text.clone(),
                replacement,
            });

            for verb in syntax::governed_verbs(sentence, index) {
                if !seen.insert(verb) {
                    continue;
                }
                let verb_token = &sentence.tokens[verb];
                let role = verb_role(verb_token);
                let replacement = singular_they_form(role, &verb_token.text, &verb_token.lemma, verb_token.tense())
                    .ok_or_else(|| NoAugment::RuleGap {
                        role,
                        form: verb_token.text.clone(),
                    })?;

                if replacement != verb_token.text {
                    let rewritten = &mut tokens[verb];
                    rewritten.text = replacement.clone();
                    if rewritten.tag == "VBZ" {
                        rewritten.tag = "VBP".to_string();
                    }
                    if rewritten.morph.number.is_some() {
                        rewritten.morph.number = Some(Number::Plural);
                    }
                }
                changes.push(TokenChange {
                    index: verb,
                    role,
                    original: verb_token.text.clone(),
                    replacement,
                });
            }
        }
    }

    changes.sort_by_key(|c| c.index);
    debug!(
        "Stage 1: {} tokens touched, {} substituted",
        changes.len(),
        changes.iter().filter(|c| c.is_substitution()).count()
    );

    let alignment = (0..tokens.len()).collect();
    Ok(Stage1Result {
        sentence: ParsedSentence::new(tokens, sentence.chains.clone()),
        alignment,
        changes,
    })
}
