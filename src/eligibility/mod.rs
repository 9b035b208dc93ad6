//! Chain selection: which coreference chains of a sentence may be rewritten.
//!
//! Rules apply in order and the first failing rule decides the rejection:
//! the chain must hold a gendered singular pronoun, must not mix gender or
//! number, must (when configured) have a singular anchor, and must not claim
//! a token an earlier accepted chain already claimed.

pub mod claims;
pub mod singular;

pub use claims::{claimed_tokens, Claims};
pub use singular::{has_singular_anchor, is_mixed, is_singular_anchor};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::agreement::AGREEMENT_TABLE;
use crate::error::NoAugment;
use crate::models::{CoreferenceChain, Mention, MentionHint, ParsedSentence};
use crate::syntax;

/// Configuration for chain selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityConfig {
    /// Require a mention that marks the referent as singular
    pub require_singular_anchor: bool,
    /// Treat gendered pronouns outside every chain as one-mention chains
    pub promote_singletons: bool,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            require_singular_anchor: true,
            promote_singletons: true,
        }
    }
}

/// A chain that was not selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub chain_id: usize,
    pub reason: NoAugment,
    /// Chain that already claimed one of this chain's tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contested_by: Option<usize>,
}

impl Rejection {
    /// Label for statistics: the reason code, or `contested_claim`
    pub fn label(&self) -> &'static str {
        match self.contested_by {
            Some(_) => "contested_claim",
            None => self.reason.code(),
        }
    }
}

/// Result of chain selection for one sentence
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Accepted chains, promoted singletons included, in chain order
    pub chains: Vec<CoreferenceChain>,
    pub rejections: Vec<Rejection>,
}

impl Selection {
    /// Accepted chains, or the reason nothing was accepted.
    ///
    /// A mixed chain outranks the generic "nothing eligible" reason.
    pub fn into_result(self) -> Result<Vec<CoreferenceChain>, NoAugment> {
        if !self.chains.is_empty() {
            return Ok(self.chains);
        }
        let mixed = self
            .rejections
            .into_iter()
            .map(|r| r.reason)
            .find(|r| matches!(r, NoAugment::MixedGenderChain { .. }));
        Err(mixed.unwrap_or(NoAugment::NoEligibleChain))
    }
}

/// One-mention chains for gendered pronouns that no chain covers.
///
/// With the singular check on, only subjects of a predicate with a singular
/// noun attribute are promoted.
pub fn singleton_chains(sentence: &ParsedSentence, config: &EligibilityConfig) -> Vec<CoreferenceChain> {
    let mut next_id = sentence.chains.iter().map(|c| c.id + 1).max().unwrap_or(0);
    let mut singletons = Vec::new();

    for (index, token) in sentence.tokens.iter().enumerate() {
        if !AGREEMENT_TABLE.is_gendered_pronoun(&token.text) || sentence.in_any_chain(index) {
            continue;
        }
        if config.require_singular_anchor
            && !(token.dep == "nsubj" && syntax::head_has_singular_attr(sentence, index))
        {
            continue;
        }

        let mention = Mention::infer(&sentence.tokens, index, index + 1, MentionHint::default());
        singletons.push(CoreferenceChain::new(next_id, vec![mention]));
        next_id += 1;
    }

    singletons
}

fn check_chain(sentence: &ParsedSentence, chain: &CoreferenceChain, config: &EligibilityConfig) -> Result<(), NoAugment> {
    if !chain.is_gendered() {
        return Err(NoAugment::NoEligibleChain);
    }
    if is_mixed(chain) {
        return Err(NoAugment::MixedGenderChain { chain_id: chain.id });
    }
    if config.require_singular_anchor && !has_singular_anchor(sentence, chain) {
        return Err(NoAugment::NoEligibleChain);
    }
    Ok(())
}

/// Select the chains of `sentence` to rewrite
pub fn select_chains(sentence: &ParsedSentence, config: &EligibilityConfig) -> Selection {
    let mut candidates = sentence.chains.clone();
    if config.promote_singletons {
        candidates.extend(singleton_chains(sentence, config));
    }

    let mut selection = Selection::default();
    let mut claims = Claims::new();

    for chain in candidates {
        if let Err(reason) = check_chain(sentence, &chain, config) {
            debug!("Chain {} rejected: {}", chain.id, reason);
            selection.rejections.push(Rejection {
                chain_id: chain.id,
                reason,
                contested_by: None,
            });
            continue;
        }

        let tokens = claimed_tokens(sentence, &chain);
        if let Some((token, owner)) = claims.contested(chain.id, &tokens) {
            debug!(
                "Chain {} rejected: token {} ({:?}) is already rewritten by chain {}",
                chain.id, token, sentence.tokens[token].text, owner
            );
            selection.rejections.push(Rejection {
                chain_id: chain.id,
                reason: NoAugment::NoEligibleChain,
                contested_by: Some(owner),
            });
            continue;
        }

        claims.claim(chain.id, &tokens);
        debug!("Chain {} selected ({} mentions)", chain.id, chain.mentions.len());
        selection.chains.push(chain);
    }

    selection
}
