use std::collections::HashMap;

use crate::models::{CoreferenceChain, ParsedSentence};
use crate::syntax;

/// Tokens a chain would rewrite: the roots of its gendered pronoun mentions
/// and the verbs those pronouns govern, in sentence order
pub fn claimed_tokens(sentence: &ParsedSentence, chain: &CoreferenceChain) -> Vec<usize> {
    let mut tokens = Vec::new();
    for mention in chain.gendered_pronouns() {
        tokens.push(mention.root);
        tokens.extend(syntax::governed_verbs(sentence, mention.root));
    }
    tokens.sort_unstable();
    tokens.dedup();
    tokens
}

/// Token ownership across the chains accepted so far
#[derive(Debug, Default)]
pub struct Claims {
    owners: HashMap<usize, usize>,
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// First token of `tokens` already owned by another chain, with its owner
    pub fn contested(&self, chain_id: usize, tokens: &[usize]) -> Option<(usize, usize)> {
        tokens.iter().find_map(|token| match self.owners.get(token) {
            Some(&owner) if owner != chain_id => Some((*token, owner)),
            _ => None,
        })
    }

    /// Record `chain_id` as the owner of `tokens`
    pub fn claim(&mut self, chain_id: usize, tokens: &[usize]) {
        for &token in tokens {
            self.owners.entry(token).or_insert(chain_id);
        }
    }

    pub fn owner(&self, token: usize) -> Option<usize> {
        self.owners.get(&token).copied()
    }
}
