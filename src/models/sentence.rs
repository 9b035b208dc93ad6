use serde::{Deserialize, Serialize};

use super::{CoreferenceChain, Mention, MentionHint, Pos, Token};
use crate::error::InputError;

/// A sentence as returned by the parser/coreference collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSentence {
    /// Tokens in order; the word offset of a token is its index
    pub tokens: Vec<Token>,
    /// Coreference chains over the tokens
    #[serde(default)]
    pub chains: Vec<CoreferenceChain>,
}

impl ParsedSentence {
    /// Assemble a sentence, recomputing character offsets
    pub fn new(mut tokens: Vec<Token>, chains: Vec<CoreferenceChain>) -> Self {
        recompute_offsets(&mut tokens);
        Self { tokens, chains }
    }

    /// Surface text rebuilt from the tokens
    pub fn text(&self) -> String {
        render_text(&self.tokens)
    }

    /// Token surface forms
    pub fn words(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Head of token `index`, `None` for the root
    pub fn head(&self, index: usize) -> Option<usize> {
        let head = self.tokens[index].head;
        (head != index).then_some(head)
    }

    /// Dependents of token `index`, left to right
    pub fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .filter(move |(i, t)| *i != index && t.head == index)
            .map(|(i, _)| i)
    }

    /// Whether any chain has a mention rooted at `index`
    pub fn in_any_chain(&self, index: usize) -> bool {
        self.chains.iter().any(|c| c.has_root(index))
    }

    /// Check the structural invariants the pipeline relies on
    pub fn validate(&self) -> Result<(), InputError> {
        let len = self.tokens.len();
        if len == 0 {
            return Err(InputError::EmptySentence);
        }

        for (index, token) in self.tokens.iter().enumerate() {
            if token.head >= len {
                return Err(InputError::HeadOutOfBounds {
                    index,
                    head: token.head,
                    len,
                });
            }
        }

        for chain in &self.chains {
            for mention in &chain.mentions {
                if mention.start >= mention.end || mention.end > len || !mention.contains(mention.root) {
                    return Err(InputError::MentionOutOfBounds {
                        chain_id: chain.id,
                        start: mention.start,
                        end: mention.end,
                        len,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Recompute character offsets left to right
pub fn recompute_offsets(tokens: &mut [Token]) {
    let mut offset = 0;
    for token in tokens.iter_mut() {
        token.start = offset;
        token.end = offset + token.char_len();
        offset = token.end + usize::from(token.space_after);
    }
}

/// Join tokens honouring `space_after`
pub fn render_text(tokens: &[Token]) -> String {
    let mut text = String::new();
    for (i, token) in tokens.iter().enumerate() {
        text.push_str(&token.text);
        if token.space_after && i + 1 < tokens.len() {
            text.push(' ');
        }
    }
    text
}

/// Hand-assembles a [`ParsedSentence`], for rule-based annotators and tests
#[derive(Debug, Default)]
pub struct SentenceBuilder {
    tokens: Vec<Token>,
    chains: Vec<Vec<(usize, usize)>>,
}

impl SentenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token
    pub fn token(mut self, text: &str, pos: Pos, tag: &str, lemma: &str, dep: &str, head: usize) -> Self {
        self.tokens.push(Token {
            text: text.to_string(),
            start: 0,
            end: 0,
            pos,
            tag: tag.to_string(),
            lemma: lemma.to_string(),
            morph: Default::default(),
            dep: dep.to_string(),
            head,
            space_after: true,
        });
        self
    }

    /// Mark the last token as not followed by a space
    pub fn no_space(mut self) -> Self {
        if let Some(last) = self.tokens.last_mut() {
            last.space_after = false;
        }
        self
    }

    /// Add a coreference chain given as `(start, end)` token spans
    pub fn chain(mut self, spans: &[(usize, usize)]) -> Self {
        self.chains.push(spans.to_vec());
        self
    }

    pub fn build(self) -> ParsedSentence {
        let mut tokens = self.tokens;
        recompute_offsets(&mut tokens);

        let chains = self
            .chains
            .iter()
            .enumerate()
            .map(|(id, spans)| {
                let mentions = spans
                    .iter()
                    .map(|&(start, end)| Mention::infer(&tokens, start, end, MentionHint::default()))
                    .collect();
                CoreferenceChain::new(id, mentions)
            })
            .collect();

        ParsedSentence { tokens, chains }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::she_is_a_linguist;

    #[test]
    fn test_offsets_and_text() {
        let sentence = she_is_a_linguist();

        assert_eq!(sentence.text(), "She is a linguist .");
        assert_eq!(sentence.tokens[1].start, 4);
        assert_eq!(sentence.tokens[1].end, 6);
        assert_eq!(sentence.tokens[4].start, 18);
    }

    #[test]
    fn test_head_and_children() {
        let sentence = she_is_a_linguist();

        assert_eq!(sentence.head(1), None);
        assert_eq!(sentence.head(0), Some(1));
        assert_eq!(sentence.children(1).collect::<Vec<_>>(), vec![0, 3, 4]);
    }

    #[test]
    fn test_no_space_rendering() {
        let sentence = SentenceBuilder::new()
            .token("She", Pos::Pron, "PRP", "she", "nsubj", 1)
            .token("left", Pos::Verb, "VBD", "leave", "ROOT", 1)
            .no_space()
            .token(".", Pos::Punct, ".", ".", "punct", 1)
            .build();

        assert_eq!(sentence.text(), "She left.");
        assert_eq!(sentence.tokens[2].start, 8);
    }

    #[test]
    fn test_validate_rejects_bad_head() {
        let sentence = SentenceBuilder::new()
            .token("She", Pos::Pron, "PRP", "she", "nsubj", 7)
            .build();

        assert!(matches!(
            sentence.validate(),
            Err(InputError::HeadOutOfBounds { head: 7, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty() {
        let sentence = ParsedSentence::new(vec![], vec![]);
        assert!(matches!(sentence.validate(), Err(InputError::EmptySentence)));
    }
}
