//! The parser/coreference collaborator.
//!
//! Anything that turns raw text into tokens and coreference chains sits
//! behind [`Annotator`]: a remote model server ([`HttpAnnotator`]), parses
//! computed ahead of time ([`PrecomputedAnnotator`]), or hand-built parses in
//! tests.

pub mod client;
pub mod precomputed;

pub use client::*;
pub use precomputed::*;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::models::{
    render_text, CoreferenceChain, Gender, Mention, MentionHint, Number, ParsedSentence, Token,
};

/// Produces tokens and coreference chains for a sentence.
///
/// Calls are synchronous; implementations must be deterministic per input
/// within one run.
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Result<ParsedSentence, InputError>;
}

/// A mention span as reported by the coreference model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionSpan {
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<Number>,
}

/// Wire form of an annotated sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    /// Text the parse was produced for; rebuilt from the tokens if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub chains: Vec<Vec<MentionSpan>>,
}

impl AnnotatedSentence {
    /// The text this parse answers for
    pub fn text(&self) -> String {
        self.text.clone().unwrap_or_else(|| render_text(&self.tokens))
    }

    /// Validate and build a [`ParsedSentence`], inferring mention roots and
    /// features
    pub fn into_sentence(self) -> Result<ParsedSentence, InputError> {
        let mut sentence = ParsedSentence::new(self.tokens, vec![]);
        sentence.validate()?;

        let len = sentence.len();
        for (chain_id, spans) in self.chains.into_iter().enumerate() {
            let mut mentions = Vec::with_capacity(spans.len());
            for span in spans {
                if span.start >= span.end || span.end > len {
                    return Err(InputError::MentionOutOfBounds {
                        chain_id,
                        start: span.start,
                        end: span.end,
                        len,
                    });
                }
                let hint = MentionHint {
                    gender: span.gender,
                    number: span.number,
                };
                mentions.push(Mention::infer(&sentence.tokens, span.start, span.end, hint));
            }
            sentence.chains.push(CoreferenceChain::new(chain_id, mentions));
        }

        Ok(sentence)
    }
}

impl From<&ParsedSentence> for AnnotatedSentence {
    fn from(sentence: &ParsedSentence) -> Self {
        let chains = sentence
            .chains
            .iter()
            .map(|chain| {
                chain
                    .mentions
                    .iter()
                    .map(|m| MentionSpan {
                        start: m.start,
                        end: m.end,
                        gender: (m.gender != Gender::Unknown).then_some(m.gender),
                        number: m.number,
                    })
                    .collect()
            })
            .collect();

        Self {
            text: Some(sentence.text()),
            tokens: sentence.tokens.clone(),
            chains,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHE_IS_A_LINGUIST: &str = r#"{
        "text": "She is a linguist .",
        "tokens": [
            {"text": "She", "pos": "PRON", "tag": "PRP", "lemma": "she", "dep": "nsubj", "head": 1},
            {"text": "is", "pos": "AUX", "tag": "VBZ", "lemma": "be", "dep": "ROOT", "head": 1},
            {"text": "a", "pos": "DET", "tag": "DT", "lemma": "a", "dep": "det", "head": 3},
            {"text": "linguist", "pos": "NOUN", "tag": "NN", "lemma": "linguist", "dep": "attr", "head": 1},
            {"text": ".", "pos": "PUNCT", "tag": ".", "lemma": ".", "dep": "punct", "head": 1}
        ],
        "chains": [[{"start": 0, "end": 1}, {"start": 2, "end": 4, "gender": "feminine"}]]
    }"#;

    #[test]
    fn test_parse_annotated_sentence() {
        let annotated: AnnotatedSentence = serde_json::from_str(SHE_IS_A_LINGUIST).unwrap();

        let sentence = annotated.into_sentence().unwrap();

        assert_eq!(sentence.text(), "She is a linguist .");
        assert_eq!(sentence.chains.len(), 1);
        let nominal = &sentence.chains[0].mentions[1];
        assert_eq!(nominal.root, 3);
        assert_eq!(nominal.gender, Gender::Feminine);
        assert_eq!(nominal.number, Some(Number::Singular));
    }

    #[test]
    fn test_mention_out_of_bounds_rejected() {
        let mut annotated: AnnotatedSentence = serde_json::from_str(SHE_IS_A_LINGUIST).unwrap();
        annotated.chains[0].push(MentionSpan {
            start: 4,
            end: 9,
            gender: None,
            number: None,
        });

        assert!(matches!(
            annotated.into_sentence(),
            Err(InputError::MentionOutOfBounds { chain_id: 0, end: 9, .. })
        ));
    }

    #[test]
    fn test_round_trip_through_wire_form() {
        let annotated: AnnotatedSentence = serde_json::from_str(SHE_IS_A_LINGUIST).unwrap();
        let sentence = annotated.into_sentence().unwrap();

        let again = AnnotatedSentence::from(&sentence).into_sentence().unwrap();

        assert_eq!(again, sentence);
    }
}
