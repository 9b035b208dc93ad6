use serde::{Deserialize, Serialize};

use super::{Number, Token};

/// Grammatical gender inferred for a mention
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
    #[default]
    Unknown,
}

/// Personal pronouns the mention inference recognises, with their gender and number
const PRONOUN_FEATURES: &[(&str, Gender, Number)] = &[
    ("he", Gender::Masculine, Number::Singular),
    ("him", Gender::Masculine, Number::Singular),
    ("his", Gender::Masculine, Number::Singular),
    ("himself", Gender::Masculine, Number::Singular),
    ("she", Gender::Feminine, Number::Singular),
    ("her", Gender::Feminine, Number::Singular),
    ("hers", Gender::Feminine, Number::Singular),
    ("herself", Gender::Feminine, Number::Singular),
    ("it", Gender::Neuter, Number::Singular),
    ("its", Gender::Neuter, Number::Singular),
    ("itself", Gender::Neuter, Number::Singular),
    ("themself", Gender::Unknown, Number::Singular),
    ("they", Gender::Unknown, Number::Plural),
    ("them", Gender::Unknown, Number::Plural),
    ("their", Gender::Unknown, Number::Plural),
    ("theirs", Gender::Unknown, Number::Plural),
    ("themselves", Gender::Unknown, Number::Plural),
];

/// Gender and number of a personal pronoun, if `word` is one
pub fn pronoun_features(word: &str) -> Option<(Gender, Number)> {
    let lower = word.to_lowercase();
    PRONOUN_FEATURES
        .iter()
        .find(|(form, _, _)| *form == lower)
        .map(|&(_, gender, number)| (gender, number))
}

/// Optional features supplied by the coreference model for a mention
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionHint {
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub number: Option<Number>,
}

/// A token span referring to an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// First token index
    pub start: usize,
    /// One past the last token index
    pub end: usize,
    /// Syntactic root of the span
    pub root: usize,
    pub gender: Gender,
    pub number: Option<Number>,
    /// Case-folded pronoun form when the root is a personal pronoun
    pub pronoun: Option<String>,
}

impl Mention {
    /// Build a mention over `tokens[start..end]`, inferring root, gender and number.
    ///
    /// Pronoun morphology always wins over the model's hint; for nominal
    /// mentions the hint is used and number falls back to the fine tag.
    /// The caller guarantees `start < end <= tokens.len()`.
    pub fn infer(tokens: &[Token], start: usize, end: usize, hint: MentionHint) -> Self {
        let root = span_root(tokens, start, end);
        let root_token = &tokens[root];

        if let Some((gender, number)) = pronoun_features(&root_token.text) {
            return Self {
                start,
                end,
                root,
                gender,
                number: Some(number),
                pronoun: Some(root_token.lower()),
            };
        }

        let number = hint.number.or(root_token.morph.number).or(match root_token.tag.as_str() {
            "NNS" | "NNPS" => Some(Number::Plural),
            "NN" | "NNP" => Some(Number::Singular),
            _ => None,
        });

        Self {
            start,
            end,
            root,
            gender: hint.gender.unwrap_or_default(),
            number,
            pronoun: None,
        }
    }

    /// Masculine or feminine singular personal pronoun
    pub fn is_gendered_pronoun(&self) -> bool {
        self.pronoun.is_some()
            && matches!(self.gender, Gender::Masculine | Gender::Feminine)
            && self.number == Some(Number::Singular)
    }

    pub fn is_plural(&self) -> bool {
        self.number == Some(Number::Plural)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// The token in `start..end` whose head lies outside the span
fn span_root(tokens: &[Token], start: usize, end: usize) -> usize {
    (start..end)
        .find(|&i| {
            let head = tokens[i].head;
            head == i || head < start || head >= end
        })
        .unwrap_or(end - 1)
}

/// Mentions believed to denote the same referent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreferenceChain {
    pub id: usize,
    pub mentions: Vec<Mention>,
}

impl CoreferenceChain {
    pub fn new(id: usize, mentions: Vec<Mention>) -> Self {
        Self { id, mentions }
    }

    /// Mentions that are masculine or feminine singular pronouns
    pub fn gendered_pronouns(&self) -> impl Iterator<Item = &Mention> {
        self.mentions.iter().filter(|m| m.is_gendered_pronoun())
    }

    /// Chain contains at least one gendered singular pronoun
    pub fn is_gendered(&self) -> bool {
        self.gendered_pronouns().next().is_some()
    }

    /// Whether `index` is the root of one of this chain's mentions
    pub fn has_root(&self, index: usize) -> bool {
        self.mentions.iter().any(|m| m.root == index)
    }
}
