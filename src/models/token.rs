use serde::{Deserialize, Serialize};

/// Universal part-of-speech tag as produced by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
    #[serde(other)]
    Other,
}

impl Pos {
    /// VERB or AUX
    pub fn is_verbal(self) -> bool {
        matches!(self, Pos::Verb | Pos::Aux)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tense {
    Present,
    Past,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Number {
    Singular,
    Plural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Person {
    First,
    Second,
    Third,
}

/// Morphological features reported by the parser (all optional)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Morphology {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tense: Option<Tense>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
}

/// A parsed token. The parser owns everything except the character offsets,
/// which are recomputed whenever a sentence is assembled or rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text
    pub text: String,
    /// Character offset of the first char
    #[serde(default)]
    pub start: usize,
    /// Character offset one past the last char
    #[serde(default)]
    pub end: usize,
    /// Coarse part of speech
    pub pos: Pos,
    /// Fine-grained (Penn Treebank) tag
    pub tag: String,
    /// Lemma, empty if the parser gave none
    #[serde(default)]
    pub lemma: String,
    #[serde(default)]
    pub morph: Morphology,
    /// Dependency label
    pub dep: String,
    /// Index of the syntactic head; the root points to itself
    pub head: usize,
    /// Whether a single space follows this token
    #[serde(default = "default_space_after")]
    pub space_after: bool,
}

fn default_space_after() -> bool {
    true
}

impl Token {
    /// Case-folded surface text
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    /// Number of chars in the surface text
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Tense from morphology, falling back to the fine tag
    pub fn tense(&self) -> Option<Tense> {
        self.morph.tense.or(match self.tag.as_str() {
            "VBZ" | "VBP" => Some(Tense::Present),
            "VBD" => Some(Tense::Past),
            _ => None,
        })
    }

    /// Third-person singular present verb (VBZ)
    pub fn is_third_singular_present(&self) -> bool {
        self.tag == "VBZ"
            || (self.morph.tense == Some(Tense::Present)
                && self.morph.number == Some(Number::Singular)
                && self.morph.person == Some(Person::Third))
    }

    /// Possessive fine tag (`PRP$`, `WP$`)
    pub fn has_possessive_tag(&self) -> bool {
        self.tag.ends_with('$')
    }
}
