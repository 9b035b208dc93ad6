use crate::models::{CoreferenceChain, Gender, Mention, ParsedSentence, Pos};
use crate::syntax;

/// Whether a mention is marked singular by its own syntax.
///
/// A singular common noun, a proper noun, a possessive whose possessum is a
/// singular noun, or a subject whose predicate has a singular noun
/// attribute ("She is a linguist").
pub fn is_singular_anchor(sentence: &ParsedSentence, mention: &Mention) -> bool {
    let token = &sentence.tokens[mention.root];
    if token.tag == "NN" || token.pos == Pos::Propn {
        return true;
    }

    if token.has_possessive_tag() && token.dep == "poss" {
        if let Some(head) = sentence.head(mention.root) {
            if sentence.tokens[head].tag == "NN" {
                return true;
            }
        }
    }

    token.dep == "nsubj" && syntax::head_has_singular_attr(sentence, mention.root)
}

/// Whether any mention of the chain anchors a singular reading
pub fn has_singular_anchor(sentence: &ParsedSentence, chain: &CoreferenceChain) -> bool {
    chain.mentions.iter().any(|m| is_singular_anchor(sentence, m))
}

/// A plural mention, or mentions of more than one known gender (a neuter
/// pronoun next to a feminine one counts)
pub fn is_mixed(chain: &CoreferenceChain) -> bool {
    if chain.mentions.iter().any(Mention::is_plural) {
        return true;
    }
    let mut genders = chain
        .mentions
        .iter()
        .map(|m| m.gender)
        .filter(|&g| g != Gender::Unknown);
    match genders.next() {
        Some(first) => genders.any(|g| g != first),
        None => false,
    }
}
