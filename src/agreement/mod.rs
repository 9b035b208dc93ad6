pub mod casing;
pub mod table;
pub mod verbs;

pub use casing::match_case;
pub use table::*;

use crate::models::{Tense, Token};

/// Role of a gendered pronoun token, `None` outside the inventory.
///
/// `his` is a determiner when it has a possessum (`poss`) and a pronoun
/// otherwise; `her` is a determiner when tagged possessive, else an object.
pub fn pronoun_role(token: &Token) -> Option<Role> {
    let role = match token.lower().as_str() {
        "he" | "she" => Role::SubjectPronoun,
        "him" => Role::ObjectPronoun,
        "himself" | "herself" => Role::Reflexive,
        "hers" => Role::PossessivePronoun,
        "his" => {
            if token.dep == "poss" || (token.dep == "nsubj" && token.has_possessive_tag()) {
                Role::PossessiveDeterminer
            } else {
                Role::PossessivePronoun
            }
        }
        "her" => {
            if token.has_possessive_tag() || token.dep == "poss" {
                Role::PossessiveDeterminer
            } else {
                Role::ObjectPronoun
            }
        }
        _ => return None,
    };
    Some(role)
}

/// Role of a finite verb agreeing with a rewritten subject
pub fn verb_role(token: &Token) -> Role {
    match token.lower().as_str() {
        "'s" | "’s" if token.lemma == "have" => Role::HaveContraction,
        "'s" | "’s" => Role::CopulaContraction,
        "is" => Role::Copula,
        "was" => Role::PastCopula,
        _ if token.is_third_singular_present() => Role::PresentVerb,
        _ => Role::InvariantVerb,
    }
}

/// Bare (plural present) form of a third-singular verb, lower case
fn plural_present(form: &str, lemma: &str) -> Option<String> {
    match lemma.to_lowercase().as_str() {
        "" => verbs::bare_from_third_singular(form),
        "be" => Some("are".to_string()),
        lemma => Some(lemma.to_string()),
    }
}

/// Singular-they form of `form` in `role`, in the case of `form`.
///
/// `None` is a rule gap: the caller must not guess a substitution.
pub fn singular_they_form(role: Role, form: &str, lemma: &str, tense: Option<Tense>) -> Option<String> {
    match role {
        Role::InvariantVerb => Some(form.to_string()),
        Role::PresentVerb => plural_present(form, lemma).map(|bare| match_case(form, &bare)),
        _ => AGREEMENT_TABLE
            .lookup(role, form, tense)
            .map(|target| match_case(form, target)),
    }
}

/// Rewrite an errorful source pronoun to match a rewritten target pronoun.
///
/// `None` unless `source` is one of the gendered forms that map to
/// `target_form`.
pub fn counterpart_pronoun(source: &str, target_form: &str) -> Option<String> {
    let lower = source.to_lowercase();
    AGREEMENT_TABLE
        .pronoun_counterparts(target_form)
        .contains(&lower.as_str())
        .then(|| match_case(source, &target_form.to_lowercase()))
}

/// Apply verb agreement to an errorful source verb aligned with target
/// verb `target` (lemma `target_lemma`, rewritten in `target_role`).
///
/// The source keeps its own tense and spelling; only agreement marking
/// changes. `None` when the two are not forms of the same verb.
pub fn counterpart_verb(source: &str, target: &str, target_lemma: &str, target_role: Role) -> Option<String> {
    if !verbs::are_counterparts(source, target, target_lemma) {
        return None;
    }

    let copula_roles = [target_role, Role::CopulaContraction, Role::Copula, Role::PastCopula];
    for role in copula_roles {
        if role.is_verb() && role != Role::PresentVerb && role != Role::InvariantVerb {
            if let Some(replacement) = AGREEMENT_TABLE.lookup(role, source, None) {
                return Some(match_case(source, replacement));
            }
        }
    }

    let lower = source.to_lowercase();
    let lemma = if target_lemma.is_empty() {
        verbs::bare_from_third_singular(&lower)
    } else {
        Some(target_lemma.to_lowercase())
    };
    match lemma {
        Some(lemma) if verbs::third_person_singular(&lemma) == lower => Some(match_case(source, &lemma)),
        _ => Some(source.to_string()),
    }
}
