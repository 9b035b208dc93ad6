//! Dependency-tree queries over a parsed sentence.

use crate::models::{ParsedSentence, Pos};

const SUBJECT_DEPS: &[&str] = &["nsubj", "nsubjpass", "nsubj:pass"];
const AUX_DEPS: &[&str] = &["aux", "auxpass", "aux:pass"];

fn is_subject(dep: &str) -> bool {
    SUBJECT_DEPS.contains(&dep)
}

fn is_aux(dep: &str) -> bool {
    AUX_DEPS.contains(&dep)
}

/// Whether token `index` has a nominal-subject dependent
pub fn has_subject(sentence: &ParsedSentence, index: usize) -> bool {
    sentence
        .children(index)
        .any(|c| is_subject(&sentence.tokens[c].dep))
}

/// Tokens conjoined with `index` through `conj` links, in either direction
pub fn conjuncts(sentence: &ParsedSentence, index: usize) -> Vec<usize> {
    // Walk up to the first conjunct; bounded in case the parse has a cycle
    let mut first = index;
    for _ in 0..sentence.len() {
        if sentence.tokens[first].dep != "conj" {
            break;
        }
        match sentence.head(first) {
            Some(head) => first = head,
            None => break,
        }
    }

    let mut found = Vec::new();
    let mut stack = vec![first];
    while let Some(current) = stack.pop() {
        if found.contains(&current) {
            continue;
        }
        found.push(current);
        stack.extend(
            sentence
                .children(current)
                .filter(|&c| sentence.tokens[c].dep == "conj"),
        );
    }
    found.retain(|&i| i != index);
    found.sort_unstable();
    found
}

/// The verb that carries agreement for verbal head `index`: its leftmost
/// auxiliary dependent, or the head itself
pub fn agreeing_verb(sentence: &ParsedSentence, index: usize) -> usize {
    sentence
        .children(index)
        .find(|&c| {
            let child = &sentence.tokens[c];
            child.pos == Pos::Aux && is_aux(&child.dep)
        })
        .unwrap_or(index)
}

/// Finite verbs whose agreement is governed by subject token `index`.
///
/// Covers the verbal head (or its leftmost auxiliary), verbal conjuncts of
/// the head that have no subject of their own, and, for nominal predicates,
/// the `cop`/`aux` dependents of the predicate.
pub fn governed_verbs(sentence: &ParsedSentence, index: usize) -> Vec<usize> {
    let token = &sentence.tokens[index];
    if !is_subject(&token.dep) {
        return vec![];
    }
    let Some(head) = sentence.head(index) else {
        return vec![];
    };

    let mut verbs = Vec::new();
    if sentence.tokens[head].pos.is_verbal() {
        verbs.push(agreeing_verb(sentence, head));
    } else if let Some(copula) = sentence
        .children(head)
        .find(|&c| sentence.tokens[c].dep == "cop" || is_aux(&sentence.tokens[c].dep))
    {
        verbs.push(copula);
    } else {
        return vec![];
    }

    for conjunct in conjuncts(sentence, head) {
        let conj = &sentence.tokens[conjunct];
        if conj.pos.is_verbal() && !has_subject(sentence, conjunct) {
            let verb = agreeing_verb(sentence, conjunct);
            if !verbs.contains(&verb) {
                verbs.push(verb);
            }
        }
    }

    verbs
}

/// Whether the head of token `index` has an `attr` dependent tagged `NN`
pub fn head_has_singular_attr(sentence: &ParsedSentence, index: usize) -> bool {
    let Some(head) = sentence.head(index) else {
        return false;
    };
    sentence
        .children(head)
        .any(|c| sentence.tokens[c].dep == "attr" && sentence.tokens[c].tag == "NN")
}
