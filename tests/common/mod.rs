//! Hand-built parses standing in for the coreference model

#![allow(dead_code)]

use std::sync::Arc;

use singular_they::models::{ParsedSentence, Pos, SentenceBuilder};
use singular_they::{AnnotatedSentence, Augmentor, AugmentorConfig, PrecomputedAnnotator};

pub fn linguist(subject: &str, copula: &str) -> ParsedSentence {
    SentenceBuilder::new()
        .token(subject, Pos::Pron, "PRP", &subject.to_lowercase(), "nsubj", 1)
        .token(copula, Pos::Aux, "VBZ", "be", "ROOT", 1)
        .token("a", Pos::Det, "DT", "a", "det", 3)
        .token("linguist", Pos::Noun, "NN", "linguist", "attr", 1)
        .token(".", Pos::Punct, ".", ".", "punct", 1)
        .build()
}

pub fn clock_was_striking() -> ParsedSentence {
    SentenceBuilder::new()
        .token("The", Pos::Det, "DT", "the", "det", 1)
        .token("clock", Pos::Noun, "NN", "clock", "nsubj", 3)
        .token("was", Pos::Aux, "VBD", "be", "aux", 3)
        .token("striking", Pos::Verb, "VBG", "strike", "ROOT", 3)
        .token("as", Pos::Sconj, "IN", "as", "mark", 6)
        .token("she", Pos::Pron, "PRP", "she", "nsubj", 6)
        .token("stepped", Pos::Verb, "VBD", "step", "advcl", 3)
        .token("out", Pos::Adp, "RP", "out", "prt", 6)
        .token("into", Pos::Adp, "IN", "into", "prep", 6)
        .token("the", Pos::Det, "DT", "the", "det", 10)
        .token("street", Pos::Noun, "NN", "street", "pobj", 8)
        .token(".", Pos::Punct, ".", ".", "punct", 3)
        .build()
}

/// "Mary found her keys and she checks her bag ." with every mention in one
/// chain
pub fn mary_checks_her_bag() -> ParsedSentence {
    SentenceBuilder::new()
        .token("Mary", Pos::Propn, "NNP", "Mary", "nsubj", 1)
        .token("found", Pos::Verb, "VBD", "find", "ROOT", 1)
        .token("her", Pos::Pron, "PRP$", "her", "poss", 3)
        .token("keys", Pos::Noun, "NNS", "key", "dobj", 1)
        .token("and", Pos::Cconj, "CC", "and", "cc", 1)
        .token("she", Pos::Pron, "PRP", "she", "nsubj", 6)
        .token("checks", Pos::Verb, "VBZ", "check", "conj", 1)
        .token("her", Pos::Pron, "PRP$", "her", "poss", 8)
        .token("bag", Pos::Noun, "NN", "bag", "dobj", 6)
        .token(".", Pos::Punct, ".", ".", "punct", 1)
        .chain(&[(0, 1), (2, 3), (5, 6), (7, 8)])
        .build()
}

/// "Mary said <pronoun> ." with Mary and the pronoun in one chain
pub fn mary_said(pronoun: &str, tag: &str, dep: &str) -> ParsedSentence {
    SentenceBuilder::new()
        .token("Mary", Pos::Propn, "NNP", "Mary", "nsubj", 1)
        .token("said", Pos::Verb, "VBD", "say", "ROOT", 1)
        .token(pronoun, Pos::Pron, tag, pronoun, dep, 1)
        .token(".", Pos::Punct, ".", ".", "punct", 1)
        .chain(&[(0, 1), (2, 3)])
        .build()
}

/// "She left ." with no chain and nothing marking her as singular
pub fn she_left() -> ParsedSentence {
    SentenceBuilder::new()
        .token("She", Pos::Pron, "PRP", "she", "nsubj", 1)
        .token("left", Pos::Verb, "VBD", "leave", "ROOT", 1)
        .token(".", Pos::Punct, ".", ".", "punct", 1)
        .build()
}

/// "She is a linguist and it works ." with `She` and `it` in one chain
pub fn she_and_it() -> ParsedSentence {
    SentenceBuilder::new()
        .token("She", Pos::Pron, "PRP", "she", "nsubj", 1)
        .token("is", Pos::Aux, "VBZ", "be", "ROOT", 1)
        .token("a", Pos::Det, "DT", "a", "det", 3)
        .token("linguist", Pos::Noun, "NN", "linguist", "attr", 1)
        .token("and", Pos::Cconj, "CC", "and", "cc", 1)
        .token("it", Pos::Pron, "PRP", "it", "nsubj", 6)
        .token("works", Pos::Verb, "VBZ", "work", "conj", 1)
        .token(".", Pos::Punct, ".", ".", "punct", 1)
        .chain(&[(0, 1), (5, 6)])
        .build()
}

/// "He thanked her ." with `He` and `her` in one chain
pub fn he_thanked_her() -> ParsedSentence {
    SentenceBuilder::new()
        .token("He", Pos::Pron, "PRP", "he", "nsubj", 1)
        .token("thanked", Pos::Verb, "VBD", "thank", "ROOT", 1)
        .token("her", Pos::Pron, "PRP", "she", "dobj", 1)
        .token(".", Pos::Punct, ".", ".", "punct", 1)
        .chain(&[(0, 1), (2, 3)])
        .build()
}

/// "The doctor thinks she is a linguist ." where a second chain repeats
/// `she` and so claims the same copula
pub fn doctor_thinks_she_is() -> ParsedSentence {
    SentenceBuilder::new()
        .token("The", Pos::Det, "DT", "the", "det", 1)
        .token("doctor", Pos::Noun, "NN", "doctor", "nsubj", 2)
        .token("thinks", Pos::Verb, "VBZ", "think", "ROOT", 2)
        .token("she", Pos::Pron, "PRP", "she", "nsubj", 4)
        .token("is", Pos::Aux, "VBZ", "be", "ccomp", 2)
        .token("a", Pos::Det, "DT", "a", "det", 6)
        .token("linguist", Pos::Noun, "NN", "linguist", "attr", 4)
        .token(".", Pos::Punct, ".", ".", "punct", 2)
        .chain(&[(0, 2), (3, 4)])
        .chain(&[(3, 4)])
        .build()
}

pub fn annotator(sentences: &[ParsedSentence]) -> PrecomputedAnnotator {
    sentences.iter().map(AnnotatedSentence::from).collect()
}

/// An augmentor that knows every fixture above
pub fn augmentor() -> Augmentor {
    let annotator = annotator(&[
        linguist("She", "is"),
        linguist("She", "'s"),
        clock_was_striking(),
        mary_checks_her_bag(),
        she_and_it(),
        he_thanked_her(),
        doctor_thinks_she_is(),
    ]);
    Augmentor::new(Arc::new(annotator), AugmentorConfig::default())
}
