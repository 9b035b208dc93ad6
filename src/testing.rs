//! Hand-built parses shared by unit tests

use crate::models::{ParsedSentence, Pos, SentenceBuilder};

/// "She is a linguist ." with no coreference clusters
pub fn she_is_a_linguist() -> ParsedSentence {
    linguist("is")
}

/// "She 's a linguist ." with no coreference clusters
pub fn she_s_a_linguist() -> ParsedSentence {
    linguist("'s")
}

fn linguist(copula: &str) -> ParsedSentence {
    SentenceBuilder::new()
        .token("She", Pos::Pron, "PRP", "she", "nsubj", 1)
        .token(copula, Pos::Aux, "VBZ", "be", "ROOT", 1)
        .token("a", Pos::Det, "DT", "a", "det", 3)
        .token("linguist", Pos::Noun, "NN", "linguist", "attr", 1)
        .token(".", Pos::Punct, ".", ".", "punct", 1)
        .build()
}

/// The corrected Metamorphosis opening, with "Gregor Samsa ... he ...
/// himself ... his" in one chain
pub fn gregor_samsa_target() -> ParsedSentence {
    SentenceBuilder::new()
        .token("When", Pos::Sconj, "WRB", "when", "advmod", 3)
        .token("Gregor", Pos::Propn, "NNP", "Gregor", "compound", 2)
        .token("Samsa", Pos::Propn, "NNP", "Samsa", "nsubj", 3)
        .token("woke", Pos::Verb, "VBD", "wake", "advcl", 11)
        .token("one", Pos::Num, "CD", "one", "nummod", 5)
        .token("morning", Pos::Noun, "NN", "morning", "npadvmod", 3)
        .token("from", Pos::Adp, "IN", "from", "prep", 3)
        .token("troubled", Pos::Adj, "JJ", "troubled", "amod", 8)
        .token("dreams", Pos::Noun, "NNS", "dream", "pobj", 6)
        .token(",", Pos::Punct, ",", ",", "punct", 11)
        .token("he", Pos::Pron, "PRP", "he", "nsubj", 11)
        .token("found", Pos::Verb, "VBD", "find", "ROOT", 11)
        .token("himself", Pos::Pron, "PRP", "himself", "dobj", 11)
        .token("transformed", Pos::Verb, "VBN", "transform", "oprd", 11)
        .token("right", Pos::Adv, "RB", "right", "advmod", 15)
        .token("there", Pos::Adv, "RB", "there", "advmod", 13)
        .token("in", Pos::Adp, "IN", "in", "prep", 13)
        .token("his", Pos::Pron, "PRP$", "his", "poss", 18)
        .token("bed", Pos::Noun, "NN", "bed", "pobj", 16)
        .token("into", Pos::Adp, "IN", "into", "prep", 13)
        .token("some", Pos::Det, "DT", "some", "det", 21)
        .token("sort", Pos::Noun, "NN", "sort", "pobj", 19)
        .token("of", Pos::Adp, "IN", "of", "prep", 21)
        .token("monstrous", Pos::Adj, "JJ", "monstrous", "amod", 24)
        .token("insect", Pos::Noun, "NN", "insect", "pobj", 22)
        .token(".", Pos::Punct, ".", ".", "punct", 11)
        .chain(&[(1, 3), (10, 11), (12, 13), (17, 18)])
        .build()
}

/// Errorful source of [`gregor_samsa_target`]
pub const GREGOR_SAMSA_SOURCE: &str = "When Gregor Samsa waked one morning from troubled dreams , he finds himself transformed right there in his bed into some sore of monstrous insect .";

/// "The clock was striking as she stepped out into the street ." where the
/// coreference model finds no cluster
pub fn clock_striking() -> ParsedSentence {
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
