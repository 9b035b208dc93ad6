pub mod agreement;
pub mod align;
pub mod annotator;
pub mod augmentor;
pub mod batch;
pub mod eligibility;
pub mod error;
pub mod io;
pub mod models;
pub mod stages;
pub mod syntax;

#[cfg(test)]
mod testing;

pub use agreement::{Role, AGREEMENT_TABLE};
pub use annotator::{AnnotatedSentence, Annotator, AnnotatorConfig, HttpAnnotator, PrecomputedAnnotator};
pub use augmentor::{augment_parsed, augment_parsed_pair, Augmentor, AugmentorConfig};
pub use batch::{run_batch, BatchConfig, BatchSummary};
pub use eligibility::{select_chains, EligibilityConfig, Selection};
pub use error::{AnnotatorError, InputError, NoAugment};
pub use io::{
    read_jsonl, read_m2, InputRecord, Outcome, OutputRecord, PairInput, PairRecord, SentenceInput,
    SentenceRecord,
};
pub use models::{
    AugmentationResult, CoreferenceChain, EditList, M2Edit, PairAugmentation, ParsedSentence,
    SentenceAugmentation, SentenceBuilder, Token,
};
pub use stages::{
    execute_stage1, execute_stage2, execute_stage3_pairs, execute_stage3_sentences, Stage1Result,
    Stage2Result, Stage3Config,
};
