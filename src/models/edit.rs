use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Half-open token range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
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

fn default_error_type() -> String {
    "UNK".to_string()
}

/// One correction in annotated-corpus (M2) shape: a source token range, an
/// error type and the replacement text. An empty correction is a deletion,
/// an empty range an insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct M2Edit {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type", default = "default_error_type")]
    pub error_type: String,
    pub correction: String,
}

impl M2Edit {
    pub fn new(start: usize, end: usize, error_type: &str, correction: &str) -> Self {
        Self {
            start,
            end,
            error_type: error_type.to_string(),
            correction: correction.to_string(),
        }
    }
}

/// A correction linked to both sides of a source/target pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    /// Range in the errorful source
    pub source: Span,
    /// Range in the corrected target
    pub target: Span,
    pub error_type: String,
    /// Target text of the range, tokens joined by single spaces
    pub replacement: String,
}

impl Edit {
    pub fn replacement_tokens(&self) -> Vec<String> {
        split_tokens(&self.replacement)
    }

    pub fn to_m2(&self) -> M2Edit {
        M2Edit {
            start: self.source.start,
            end: self.source.end,
            error_type: self.error_type.clone(),
            correction: self.replacement.clone(),
        }
    }
}

/// Where a target token comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLink {
    /// Inside the target range of the edit at this position in the list
    Edit(usize),
    /// Copied unchanged from this source index
    Source(usize),
}

/// Ordered, non-overlapping edits over one source sentence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditList {
    edits: Vec<Edit>,
}

impl EditList {
    /// Validate M2 edits against a source of `source_len` tokens and link
    /// each to its target range
    pub fn from_m2(source_len: usize, m2_edits: &[M2Edit]) -> Result<Self, InputError> {
        let mut edits: Vec<Edit> = Vec::with_capacity(m2_edits.len());
        let mut shift: isize = 0;

        for (index, m2) in m2_edits.iter().enumerate() {
            if m2.start > m2.end || m2.end > source_len {
                return Err(InputError::EditOutOfBounds {
                    index,
                    start: m2.start,
                    end: m2.end,
                    len: source_len,
                });
            }

            if let Some(previous) = edits.last() {
                let prev = previous.source;
                if m2.start < prev.start {
                    return Err(InputError::UnorderedEdits {
                        index,
                        start: m2.start,
                        previous_start: prev.start,
                    });
                }
                let same_insertion_point = prev.is_empty() && m2.start == m2.end && m2.start == prev.start;
                if m2.start < prev.end || same_insertion_point {
                    return Err(InputError::OverlappingEdits {
                        index,
                        start: m2.start,
                        end: m2.end,
                        previous_start: prev.start,
                        previous_end: prev.end,
                    });
                }
            }

            let replacement = split_tokens(&m2.correction);
            let target_start = (m2.start as isize + shift) as usize;
            let target = Span::new(target_start, target_start + replacement.len());
            shift += replacement.len() as isize - (m2.end - m2.start) as isize;

            edits.push(Edit {
                source: Span::new(m2.start, m2.end),
                target,
                error_type: m2.error_type.clone(),
                replacement: replacement.join(" "),
            });
        }

        Ok(Self { edits })
    }

    pub(crate) fn from_linked(edits: Vec<Edit>) -> Self {
        Self { edits }
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edit> {
        self.edits.iter()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Replay the edits against `source`, producing the target tokens
    pub fn apply(&self, source: &[String]) -> Vec<String> {
        let mut result = Vec::with_capacity(source.len());
        let mut cursor = 0;
        for edit in &self.edits {
            result.extend_from_slice(&source[cursor..edit.source.start]);
            result.extend(edit.replacement_tokens());
            cursor = edit.source.end;
        }
        result.extend_from_slice(&source[cursor..]);
        result
    }

    /// Link target token `index` to its edit, or to its source position
    /// after accounting for the length changes of earlier edits
    pub fn link_target(&self, index: usize) -> TargetLink {
        let mut shift: isize = 0;
        for (k, edit) in self.edits.iter().enumerate() {
            if edit.target.contains(index) {
                return TargetLink::Edit(k);
            }
            if edit.target.start > index {
                break;
            }
            shift += edit.target.len() as isize - edit.source.len() as isize;
        }
        TargetLink::Source((index as isize - shift) as usize)
    }

    pub fn to_m2(&self) -> Vec<M2Edit> {
        self.edits.iter().map(Edit::to_m2).collect()
    }
}

/// Whitespace tokenisation used by annotated corpora
pub fn split_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}
