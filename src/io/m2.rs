//! M2 annotated-correction format.
//!
//! ```text
//! S She 's an linguist .
//! A 2 3|||R:DET|||a|||REQUIRED|||-NONE-|||0
//!
//! ```

use std::path::Path;

use anyhow::{Context, Result};

use super::{InputRecord, PairInput};
use crate::error::InputError;
use crate::models::{split_tokens, EditList, M2Edit};

const FIELD_SEPARATOR: &str = "|||";
const NONE_CORRECTION: &str = "-NONE-";
const NOOP_TYPE: &str = "noop";

/// One `A` line
#[derive(Debug, Clone, PartialEq, Eq)]
struct Annotation {
    edit: Option<M2Edit>,
    annotator: String,
}

fn parse_annotation(line_number: usize, line: &str) -> Result<Annotation, InputError> {
    let malformed = |reason: &str| InputError::MalformedM2 {
        line: line_number,
        reason: reason.to_string(),
    };

    let body = line.strip_prefix("A ").ok_or_else(|| malformed("expected an A line"))?;
    let fields: Vec<&str> = body.split(FIELD_SEPARATOR).collect();
    if fields.len() < 3 {
        return Err(malformed("expected span, type and correction fields"));
    }

    let mut span = fields[0].split_whitespace();
    let (Some(start), Some(end), None) = (span.next(), span.next(), span.next()) else {
        return Err(malformed("span must be two offsets"));
    };
    let annotator = fields.last().map(|f| f.trim().to_string()).unwrap_or_default();

    if (start == "-1" && end == "-1") || fields[1] == NOOP_TYPE {
        return Ok(Annotation { edit: None, annotator });
    }

    let start: usize = start.parse().map_err(|_| malformed("span start is not an offset"))?;
    let end: usize = end.parse().map_err(|_| malformed("span end is not an offset"))?;
    let correction = match fields[2].trim() {
        NONE_CORRECTION => "",
        correction => correction,
    };

    Ok(Annotation {
        edit: Some(M2Edit::new(start, end, fields[1].trim(), correction)),
        annotator,
    })
}

fn finish_block(
    source: Option<(usize, Vec<String>)>,
    annotations: &mut Vec<Annotation>,
    records: &mut Vec<InputRecord<PairInput>>,
) -> Result<(), InputError> {
    let Some((line_number, tokens)) = source else {
        annotations.clear();
        return Ok(());
    };
    let first_annotator = annotations.first().map(|a| a.annotator.clone());
    let m2_edits: Vec<M2Edit> = annotations
        .drain(..)
        .filter(|a| Some(&a.annotator) == first_annotator.as_ref())
        .filter_map(|a| a.edit)
        .collect();

    let edits = EditList::from_m2(tokens.len(), &m2_edits).map_err(|e| InputError::MalformedM2 {
        line: line_number,
        reason: e.to_string(),
    })?;
    let target = edits.apply(&tokens).join(" ");

    records.push(InputRecord::new(
        None,
        PairInput {
            source: tokens.join(" "),
            target,
            edits: Some(m2_edits),
        },
    ));
    Ok(())
}

/// Parse M2 text into source/target pairs. Only the first annotator of each
/// block is used; the target is the source with its edits applied.
pub fn parse_m2(content: &str) -> Result<Vec<InputRecord<PairInput>>, InputError> {
    let mut records = Vec::new();
    let mut source: Option<(usize, Vec<String>)> = None;
    let mut annotations: Vec<Annotation> = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim_end();
        if let Some(text) = line.strip_prefix("S ") {
            finish_block(source.take(), &mut annotations, &mut records)?;
            source = Some((line_number, split_tokens(text)));
        } else if line == "S" {
            finish_block(source.take(), &mut annotations, &mut records)?;
            source = Some((line_number, Vec::new()));
        } else if line.starts_with("A ") {
            if source.is_none() {
                return Err(InputError::MalformedM2 {
                    line: line_number,
                    reason: "annotation before any S line".to_string(),
                });
            }
            annotations.push(parse_annotation(line_number, line)?);
        } else if line.trim().is_empty() {
            finish_block(source.take(), &mut annotations, &mut records)?;
        } else {
            return Err(InputError::MalformedM2 {
                line: line_number,
                reason: "expected an S or A line".to_string(),
            });
        }
    }
    finish_block(source.take(), &mut annotations, &mut records)?;

    Ok(records)
}

/// Read an M2 file
pub fn read_m2(path: &Path) -> Result<Vec<InputRecord<PairInput>>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_m2(&content).with_context(|| format!("Failed to parse M2 file {:?}", path))
}

/// Format one M2 block
pub fn format_m2_block(source: &str, edits: &[M2Edit]) -> String {
    let mut block = format!("S {}\n", source);
    if edits.is_empty() {
        block.push_str("A -1 -1|||noop|||-NONE-|||REQUIRED|||-NONE-|||0\n");
    }
    for edit in edits {
        let correction = if edit.correction.is_empty() {
            NONE_CORRECTION
        } else {
            edit.correction.as_str()
        };
        block.push_str(&format!(
            "A {} {}|||{}|||{}|||REQUIRED|||-NONE-|||0\n",
            edit.start, edit.end, edit.error_type, correction
        ));
    }
    block.push('\n');
    block
}
