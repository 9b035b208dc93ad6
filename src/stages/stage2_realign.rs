use std::collections::BTreeSet;

use tracing::debug;

use super::Stage1Result;
use crate::agreement::{counterpart_pronoun, counterpart_verb};
use crate::error::NoAugment;
use crate::models::{EditList, ParsedSentence, TargetLink, TokenChange};

/// Result of Stage 2 realignment
#[derive(Debug, Clone)]
pub struct Stage2Result {
    /// Errorful source with the rewrite applied
    pub swapped_source: Vec<String>,
    /// Edits turning the swapped source into the augmented target
    pub edits: EditList,
    /// Tokens rewritten on the source side
    pub source_changes: Vec<TokenChange>,
    /// Number of edits whose replacement text changed
    pub edits_updated: usize,
    /// Edits that became no-ops after the rewrite and were dropped
    pub edits_dropped: usize,
}

/// Execute Stage 2: carry a target-side rewrite over to the source.
///
/// Each touched target token is linked to the source through the edit list.
/// Outside every edit the source token is the target token, so it takes the
/// same replacement. Inside an edit the source token at the same offset must
/// be a counterpart of the target token (a gendered pronoun with the same
/// singular-they form, or a form of the same verb); it is then rewritten by
/// its own form, and the edit's replacement text becomes the augmented target
/// text. Anything else is an [`NoAugment::EditConflict`].
///
/// The caller guarantees that `edits` applied to `source` gives the target.
pub fn execute_stage2(
    source: &[String],
    target: &ParsedSentence,
    edits: &EditList,
    rewrite: &Stage1Result,
) -> Result<Stage2Result, NoAugment> {
    let augmented = rewrite.sentence.words();
    let mut swapped = source.to_vec();
    let mut source_changes = Vec::new();
    let mut touched_edits = BTreeSet::new();

    for change in &rewrite.changes {
        let (source_index, replacement) = match edits.link_target(change.index) {
            TargetLink::Source(source_index) => (source_index, change.replacement.clone()),
            TargetLink::Edit(k) => {
                let edit = &edits.edits()[k];
                if edit.source.len() != edit.target.len() {
                    return Err(NoAugment::conflict(format!(
                        "{:?} lies in edit {} which turns {} source tokens into {}",
                        change.original,
                        k,
                        edit.source.len(),
                        edit.target.len()
                    )));
                }

                let source_index = edit.source.start + (change.index - edit.target.start);
                let source_form = &source[source_index];
                let replacement = if change.role.is_pronoun() {
                    counterpart_pronoun(source_form, &change.replacement)
                } else {
                    let lemma = &target.tokens[change.index].lemma;
                    counterpart_verb(source_form, &change.original, lemma, change.role)
                };
                let replacement = replacement.ok_or_else(|| {
                    NoAugment::conflict(format!(
                        "source {:?} in edit {} is not a counterpart of {:?}",
                        source_form, k, change.original
                    ))
                })?;

                touched_edits.insert(k);
                (source_index, replacement)
            }
        };

        if swapped[source_index] != replacement {
            source_changes.push(TokenChange {
                index: source_index,
                role: change.role,
                original: swapped[source_index].clone(),
                replacement: replacement.clone(),
            });
            swapped[source_index] = replacement;
        }
    }

    let mut updated = Vec::with_capacity(edits.len());
    let mut edits_updated = 0;
    let mut edits_dropped = 0;
    for (k, edit) in edits.iter().enumerate() {
        let mut edit = edit.clone();
        if touched_edits.contains(&k) {
            let replacement = augmented[edit.target.start..edit.target.end].join(" ");
            if swapped[edit.source.start..edit.source.end] == augmented[edit.target.start..edit.target.end] {
                debug!("Stage 2: edit {} is a no-op after the rewrite, dropping", k);
                edits_dropped += 1;
                continue;
            }
            if replacement != edit.replacement {
                edits_updated += 1;
            }
            edit.replacement = replacement;
        }
        updated.push(edit);
    }
    let updated = EditList::from_linked(updated);

    if updated.apply(&swapped) != augmented {
        return Err(NoAugment::conflict(
            "updated edits do not rebuild the augmented target",
        ));
    }

    debug!(
        "Stage 2: {} source tokens rewritten, {} edits updated, {} dropped",
        source_changes.len(),
        edits_updated,
        edits_dropped
    );

    Ok(Stage2Result {
        swapped_source: swapped,
        edits: updated,
        source_changes,
        edits_updated,
        edits_dropped,
    })
}
