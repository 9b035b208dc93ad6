mod common;

use std::collections::HashSet;
use std::sync::Arc;

use singular_they::agreement::GENDERED_PRONOUNS;
use singular_they::models::split_tokens;
use singular_they::{
    augment_parsed, execute_stage1, select_chains, Augmentor, AugmentorConfig, EditList,
    EligibilityConfig, NoAugment,
};

use common::{annotator, augmentor, mary_checks_her_bag, mary_said, she_left};

#[test]
fn test_rewrite_is_idempotent() {
    let sentence = mary_checks_her_bag();
    let chains = select_chains(&sentence, &EligibilityConfig::default())
        .into_result()
        .unwrap();

    let once = execute_stage1(&sentence, &chains).unwrap();
    let twice = execute_stage1(&once.sentence, &chains).unwrap();

    assert!(once.has_substitutions());
    assert!(!twice.has_substitutions());
    assert_eq!(twice.sentence.text(), once.sentence.text());
}

#[test]
fn test_untouched_tokens_are_conserved() {
    let sentence = mary_checks_her_bag();
    let chains = select_chains(&sentence, &EligibilityConfig::default())
        .into_result()
        .unwrap();

    let result = execute_stage1(&sentence, &chains).unwrap();

    let touched: HashSet<usize> = result.changes.iter().map(|c| c.index).collect();
    assert_eq!(touched, HashSet::from([2, 5, 6, 7]));
    for (index, (before, after)) in sentence.tokens.iter().zip(&result.sentence.tokens).enumerate() {
        if !touched.contains(&index) {
            assert_eq!(before.text, after.text, "token {} changed", index);
        }
    }
}

#[test]
fn test_updated_edits_replay_to_augmented_target() {
    let source = "Mary find her key and she check her bag .";
    let target = "Mary found her keys and she checks her bag .";

    let result = augmentor().augment_pair(source, target, None).unwrap();

    let pair = result.augmented().unwrap();
    assert_eq!(pair.swapped_source, "Mary find their key and they check their bag .");
    assert_eq!(pair.augmented_target, "Mary found their keys and they check their bag .");
    // "check" is no longer an agreement error once the subject is "they"
    assert_eq!(pair.edits.len(), 2);

    let swapped = split_tokens(&pair.swapped_source);
    let edits = EditList::from_m2(swapped.len(), &pair.edits).unwrap();
    assert_eq!(edits.apply(&swapped), split_tokens(&pair.augmented_target));
}

#[test]
fn test_closed_inventory_never_gaps() {
    let cases = [
        ("he", "PRP", "nsubj", "they"),
        ("she", "PRP", "nsubj", "they"),
        ("him", "PRP", "dobj", "them"),
        ("her", "PRP", "dobj", "them"),
        ("her", "PRP$", "poss", "their"),
        ("his", "PRP$", "poss", "their"),
        ("his", "PRP$", "dobj", "theirs"),
        ("hers", "PRP", "dobj", "theirs"),
        ("himself", "PRP", "dobj", "themself"),
        ("herself", "PRP", "dobj", "themself"),
    ];
    let covered: HashSet<&str> = cases.iter().map(|(form, ..)| *form).collect();
    let inventory: HashSet<&str> = GENDERED_PRONOUNS.iter().copied().collect();
    assert_eq!(covered, inventory);

    for (form, tag, dep, expected) in cases {
        let sentence = mary_said(form, tag, dep);

        let result = augment_parsed(&sentence, &AugmentorConfig::default()).unwrap();

        assert!(
            !matches!(result.reason(), Some(NoAugment::RuleGap { .. })),
            "rule gap for {} ({}, {})",
            form,
            tag,
            dep
        );
        assert_eq!(
            result.augmented().unwrap().augmented,
            format!("Mary said {} .", expected),
            "{} ({}, {})",
            form,
            tag,
            dep
        );
    }
}

#[test]
fn test_unchecked_mode_rewrites_without_anchor() {
    let unchecked = AugmentorConfig {
        eligibility: EligibilityConfig {
            require_singular_anchor: false,
            ..Default::default()
        },
    };
    let checked = Augmentor::new(Arc::new(annotator(&[she_left()])), AugmentorConfig::default());
    let unchecked = Augmentor::new(Arc::new(annotator(&[she_left()])), unchecked);

    let result = unchecked.augment_sentence("She left .").unwrap();
    assert_eq!(result.augmented().unwrap().augmented, "They left .");

    let result = checked.augment_sentence("She left .").unwrap();
    assert_eq!(result.reason(), Some(&NoAugment::NoEligibleChain));
}
