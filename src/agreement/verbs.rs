//! Verb morphology used for agreement: third-singular inflection, its
//! inverse, and lemma candidates for matching errorful verb forms.

/// Forms of `be`, including contractions, that agree with their subject
const COPULA_FORMS: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "'s", "’s", "'re", "’re", "'m", "’m", "s",
];

/// Irregular inflected form -> lemma
const IRREGULAR: &[(&str, &str)] = &[
    ("has", "have"),
    ("had", "have"),
    ("'ve", "have"),
    ("'s", "have"),
    ("’s", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("goes", "go"),
    ("went", "go"),
    ("gone", "go"),
    ("woke", "wake"),
    ("woken", "wake"),
    ("found", "find"),
    ("made", "make"),
    ("said", "say"),
    ("says", "say"),
    ("got", "get"),
    ("gotten", "get"),
    ("took", "take"),
    ("taken", "take"),
    ("came", "come"),
    ("saw", "see"),
    ("seen", "see"),
    ("knew", "know"),
    ("known", "know"),
    ("thought", "think"),
    ("told", "tell"),
    ("became", "become"),
    ("left", "leave"),
    ("felt", "feel"),
    ("brought", "bring"),
    ("began", "begin"),
    ("begun", "begin"),
    ("kept", "keep"),
    ("held", "hold"),
    ("wrote", "write"),
    ("written", "write"),
    ("stood", "stand"),
    ("heard", "hear"),
    ("meant", "mean"),
    ("met", "meet"),
    ("ran", "run"),
    ("paid", "pay"),
    ("sat", "sit"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("led", "lead"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("lost", "lose"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("sent", "send"),
    ("built", "build"),
    ("understood", "understand"),
    ("drew", "draw"),
    ("drawn", "draw"),
    ("broke", "break"),
    ("broken", "break"),
    ("spent", "spend"),
    ("rose", "rise"),
    ("risen", "rise"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("bought", "buy"),
    ("wore", "wear"),
    ("worn", "wear"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("ate", "eat"),
    ("eaten", "eat"),
    ("gave", "give"),
    ("given", "give"),
    ("forgot", "forget"),
    ("forgotten", "forget"),
    ("slept", "sleep"),
    ("taught", "teach"),
    ("caught", "catch"),
    ("fought", "fight"),
    ("sold", "sell"),
    ("won", "win"),
    ("swam", "swim"),
    ("sang", "sing"),
    ("sung", "sing"),
    ("flew", "fly"),
    ("flown", "fly"),
    ("threw", "throw"),
    ("thrown", "throw"),
    ("hid", "hide"),
    ("hidden", "hide"),
];

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Whether `form` is a form of `be`
pub fn is_copula_form(form: &str) -> bool {
    COPULA_FORMS.contains(&form.to_lowercase().as_str())
}

/// Third-person singular present of `lemma` (`find` -> `finds`)
pub fn third_person_singular(lemma: &str) -> String {
    let lemma = lemma.to_lowercase();
    match lemma.as_str() {
        "be" => return "is".to_string(),
        "have" => return "has".to_string(),
        "do" => return "does".to_string(),
        "go" => return "goes".to_string(),
        _ => {}
    }

    let chars: Vec<char> = lemma.chars().collect();
    let n = chars.len();
    if n >= 2 && chars[n - 1] == 'y' && !is_vowel(chars[n - 2]) {
        return format!("{}ies", &lemma[..lemma.len() - 1]);
    }
    if ["s", "x", "z", "ch", "sh", "o"].iter().any(|suffix| lemma.ends_with(suffix)) {
        return format!("{}es", lemma);
    }
    format!("{}s", lemma)
}

/// Bare form of a third-person singular present verb (`finds` -> `find`).
///
/// `None` when `form` does not look like one.
pub fn bare_from_third_singular(form: &str) -> Option<String> {
    let lower = form.to_lowercase();
    if let Some(&(_, lemma)) = IRREGULAR.iter().find(|(f, _)| *f == lower) {
        return (third_person_singular(lemma) == lower).then(|| lemma.to_string());
    }

    if !lower.chars().all(char::is_alphabetic) || lower.len() < 3 || !lower.ends_with('s') || lower.ends_with("ss") {
        return None;
    }

    if let Some(stem) = lower.strip_suffix("ies") {
        if lower.len() <= 4 {
            return Some(format!("{}ie", stem));
        }
        return Some(format!("{}y", stem));
    }
    for suffix in ["sses", "shes", "ches", "xes", "zzes", "oes"] {
        if lower.ends_with(suffix) {
            return Some(lower[..lower.len() - 2].to_string());
        }
    }
    Some(lower[..lower.len() - 1].to_string())
}

/// Plausible lemmas of an inflected verb form, the form itself included
pub fn lemma_candidates(form: &str) -> Vec<String> {
    let lower = form.to_lowercase();
    let mut candidates = vec![lower.clone()];
    let mut push = |candidate: String| {
        if !candidate.is_empty() && !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    };

    if is_copula_form(&lower) {
        push("be".to_string());
    }
    for &(f, lemma) in IRREGULAR {
        if f == lower {
            push(lemma.to_string());
        }
    }
    if let Some(bare) = bare_from_third_singular(&lower) {
        push(bare);
    }

    for suffix in ["ed", "ing"] {
        if let Some(stem) = lower.strip_suffix(suffix) {
            if stem.len() < 2 {
                continue;
            }
            push(stem.to_string());
            push(format!("{}e", stem));
            if let Some(y_stem) = stem.strip_suffix('i') {
                push(format!("{}y", y_stem));
            }
            let chars: Vec<char> = stem.chars().collect();
            let n = chars.len();
            if n >= 2 && chars[n - 1] == chars[n - 2] {
                push(chars[..n - 1].iter().collect());
            }
        }
    }
    candidates
}

/// Whether an errorful verb form and a corrected one are forms of the same
/// verb: both copulas, or sharing a lemma candidate
pub fn are_counterparts(source: &str, target: &str, target_lemma: &str) -> bool {
    if is_copula_form(source) && is_copula_form(target) {
        return true;
    }
    let source_candidates = lemma_candidates(source);
    if !target_lemma.is_empty() && source_candidates.contains(&target_lemma.to_lowercase()) {
        return true;
    }
    let target_candidates = lemma_candidates(target);
    source_candidates.iter().any(|c| target_candidates.contains(c))
}
