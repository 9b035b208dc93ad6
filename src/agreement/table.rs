use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Tense;

/// Grammatical role a surface form is rewritten by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SubjectPronoun,
    ObjectPronoun,
    PossessiveDeterminer,
    PossessivePronoun,
    Reflexive,
    /// `is`
    Copula,
    /// `'s` standing for `is`
    CopulaContraction,
    /// `'s` standing for `has`
    HaveContraction,
    /// `was`
    PastCopula,
    /// Third-person singular present of an open-class verb
    PresentVerb,
    /// Past, modal and non-finite forms carry no agreement marking
    InvariantVerb,
}

impl Role {
    pub fn is_pronoun(self) -> bool {
        matches!(
            self,
            Role::SubjectPronoun
                | Role::ObjectPronoun
                | Role::PossessiveDeterminer
                | Role::PossessivePronoun
                | Role::Reflexive
        )
    }

    pub fn is_verb(self) -> bool {
        !self.is_pronoun()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::SubjectPronoun => "subject pronoun",
            Role::ObjectPronoun => "object pronoun",
            Role::PossessiveDeterminer => "possessive determiner",
            Role::PossessivePronoun => "possessive pronoun",
            Role::Reflexive => "reflexive",
            Role::Copula => "copula",
            Role::CopulaContraction => "copula contraction",
            Role::HaveContraction => "have contraction",
            Role::PastCopula => "past copula",
            Role::PresentVerb => "present-tense verb",
            Role::InvariantVerb => "invariant verb",
        };
        f.write_str(name)
    }
}

/// A closed-inventory substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgreementRule {
    pub role: Role,
    /// Gendered (or third-singular) form, lower case
    pub source: &'static str,
    /// Singular-they form, lower case
    pub target: &'static str,
    /// Tense the rule is restricted to
    pub tense: Option<Tense>,
}

const fn rule(role: Role, source: &'static str, target: &'static str) -> AgreementRule {
    AgreementRule {
        role,
        source,
        target,
        tense: None,
    }
}

const fn tensed(role: Role, source: &'static str, target: &'static str, tense: Tense) -> AgreementRule {
    AgreementRule {
        role,
        source,
        target,
        tense: Some(tense),
    }
}

/// Reflexives map to `themself`, keeping the singular reading.
/// No singular-they form appears on the source side, so rewriting is idempotent.
const RULES: &[AgreementRule] = &[
    rule(Role::SubjectPronoun, "he", "they"),
    rule(Role::SubjectPronoun, "she", "they"),
    rule(Role::ObjectPronoun, "him", "them"),
    rule(Role::ObjectPronoun, "her", "them"),
    rule(Role::PossessiveDeterminer, "his", "their"),
    rule(Role::PossessiveDeterminer, "her", "their"),
    rule(Role::PossessivePronoun, "his", "theirs"),
    rule(Role::PossessivePronoun, "hers", "theirs"),
    rule(Role::Reflexive, "himself", "themself"),
    rule(Role::Reflexive, "herself", "themself"),
    tensed(Role::Copula, "is", "are", Tense::Present),
    tensed(Role::CopulaContraction, "'s", "'re", Tense::Present),
    tensed(Role::CopulaContraction, "’s", "’re", Tense::Present),
    tensed(Role::HaveContraction, "'s", "'ve", Tense::Present),
    tensed(Role::HaveContraction, "’s", "’ve", Tense::Present),
    tensed(Role::PastCopula, "was", "were", Tense::Past),
];

/// The gendered pronoun inventory
pub const GENDERED_PRONOUNS: &[&str] = &["he", "she", "him", "her", "his", "hers", "himself", "herself"];

/// Process-wide, read-only mapping from gendered forms to singular-they forms
#[derive(Debug)]
pub struct AgreementTable {
    rules: &'static [AgreementRule],
}

pub static AGREEMENT_TABLE: AgreementTable = AgreementTable { rules: RULES };

impl AgreementTable {
    pub fn rules(&self) -> &[AgreementRule] {
        self.rules
    }

    /// Singular-they form for `form` in `role`, lower case.
    ///
    /// `None` when the table has no rule for the combination; an unknown
    /// tense matches any rule.
    pub fn lookup(&self, role: Role, form: &str, tense: Option<Tense>) -> Option<&'static str> {
        let lower = form.to_lowercase();
        self.rules
            .iter()
            .find(|r| {
                r.role == role
                    && r.source == lower
                    && (r.tense.is_none() || tense.is_none() || r.tense == tense)
            })
            .map(|r| r.target)
    }

    /// Gendered pronoun forms rewritten to `target`
    pub fn pronoun_counterparts(&self, target: &str) -> Vec<&'static str> {
        let lower = target.to_lowercase();
        let mut forms: Vec<&'static str> = self
            .rules
            .iter()
            .filter(|r| r.role.is_pronoun() && r.target == lower)
            .map(|r| r.source)
            .collect();
        forms.dedup();
        forms
    }

    /// Whether `form` is in the gendered pronoun inventory
    pub fn is_gendered_pronoun(&self, form: &str) -> bool {
        let lower = form.to_lowercase();
        GENDERED_PRONOUNS.contains(&lower.as_str())
    }

    /// Whether the table rewrites `form` in any role
    pub fn has_source_form(&self, form: &str) -> bool {
        let lower = form.to_lowercase();
        self.rules.iter().any(|r| r.source == lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_pronouns() {
        let table = &AGREEMENT_TABLE;
        assert_eq!(table.lookup(Role::SubjectPronoun, "She", None), Some("they"));
        assert_eq!(table.lookup(Role::ObjectPronoun, "him", None), Some("them"));
        assert_eq!(table.lookup(Role::PossessiveDeterminer, "her", None), Some("their"));
        assert_eq!(table.lookup(Role::PossessivePronoun, "hers", None), Some("theirs"));
        assert_eq!(table.lookup(Role::Reflexive, "HIMSELF", None), Some("themself"));
    }

    #[test]
    fn test_lookup_fails_closed() {
        let table = &AGREEMENT_TABLE;
        assert_eq!(table.lookup(Role::SubjectPronoun, "him", None), None);
        assert_eq!(table.lookup(Role::Copula, "is", Some(Tense::Past)), None);
        assert_eq!(table.lookup(Role::PastCopula, "was", Some(Tense::Past)), Some("were"));
        assert_eq!(table.lookup(Role::PresentVerb, "finds", Some(Tense::Present)), None);
    }

    #[test]
    fn test_no_singular_they_form_on_source_side() {
        let table = &AGREEMENT_TABLE;
        for rule in table.rules() {
            assert!(
                !table.has_source_form(rule.target),
                "{} is both a source and a target",
                rule.target
            );
        }
    }

    #[test]
    fn test_pronoun_counterparts() {
        let table = &AGREEMENT_TABLE;
        assert_eq!(table.pronoun_counterparts("They"), vec!["he", "she"]);
        assert_eq!(table.pronoun_counterparts("their"), vec!["his", "her"]);
        assert!(table.pronoun_counterparts("are").is_empty());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::PossessiveDeterminer.to_string(), "possessive determiner");
        assert!(Role::Reflexive.is_pronoun());
        assert!(Role::PastCopula.is_verb());
    }
}
