//! Fixed keyword tables for action detection and modifier extraction.
//!
//! Both tables are literal ordered slices, walked front to back - never
//! maps. For modifiers, every entry whose pattern appears in the clause
//! applies, and a later entry overwrites an earlier one for the same key
//! (last match wins). For actions, the first matching entry wins. Walk
//! order is a behavioral contract.

use crate::plan::{ActionKind, ParamValue, DURATION_MULT};

/// One modifier rule: when `pattern` appears as a substring of a clause,
/// set `key` in the clause's parameter bag.
pub(crate) struct Modifier {
    pub pattern: &'static str,
    pub key: &'static str,
    pub value: ModifierValue,
}

/// Const-friendly parameter value for the table.
pub(crate) enum ModifierValue {
    Number(f64),
    Symbol(&'static str),
}

impl ModifierValue {
    pub fn to_param(&self) -> ParamValue {
        match self {
            ModifierValue::Number(n) => ParamValue::Number(*n),
            ModifierValue::Symbol(s) => ParamValue::Symbol((*s).to_string()),
        }
    }
}

const fn num(pattern: &'static str, key: &'static str, value: f64) -> Modifier {
    Modifier {
        pattern,
        key,
        value: ModifierValue::Number(value),
    }
}

const fn sym(pattern: &'static str, key: &'static str, value: &'static str) -> Modifier {
    Modifier {
        pattern,
        key,
        value: ModifierValue::Symbol(value),
    }
}

/// The modifier table.
///
/// Substring matching means `low` also fires inside "slowly" - a jump
/// described as "slowly" picks up `height = 1.5` along with the duration
/// multiplier. Accepted simplification; the vocabulary is small enough
/// that real prompts rarely collide.
pub(crate) const MODIFIERS: &[Modifier] = &[
    num("quick", DURATION_MULT, 0.6),
    num("quickly", DURATION_MULT, 0.6),
    num("slow", DURATION_MULT, 1.4),
    num("slowly", DURATION_MULT, 1.4),
    sym("fast", "speed", "fast"),
    num("gentle", "intensity", 0.5),
    num("energetic", "intensity", 1.5),
    num("small", "height", 1.5),
    num("low", "height", 1.5),
    num("normal", "height", 2.0),
    num("high", "height", 3.5),
    num("higher", "height", 3.5),
    num("big", "height", 3.5),
];

/// Action keywords in priority order: jump outranks wave, so a clause
/// containing both yields a single jump.
pub(crate) const ACTIONS: &[(&str, ActionKind)] =
    &[("jump", ActionKind::Jump), ("wave", ActionKind::Wave)];

/// First action keyword appearing in the clause, in table priority order.
pub(crate) fn detect_action(clause: &str) -> Option<ActionKind> {
    ACTIONS
        .iter()
        .find(|(pattern, _)| clause.contains(pattern))
        .map(|(_, kind)| *kind)
}
