//! Rule-based prompt interpreter.
//!
//! Substring keyword matching over a small closed vocabulary, on purpose:
//! the domain has three actions and a dozen modifiers, and predictability
//! beats generality here. The interpreter is total - any text input yields
//! a plan, with an idle fallback when nothing is recognized.

mod clause;
mod keywords;

use std::collections::BTreeMap;

use crate::feedback::{Feedback, ParseResult};
use crate::plan::{ActionKind, ActionRequest, ParamValue, Plan};

/// Interpret a free-text prompt into an ordered action plan.
///
/// Clause order determines plan order. Feedback (never fatal) records
/// modifiers that were dropped because the detected action's schema does
/// not define them, and the idle fallback when it fires.
pub fn interpret(prompt: &str) -> ParseResult<Plan> {
    let normalized = prompt.to_ascii_lowercase();
    let clauses = clause::split_clauses(&normalized);

    let mut actions = Vec::new();
    let mut feedback = Vec::new();

    for clause in &clauses {
        let bag = collect_modifiers(&clause.text);

        let Some(kind) = keywords::detect_action(&clause.text) else {
            continue;
        };

        // Keep the bag consistent with the kind's parameter schema; the
        // universal duration_mult always passes.
        let mut params = BTreeMap::new();
        for (key, value) in bag {
            if kind.accepts_param(&key) {
                params.insert(key, value);
            } else {
                feedback.push(Feedback::warning(
                    format!("ignoring `{key}` modifier on a {kind} action"),
                    clause.index,
                ));
            }
        }

        actions.push(ActionRequest::from_bag(kind, params));
    }

    if actions.is_empty() {
        feedback.push(Feedback::info(
            "no action keyword recognized; falling back to idle",
            0,
        ));
        actions.push(ActionRequest::new(ActionKind::Idle));
    }

    ParseResult::new(Plan::new(actions), feedback)
}

/// Walk the modifier table in order; last match wins per key.
fn collect_modifiers(clause: &str) -> BTreeMap<String, ParamValue> {
    let mut bag = BTreeMap::new();
    for modifier in keywords::MODIFIERS {
        if clause.contains(modifier.pattern) {
            bag.insert(modifier.key.to_string(), modifier.value.to_param());
        }
    }
    bag
}
