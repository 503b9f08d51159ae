//! Timeline scheduling from an action plan.
//!
//! Strict single-pass concatenation: each action starts where the previous
//! one ended. No backtracking, no overlap resolution - a character cannot
//! wave and jump at the same time in this model, and that is the entire
//! ordering policy.
//!
//! [`Timeline`] is also the wire payload handed to the rendering engine,
//! so its field names (`type`, `start_time`, `end_time`) are part of the
//! external contract.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::plan::{ActionKind, ParamValue, Plan};

/// One scheduled action occupying `[start_time, end_time)` on the time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimedAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// Resolved duration in seconds, after defaults and multipliers.
    pub duration: f64,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

/// The ordered, gap-free sequence of timed actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Timeline {
    pub timeline: Vec<TimedAction>,
    /// End time of the last action; 0 when the timeline is empty.
    pub total_duration: f64,
}

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    pub fn len(&self) -> usize {
        self.timeline.len()
    }
}

/// Lay the plan's actions out back to back on a time axis starting at 0.
///
/// Pure and total: the same plan always yields a structurally identical
/// timeline, and the empty plan yields an empty timeline. Durations were
/// validated at plan construction, so none of this can go negative.
pub fn schedule(plan: &Plan) -> Timeline {
    let mut clock = 0.0_f64;
    let mut timeline = Vec::with_capacity(plan.actions.len());

    for request in &plan.actions {
        let base = request
            .explicit_duration()
            .unwrap_or_else(|| request.kind().default_duration());
        let duration = base * request.duration_mult();

        timeline.push(TimedAction {
            kind: request.kind(),
            duration,
            start_time: clock,
            end_time: clock + duration,
            params: request.params().clone(),
        });

        clock += duration;
    }

    Timeline {
        timeline,
        total_duration: clock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{ActionRequest, DURATION_MULT};
    use pretty_assertions::assert_eq;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_plan_empty_timeline() {
        let timeline = schedule(&Plan::default());
        assert!(timeline.is_empty());
        assert_eq!(timeline.total_duration, 0.0);
    }

    #[test]
    fn test_defaults_resolve_per_kind() {
        let plan = Plan::new(vec![
            ActionRequest::new(ActionKind::Wave),
            ActionRequest::new(ActionKind::Jump),
            ActionRequest::new(ActionKind::Idle),
        ]);
        let timeline = schedule(&plan);
        assert_eq!(timeline.timeline[0].duration, 2.0);
        assert_eq!(timeline.timeline[1].duration, 1.5);
        assert_eq!(timeline.timeline[2].duration, 2.0);
        assert!(close(timeline.total_duration, 5.5));
    }

    #[test]
    fn test_explicit_duration_overrides_default() {
        let plan = Plan::new(vec![
            ActionRequest::with_duration(ActionKind::Wave, 0.5).unwrap()
        ]);
        let timeline = schedule(&plan);
        assert_eq!(timeline.timeline[0].duration, 0.5);
        assert_eq!(timeline.total_duration, 0.5);
    }

    #[test]
    fn test_duration_multiplier_law() {
        for (kind, mult) in [
            (ActionKind::Wave, 1.4),
            (ActionKind::Jump, 0.6),
            (ActionKind::Idle, 2.0),
        ] {
            let request = ActionRequest::new(kind)
                .with_param(DURATION_MULT, mult.into())
                .unwrap();
            let timeline = schedule(&Plan::new(vec![request]));
            assert!(
                close(
                    timeline.timeline[0].duration,
                    kind.default_duration() * mult
                ),
                "kind {kind} mult {mult}"
            );
        }
    }

    #[test]
    fn test_multiplier_composes_with_explicit_duration() {
        let request = ActionRequest::with_duration(ActionKind::Jump, 3.0)
            .unwrap()
            .with_param(DURATION_MULT, 0.5.into())
            .unwrap();
        let timeline = schedule(&Plan::new(vec![request]));
        assert!(close(timeline.timeline[0].duration, 1.5));
    }

    #[test]
    fn test_sequential_packing() {
        let plan = Plan::new(vec![
            ActionRequest::new(ActionKind::Jump),
            ActionRequest::new(ActionKind::Wave),
            ActionRequest::with_duration(ActionKind::Idle, 0.25).unwrap(),
            ActionRequest::new(ActionKind::Jump),
        ]);
        let timeline = schedule(&plan);

        assert_eq!(timeline.timeline[0].start_time, 0.0);
        for pair in timeline.timeline.windows(2) {
            assert_eq!(pair[1].start_time, pair[0].end_time);
        }
        for action in &timeline.timeline {
            assert!(close(action.end_time - action.start_time, action.duration));
        }
        assert_eq!(
            timeline.total_duration,
            timeline.timeline.last().unwrap().end_time
        );
    }

    #[test]
    fn test_schedule_is_deterministic() {
        let plan = Plan::new(vec![
            ActionRequest::new(ActionKind::Wave)
                .with_param(DURATION_MULT, 1.4.into())
                .unwrap(),
            ActionRequest::new(ActionKind::Jump),
        ]);
        assert_eq!(schedule(&plan), schedule(&plan));
    }

    #[test]
    fn test_params_carry_through_to_timed_actions() {
        let request = ActionRequest::new(ActionKind::Jump)
            .with_param("height", 3.5.into())
            .unwrap();
        let timeline = schedule(&Plan::new(vec![request]));
        assert_eq!(
            timeline.timeline[0].params.get("height"),
            Some(&ParamValue::Number(3.5))
        );
    }

    #[test]
    fn test_wire_format_field_names() {
        let plan = Plan::new(vec![
            ActionRequest::new(ActionKind::Wave)
                .with_param("speed", "fast".into())
                .unwrap()
        ]);
        let json = serde_json::to_value(schedule(&plan)).unwrap();

        let entry = &json["timeline"][0];
        assert_eq!(entry["type"], "wave");
        assert_eq!(entry["duration"], 2.0);
        assert_eq!(entry["start_time"], 0.0);
        assert_eq!(entry["end_time"], 2.0);
        assert_eq!(entry["params"]["speed"], "fast");
        assert_eq!(json["total_duration"], 2.0);
    }
}
