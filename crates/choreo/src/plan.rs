//! Action plan types.
//!
//! These types represent the semantic content of a prompt after
//! interpretation: which canned actions to perform, in what order, with
//! which modifier parameters. No timing exists at this stage - durations
//! are resolved later by the scheduler.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The universal parameter key that scales an action's resolved duration.
/// Accepted by every action kind.
pub const DURATION_MULT: &str = "duration_mult";

/// Symbols accepted for the wave `speed` parameter.
pub const SPEED_SYMBOLS: &[&str] = &["slow", "normal", "fast"];

/// The closed set of canned animation actions.
///
/// Extending the vocabulary means adding a variant here, which forces the
/// duration and parameter-schema matches below to be updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Wave,
    Jump,
    Idle,
}

impl ActionKind {
    /// Duration in seconds when no explicit duration was requested.
    ///
    /// Idle is 2.0 by decision; see DESIGN.md.
    pub fn default_duration(&self) -> f64 {
        match self {
            ActionKind::Wave => 2.0,
            ActionKind::Jump => 1.5,
            ActionKind::Idle => 2.0,
        }
    }

    /// Parameter keys this kind accepts, beyond the universal
    /// [`DURATION_MULT`].
    pub fn allowed_params(&self) -> &'static [&'static str] {
        match self {
            ActionKind::Wave => &["speed", "intensity"],
            ActionKind::Jump => &["height"],
            ActionKind::Idle => &[],
        }
    }

    /// Whether `key` is a valid parameter for this kind.
    pub fn accepts_param(&self, key: &str) -> bool {
        key == DURATION_MULT || self.allowed_params().contains(&key)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Wave => "wave",
            ActionKind::Jump => "jump",
            ActionKind::Idle => "idle",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A modifier parameter value: numeric or symbolic.
///
/// Untagged so the wire format carries bare numbers and strings
/// (`"intensity": 0.5`, `"speed": "fast"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Symbol(String),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Symbol(_) => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            ParamValue::Number(_) => None,
            ParamValue::Symbol(s) => Some(s),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Symbol(s.to_string())
    }
}

/// Plan construction errors.
///
/// All validation happens here, at the boundary where requests are built.
/// The scheduler trusts constructed plans and never re-validates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("parameter `{key}` is not defined for {kind} actions")]
    UnknownParam { kind: ActionKind, key: String },

    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("explicit duration must be finite and positive, got {0}")]
    InvalidDuration(f64),
}

/// A single requested action with its modifier parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRequest {
    #[serde(rename = "type")]
    kind: ActionKind,
    #[serde(rename = "duration", skip_serializing_if = "Option::is_none")]
    explicit_duration: Option<f64>,
    params: BTreeMap<String, ParamValue>,
}

impl ActionRequest {
    /// A request with default duration and no parameters.
    pub fn new(kind: ActionKind) -> Self {
        ActionRequest {
            kind,
            explicit_duration: None,
            params: BTreeMap::new(),
        }
    }

    /// A request with an explicit duration override in seconds.
    ///
    /// Rejects non-finite and non-positive values so they can never reach
    /// the scheduler and corrupt the timeline ordering.
    pub fn with_duration(kind: ActionKind, seconds: f64) -> Result<Self, PlanError> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(PlanError::InvalidDuration(seconds));
        }
        Ok(ActionRequest {
            kind,
            explicit_duration: Some(seconds),
            params: BTreeMap::new(),
        })
    }

    /// Set a modifier parameter, validating both the key against this
    /// kind's schema and the value against the key's domain.
    pub fn set_param(&mut self, key: &str, value: ParamValue) -> Result<(), PlanError> {
        if !self.kind.accepts_param(key) {
            return Err(PlanError::UnknownParam {
                kind: self.kind,
                key: key.to_string(),
            });
        }
        validate_param_value(key, &value)?;
        self.params.insert(key.to_string(), value);
        Ok(())
    }

    /// Builder-style [`set_param`](Self::set_param).
    pub fn with_param(mut self, key: &str, value: ParamValue) -> Result<Self, PlanError> {
        self.set_param(key, value)?;
        Ok(self)
    }

    /// Assemble a request from a bag the interpreter already filtered to
    /// this kind's schema. Keyword-table values are valid by construction.
    pub(crate) fn from_bag(kind: ActionKind, params: BTreeMap<String, ParamValue>) -> Self {
        ActionRequest {
            kind,
            explicit_duration: None,
            params,
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn explicit_duration(&self) -> Option<f64> {
        self.explicit_duration
    }

    pub fn params(&self) -> &BTreeMap<String, ParamValue> {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    /// The duration multiplier, defaulting to 1.0 when unset.
    pub fn duration_mult(&self) -> f64 {
        self.params
            .get(DURATION_MULT)
            .and_then(ParamValue::as_number)
            .unwrap_or(1.0)
    }
}

fn validate_param_value(key: &str, value: &ParamValue) -> Result<(), PlanError> {
    match key {
        DURATION_MULT | "intensity" | "height" => match value.as_number() {
            Some(n) if n.is_finite() && n > 0.0 => Ok(()),
            Some(n) => Err(PlanError::InvalidValue {
                key: key.to_string(),
                reason: format!("must be finite and positive, got {n}"),
            }),
            None => Err(PlanError::InvalidValue {
                key: key.to_string(),
                reason: "must be a number".to_string(),
            }),
        },
        "speed" => match value.as_symbol() {
            Some(s) if SPEED_SYMBOLS.contains(&s) => Ok(()),
            Some(s) => Err(PlanError::InvalidValue {
                key: key.to_string(),
                reason: format!("must be one of slow/normal/fast, got `{s}`"),
            }),
            None => Err(PlanError::InvalidValue {
                key: key.to_string(),
                reason: "must be a symbol".to_string(),
            }),
        },
        // set_param rejects unknown keys before we get here
        _ => Ok(()),
    }
}

/// An ordered plan of requested actions, produced fresh per prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Plan {
    pub actions: Vec<ActionRequest>,
}

impl Plan {
    pub fn new(actions: Vec<ActionRequest>) -> Self {
        Plan { actions }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
