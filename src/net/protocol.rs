use serde::{Deserialize, Serialize};

use crate::game::state::Snapshot;

/// One command for one tank for the next tick
///
/// On the wire every variant is the same flat record:
/// `{"function": "<tag>", "parameter": <f64>}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireAction", from = "WireAction")]
pub enum Action {
    /// Rotate to an absolute heading (radians)
    TurnTo(f64),
    /// Fire with the given power
    Shoot(f64),
    /// Throttle fraction; the simulator clamps to 1.0
    Forward(f64),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::TurnTo(_) => ActionKind::TurnTo,
            Action::Shoot(_) => ActionKind::Shoot,
            Action::Forward(_) => ActionKind::Forward,
        }
    }

    pub fn parameter(&self) -> f64 {
        match *self {
            Action::TurnTo(p) | Action::Shoot(p) | Action::Forward(p) => p,
        }
    }
}

/// Closed set of action tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    #[serde(rename = "turn-to")]
    TurnTo,
    #[serde(rename = "shoot")]
    Shoot,
    #[serde(rename = "forward")]
    Forward,
}

/// Flat wire shape shared by all actions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct WireAction {
    function: ActionKind,
    parameter: f64,
}

impl From<Action> for WireAction {
    fn from(action: Action) -> Self {
        Self {
            function: action.kind(),
            parameter: action.parameter(),
        }
    }
}

impl From<WireAction> for Action {
    fn from(wire: WireAction) -> Self {
        match wire.function {
            ActionKind::TurnTo => Action::TurnTo(wire.parameter),
            ActionKind::Shoot => Action::Shoot(wire.parameter),
            ActionKind::Forward => Action::Forward(wire.parameter),
        }
    }
}

/// Decode one input line into a snapshot
pub fn decode_snapshot(line: &str) -> Result<Snapshot, DecodeError> {
    serde_json::from_str(line).map_err(|e| DecodeError(e.to_string()))
}

/// Encode the per-friend actions as one output line (without newline).
/// Destroyed tanks are `null`.
pub fn encode_actions(actions: &[Option<Action>]) -> Result<String, EncodeError> {
    serde_json::to_string(actions).map_err(|e| EncodeError(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
#[error("Encode error: {0}")]
pub struct EncodeError(String);

#[derive(Debug, thiserror::Error)]
#[error("Decode error: {0}")]
pub struct DecodeError(String);
