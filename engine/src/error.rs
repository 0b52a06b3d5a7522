use thiserror::Error;

/// Failures the combat core can report to its caller.
///
/// Dodges, misses and expiring effects are ordinary outcomes and never show up
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    /// The selector was handed no actions, or only zero-weight ones.
    #[error("no selectable action: table is empty or every weight is zero")]
    InvalidActionSelection,

    /// An action name has no module that can perform it.
    #[error("unknown action `{0}`")]
    UnknownActionName(String),

    /// HP/MP left its bounds and had to be clamped back.
    #[error("inconsistent state on {name}: {detail}")]
    InconsistentCombatantState { name: String, detail: String },

    /// The fight already reached victory, defeat or flight.
    #[error("the fight is already over")]
    FightOver,
}

/// A player command string that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised command `{0}` (expected attack, run or use:<item>)")]
pub struct ParseCommandError(pub String);
