use serde::Serialize;
use tracing::debug;

use crate::behavior::ActionName;
use crate::error::CombatError;
use crate::Dice;

/// One entry of a weighted action table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeightedAction {
    pub action: ActionName,
    pub weight: u32,
}

impl WeightedAction {
    pub const fn new(action: ActionName, weight: u32) -> Self {
        Self { action, weight }
    }
}

/// Weighted random choice over `table`, in declared order.
///
/// A draw `d` in `0..total` picks the first entry whose running weight sum
/// exceeds `d`.
pub fn select_action(dice: &mut Dice, table: &[WeightedAction]) -> Result<ActionName, CombatError> {
    let total = table
        .iter()
        .fold(0u32, |acc, entry| acc.saturating_add(entry.weight));
    if total == 0 {
        return Err(CombatError::InvalidActionSelection);
    }

    let draw = dice.below(total);
    let mut cumulative = 0u32;
    for entry in table {
        cumulative = cumulative.saturating_add(entry.weight);
        if draw < cumulative {
            debug!(action = entry.action, draw, total, "action selected");
            return Ok(entry.action);
        }
    }
    Err(CombatError::InvalidActionSelection)
}
