use crate::attack::{strike, AttackProperties, AttackTexts};
use crate::behavior::{ActionDescriptor, ActionName, ActionTable, Behavior, Turn};
use crate::combat::scale;
use crate::combatant::Combatant;
use crate::narrative::{amount_text, crit_text};
use crate::status::{apply_status, StatusKind, StatusParams};
use crate::Messages;

pub const DAZE: ActionName = "daze";

const DAZE_MULTIPLIER: f64 = 0.5;

/// A glancing blow that leaves the target dazed.
#[derive(Debug, Clone)]
pub struct Daze {
    pub weight: u32,
}

impl Behavior for Daze {
    fn module(&self) -> &'static str {
        "daze"
    }

    fn fight_actions(
        &self,
        _me: &Combatant,
        _opponent: &Combatant,
        mut actions: ActionTable,
    ) -> ActionTable {
        actions.insert(ActionDescriptor::new(DAZE, self.weight, AttackProperties::IS_ATTACK));
        actions
    }

    fn perform(&self, action: ActionName, turn: &mut Turn<'_>) -> Option<Messages> {
        if action != DAZE {
            return None;
        }
        let texts = AttackTexts {
            dodge: ":dash: {actor} swings at {target}'s head, but {target} ducks!",
            miss: "{actor} swings at {target}'s head, but misses!",
        };
        Some(strike(turn, AttackProperties::IS_ATTACK, texts, |turn, hit| {
            let dealt = turn.target.take_damage(scale(hit.damage, DAZE_MULTIPLIER));
            let mut messages = vec![format!(
                ":dizzy_face: {} clips {} across the head, dealing {} damage.{}",
                turn.actor.name,
                turn.target.name,
                amount_text(dealt),
                crit_text(hit.crit, dealt)
            )];
            let params = StatusParams::new(StatusKind::Dazed, turn.actor.name.clone(), 0);
            messages.extend(apply_status(turn.target, StatusKind::Dazed, params));
            messages
        }))
    }
}
