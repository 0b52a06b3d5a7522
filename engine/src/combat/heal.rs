use crate::attack::AttackProperties;
use crate::behavior::{ActionDescriptor, ActionName, ActionTable, Behavior, Turn};
use crate::combatant::Combatant;
use crate::narrative::amount_text;
use crate::Messages;

pub const HEAL: ActionName = "heal";

/// Restores a share of max HP. Never picked at random while already at full HP.
#[derive(Debug, Clone)]
pub struct Heal {
    pub weight: u32,
    pub percent: u32,
}

impl Heal {
    pub fn new(weight: u32) -> Self {
        Self { weight, percent: 20 }
    }
}

impl Behavior for Heal {
    fn module(&self) -> &'static str {
        "heal"
    }

    fn fight_actions(
        &self,
        me: &Combatant,
        _opponent: &Combatant,
        mut actions: ActionTable,
    ) -> ActionTable {
        let weight = if me.is_full_hp() { 0 } else { self.weight };
        actions.insert(ActionDescriptor::new(HEAL, weight, AttackProperties::empty()));
        actions
    }

    fn perform(&self, action: ActionName, turn: &mut Turn<'_>) -> Option<Messages> {
        if action != HEAL {
            return None;
        }
        let amount = (i64::from(turn.actor.max_hp()) * i64::from(self.percent) + 99) / 100;
        let healed = turn.actor.increase_hp(amount.clamp(0, i64::from(i32::MAX)) as i32);
        Some(vec![format!(
            ":sparkling_heart: {} heals {} HP.",
            turn.actor.name,
            amount_text(healed as u32)
        )])
    }
}
