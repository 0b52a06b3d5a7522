use crate::behavior::Behavior;
use crate::combatant::Combatant;
use crate::Messages;

/// Trades MP for HP at the end of every round.
#[derive(Debug, Clone)]
pub struct HeartAmulet {
    pub hp: i32,
    pub mp_cost: i32,
}

impl Default for HeartAmulet {
    fn default() -> Self {
        Self { hp: 10, mp_cost: 4 }
    }
}

impl Behavior for HeartAmulet {
    fn module(&self) -> &'static str {
        "heart_amulet"
    }

    fn post_round(
        &self,
        me: &mut Combatant,
        _opponent: &Combatant,
        mut messages: Messages,
    ) -> Messages {
        if me.is_full_hp() || me.is_defeated() || me.mp() < self.mp_cost {
            return messages;
        }
        if me.spend_mp(self.mp_cost) {
            let healed = me.increase_hp(self.hp);
            messages.push(format!(
                ":heartpulse: Your Heart Amulet pulses, restoring *{}* HP for {} MP.",
                healed, self.mp_cost
            ));
        }
        messages
    }
}
