use crate::behavior::{Aftermath, Behavior};
use crate::progression::StatKind;
use crate::Messages;

/// Rolls for an item drop when the enemy is beaten.
#[derive(Debug, Clone)]
pub struct DropsLoot {
    pub item: String,
    /// Percent chance of the drop.
    pub chance: i32,
    pub quantity: u32,
}

impl Behavior for DropsLoot {
    fn module(&self) -> &'static str {
        "loot"
    }

    fn fight_success(&self, ctx: &mut Aftermath<'_>, mut messages: Messages) -> Messages {
        if self.quantity > 0 && ctx.dice.chance(self.chance) {
            ctx.progression.add_item(&self.item, self.quantity);
            messages.push(format!(
                ":moneybag: {} dropped {} x {}.",
                ctx.me.name, self.quantity, self.item
            ));
        }
        messages
    }
}

/// Grants reputation in a region when the enemy is beaten.
#[derive(Debug, Clone)]
pub struct Reputation {
    pub region: String,
    pub amount: u32,
}

impl Behavior for Reputation {
    fn module(&self) -> &'static str {
        "reputation"
    }

    fn fight_success(&self, ctx: &mut Aftermath<'_>, mut messages: Messages) -> Messages {
        ctx.progression
            .increase_stat(StatKind::Reputation, self.amount, Some(&self.region));
        messages.push(format!(
            "You gain {} reputation in {}.",
            self.amount, self.region
        ));
        messages
    }
}
