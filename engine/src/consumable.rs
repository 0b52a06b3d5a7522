//! Items a character can use mid-fight instead of attacking.

use std::fmt;

use crate::combatant::Combatant;
use crate::progression::{Progression, StatKind};
use crate::status::{clear_status, StatusKind};
use crate::Messages;

pub trait Consumable: Send + Sync + fmt::Debug {
    /// Inventory key.
    fn id(&self) -> &'static str;

    fn display_name(&self) -> &'static str;

    /// Whether using it now would do anything.
    fn can_be_used(&self, character: &Combatant) -> bool;

    /// Scales the item's effect. Progression bonuses hook in here.
    fn effect_multiplier(&self, _character: &Combatant) -> f64 {
        1.0
    }

    /// The item's effect alone, without touching inventory.
    fn apply(&self, character: &mut Combatant) -> Messages;

    /// Take one out of the inventory, count it, then apply it.
    fn consume(&self, character: &mut Combatant, progression: &mut dyn Progression) -> Messages {
        progression.remove_item(self.id());
        progression.increase_stat(StatKind::ItemsConsumed, 1, Some(self.id()));
        self.apply(character)
    }
}

fn scaled(amount: i32, multiplier: f64) -> i32 {
    (f64::from(amount) * multiplier).ceil() as i32
}

#[derive(Debug, Clone)]
pub struct HealthPotion {
    pub hp: i32,
}

impl Default for HealthPotion {
    fn default() -> Self {
        Self { hp: 50 }
    }
}

impl Consumable for HealthPotion {
    fn id(&self) -> &'static str {
        "health_potion"
    }

    fn display_name(&self) -> &'static str {
        "Health Potion"
    }

    fn can_be_used(&self, character: &Combatant) -> bool {
        !character.is_full_hp()
    }

    fn apply(&self, character: &mut Combatant) -> Messages {
        let healed = character.increase_hp(scaled(self.hp, self.effect_multiplier(character)));
        vec![format!(
            ":wine_glass: You drink a {} and recover *{}* HP.",
            self.display_name(),
            healed
        )]
    }
}

#[derive(Debug, Clone)]
pub struct ManaPotion {
    pub mp: i32,
}

impl Default for ManaPotion {
    fn default() -> Self {
        Self { mp: 20 }
    }
}

impl Consumable for ManaPotion {
    fn id(&self) -> &'static str {
        "mana_potion"
    }

    fn display_name(&self) -> &'static str {
        "Mana Potion"
    }

    fn can_be_used(&self, character: &Combatant) -> bool {
        character.has_mana() && character.mp() < character.max_mp()
    }

    fn apply(&self, character: &mut Combatant) -> Messages {
        let restored = character.restore_mp(scaled(self.mp, self.effect_multiplier(character)));
        vec![format!(
            ":tropical_drink: You drink a {} and recover *{}* MP.",
            self.display_name(),
            restored
        )]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Antidote;

impl Consumable for Antidote {
    fn id(&self) -> &'static str {
        "antidote"
    }

    fn display_name(&self) -> &'static str {
        "Antidote"
    }

    fn can_be_used(&self, character: &Combatant) -> bool {
        character.statuses.has(StatusKind::Poisoned)
    }

    fn apply(&self, character: &mut Combatant) -> Messages {
        clear_status(character, StatusKind::Poisoned);
        vec![":herb: You drink an Antidote. The poison fades.".to_string()]
    }
}

/// Look up a built-in consumable by inventory key.
pub fn consumable_by_id(id: &str) -> Option<Box<dyn Consumable>> {
    match id {
        "health_potion" => Some(Box::new(HealthPotion::default())),
        "mana_potion" => Some(Box::new(ManaPotion::default())),
        "antidote" => Some(Box::new(Antidote)),
        _ => None,
    }
}
