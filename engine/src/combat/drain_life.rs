use crate::attack::{strike, AttackProperties, AttackTexts};
use crate::behavior::{ActionDescriptor, ActionName, ActionTable, Behavior, Turn};
use crate::combat::scale;
use crate::combatant::Combatant;
use crate::narrative::{amount_text, crit_text, Template};
use crate::Messages;

pub const DRAIN_LIFE: ActionName = "drain_life";

/// Drains a multiple of a normal hit from the target and heals a share of it.
#[derive(Debug, Clone)]
pub struct DrainLife {
    pub weight: u32,
    pub damage_multiplier: f64,
    pub heal_multiplier: f64,
    pub dodge_text: String,
    pub miss_text: String,
    /// Placeholders: `{actor}`, `{target}`, `{damage}`, `{healing}`, `{crit}`.
    pub attack_text: String,
}

impl DrainLife {
    pub fn new(weight: u32) -> Self {
        Self {
            weight,
            damage_multiplier: 1.5,
            heal_multiplier: 0.5,
            dodge_text: ":dash: {actor} reaches for your life force, but you dodge!".into(),
            miss_text: "{actor} reaches for your life force, but misses!".into(),
            attack_text: ":fog: {actor} pulls dark red tendrils out of {target}, \
                          dealing {damage} damage and gaining {healing} health.{crit}"
                .into(),
        }
    }
}

impl Behavior for DrainLife {
    fn module(&self) -> &'static str {
        "drain_life"
    }

    fn fight_actions(
        &self,
        _me: &Combatant,
        _opponent: &Combatant,
        mut actions: ActionTable,
    ) -> ActionTable {
        actions.insert(ActionDescriptor::new(
            DRAIN_LIFE,
            self.weight,
            AttackProperties::IS_ATTACK,
        ));
        actions
    }

    fn perform(&self, action: ActionName, turn: &mut Turn<'_>) -> Option<Messages> {
        if action != DRAIN_LIFE {
            return None;
        }
        let texts = AttackTexts {
            dodge: &self.dodge_text,
            miss: &self.miss_text,
        };
        Some(strike(turn, AttackProperties::IS_ATTACK, texts, |turn, hit| {
            let damage = scale(hit.damage, self.damage_multiplier);
            let healing = scale(damage, self.heal_multiplier);
            turn.target.take_damage(damage);
            turn.actor.restore_hp(healing);
            vec![Template::new(&self.attack_text)
                .var("actor", &turn.actor.name)
                .var("target", &turn.target.name)
                .var("damage", amount_text(damage))
                .var("healing", amount_text(healing))
                .var("crit", crit_text(hit.crit, damage))
                .render()]
        }))
    }
}
