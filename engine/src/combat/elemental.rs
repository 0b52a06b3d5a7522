use serde::{Deserialize, Serialize};

use crate::attack::{apply_elemental_statuses, strike, AttackProperties, AttackTexts};
use crate::behavior::{ActionDescriptor, ActionName, ActionTable, Behavior, Turn};
use crate::combat::scale;
use crate::combatant::Combatant;
use crate::narrative::{amount_text, crit_text, Template};
use crate::Messages;

pub const BURN_ATTACK: ActionName = "burn_attack";
pub const CHILL_ATTACK: ActionName = "chill_attack";
pub const POISON_ATTACK: ActionName = "poison_attack";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Frost,
    Venom,
}

impl Element {
    pub fn action(self) -> ActionName {
        match self {
            Element::Fire => BURN_ATTACK,
            Element::Frost => CHILL_ATTACK,
            Element::Venom => POISON_ATTACK,
        }
    }

    pub fn properties(self) -> AttackProperties {
        let tag = match self {
            Element::Fire => AttackProperties::BURN_ATTACK,
            Element::Frost => AttackProperties::CHILL_ATTACK,
            Element::Venom => AttackProperties::POISON_ATTACK,
        };
        AttackProperties::IS_ATTACK | tag
    }

    fn verb(self) -> &'static str {
        match self {
            Element::Fire => ":fire: {actor} scorches {target}",
            Element::Frost => ":snowflake: {actor} blasts {target} with frost",
            Element::Venom => ":green_heart: {actor} bites {target} with venomous fangs",
        }
    }
}

/// An attack that carries an element and leaves the matching status behind.
#[derive(Debug, Clone)]
pub struct Elemental {
    pub element: Element,
    pub weight: u32,
    pub multiplier: f64,
}

impl Elemental {
    pub fn new(element: Element, weight: u32) -> Self {
        Self {
            element,
            weight,
            multiplier: 1.0,
        }
    }
}

impl Behavior for Elemental {
    fn module(&self) -> &'static str {
        "elemental"
    }

    fn fight_actions(
        &self,
        _me: &Combatant,
        _opponent: &Combatant,
        mut actions: ActionTable,
    ) -> ActionTable {
        actions.insert(ActionDescriptor::new(
            self.element.action(),
            self.weight,
            self.element.properties(),
        ));
        actions
    }

    fn perform(&self, action: ActionName, turn: &mut Turn<'_>) -> Option<Messages> {
        if action != self.element.action() {
            return None;
        }
        let props = self.element.properties();
        let texts = AttackTexts {
            dodge: ":dash: {target} dodges {actor}'s elemental attack!",
            miss: "{actor} lashes out at {target}, but misses!",
        };
        Some(strike(turn, props, texts, |turn, hit| {
            let dealt = turn.target.take_damage(scale(hit.damage, self.multiplier));
            let opener = Template::new(self.element.verb())
                .var("actor", &turn.actor.name)
                .var("target", &turn.target.name)
                .render();
            let mut messages = vec![format!(
                "{}, dealing {} damage.{}",
                opener,
                amount_text(dealt),
                crit_text(hit.crit, dealt)
            )];
            messages.extend(apply_elemental_statuses(turn, props, dealt));
            messages
        }))
    }
}
