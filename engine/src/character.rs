use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::behavior::{ActionName, Behavior, Composition, Turn};
use crate::combat::{BaseCharacter, HeartAmulet};
use crate::combatant::{Combatant, Side, StatBlock};
use crate::consumable::consumable_by_id;
use crate::error::{CombatError, ParseCommandError};
use crate::progression::Progression;
use crate::Dice;
use crate::Messages;

/// What the player chose to do this round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerCommand {
    Attack,
    Run,
    /// Use an inventory item by key.
    Use(String),
}

impl fmt::Display for PlayerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerCommand::Attack => f.write_str("attack"),
            PlayerCommand::Run => f.write_str("run"),
            PlayerCommand::Use(item) => write!(f, "use:{}", item),
        }
    }
}

impl FromStr for PlayerCommand {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "attack" | "a" => Ok(PlayerCommand::Attack),
            "run" | "r" => Ok(PlayerCommand::Run),
            lower => match lower.strip_prefix("use:") {
                Some(item) if !item.is_empty() => Ok(PlayerCommand::Use(item.to_string())),
                _ => Err(ParseCommandError(trimmed.to_string())),
            },
        }
    }
}

/// Equipment that hooks into the fight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gear", rename_all = "snake_case")]
pub enum GearSpec {
    HeartAmulet {
        #[serde(default = "default_amulet_hp")]
        hp: i32,
        #[serde(default = "default_amulet_cost")]
        mp_cost: i32,
    },
}

fn default_amulet_hp() -> i32 {
    HeartAmulet::default().hp
}

fn default_amulet_cost() -> i32 {
    HeartAmulet::default().mp_cost
}

impl GearSpec {
    pub fn build(&self) -> Box<dyn Behavior> {
        match self {
            GearSpec::HeartAmulet { hp, mp_cost } => Box::new(HeartAmulet {
                hp: *hp,
                mp_cost: *mp_cost,
            }),
        }
    }
}

/// Serializable description of a player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSpec {
    pub name: String,
    pub level: u32,
    pub max_hp: i32,
    pub max_mp: Option<i32>,
    pub stats: StatBlock,
    pub gear: Vec<GearSpec>,
}

impl Default for CharacterSpec {
    fn default() -> Self {
        Self {
            name: "You".to_string(),
            level: 1,
            max_hp: 100,
            max_mp: None,
            stats: StatBlock {
                attack: 20,
                defence: 10,
                accuracy: 10,
                evasion: 5,
                miss_chance: 5,
                crit_chance: 10,
                variance: 10,
            },
            gear: Vec::new(),
        }
    }
}

impl CharacterSpec {
    pub fn build(&self) -> Character {
        let mut combatant = Combatant::new(
            self.name.clone(),
            Side::Character,
            self.level,
            self.max_hp,
            self.stats,
        );
        if let Some(mp) = self.max_mp {
            combatant = combatant.with_mana(mp);
        }
        let mut character = Character::new(combatant);
        for gear in &self.gear {
            character.equip(gear.build());
        }
        character
    }
}

/// A player character: its combatant plus the gear layered on top of the
/// base character behavior. Outlives any single fight.
#[derive(Debug)]
pub struct Character {
    pub combatant: Combatant,
    gear: Composition,
}

impl Character {
    pub fn new(combatant: Combatant) -> Self {
        Self {
            combatant,
            gear: Composition::new().with(BaseCharacter),
        }
    }

    pub fn equip(&mut self, layer: Box<dyn Behavior>) {
        self.gear.push(layer);
    }

    pub fn layers(&self) -> &Composition {
        &self.gear
    }

    pub fn act(
        &mut self,
        action: ActionName,
        target: &mut Combatant,
        dice: &mut Dice,
    ) -> Result<Messages, CombatError> {
        let mut turn = Turn {
            actor: &mut self.combatant,
            target,
            dice,
        };
        self.gear.execute(action, &mut turn)
    }

    /// Use an item if it is in the inventory and would do something.
    /// `None` means nothing happened and the round was not spent.
    pub fn use_item(&mut self, item: &str, progression: &mut dyn Progression) -> Option<Messages> {
        let consumable = consumable_by_id(item)?;
        if !progression.has_item(consumable.id()) || !consumable.can_be_used(&self.combatant) {
            return None;
        }
        Some(consumable.consume(&mut self.combatant, progression))
    }

    pub fn post_round(&mut self, opponent: &Combatant) -> Messages {
        self.gear.post_round(&mut self.combatant, opponent)
    }
}
