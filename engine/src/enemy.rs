use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::behavior::{ActionName, Aftermath, Behavior, Composition, Turn};
use crate::combat::base::ATTACK;
use crate::combat::{
    BaseEnemy, Daze, DrainLife, DropsLoot, Element, Elemental, Furious, Heal, MazeMaster,
    Reputation,
};
use crate::combatant::{Combatant, Side, StatBlock};
use crate::error::CombatError;
use crate::fight::FightState;
use crate::progression::Progression;
use crate::selector::select_action;
use crate::Dice;
use crate::Messages;

/// Stats at level 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStats {
    pub max_hp: i32,
    pub attack: i32,
    pub defence: i32,
    pub accuracy: i32,
    pub evasion: i32,
    pub miss_chance: i32,
    pub crit_chance: i32,
    pub variance: i32,
}

/// Growth for every level past the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PerLevelStats {
    pub max_hp: i32,
    pub attack: i32,
    pub defence: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeveledStats {
    pub base: BaseStats,
    pub per_level: PerLevelStats,
}

impl LeveledStats {
    /// Max HP and stat block at an effective level (level plus any location
    /// bonus). Level 1 gets the base numbers only.
    pub fn at_level(&self, level: u32) -> (i32, StatBlock) {
        let steps = i32::try_from(level.saturating_sub(1)).unwrap_or(i32::MAX);
        let grow = |base: i32, per: i32| base.saturating_add(steps.saturating_mul(per));
        let b = &self.base;
        let stats = StatBlock {
            attack: grow(b.attack, self.per_level.attack),
            defence: grow(b.defence, self.per_level.defence),
            accuracy: b.accuracy,
            evasion: b.evasion,
            miss_chance: b.miss_chance,
            crit_chance: b.crit_chance,
            variance: b.variance,
        };
        (grow(b.max_hp, self.per_level.max_hp), stats)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rewards {
    pub experience: u32,
    pub gold: u32,
}

/// One capability layer as written in content files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "module", rename_all = "snake_case")]
pub enum ModuleSpec {
    DrainLife {
        weight: u32,
        #[serde(default)]
        damage_multiplier: Option<f64>,
        #[serde(default)]
        heal_multiplier: Option<f64>,
    },
    Furious {
        weight: u32,
    },
    Daze {
        weight: u32,
    },
    Heal {
        weight: u32,
        #[serde(default)]
        percent: Option<u32>,
    },
    Elemental {
        element: Element,
        weight: u32,
        #[serde(default)]
        multiplier: Option<f64>,
    },
    DropsLoot {
        item: String,
        chance: i32,
        #[serde(default = "one")]
        quantity: u32,
    },
    Reputation {
        region: String,
        amount: u32,
    },
    MazeMaster(MazeMasterSpec),
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeMasterSpec {
    pub base_max_hp: i32,
    pub per_level_max_hp: i32,
    pub reset_threshold: f64,
    pub reset_modifier: f64,
    pub location: String,
}

impl Default for MazeMasterSpec {
    fn default() -> Self {
        let defaults = MazeMaster::default();
        Self {
            base_max_hp: defaults.base_max_hp,
            per_level_max_hp: defaults.per_level_max_hp,
            reset_threshold: defaults.reset_threshold,
            reset_modifier: defaults.reset_modifier,
            location: defaults.location,
        }
    }
}

impl ModuleSpec {
    /// A module with stock parameters, by name.
    pub fn named(name: &str) -> Option<Self> {
        let spec = match name {
            "drain_life" => ModuleSpec::DrainLife {
                weight: 10,
                damage_multiplier: None,
                heal_multiplier: None,
            },
            "furious" => ModuleSpec::Furious { weight: 10 },
            "daze" => ModuleSpec::Daze { weight: 10 },
            "heal" => ModuleSpec::Heal {
                weight: 10,
                percent: None,
            },
            "burn_attack" | "chill_attack" | "poison_attack" => ModuleSpec::Elemental {
                element: match name {
                    "burn_attack" => Element::Fire,
                    "chill_attack" => Element::Frost,
                    _ => Element::Venom,
                },
                weight: 10,
                multiplier: None,
            },
            "maze_master" => ModuleSpec::MazeMaster(MazeMasterSpec::default()),
            _ => return None,
        };
        Some(spec)
    }

    pub fn build(&self) -> Box<dyn Behavior> {
        match self {
            ModuleSpec::DrainLife {
                weight,
                damage_multiplier,
                heal_multiplier,
            } => {
                let mut module = DrainLife::new(*weight);
                if let Some(m) = damage_multiplier {
                    module.damage_multiplier = *m;
                }
                if let Some(m) = heal_multiplier {
                    module.heal_multiplier = *m;
                }
                Box::new(module)
            }
            ModuleSpec::Furious { weight } => Box::new(Furious { weight: *weight }),
            ModuleSpec::Daze { weight } => Box::new(Daze { weight: *weight }),
            ModuleSpec::Heal { weight, percent } => {
                let mut module = Heal::new(*weight);
                if let Some(p) = percent {
                    module.percent = *p;
                }
                Box::new(module)
            }
            ModuleSpec::Elemental {
                element,
                weight,
                multiplier,
            } => {
                let mut module = Elemental::new(*element, *weight);
                if let Some(m) = multiplier {
                    module.multiplier = *m;
                }
                Box::new(module)
            }
            ModuleSpec::DropsLoot {
                item,
                chance,
                quantity,
            } => Box::new(DropsLoot {
                item: item.clone(),
                chance: *chance,
                quantity: *quantity,
            }),
            ModuleSpec::Reputation { region, amount } => Box::new(Reputation {
                region: region.clone(),
                amount: *amount,
            }),
            ModuleSpec::MazeMaster(spec) => Box::new(MazeMaster {
                base_max_hp: spec.base_max_hp,
                per_level_max_hp: spec.per_level_max_hp,
                reset_threshold: spec.reset_threshold,
                reset_modifier: spec.reset_modifier,
                location: spec.location.clone(),
            }),
        }
    }
}

fn default_attack_weight() -> u32 {
    100
}

/// Everything needed to build an enemy of one type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    #[serde(rename = "type")]
    pub type_id: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stats: LeveledStats,
    #[serde(default = "default_attack_weight")]
    pub attack_weight: u32,
    #[serde(default)]
    pub rewards: Rewards,
    /// Capability layers, applied in this order on top of the base enemy.
    #[serde(default)]
    pub modules: Vec<ModuleSpec>,
}

/// A combatant built fresh for one encounter.
#[derive(Debug)]
pub struct Enemy {
    pub type_id: String,
    pub display_name: String,
    pub description: String,
    pub combatant: Combatant,
    layers: Composition,
}

impl Enemy {
    /// Build an enemy at `level`, shifted by a location's `level_bonus`.
    pub fn from_template(template: &EnemyTemplate, level: u32, level_bonus: i32) -> Self {
        let effective =
            (i64::from(level) + i64::from(level_bonus)).clamp(1, i64::from(u32::MAX)) as u32;
        let (max_hp, stats) = template.stats.at_level(effective);
        let combatant = Combatant::new(
            template.display_name.clone(),
            Side::Enemy,
            effective,
            max_hp,
            stats,
        );

        let mut layers = Composition::new().with(BaseEnemy {
            kind: template.type_id.clone(),
            attack_weight: template.attack_weight,
            experience: template.rewards.experience,
            gold: template.rewards.gold,
        });
        for module in &template.modules {
            layers.push(module.build());
        }

        let mut enemy = Self {
            type_id: template.type_id.clone(),
            display_name: template.display_name.clone(),
            description: template.description.clone(),
            combatant,
            layers,
        };
        enemy.layers.level_set(&mut enemy.combatant);
        debug!(
            enemy = %enemy.type_id,
            level = effective,
            max_hp = enemy.combatant.max_hp(),
            modules = ?enemy.layers.modules(),
            "enemy built"
        );
        enemy
    }

    /// Assemble an enemy from hand-built parts.
    pub fn from_parts(
        type_id: impl Into<String>,
        combatant: Combatant,
        layers: Composition,
    ) -> Self {
        let display_name = combatant.name.clone();
        let mut enemy = Self {
            type_id: type_id.into(),
            display_name,
            description: String::new(),
            combatant,
            layers,
        };
        enemy.layers.level_set(&mut enemy.combatant);
        enemy
    }

    pub fn layers(&self) -> &Composition {
        &self.layers
    }

    pub fn validate(&self, opponent: &Combatant) -> Result<(), CombatError> {
        self.layers.validate(&self.combatant, opponent)
    }

    /// A forced follow-up if any module schedules one, otherwise a weighted
    /// draw. An empty table falls back to the basic attack.
    pub fn choose_action(
        &self,
        opponent: &Combatant,
        dice: &mut Dice,
    ) -> Result<ActionName, CombatError> {
        if let Some(action) = self.layers.forced_action(&self.combatant, opponent) {
            debug!(enemy = %self.type_id, action, "forced action");
            return Ok(action);
        }
        let table = self.layers.weighted_actions(&self.combatant, opponent);
        match select_action(dice, &table) {
            Err(CombatError::InvalidActionSelection)
                if self.layers.fight_actions(&self.combatant, opponent).contains(ATTACK) =>
            {
                warn!(enemy = %self.type_id, "no weighted actions, falling back to attack");
                Ok(ATTACK)
            }
            other => other,
        }
    }

    pub fn take_turn(
        &mut self,
        opponent: &mut Combatant,
        dice: &mut Dice,
    ) -> Result<Messages, CombatError> {
        let action = self.choose_action(opponent, dice)?;
        let mut turn = Turn {
            actor: &mut self.combatant,
            target: opponent,
            dice,
        };
        self.layers.execute(action, &mut turn)
    }

    pub fn post_round(&mut self, opponent: &Combatant) -> Messages {
        self.layers.post_round(&mut self.combatant, opponent)
    }

    /// Run the terminal hooks for `outcome`, seen from the character's side.
    pub fn conclude(
        &mut self,
        outcome: FightState,
        opponent: &mut Combatant,
        progression: &mut dyn Progression,
        dice: &mut Dice,
        messages: Messages,
    ) -> Messages {
        let mut ctx = Aftermath {
            me: &mut self.combatant,
            opponent,
            progression,
            dice,
        };
        match outcome {
            FightState::Victory => self.layers.fight_success(&mut ctx, messages),
            FightState::Defeat => self.layers.fight_failure(&mut ctx, messages),
            FightState::Fled => self.layers.fight_run(&mut ctx, messages),
            FightState::AwaitingAction | FightState::ActionResolving | FightState::PostRound => {
                messages
            }
        }
    }
}
