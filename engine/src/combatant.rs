use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CombatError;
use crate::flags::FlagStore;
use crate::status::StatusList;

/// Base numbers a combatant fights with. Chances are whole percents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub attack: i32,
    pub defence: i32,
    pub accuracy: i32,
    pub evasion: i32,
    pub miss_chance: i32,
    pub crit_chance: i32,
    /// Width of the damage band, in percent either side of the base.
    pub variance: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Character,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaPool {
    pub mp: i32,
    pub max_mp: i32,
}

/// Offensive numbers the resolver reads from whoever swings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackProfile {
    pub attack: i32,
    pub accuracy: i32,
    pub miss_chance: i32,
    pub crit_chance: i32,
    pub variance: i32,
}

/// Defensive numbers the resolver reads from whoever is swung at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefenseProfile {
    pub defence: i32,
    pub evasion: i32,
}

pub trait Attacker {
    fn attack_profile(&self) -> AttackProfile;
}

pub trait Defender {
    fn defense_profile(&self) -> DefenseProfile;
}

/// Anyone taking part in a fight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub side: Side,
    pub level: u32,
    hp: i32,
    max_hp: i32,
    mana: Option<ManaPool>,
    pub stats: StatBlock,
    pub statuses: StatusList,
    pub flags: FlagStore,
}

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        side: Side,
        level: u32,
        max_hp: i32,
        stats: StatBlock,
    ) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            name: name.into(),
            side,
            level: level.max(1),
            hp: max_hp,
            max_hp,
            mana: None,
            stats,
            statuses: StatusList::default(),
            flags: FlagStore::new(),
        }
    }

    pub fn with_mana(mut self, max_mp: i32) -> Self {
        let max_mp = max_mp.max(0);
        self.mana = Some(ManaPool { mp: max_mp, max_mp });
        self
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn mp(&self) -> i32 {
        self.mana.map(|m| m.mp).unwrap_or(0)
    }

    pub fn max_mp(&self) -> i32 {
        self.mana.map(|m| m.max_mp).unwrap_or(0)
    }

    pub fn has_mana(&self) -> bool {
        self.mana.is_some()
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    pub fn is_full_hp(&self) -> bool {
        self.hp >= self.max_hp
    }

    /// Lose up to `amount` HP; returns how much was actually lost.
    pub fn decrease_hp(&mut self, amount: i32) -> i32 {
        if amount < 0 {
            warn!(name = %self.name, amount, "negative damage ignored");
            return 0;
        }
        let before = self.hp;
        self.hp = (self.hp - amount).clamp(0, self.max_hp);
        before - self.hp
    }

    /// Regain up to `amount` HP; returns how much was actually healed.
    pub fn increase_hp(&mut self, amount: i32) -> i32 {
        if amount < 0 {
            warn!(name = %self.name, amount, "negative healing ignored");
            return 0;
        }
        let before = self.hp;
        self.hp = (self.hp + amount).clamp(0, self.max_hp);
        self.hp - before
    }

    /// `decrease_hp` for an unsigned damage amount, saturating at `i32::MAX`.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.decrease_hp(i32::try_from(damage).unwrap_or(i32::MAX)) as u32
    }

    /// `increase_hp` for an unsigned amount, saturating at `i32::MAX`.
    pub fn restore_hp(&mut self, amount: u32) -> u32 {
        self.increase_hp(i32::try_from(amount).unwrap_or(i32::MAX)) as u32
    }

    /// Set HP directly, clamped into `0..=max_hp`.
    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.clamp(0, self.max_hp);
    }

    /// Replace max HP and refill to it in one step.
    pub fn reset_max_hp(&mut self, max_hp: i32) {
        self.max_hp = max_hp.max(1);
        self.hp = self.max_hp;
    }

    /// Spend MP if there is enough; returns whether it was spent.
    pub fn spend_mp(&mut self, cost: i32) -> bool {
        match self.mana.as_mut() {
            Some(pool) if cost >= 0 && pool.mp >= cost => {
                pool.mp -= cost;
                true
            }
            _ => false,
        }
    }

    /// Regain up to `amount` MP; returns how much was restored.
    pub fn restore_mp(&mut self, amount: i32) -> i32 {
        match self.mana.as_mut() {
            Some(pool) if amount > 0 => {
                let before = pool.mp;
                pool.mp = (pool.mp + amount).min(pool.max_mp);
                pool.mp - before
            }
            _ => 0,
        }
    }

    /// Base stats with status modifiers folded in.
    pub fn effective_stats(&self) -> StatBlock {
        let mut stats = self.stats;
        self.statuses.modify(&mut stats);
        stats
    }

    /// Clamp HP/MP back into bounds, reporting what had to be repaired.
    pub fn enforce_invariants(&mut self) -> Option<CombatError> {
        let mut problems = Vec::new();
        if self.max_hp < 1 {
            problems.push(format!("max_hp {}", self.max_hp));
            self.max_hp = 1;
        }
        if self.hp < 0 || self.hp > self.max_hp {
            problems.push(format!("hp {} outside 0..={}", self.hp, self.max_hp));
            self.hp = self.hp.clamp(0, self.max_hp);
        }
        if let Some(pool) = self.mana.as_mut() {
            if pool.max_mp < 0 {
                problems.push(format!("max_mp {}", pool.max_mp));
                pool.max_mp = 0;
            }
            if pool.mp < 0 || pool.mp > pool.max_mp {
                problems.push(format!("mp {} outside 0..={}", pool.mp, pool.max_mp));
                pool.mp = pool.mp.clamp(0, pool.max_mp);
            }
        }
        if problems.is_empty() {
            return None;
        }
        let err = CombatError::InconsistentCombatantState {
            name: self.name.clone(),
            detail: problems.join(", "),
        };
        warn!(error = %err, "combatant state clamped");
        Some(err)
    }
}

impl Attacker for Combatant {
    fn attack_profile(&self) -> AttackProfile {
        let s = self.effective_stats();
        AttackProfile {
            attack: s.attack,
            accuracy: s.accuracy,
            miss_chance: s.miss_chance,
            crit_chance: s.crit_chance,
            variance: s.variance,
        }
    }
}

impl Defender for Combatant {
    fn defense_profile(&self) -> DefenseProfile {
        let s = self.effective_stats();
        DefenseProfile {
            defence: s.defence,
            evasion: s.evasion,
        }
    }
}
