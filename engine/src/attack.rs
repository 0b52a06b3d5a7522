use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::behavior::Turn;
use crate::combatant::{Attacker, Defender};
use crate::narrative::Template;
use crate::status::{apply_status, StatusKind, StatusParams};
use crate::Dice;
use crate::Messages;

/// Damage multiplier on a critical hit.
pub const CRIT_MULTIPLIER: f64 = 1.5;
/// Dodge chance never exceeds this, however large the evasion gap.
pub const MAX_DODGE_CHANCE: i32 = 75;

bitflags! {
    /// Tags describing what an action does when it lands.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct AttackProperties: u8 {
        const IS_ATTACK = 1;
        const BURN_ATTACK = 1 << 1;
        const CHILL_ATTACK = 1 << 2;
        const POISON_ATTACK = 1 << 3;
        /// Skips the dodge roll.
        const UNDODGEABLE = 1 << 4;
        /// Ignores the defender's defence.
        const PIERCING = 1 << 5;
    }
}

/// A landed attack. Actions may scale `damage` before applying it.
#[derive(Debug, PartialEq, Eq)]
pub struct Hit {
    pub damage: u32,
    pub crit: bool,
}

/// Result of one attack attempt.
///
/// Deliberately not `Clone`: the dodge and crit draws behind it are spent, and
/// the outcome is handed to exactly one action.
#[derive(Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    Dodged,
    Missed,
    Hit(Hit),
}

/// Roll dodge, miss, damage and crit for one swing. Never touches HP.
pub fn resolve_attack(
    dice: &mut Dice,
    attacker: &impl Attacker,
    defender: &impl Defender,
    properties: AttackProperties,
) -> AttackOutcome {
    let atk = attacker.attack_profile();
    let def = defender.defense_profile();

    if !properties.contains(AttackProperties::UNDODGEABLE) {
        let dodge = (def.evasion - atk.accuracy).clamp(0, MAX_DODGE_CHANCE);
        if dice.chance(dodge) {
            debug!(dodge, "attack dodged");
            return AttackOutcome::Dodged;
        }
    }

    let miss = atk.miss_chance.clamp(0, 100);
    if dice.chance(miss) {
        debug!(miss, "attack missed");
        return AttackOutcome::Missed;
    }

    let defence = if properties.contains(AttackProperties::PIERCING) {
        0
    } else {
        def.defence.max(0)
    };
    let mut base = f64::from(atk.attack) * 100.0 / (100.0 + f64::from(defence));

    let variance = atk.variance.clamp(0, 100);
    if variance > 0 {
        let span = (variance * 2 + 1) as u32;
        let offset = dice.below(span) as i32 - variance;
        base = base * f64::from(100 + offset) / 100.0;
    }

    let crit = dice.chance(atk.crit_chance);
    if crit {
        base *= CRIT_MULTIPLIER;
    }

    let damage = if base <= 0.0 { 0 } else { base.ceil() as u32 };
    debug!(damage, crit, "attack hit");
    AttackOutcome::Hit(Hit { damage, crit })
}

/// Narrative for the two ways an attack can fail. `{actor}` and `{target}`
/// are filled in.
#[derive(Debug, Clone, Copy)]
pub struct AttackTexts<'a> {
    pub dodge: &'a str,
    pub miss: &'a str,
}

impl AttackTexts<'static> {
    pub const PLAIN: AttackTexts<'static> = AttackTexts {
        dodge: ":dash: {target} dodges {actor}'s attack!",
        miss: "{actor} attacks {target}, but misses!",
    };
}

/// Shared attack helper: resolve one swing for `turn.actor` against
/// `turn.target`, narrate a dodge or miss, or hand the hit to `on_hit`.
pub fn strike(
    turn: &mut Turn<'_>,
    properties: AttackProperties,
    texts: AttackTexts<'_>,
    on_hit: impl FnOnce(&mut Turn<'_>, Hit) -> Messages,
) -> Messages {
    let outcome = resolve_attack(turn.dice, &*turn.actor, &*turn.target, properties);
    match outcome {
        AttackOutcome::Dodged => vec![narrate(texts.dodge, turn)],
        AttackOutcome::Missed => vec![narrate(texts.miss, turn)],
        AttackOutcome::Hit(hit) => on_hit(turn, hit),
    }
}

fn narrate(text: &str, turn: &Turn<'_>) -> String {
    Template::new(text)
        .var("actor", &turn.actor.name)
        .var("target", &turn.target.name)
        .render()
}

/// Apply the statuses implied by elemental tags after a landed hit.
///
/// Potency is a quarter of the hit's damage, at least 1.
pub fn apply_elemental_statuses(
    turn: &mut Turn<'_>,
    properties: AttackProperties,
    damage: u32,
) -> Messages {
    let potency = i32::try_from(damage.div_ceil(4)).unwrap_or(i32::MAX).max(1);
    let source = turn.actor.name.clone();
    let mut messages = Vec::new();
    for (flag, kind) in [
        (AttackProperties::BURN_ATTACK, StatusKind::Burned),
        (AttackProperties::CHILL_ATTACK, StatusKind::Chilled),
        (AttackProperties::POISON_ATTACK, StatusKind::Poisoned),
    ] {
        if properties.contains(flag) {
            messages.extend(apply_status(
                turn.target,
                kind,
                StatusParams::new(kind, source.clone(), potency),
            ));
        }
    }
    messages
}
