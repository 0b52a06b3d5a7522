use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combatant::{Combatant, StatBlock};
use crate::Messages;

/// Highest intensity a stacking status can build up to.
pub const MAX_STACKS: u32 = 5;

const CHILL_EVASION_PENALTY: i32 = 15;
const DAZE_ACCURACY_PENALTY: i32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Loses `potency` HP each round.
    Burned,
    /// Evasion penalty while active.
    Chilled,
    /// Loses `potency × stacks` HP each round. The only stacking status.
    Poisoned,
    /// Accuracy penalty while active.
    Dazed,
    /// Heals `potency` HP each round.
    Regenerating,
}

impl StatusKind {
    pub fn default_rounds(self) -> u32 {
        match self {
            StatusKind::Burned => 3,
            StatusKind::Chilled => 2,
            StatusKind::Poisoned => 4,
            StatusKind::Dazed => 2,
            StatusKind::Regenerating => 3,
        }
    }

    /// Re-applying a stacking status raises its intensity instead of only
    /// refreshing the duration.
    pub fn stacks(self) -> bool {
        matches!(self, StatusKind::Poisoned)
    }

    pub fn adjective(self) -> &'static str {
        match self {
            StatusKind::Burned => "burning",
            StatusKind::Chilled => "chilled",
            StatusKind::Poisoned => "poisoned",
            StatusKind::Dazed => "dazed",
            StatusKind::Regenerating => "regenerating",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusDuration {
    Rounds(u32),
    Indefinite,
}

/// How a status is being applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusParams {
    pub source: String,
    pub duration: StatusDuration,
    pub potency: i32,
}

impl StatusParams {
    /// The kind's default duration, from `source`, with the given potency.
    pub fn new(kind: StatusKind, source: impl Into<String>, potency: i32) -> Self {
        Self {
            source: source.into(),
            duration: StatusDuration::Rounds(kind.default_rounds()),
            potency: potency.max(0),
        }
    }

    pub fn rounds(mut self, rounds: u32) -> Self {
        self.duration = StatusDuration::Rounds(rounds);
        self
    }

    pub fn indefinite(mut self) -> Self {
        self.duration = StatusDuration::Indefinite;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub source: String,
    pub remaining: StatusDuration,
    pub potency: i32,
    pub stacks: u32,
}

/// Active statuses on one combatant, in the order they were first applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusList {
    effects: Vec<StatusEffect>,
}

impl StatusList {
    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Fold every active status's stat penalty into `stats`.
    pub fn modify(&self, stats: &mut StatBlock) {
        for effect in &self.effects {
            match effect.kind {
                StatusKind::Chilled => stats.evasion -= CHILL_EVASION_PENALTY,
                StatusKind::Dazed => stats.accuracy -= DAZE_ACCURACY_PENALTY,
                StatusKind::Burned | StatusKind::Poisoned | StatusKind::Regenerating => {}
            }
        }
    }
}

/// Attach (or refresh/stack) a status on `target`.
pub fn apply_status(target: &mut Combatant, kind: StatusKind, params: StatusParams) -> Messages {
    let name = target.name.clone();
    let list = &mut target.statuses.effects;

    if let Some(existing) = list.iter_mut().find(|e| e.kind == kind) {
        existing.remaining = params.duration;
        existing.potency = existing.potency.max(params.potency);
        existing.source = params.source;
        if kind.stacks() && existing.stacks < MAX_STACKS {
            existing.stacks += 1;
            debug!(target = %name, ?kind, stacks = existing.stacks, "status stacked");
            return vec![format!(
                "{} is even more {} (x{}).",
                name,
                kind.adjective(),
                existing.stacks
            )];
        }
        debug!(target = %name, ?kind, "status refreshed");
        return vec![format!("{} is {} again.", name, kind.adjective())];
    }

    debug!(target = %name, ?kind, source = %params.source, "status applied");
    list.push(StatusEffect {
        kind,
        source: params.source,
        remaining: params.duration,
        potency: params.potency,
        stacks: 1,
    });
    vec![format!("{} is now {}!", name, kind.adjective())]
}

/// Run one round of every status on `target`, then age and expire them.
///
/// Stops early once `target` drops to 0 HP so the caller can end the fight
/// right away.
pub fn tick_statuses(target: &mut Combatant) -> Messages {
    let mut messages = Vec::new();
    let mut idx = 0;

    while idx < target.statuses.effects.len() {
        if target.is_defeated() {
            break;
        }
        let effect = target.statuses.effects[idx].clone();
        match effect.kind {
            StatusKind::Burned => {
                let lost = target.decrease_hp(effect.potency);
                messages.push(format!("{} burns for *{}* damage.", target.name, lost));
            }
            StatusKind::Poisoned => {
                let stacks = i32::try_from(effect.stacks).unwrap_or(i32::MAX);
                let lost = target.decrease_hp(effect.potency.saturating_mul(stacks));
                messages.push(format!(
                    "Poison courses through {} for *{}* damage.",
                    target.name, lost
                ));
            }
            StatusKind::Regenerating => {
                let healed = target.increase_hp(effect.potency);
                if healed > 0 {
                    messages.push(format!("{} regenerates *{}* HP.", target.name, healed));
                }
            }
            StatusKind::Chilled | StatusKind::Dazed => {}
        }

        let expired = match &mut target.statuses.effects[idx].remaining {
            StatusDuration::Rounds(n) => {
                *n = n.saturating_sub(1);
                *n == 0
            }
            StatusDuration::Indefinite => false,
        };
        if expired {
            target.statuses.effects.remove(idx);
            messages.push(format!(
                "{} is no longer {}.",
                target.name,
                effect.kind.adjective()
            ));
        } else {
            idx += 1;
        }
    }

    messages
}

/// Remove a status outright. Returns whether it was present.
pub fn clear_status(target: &mut Combatant, kind: StatusKind) -> bool {
    let before = target.statuses.effects.len();
    target.statuses.effects.retain(|e| e.kind != kind);
    before != target.statuses.effects.len()
}
