use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod attack;
pub mod behavior;
pub mod character;
pub mod combat;
pub mod combatant;
pub mod consumable;
pub mod content;
pub mod enemy;
pub mod error;
pub mod fight;
pub mod flags;
pub mod narrative;
pub mod progression;
pub mod selector;
pub mod status;

pub use api::{
    load_config, simulate_fight, simulate_fight_many, FightConfig, FightReport, FightSummary,
};
pub use attack::{resolve_attack, strike, AttackOutcome, AttackProperties, AttackTexts, Hit};
pub use behavior::{
    ActionDescriptor, ActionName, ActionTable, Aftermath, Behavior, Composition, Turn,
    WeightedTable,
};
pub use character::{Character, CharacterSpec, GearSpec, PlayerCommand};
pub use combatant::{Combatant, Side, StatBlock};
pub use consumable::{consumable_by_id, Consumable};
pub use content::{BuiltinContent, ContentProvider, DirContent};
pub use enemy::{Enemy, EnemyTemplate, ModuleSpec};
pub use error::{CombatError, ParseCommandError};
pub use fight::{Fight, FightState, RoundReport};
pub use flags::{FlagKey, FlagStore, FlagValue};
pub use progression::{Ledger, Progression, StatKind};
pub use selector::{select_action, WeightedAction};
pub use status::{apply_status, clear_status, tick_statuses, StatusKind, StatusParams};

/// Narrative lines produced by one step of combat, in display order.
pub type Messages = Vec<String>;

enum DiceSource {
    Seeded(ChaCha8Rng),
    Scripted { values: Vec<u32>, cursor: usize },
}

/// The random source every roll in a fight draws from.
///
/// Seeded dice are reproducible per seed; scripted dice replay a fixed cycle of
/// values so a test can decide each dodge, crit and selection draw.
pub struct Dice {
    source: DiceSource,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: DiceSource::Seeded(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Each draw takes the next value (wrapping around) reduced modulo the bound.
    pub fn from_scripted(values: Vec<u32>) -> Self {
        Self {
            source: DiceSource::Scripted { values, cursor: 0 },
        }
    }

    /// Uniform draw in `0..upper`. A bound of 0 or 1 always yields 0.
    pub fn below(&mut self, upper: u32) -> u32 {
        if upper <= 1 {
            // Still advance scripted dice so call sequences stay aligned.
            self.raw();
            return 0;
        }
        if let DiceSource::Seeded(rng) = &mut self.source {
            return rng.gen_range(0..upper);
        }
        self.raw() % upper
    }

    /// Draw in `0..100`.
    pub fn percent(&mut self) -> u32 {
        self.below(100)
    }

    /// True with the given percent chance; the value is clamped to 0..=100.
    pub fn chance(&mut self, percent: i32) -> bool {
        let threshold = percent.clamp(0, 100) as u32;
        self.percent() < threshold
    }

    fn raw(&mut self) -> u32 {
        match &mut self.source {
            DiceSource::Seeded(rng) => rng.r#gen(),
            DiceSource::Scripted { values, cursor } => {
                if values.is_empty() {
                    return 0;
                }
                let v = values[*cursor % values.len()];
                *cursor += 1;
                v
            }
        }
    }
}

impl std::fmt::Debug for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            DiceSource::Seeded(_) => f.write_str("Dice::Seeded"),
            DiceSource::Scripted { values, cursor } => f
                .debug_struct("Dice::Scripted")
                .field("values", values)
                .field("cursor", cursor)
                .finish(),
        }
    }
}
