//! Capability modules that can be layered onto a combatant.

pub mod base;
pub mod daze;
pub mod drain_life;
pub mod elemental;
pub mod furious;
pub mod gear;
pub mod heal;
pub mod loot;
pub mod maze_master;

pub use base::{BaseCharacter, BaseEnemy};
pub use daze::Daze;
pub use drain_life::DrainLife;
pub use elemental::{Element, Elemental};
pub use furious::Furious;
pub use gear::HeartAmulet;
pub use heal::Heal;
pub use loot::{DropsLoot, Reputation};
pub use maze_master::MazeMaster;

/// `ceil(damage × multiplier)`, never negative.
pub(crate) fn scale(damage: u32, multiplier: f64) -> u32 {
    let scaled = (f64::from(damage) * multiplier).ceil();
    if scaled <= 0.0 { 0 } else { scaled as u32 }
}
