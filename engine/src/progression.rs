use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    ItemsConsumed,
    EnemiesDefeated,
    FightsLost,
    FightsFled,
    Experience,
    Gold,
    Reputation,
}

/// Hooks into the character's wider game state.
///
/// Combat only ever pushes changes through these; nothing it calls here feeds
/// back into the fight.
pub trait Progression {
    /// `detail` narrows the stat, e.g. the item or region it applies to.
    fn increase_stat(&mut self, stat: StatKind, amount: u32, detail: Option<&str>);
    fn has_item(&self, item: &str) -> bool;
    fn remove_item(&mut self, item: &str);
    fn add_item(&mut self, item: &str, quantity: u32);
    /// Move the character out of a special location (e.g. a dungeon).
    fn leave_location(&mut self, location: &str);
}

/// In-memory progression that records everything it is told.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub stats: IndexMap<String, u32>,
    pub inventory: IndexMap<String, u32>,
    pub locations_left: Vec<String>,
}

impl Ledger {
    pub fn with_items<'a>(items: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let mut ledger = Self::default();
        for (item, qty) in items {
            ledger.add_item(item, qty);
        }
        ledger
    }

    fn stat_key(stat: StatKind, detail: Option<&str>) -> String {
        let base = serde_json::to_value(stat)
            .ok()
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_else(|| format!("{:?}", stat));
        match detail {
            Some(d) => format!("{}:{}", base, d),
            None => base,
        }
    }

    pub fn stat(&self, stat: StatKind, detail: Option<&str>) -> u32 {
        self.stats
            .get(&Self::stat_key(stat, detail))
            .copied()
            .unwrap_or(0)
    }

    pub fn item_count(&self, item: &str) -> u32 {
        self.inventory.get(item).copied().unwrap_or(0)
    }
}

impl Progression for Ledger {
    fn increase_stat(&mut self, stat: StatKind, amount: u32, detail: Option<&str>) {
        *self.stats.entry(Self::stat_key(stat, detail)).or_insert(0) += amount;
    }

    fn has_item(&self, item: &str) -> bool {
        self.item_count(item) > 0
    }

    fn remove_item(&mut self, item: &str) {
        if let Some(qty) = self.inventory.get_mut(item) {
            *qty = qty.saturating_sub(1);
            if *qty == 0 {
                self.inventory.shift_remove(item);
            }
        }
    }

    fn add_item(&mut self, item: &str, quantity: u32) {
        if quantity > 0 {
            *self.inventory.entry(item.to_string()).or_insert(0) += quantity;
        }
    }

    fn leave_location(&mut self, location: &str) {
        self.locations_left.push(location.to_string());
    }
}
