use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A flag key scoped to the module that owns it.
///
/// Two modules may both use the name `turns` without colliding because the
/// module namespace is part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlagKey {
    module: Cow<'static, str>,
    name: Cow<'static, str>,
}

impl FlagKey {
    pub const fn new(module: &'static str, name: &'static str) -> Self {
        Self {
            module: Cow::Borrowed(module),
            name: Cow::Borrowed(name),
        }
    }

    /// Key with a name built at runtime (e.g. one per defeated boss).
    pub fn owned(module: &'static str, name: impl Into<String>) -> Self {
        Self {
            module: Cow::Borrowed(module),
            name: Cow::Owned(name.into()),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for FlagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagValue {
    /// Present until cleared.
    Set,
    /// Rounds left; removed when it reaches 0.
    Countdown(u32),
}

/// Per-combatant keyed state that survives between rounds of one fight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlagStore {
    #[serde(with = "indexmap::map::serde_seq")]
    entries: IndexMap<FlagKey, FlagValue>,
}

impl FlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: FlagKey) {
        self.entries.insert(key, FlagValue::Set);
    }

    /// Create or overwrite a countdown. Zero rounds clears the key.
    pub fn set_countdown(&mut self, key: FlagKey, rounds: u32) {
        if rounds == 0 {
            self.entries.shift_remove(&key);
        } else {
            self.entries.insert(key, FlagValue::Countdown(rounds));
        }
    }

    pub fn has(&self, key: &FlagKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Read a flag, falling back to `default` when it is absent.
    pub fn get(&self, key: &FlagKey, default: FlagValue) -> FlagValue {
        self.entries.get(key).copied().unwrap_or(default)
    }

    /// Remaining rounds of a countdown; `None` when absent or a plain flag.
    pub fn countdown(&self, key: &FlagKey) -> Option<u32> {
        match self.entries.get(key) {
            Some(FlagValue::Countdown(n)) => Some(*n),
            _ => None,
        }
    }

    /// Decrement one countdown and return what is left. Plain flags are untouched.
    pub fn decrement(&mut self, key: &FlagKey) -> Option<u32> {
        let left = match self.entries.get_mut(key) {
            Some(FlagValue::Countdown(n)) => {
                *n = n.saturating_sub(1);
                *n
            }
            _ => return None,
        };
        if left == 0 {
            self.entries.shift_remove(key);
        }
        Some(left)
    }

    /// Remove a flag of either kind. Returns whether it was present.
    pub fn clear(&mut self, key: &FlagKey) -> bool {
        self.entries.shift_remove(key).is_some()
    }

    /// Remove every flag owned by `module`.
    pub fn clear_module(&mut self, module: &str) {
        self.entries.retain(|k, _| k.module() != module);
    }

    /// Decrement every countdown once; returns the keys that expired.
    pub fn tick_countdowns(&mut self) -> Vec<FlagKey> {
        let mut expired = Vec::new();
        self.entries.retain(|key, value| match value {
            FlagValue::Countdown(n) => {
                *n = n.saturating_sub(1);
                if *n == 0 {
                    expired.push(key.clone());
                    false
                } else {
                    true
                }
            }
            FlagValue::Set => true,
        });
        expired
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FlagKey, &FlagValue)> {
        self.entries.iter()
    }
}
