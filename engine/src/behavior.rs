//! Capability composition.
//!
//! A combatant's behavior is an ordered stack of [`Behavior`] layers: a base
//! layer first, then every capability module in the order it was added. Each
//! hook receives what the earlier layers accumulated and returns the merged
//! value, so a layer can add to a result or deliberately replace it, but cannot
//! lose another layer's work by forgetting to call through.

use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

use crate::attack::AttackProperties;
use crate::combatant::Combatant;
use crate::error::CombatError;
use crate::progression::Progression;
use crate::selector::WeightedAction;
use crate::Dice;
use crate::Messages;

pub type ActionName = &'static str;
pub type WeightedTable = Vec<WeightedAction>;

/// An action a combatant can take. Weight 0 means it is never picked at random
/// but can still be scheduled by a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub name: ActionName,
    pub weight: u32,
    pub properties: AttackProperties,
}

impl ActionDescriptor {
    pub const fn new(name: ActionName, weight: u32, properties: AttackProperties) -> Self {
        Self {
            name,
            weight,
            properties,
        }
    }
}

/// Actions keyed by name, in the order they were first declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTable {
    entries: IndexMap<ActionName, ActionDescriptor>,
}

impl ActionTable {
    /// Add or overwrite an action; overwriting keeps the original position.
    pub fn insert(&mut self, descriptor: ActionDescriptor) -> Option<ActionDescriptor> {
        self.entries.insert(descriptor.name, descriptor)
    }

    pub fn get(&self, name: &str) -> Option<&ActionDescriptor> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn set_weight(&mut self, name: &str, weight: u32) {
        if let Some(entry) = self.entries.get_mut(name) {
            entry.weight = weight;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionDescriptor> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = ActionName> + '_ {
        self.entries.keys().copied()
    }

    /// Every positive-weight action, in declared order.
    pub fn weighted(&self) -> WeightedTable {
        self.entries
            .values()
            .filter(|d| d.weight > 0)
            .map(|d| WeightedAction::new(d.name, d.weight))
            .collect()
    }
}

/// The two sides of one action, plus the dice it rolls with.
pub struct Turn<'a> {
    pub actor: &'a mut Combatant,
    pub target: &'a mut Combatant,
    pub dice: &'a mut Dice,
}

/// Everything a terminal hook may touch.
pub struct Aftermath<'a> {
    /// The combatant whose layers are running.
    pub me: &'a mut Combatant,
    pub opponent: &'a mut Combatant,
    pub progression: &'a mut dyn Progression,
    pub dice: &'a mut Dice,
}

/// One independently authored capability layered onto a combatant.
///
/// Every hook has a pass-through default, so a module only overrides what it
/// contributes.
pub trait Behavior: Send + Sync + fmt::Debug {
    /// Namespace for this module's flags and for diagnostics.
    fn module(&self) -> &'static str;

    /// Add this module's actions to those declared by earlier layers.
    fn fight_actions(
        &self,
        _me: &Combatant,
        _opponent: &Combatant,
        actions: ActionTable,
    ) -> ActionTable {
        actions
    }

    /// Adjust or replace the table the next random pick is drawn from.
    fn weighted_actions(
        &self,
        _me: &Combatant,
        _opponent: &Combatant,
        table: WeightedTable,
    ) -> WeightedTable {
        table
    }

    /// Force the next action instead of drawing one, e.g. the follow-up to a
    /// wind-up. An earlier layer's choice arrives in `forced`.
    fn forced_action(
        &self,
        _me: &Combatant,
        _opponent: &Combatant,
        forced: Option<ActionName>,
    ) -> Option<ActionName> {
        forced
    }

    /// Run `action` if this module declared it.
    fn perform(&self, _action: ActionName, _turn: &mut Turn<'_>) -> Option<Messages> {
        None
    }

    /// Names this module may put into a weighted table on its own.
    fn scripted_actions(&self) -> &'static [ActionName] {
        &[]
    }

    fn post_round(
        &self,
        _me: &mut Combatant,
        _opponent: &Combatant,
        messages: Messages,
    ) -> Messages {
        messages
    }

    fn fight_success(&self, _ctx: &mut Aftermath<'_>, messages: Messages) -> Messages {
        messages
    }

    fn fight_failure(&self, _ctx: &mut Aftermath<'_>, messages: Messages) -> Messages {
        messages
    }

    fn fight_run(&self, _ctx: &mut Aftermath<'_>, messages: Messages) -> Messages {
        messages
    }

    /// Called after the combatant's level (and level-derived stats) changed.
    fn level_set(&self, _me: &mut Combatant) {}
}

/// An ordered stack of behaviors acting as one.
#[derive(Debug, Default)]
pub struct Composition {
    layers: Vec<Box<dyn Behavior>>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, layer: impl Behavior + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    pub fn push(&mut self, layer: Box<dyn Behavior>) {
        self.layers.push(layer);
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn modules(&self) -> Vec<&'static str> {
        self.layers.iter().map(|l| l.module()).collect()
    }

    /// Fold `fight_actions` over the layers, remembering which layer first
    /// declared each action.
    fn resolve(
        &self,
        me: &Combatant,
        opponent: &Combatant) -> (ActionTable, IndexMap<ActionName,
        usize>,
    ) {
        let mut table = ActionTable::default();
        let mut owners = IndexMap::new();
        for (idx, layer) in self.layers.iter().enumerate() {
            table = layer.fight_actions(me, opponent, table);
            for name in table.names() {
                owners.entry(name).or_insert(idx);
            }
        }
        (table, owners)
    }

    pub fn fight_actions(&self, me: &Combatant, opponent: &Combatant) -> ActionTable {
        self.resolve(me, opponent).0
    }

    /// Positive-weight actions from every layer, then each layer's adjustments.
    pub fn weighted_actions(&self, me: &Combatant, opponent: &Combatant) -> WeightedTable {
        let base = self.fight_actions(me, opponent).weighted();
        self.layers
            .iter()
            .fold(base, |table, layer| layer.weighted_actions(me, opponent, table))
    }

    pub fn forced_action(&self, me: &Combatant, opponent: &Combatant) -> Option<ActionName> {
        self.layers
            .iter()
            .fold(None, |forced, layer| layer.forced_action(me, opponent, forced))
    }

    /// Dispatch `action` to the layer that declared it.
    pub fn execute(&self, action: &str, turn: &mut Turn<'_>) -> Result<Messages, CombatError> {
        let (_, owners) = self.resolve(&*turn.actor, &*turn.target);
        let Some((&name, &idx)) = owners.get_key_value(action) else {
            return Err(CombatError::UnknownActionName(action.to_string()));
        };
        debug!(action = name, module = self.layers[idx].module(), "performing action");
        self.layers[idx]
            .perform(name, turn)
            .ok_or_else(|| CombatError::UnknownActionName(action.to_string()))
    }

    /// Age `me`'s countdown flags once, then run every layer's post-round hook.
    pub fn post_round(&self, me: &mut Combatant, opponent: &Combatant) -> Messages {
        let expired = me.flags.tick_countdowns();
        if !expired.is_empty() {
            debug!(name = %me.name, ?expired, "timers expired");
        }
        self.layers
            .iter()
            .fold(Vec::new(), |messages, layer| layer.post_round(me, opponent, messages))
    }

    pub fn fight_success(&self, ctx: &mut Aftermath<'_>, messages: Messages) -> Messages {
        self.layers
            .iter()
            .fold(messages, |messages, layer| layer.fight_success(ctx, messages))
    }

    pub fn fight_failure(&self, ctx: &mut Aftermath<'_>, messages: Messages) -> Messages {
        self.layers
            .iter()
            .fold(messages, |messages, layer| layer.fight_failure(ctx, messages))
    }

    pub fn fight_run(&self, ctx: &mut Aftermath<'_>, messages: Messages) -> Messages {
        self.layers
            .iter()
            .fold(messages, |messages, layer| layer.fight_run(ctx, messages))
    }

    pub fn level_set(&self, me: &mut Combatant) {
        for layer in &self.layers {
            layer.level_set(me);
        }
    }

    /// Check that every action a table can hand the selector has a layer to
    /// perform it.
    pub fn validate(&self, me: &Combatant, opponent: &Combatant) -> Result<(), CombatError> {
        let (table, _) = self.resolve(me, opponent);
        let weighted = self.weighted_actions(me, opponent);
        let scripted = self.layers.iter().flat_map(|l| l.scripted_actions().iter().copied());
        for name in weighted.iter().map(|w| w.action).chain(scripted) {
            if !table.contains(name) {
                return Err(CombatError::UnknownActionName(name.to_string()));
            }
        }
        Ok(())
    }
}
