//! The Maze Master: a two-phase boss guarding the labyrinth.
//!
//! Phase one mixes plain attacks with furious wind-ups. The first time his HP
//! drops below `reset_threshold` of max he resets to full with a larger pool
//! and switches to a phase-two table built around the antipode blast.
//! Furious, daze and heal must sit in the same composition, since both
//! tables schedule their actions.

use tracing::info;

use crate::attack::{apply_elemental_statuses, strike, AttackProperties, AttackTexts};
use crate::behavior::{
    ActionDescriptor, ActionName, ActionTable, Aftermath, Behavior, Turn, WeightedTable,
};
use crate::combat::base::ATTACK;
use crate::combat::daze::DAZE;
use crate::combat::furious::{furious_attack, GET_FURIOUS, IS_FURIOUS, TIRELESS};
use crate::combat::heal::HEAL;
use crate::combat::scale;
use crate::combatant::Combatant;
use crate::flags::FlagKey;
use crate::narrative::{amount_text, crit_text};
use crate::selector::WeightedAction;
use crate::Messages;

pub const FAST_FURIOUS: ActionName = "fast_furious";
pub const ENERGETIC_FURIOUS: ActionName = "energetic_furious";
pub const ANTIPODE: ActionName = "antipode";

/// Set once the boss has reset; never cleared during a fight.
pub const RESET_FIGHT: FlagKey = FlagKey::new("maze_master", "reset_fight");

const ANTIPODE_MULTIPLIER: f64 = 2.0;
const TIRELESS_ROUNDS: u32 = 2;

#[derive(Debug, Clone)]
pub struct MazeMaster {
    pub base_max_hp: i32,
    pub per_level_max_hp: i32,
    /// Fraction of max HP that triggers the reset.
    pub reset_threshold: f64,
    /// Per-level HP growth after the reset.
    pub reset_modifier: f64,
    /// Location the character is thrown out of, and the flag namespace of
    /// their progress through it.
    pub location: String,
}

impl Default for MazeMaster {
    fn default() -> Self {
        Self {
            base_max_hp: 100,
            per_level_max_hp: 100,
            reset_threshold: 0.5,
            reset_modifier: 1.5,
            location: "labyrinth".to_string(),
        }
    }
}

impl MazeMaster {
    /// Max HP for the current phase. `me.level` already includes any
    /// location bonus.
    pub fn phase_max_hp(&self, me: &Combatant) -> i32 {
        let modifier = if me.flags.has(&RESET_FIGHT) {
            self.reset_modifier
        } else {
            1.0
        };
        let growth =
            f64::from(me.level.saturating_sub(1)) * f64::from(self.per_level_max_hp) * modifier;
        self.base_max_hp.saturating_add(growth.floor() as i32)
    }

    fn should_reset(&self, me: &Combatant) -> bool {
        !me.flags.has(&RESET_FIGHT)
            && !me.is_defeated()
            && f64::from(me.hp()) < f64::from(me.max_hp()) * self.reset_threshold
    }

    fn antipode(&self, turn: &mut Turn<'_>) -> Messages {
        let props = AttackProperties::IS_ATTACK
            | AttackProperties::BURN_ATTACK
            | AttackProperties::CHILL_ATTACK;
        let texts = AttackTexts {
            dodge: ":dash: {actor} fires a blast of ice and fire at {target}, but {target} dodges!",
            miss: "{actor} fires a blast of ice and fire at {target}, but misses!",
        };
        strike(turn, props, texts, |turn, hit| {
            let dealt = turn.target.take_damage(scale(hit.damage, ANTIPODE_MULTIPLIER));
            let mut messages = vec![format!(
                ":fire::snowflake: {} fires a blast of ice and fire at {}, dealing {} damage.{}",
                turn.actor.name,
                turn.target.name,
                amount_text(dealt),
                crit_text(hit.crit, dealt)
            )];
            messages.extend(apply_elemental_statuses(turn, props, dealt));
            messages
        })
    }
}

impl Behavior for MazeMaster {
    fn module(&self) -> &'static str {
        "maze_master"
    }

    fn fight_actions(
        &self,
        _me: &Combatant,
        _opponent: &Combatant,
        mut actions: ActionTable,
    ) -> ActionTable {
        actions.insert(ActionDescriptor::new(FAST_FURIOUS, 0, AttackProperties::IS_ATTACK));
        actions.insert(ActionDescriptor::new(ENERGETIC_FURIOUS, 0, AttackProperties::empty()));
        actions.insert(ActionDescriptor::new(
            ANTIPODE,
            0,
            AttackProperties::IS_ATTACK
                | AttackProperties::BURN_ATTACK
                | AttackProperties::CHILL_ATTACK,
        ));
        actions
    }

    fn weighted_actions(
        &self,
        me: &Combatant,
        _opponent: &Combatant,
        _table: WeightedTable,
    ) -> WeightedTable {
        if me.flags.has(&RESET_FIGHT) {
            vec![
                WeightedAction::new(FAST_FURIOUS, 10),
                WeightedAction::new(GET_FURIOUS, 10),
                WeightedAction::new(ENERGETIC_FURIOUS, 10),
                WeightedAction::new(DAZE, 10),
                WeightedAction::new(HEAL, 10),
                WeightedAction::new(ANTIPODE, 50),
            ]
        } else {
            vec![
                WeightedAction::new(GET_FURIOUS, 15),
                WeightedAction::new(ENERGETIC_FURIOUS, 15),
                WeightedAction::new(DAZE, 10),
                WeightedAction::new(ATTACK, 60),
            ]
        }
    }

    fn scripted_actions(&self) -> &'static [ActionName] {
        &[
            FAST_FURIOUS,
            GET_FURIOUS,
            ENERGETIC_FURIOUS,
            DAZE,
            HEAL,
            ANTIPODE,
            ATTACK,
        ]
    }

    fn perform(&self, action: ActionName, turn: &mut Turn<'_>) -> Option<Messages> {
        match action {
            FAST_FURIOUS => {
                let mut messages = vec![format!(
                    ":rage: {} lashes out with a furious attack out of nowhere!",
                    turn.actor.name
                )];
                messages.extend(furious_attack(turn));
                Some(messages)
            }
            ENERGETIC_FURIOUS => {
                turn.actor.flags.set(IS_FURIOUS);
                turn.actor.flags.set_countdown(TIRELESS, TIRELESS_ROUNDS);
                Some(vec![format!(
                    ":face_with_symbols_on_mouth: {} prepares to launch a furious attack! \
                     He seems very energetic...",
                    turn.actor.name
                )])
            }
            ANTIPODE => Some(self.antipode(turn)),
            _ => None,
        }
    }

    fn post_round(
        &self,
        me: &mut Combatant,
        _opponent: &Combatant,
        mut messages: Messages,
    ) -> Messages {
        if self.should_reset(me) {
            me.flags.set(RESET_FIGHT);
            let max_hp = self.phase_max_hp(me);
            me.reset_max_hp(max_hp);
            info!(name = %me.name, max_hp, "boss reset");
            messages.push(format!(
                ":high_brightness: {0} growls in frustration. \
                 \"Okay, fine! I'm done with fighting fair,\" he says. \
                 A bright flash blinds you, and when it fades {0} stands before you, \
                 unbloodied and glowing slightly.",
                me.name
            ));
        }
        messages
    }

    fn level_set(&self, me: &mut Combatant) {
        let max_hp = self.phase_max_hp(me);
        me.reset_max_hp(max_hp);
    }

    fn fight_success(&self, ctx: &mut Aftermath<'_>, messages: Messages) -> Messages {
        ctx.opponent.flags.clear_module(&self.location);
        messages
    }

    fn fight_failure(&self, ctx: &mut Aftermath<'_>, mut messages: Messages) -> Messages {
        ctx.progression.leave_location(&self.location);
        messages.push(
            "As you pass into unconsciousness, \
             you feel your body being dragged out of the labyrinth."
                .to_string(),
        );
        messages
    }

    fn fight_run(&self, ctx: &mut Aftermath<'_>, mut messages: Messages) -> Messages {
        ctx.progression.leave_location(&self.location);
        messages.push(format!("{} chases you right out of the labyrinth!", ctx.me.name));
        messages
    }
}
