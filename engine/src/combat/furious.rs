use crate::attack::{strike, AttackProperties, AttackTexts};
use crate::behavior::{ActionDescriptor, ActionName, ActionTable, Behavior, Turn};
use crate::combat::scale;
use crate::combatant::Combatant;
use crate::flags::FlagKey;
use crate::narrative::{amount_text, crit_text};
use crate::Messages;

pub const GET_FURIOUS: ActionName = "get_furious";
pub const FURIOUS_ATTACK: ActionName = "furious_attack";
pub const CATCH_BREATH: ActionName = "catch_breath";

pub const IS_FURIOUS: FlagKey = FlagKey::new("furious", "is_furious");
pub const TIRED: FlagKey = FlagKey::new("furious", "tired");
/// While this timer runs, a furious attack does not tire the attacker.
pub const TIRELESS: FlagKey = FlagKey::new("furious", "tireless");

pub const FURIOUS_MULTIPLIER: f64 = 2.0;

/// Winds up one round, swings for double damage the next, then needs a round
/// to recover.
#[derive(Debug, Clone)]
pub struct Furious {
    pub weight: u32,
}

/// The double-damage swing. Other modules reuse it for their own openers.
pub fn furious_attack(turn: &mut Turn<'_>) -> Messages {
    turn.actor.flags.clear(&IS_FURIOUS);

    let texts = AttackTexts {
        dodge: ":dash: {actor} swings wildly in a fury, but {target} dodges!",
        miss: "{actor} swings wildly in a fury, but misses!",
    };
    let mut messages = strike(turn, AttackProperties::IS_ATTACK, texts, |turn, hit| {
        let damage = scale(hit.damage, FURIOUS_MULTIPLIER);
        let dealt = turn.target.take_damage(damage);
        vec![format!(
            ":anger: {} attacks {} in a fury, dealing {} damage.{}",
            turn.actor.name,
            turn.target.name,
            amount_text(dealt),
            crit_text(hit.crit, dealt)
        )]
    });

    if !turn.actor.flags.has(&TIRELESS) {
        // Two rounds: the timer also ticks at the end of this one.
        turn.actor.flags.set_countdown(TIRED, 2);
        messages.push(format!("{} is exhausted by the effort.", turn.actor.name));
    }
    messages
}

impl Behavior for Furious {
    fn module(&self) -> &'static str {
        "furious"
    }

    fn fight_actions(
        &self,
        _me: &Combatant,
        _opponent: &Combatant,
        mut actions: ActionTable,
    ) -> ActionTable {
        actions.insert(ActionDescriptor::new(
            GET_FURIOUS,
            self.weight,
            AttackProperties::empty(),
        ));
        actions.insert(ActionDescriptor::new(
            FURIOUS_ATTACK,
            0,
            AttackProperties::IS_ATTACK,
        ));
        actions.insert(ActionDescriptor::new(
            CATCH_BREATH,
            0,
            AttackProperties::empty(),
        ));
        actions
    }

    fn forced_action(
        &self,
        me: &Combatant,
        _opponent: &Combatant,
        forced: Option<ActionName>,
    ) -> Option<ActionName> {
        if forced.is_some() {
            forced
        } else if me.flags.has(&IS_FURIOUS) {
            Some(FURIOUS_ATTACK)
        } else if me.flags.has(&TIRED) {
            Some(CATCH_BREATH)
        } else {
            None
        }
    }

    fn scripted_actions(&self) -> &'static [ActionName] {
        &[FURIOUS_ATTACK, CATCH_BREATH]
    }

    fn perform(&self, action: ActionName, turn: &mut Turn<'_>) -> Option<Messages> {
        match action {
            GET_FURIOUS => {
                turn.actor.flags.set(IS_FURIOUS);
                Some(vec![format!(
                    ":face_with_symbols_on_mouth: {} is getting furious!",
                    turn.actor.name
                )])
            }
            FURIOUS_ATTACK => Some(furious_attack(turn)),
            CATCH_BREATH => Some(vec![format!(
                "{} is catching their breath.",
                turn.actor.name
            )]),
            _ => None,
        }
    }
}
