use crate::attack::{strike, AttackProperties, AttackTexts};
use crate::behavior::{ActionDescriptor, ActionName, ActionTable, Aftermath, Behavior, Turn};
use crate::combatant::Combatant;
use crate::narrative::{amount_text, crit_text};
use crate::progression::StatKind;
use crate::Messages;

pub const ATTACK: ActionName = "attack";

/// Plain weapon attack shared by both sides.
pub fn basic_attack(turn: &mut Turn<'_>) -> Messages {
    strike(turn, AttackProperties::IS_ATTACK, AttackTexts::PLAIN, |turn, hit| {
        let dealt = turn.target.take_damage(hit.damage);
        vec![format!(
            "{} attacks {}, dealing {} damage.{}",
            turn.actor.name,
            turn.target.name,
            amount_text(dealt),
            crit_text(hit.crit, dealt)
        )]
    })
}

/// Base layer every enemy is built on: the fallback attack, rewards and
/// win/loss bookkeeping.
#[derive(Debug, Clone)]
pub struct BaseEnemy {
    pub kind: String,
    pub attack_weight: u32,
    pub experience: u32,
    pub gold: u32,
}

impl Behavior for BaseEnemy {
    fn module(&self) -> &'static str {
        "enemy"
    }

    fn fight_actions(
        &self,
        _me: &Combatant,
        _opponent: &Combatant,
        mut actions: ActionTable,
    ) -> ActionTable {
        actions.insert(ActionDescriptor::new(
            ATTACK,
            self.attack_weight,
            AttackProperties::IS_ATTACK,
        ));
        actions
    }

    fn perform(&self, action: ActionName, turn: &mut Turn<'_>) -> Option<Messages> {
        (action == ATTACK).then(|| basic_attack(turn))
    }

    fn fight_success(&self, ctx: &mut Aftermath<'_>, mut messages: Messages) -> Messages {
        ctx.progression
            .increase_stat(StatKind::EnemiesDefeated, 1, Some(&self.kind));
        ctx.progression
            .increase_stat(StatKind::Experience, self.experience, None);
        ctx.progression.increase_stat(StatKind::Gold, self.gold, None);
        messages.push(format!(
            "You defeated {}! You gain {} experience and {} gold.",
            ctx.me.name, self.experience, self.gold
        ));
        messages
    }

    fn fight_failure(&self, ctx: &mut Aftermath<'_>, mut messages: Messages) -> Messages {
        ctx.progression
            .increase_stat(StatKind::FightsLost, 1, Some(&self.kind));
        messages.push(format!("You have been defeated by {}.", ctx.me.name));
        messages
    }

    fn fight_run(&self, ctx: &mut Aftermath<'_>, mut messages: Messages) -> Messages {
        ctx.progression
            .increase_stat(StatKind::FightsFled, 1, Some(&self.kind));
        messages.push(format!("You run away from {}.", ctx.me.name));
        messages
    }
}

/// Base layer for player characters. The player picks actions explicitly, so
/// nothing here carries a random weight.
#[derive(Debug, Clone, Default)]
pub struct BaseCharacter;

impl Behavior for BaseCharacter {
    fn module(&self) -> &'static str {
        "character"
    }

    fn fight_actions(
        &self,
        _me: &Combatant,
        _opponent: &Combatant,
        mut actions: ActionTable,
    ) -> ActionTable {
        actions.insert(ActionDescriptor::new(ATTACK, 0, AttackProperties::IS_ATTACK));
        actions
    }

    fn perform(&self, action: ActionName, turn: &mut Turn<'_>) -> Option<Messages> {
        (action == ATTACK).then(|| basic_attack(turn))
    }
}
