//! The round state machine driving one encounter to its end.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::character::{Character, PlayerCommand};
use crate::combat::base::ATTACK;
use crate::enemy::Enemy;
use crate::error::CombatError;
use crate::progression::Progression;
use crate::status::tick_statuses;
use crate::Dice;
use crate::Messages;

const NOTHING_HAPPENS: &str = "Nothing happens.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FightState {
    AwaitingAction,
    ActionResolving,
    PostRound,
    /// The character won.
    Victory,
    /// The character lost.
    Defeat,
    Fled,
}

impl FightState {
    pub fn is_terminal(self) -> bool {
        matches!(self, FightState::Victory | FightState::Defeat | FightState::Fled)
    }
}

/// What one `submit` produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    pub messages: Messages,
    pub state: FightState,
    pub character_hp: i32,
    pub enemy_hp: i32,
}

/// One encounter. Borrows the character and the progression hooks for its
/// lifetime; owns the enemy, which is dropped with it.
pub struct Fight<'a> {
    character: &'a mut Character,
    enemy: Enemy,
    dice: Dice,
    progression: &'a mut dyn Progression,
    state: FightState,
    round: u32,
}

impl<'a> Fight<'a> {
    /// Start a fight after checking both sides can perform every action they
    /// might schedule.
    pub fn new(
        character: &'a mut Character,
        enemy: Enemy,
        dice: Dice,
        progression: &'a mut dyn Progression,
    ) -> Result<Self, CombatError> {
        enemy.validate(&character.combatant)?;
        character
            .layers()
            .validate(&character.combatant, &enemy.combatant)?;
        debug!(
            character = %character.combatant.name,
            enemy = %enemy.type_id,
            "fight started"
        );
        Ok(Self {
            character,
            enemy,
            dice,
            progression,
            state: FightState::AwaitingAction,
            round: 0,
        })
    }

    pub fn state(&self) -> FightState {
        self.state
    }

    /// Rounds spent so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn character(&self) -> &Character {
        &*self.character
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    /// Play one round with the player's command.
    pub fn submit(&mut self, command: PlayerCommand) -> Result<RoundReport, CombatError> {
        if self.state.is_terminal() {
            return Err(CombatError::FightOver);
        }
        let result = self.play_round(command);
        if result.is_err() && !self.state.is_terminal() {
            self.state = FightState::AwaitingAction;
        }
        result
    }

    fn play_round(&mut self, command: PlayerCommand) -> Result<RoundReport, CombatError> {
        self.state = FightState::ActionResolving;
        let mut messages = Vec::new();

        match command {
            PlayerCommand::Run => {
                self.round += 1;
                return Ok(self.finish(FightState::Fled, messages));
            }
            PlayerCommand::Use(item) => {
                match self.character.use_item(&item, &mut *self.progression) {
                    Some(used) => messages.extend(used),
                    None => {
                        self.state = FightState::AwaitingAction;
                        return Ok(self.report(vec![NOTHING_HAPPENS.to_string()]));
                    }
                }
            }
            PlayerCommand::Attack => {
                messages.extend(self.character.act(
                    ATTACK,
                    &mut self.enemy.combatant,
                    &mut self.dice,
                )?);
            }
        }
        self.round += 1;

        if self.enemy.combatant.is_defeated() {
            return Ok(self.finish(FightState::Victory, messages));
        }

        messages.extend(
            self.enemy
                .take_turn(&mut self.character.combatant, &mut self.dice)?,
        );
        if self.character.combatant.is_defeated() {
            return Ok(self.finish(FightState::Defeat, messages));
        }

        self.state = FightState::PostRound;
        messages.extend(tick_statuses(&mut self.character.combatant));
        if self.character.combatant.is_defeated() {
            return Ok(self.finish(FightState::Defeat, messages));
        }
        messages.extend(tick_statuses(&mut self.enemy.combatant));
        if self.enemy.combatant.is_defeated() {
            return Ok(self.finish(FightState::Victory, messages));
        }

        messages.extend(self.character.post_round(&self.enemy.combatant));
        messages.extend(self.enemy.post_round(&self.character.combatant));
        self.character.combatant.enforce_invariants();
        self.enemy.combatant.enforce_invariants();

        if self.character.combatant.is_defeated() {
            return Ok(self.finish(FightState::Defeat, messages));
        }
        if self.enemy.combatant.is_defeated() {
            return Ok(self.finish(FightState::Victory, messages));
        }

        self.state = FightState::AwaitingAction;
        debug!(
            round = self.round,
            character_hp = self.character.combatant.hp(),
            enemy_hp = self.enemy.combatant.hp(),
            "round complete"
        );
        Ok(self.report(messages))
    }

    /// Enter a terminal state and run its hooks. Only reachable from a
    /// non-terminal state, so the hooks fire once per fight.
    fn finish(&mut self, outcome: FightState, messages: Messages) -> RoundReport {
        self.state = outcome;
        let messages = self.enemy.conclude(
            outcome,
            &mut self.character.combatant,
            &mut *self.progression,
            &mut self.dice,
            messages,
        );
        self.character.combatant.statuses.clear();
        info!(
            outcome = ?outcome,
            rounds = self.round,
            enemy = %self.enemy.type_id,
            character_hp = self.character.combatant.hp(),
            "fight over"
        );
        self.report(messages)
    }

    fn report(&self, messages: Messages) -> RoundReport {
        RoundReport {
            round: self.round,
            messages,
            state: self.state,
            character_hp: self.character.combatant.hp(),
            enemy_hp: self.enemy.combatant.hp(),
        }
    }
}
