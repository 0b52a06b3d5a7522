use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::character::{CharacterSpec, PlayerCommand};
use crate::content::{BuiltinContent, ContentProvider, DirContent};
use crate::enemy::Enemy;
use crate::fight::{Fight, FightState};
use crate::progression::Ledger;
use crate::Dice;

const DEFAULT_MAX_ROUNDS: u32 = 50;

fn default_level() -> u32 {
    1
}

fn default_max_rounds() -> u32 {
    DEFAULT_MAX_ROUNDS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FightConfig {
    pub enemy: String,
    /// Read enemy YAML from here instead of the built-in content.
    #[serde(default)]
    pub enemy_dir: Option<PathBuf>,
    #[serde(default = "default_level")]
    pub enemy_level: u32,
    #[serde(default)]
    pub level_bonus: i32,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub character: CharacterSpec,
    #[serde(default)]
    pub inventory: IndexMap<String, u32>,
    /// Played in order (`attack`, `run`, `use:<item>`); once used up the
    /// character keeps attacking.
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
}

impl FightConfig {
    pub fn new(enemy: impl Into<String>) -> Self {
        Self {
            enemy: enemy.into(),
            enemy_dir: None,
            enemy_level: default_level(),
            level_bonus: 0,
            seed: 0,
            character: CharacterSpec::default(),
            inventory: IndexMap::new(),
            commands: Vec::new(),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    pub fn provider(&self) -> Box<dyn ContentProvider> {
        match &self.enemy_dir {
            Some(dir) => Box::new(DirContent::new(dir.clone())),
            None => Box::new(BuiltinContent),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FightReport {
    /// `victory`, `defeat`, `fled`, or `stalemate` when `max_rounds` ran out.
    pub outcome: String,
    pub rounds: u32,
    pub character_hp_end: i32,
    pub enemy_hp_end: i32,
    pub ledger: Ledger,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FightSummary {
    pub trials: u32,
    pub victories: u32,
    pub defeats: u32,
    pub fled: u32,
    pub stalemates: u32,
    pub average_rounds: f64,
    pub win_rate: f64,
}

fn outcome_name(state: FightState) -> &'static str {
    match state {
        FightState::Victory => "victory",
        FightState::Defeat => "defeat",
        FightState::Fled => "fled",
        FightState::AwaitingAction | FightState::ActionResolving | FightState::PostRound => {
            "stalemate"
        }
    }
}

pub fn simulate_fight(cfg: &FightConfig) -> Result<FightReport> {
    let commands = cfg
        .commands
        .iter()
        .map(|c| c.parse::<PlayerCommand>())
        .collect::<Result<Vec<_>, _>>()
        .context("invalid command list")?;

    let template = cfg
        .provider()
        .enemy_definition(&cfg.enemy)
        .with_context(|| format!("failed to load enemy: {}", cfg.enemy))?;
    let enemy = Enemy::from_template(&template, cfg.enemy_level, cfg.level_bonus);
    let mut character = cfg.character.build();
    let mut ledger = Ledger::with_items(cfg.inventory.iter().map(|(k, v)| (k.as_str(), *v)));

    let mut logs = vec![format!(
        "[START] {} (HP {}) vs {} L{} (HP {})",
        character.combatant.name,
        character.combatant.hp(),
        enemy.display_name,
        enemy.combatant.level,
        enemy.combatant.hp()
    )];

    let mut fight = Fight::new(&mut character, enemy, Dice::from_seed(cfg.seed), &mut ledger)
        .with_context(|| format!("enemy '{}' cannot fight", cfg.enemy))?;

    let mut queued = commands.into_iter();
    while !fight.state().is_terminal() && fight.round() < cfg.max_rounds {
        let command = queued.next().unwrap_or(PlayerCommand::Attack);
        let report = fight.submit(command)?;
        logs.push(format!("[ROUND] {}", report.round));
        logs.extend(report.messages);
    }

    let state = fight.state();
    let rounds = fight.round();
    let character_hp_end = fight.character().combatant.hp();
    let enemy_hp_end = fight.enemy().combatant.hp();
    drop(fight);

    let outcome = outcome_name(state);
    logs.push(format!(
        "[END] outcome={} character_hp={} enemy_hp={} rounds={}",
        outcome, character_hp_end, enemy_hp_end, rounds
    ));

    Ok(FightReport {
        outcome: outcome.to_string(),
        rounds,
        character_hp_end,
        enemy_hp_end,
        ledger,
        log: logs,
    })
}

/// Run `trials` fights, seeding trial `i` with `cfg.seed + i`.
pub fn simulate_fight_many(cfg: &FightConfig, trials: u32) -> Result<FightSummary> {
    let mut summary = FightSummary {
        trials,
        ..FightSummary::default()
    };
    let mut total_rounds = 0u64;
    for i in 0..trials {
        let mut trial = cfg.clone();
        trial.seed = cfg.seed.wrapping_add(u64::from(i));
        let report = simulate_fight(&trial).with_context(|| format!("trial {} failed", i))?;
        total_rounds += u64::from(report.rounds);
        match report.outcome.as_str() {
            "victory" => summary.victories += 1,
            "defeat" => summary.defeats += 1,
            "fled" => summary.fled += 1,
            _ => summary.stalemates += 1,
        }
    }
    if trials > 0 {
        summary.average_rounds = total_rounds as f64 / f64::from(trials);
        summary.win_rate = f64::from(summary.victories) / f64::from(trials);
    }
    Ok(summary)
}

/// Parse a config, as YAML for `.yaml`/`.yml` paths and JSON otherwise.
pub fn parse_config(text: &str, path: &Path) -> Result<FightConfig> {
    let yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let cfg = if yaml {
        serde_yaml::from_str(text)
            .with_context(|| format!("failed to parse config YAML: {}", path.display()))?
    } else {
        serde_json::from_str(text)
            .with_context(|| format!("failed to parse config JSON: {}", path.display()))?
    };
    Ok(cfg)
}

pub fn load_config(path: impl AsRef<Path>) -> Result<FightConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&text, path)
}
