use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use fightcore::api::{load_config, simulate_fight, FightConfig};
use fightcore::{
    BuiltinContent, CharacterSpec, ContentProvider, Dice, DirContent, Enemy, PlayerCommand,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Subcommand)]
enum Cmd {
    /// Run one fight and print its narrative
    Fight {
        /// Enemy type (see `enemies`)
        #[arg(long)]
        enemy: Option<String>,
        /// Optional YAML/JSON fight config; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory of enemy YAML files instead of the built-in content
        #[arg(long)]
        enemy_dir: Option<PathBuf>,
        /// Enemy level
        #[arg(long)]
        level: Option<u32>,
        /// Location level bonus added to the enemy level
        #[arg(long, allow_hyphen_values = true)]
        level_bonus: Option<i32>,
        /// RNG seed for determinism
        #[arg(long)]
        seed: Option<u64>,
        /// Player commands in order: attack | run | use:<item>
        #[arg(long = "cmd")]
        commands: Vec<PlayerCommand>,
        /// Inventory entries as item=count
        #[arg(long = "item")]
        items: Vec<String>,
        /// Safety cap on rounds
        #[arg(long)]
        max_rounds: Option<u32>,
        /// Print the full report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show an enemy's stats and action tables at a level
    Inspect {
        #[arg(long)]
        enemy: String,
        #[arg(long)]
        enemy_dir: Option<PathBuf>,
        #[arg(long, default_value_t = 1)]
        level: u32,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        level_bonus: i32,
        /// RNG seed for the sample draws
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Number of sample action draws to show
        #[arg(long, default_value_t = 0)]
        draws: u32,
    },
    /// List available enemy types
    Enemies {
        #[arg(long)]
        enemy_dir: Option<PathBuf>,
    },
}

#[derive(Parser)]
#[command(name = "fightcore")]
#[command(about = "Fightcore CLI harness")]
struct Cli {
    /// Log engine internals to stderr (otherwise RUST_LOG decides)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_item(entry: &str) -> anyhow::Result<(String, u32)> {
    match entry.split_once('=') {
        Some((item, count)) => {
            let count = count
                .trim()
                .parse()
                .with_context(|| format!("invalid item count in '{}'", entry))?;
            Ok((item.trim().to_string(), count))
        }
        None => Ok((entry.trim().to_string(), 1)),
    }
}

fn provider(enemy_dir: Option<PathBuf>) -> Box<dyn ContentProvider> {
    match enemy_dir {
        Some(dir) => Box::new(DirContent::new(dir)),
        None => Box::new(BuiltinContent),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Cmd::Fight {
            enemy,
            config,
            enemy_dir,
            level,
            level_bonus,
            seed,
            commands,
            items,
            max_rounds,
            json,
        } => {
            let mut cfg = match (config, enemy.as_deref()) {
                (Some(path), _) => load_config(&path)?,
                (None, Some(enemy)) => FightConfig::new(enemy),
                (None, None) => bail!("either --enemy or --config is required"),
            };
            if let Some(enemy) = enemy {
                cfg.enemy = enemy;
            }
            if enemy_dir.is_some() {
                cfg.enemy_dir = enemy_dir;
            }
            if let Some(level) = level {
                cfg.enemy_level = level;
            }
            if let Some(bonus) = level_bonus {
                cfg.level_bonus = bonus;
            }
            if let Some(seed) = seed {
                cfg.seed = seed;
            }
            if let Some(max_rounds) = max_rounds {
                cfg.max_rounds = max_rounds;
            }
            if !commands.is_empty() {
                cfg.commands = commands.iter().map(|c| c.to_string()).collect();
            }
            for entry in &items {
                let (item, count) = parse_item(entry)?;
                cfg.inventory.insert(item, count);
            }

            let report = simulate_fight(&cfg)?;
            info!(
                enemy = %cfg.enemy,
                seed = cfg.seed,
                outcome = %report.outcome,
                rounds = report.rounds,
                "fight finished"
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for line in &report.log {
                    println!("{}", line);
                }
            }
        }
        Cmd::Inspect {
            enemy,
            enemy_dir,
            level,
            level_bonus,
            seed,
            draws,
        } => {
            let provider = provider(enemy_dir);
            let template = provider.enemy_definition(&enemy)?;
            let npc = Enemy::from_template(&template, level, level_bonus);
            let player = CharacterSpec::default().build();
            let me = &npc.combatant;

            println!("{} [{}] L{}", npc.display_name, npc.type_id, me.level);
            if !npc.description.is_empty() {
                println!("{}", npc.description);
            }
            println!("hp:       {}", me.max_hp());
            println!("stats:    {}", serde_json::to_string(&me.stats)?);
            println!("modules:  {}", npc.layers().modules().join(", "));
            println!("actions:");
            for action in npc.layers().fight_actions(me, &player.combatant).iter() {
                println!(
                    "  {:<18} weight={:<4} {:?}",
                    action.name, action.weight, action.properties
                );
            }
            println!("weighted:");
            for entry in npc.layers().weighted_actions(me, &player.combatant) {
                println!("  {:<18} {}", entry.action, entry.weight);
            }
            npc.validate(&player.combatant)?;
            let mut dice = Dice::from_seed(seed);
            for i in 0..draws {
                let action = npc.choose_action(&player.combatant, &mut dice)?;
                println!("draw {:>3}: {}", i + 1, action);
            }
        }
        Cmd::Enemies { enemy_dir } => {
            let provider = provider(enemy_dir);
            for enemy_type in provider.enemy_types()? {
                println!("{}", enemy_type);
            }
        }
    }
    Ok(())
}

