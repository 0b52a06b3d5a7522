use clap::Parser;
use encoding_rs::Encoding;
use fightcore::api::{parse_config, simulate_fight_many, FightConfig};
use std::{fs, path::PathBuf};
use tracing::info;

const DEFAULT_ENEMY: &str = "goblin";
const DEFAULT_SEED: u64 = 12345;

#[derive(Parser)]
#[command(name = "simulate-vs")]
#[command(about = "Monte Carlo sim: many fights vs one enemy type")]
struct Args {
    /// Enemy type; overrides the config's enemy (goblin without a config)
    #[arg(long)]
    enemy: Option<String>,

    /// Optional fight config (YAML or JSON, BOM tolerated)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enemy level
    #[arg(long)]
    level: Option<u32>,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Safety cap on rounds per trial
    #[arg(long)]
    max_rounds: Option<u32>,

    /// RNG base seed (trial i uses seed+i); overrides the config's seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn read_text_auto(path: &std::path::Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut cfg = match &args.config {
        Some(path) => parse_config(&read_text_auto(path)?, path)?,
        None => {
            let mut cfg = FightConfig::new(DEFAULT_ENEMY);
            cfg.seed = DEFAULT_SEED;
            cfg
        }
    };
    if let Some(enemy) = &args.enemy {
        cfg.enemy = enemy.clone();
    }
    if let Some(level) = args.level {
        cfg.enemy_level = level;
    }
    if let Some(max_rounds) = args.max_rounds {
        cfg.max_rounds = max_rounds;
    }
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }

    let summary = simulate_fight_many(&cfg, args.trials)?;
    info!(
        enemy = %cfg.enemy,
        seed = cfg.seed,
        trials = summary.trials,
        win_rate = summary.win_rate,
        "simulation finished"
    );
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("-----------------------------");
    println!("trials:             {}", summary.trials);
    println!("enemy:              {} (L{})", cfg.enemy, cfg.enemy_level);
    println!("character:          {} (HP {})", cfg.character.name, cfg.character.max_hp);
    println!();
    println!("win rate:           {:.1}%", summary.win_rate * 100.0);
    println!("victories:          {}", summary.victories);
    println!("defeats:            {}", summary.defeats);
    println!("fled:               {}", summary.fled);
    println!("stalemates:         {}", summary.stalemates);
    println!("avg rounds:         {:.2}", summary.average_rounds);

    Ok(())
}
