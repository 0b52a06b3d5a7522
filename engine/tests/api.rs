use std::path::Path;

use fightcore::api::{parse_config, simulate_fight, simulate_fight_many, FightConfig};
use fightcore::{GearSpec, PlayerCommand, StatKind};

#[test]
fn fight_api_smoke() {
    let mut cfg = FightConfig::new("goblin");
    cfg.seed = 2025;
    let res = simulate_fight(&cfg).expect("fight ran");
    assert!(res.rounds > 0);
    assert!(matches!(
        res.outcome.as_str(),
        "victory" | "defeat" | "fled" | "stalemate"
    ));
    assert!(res.log[0].starts_with("[START]"));
    assert!(res.log.last().expect("log").starts_with("[END]"));
}

#[test]
fn same_seed_same_fight() {
    let mut cfg = FightConfig::new("maze_master");
    cfg.seed = 99;
    cfg.character.stats.attack = 60;
    let a = simulate_fight(&cfg).expect("a");
    let b = simulate_fight(&cfg).expect("b");
    assert_eq!(a.log, b.log);
    assert_eq!(a.outcome, b.outcome);
}

#[test]
fn scripted_run_flees_in_one_round() {
    let mut cfg = FightConfig::new("shadow_wraith");
    cfg.commands = vec!["run".to_string()];
    let res = simulate_fight(&cfg).expect("fight ran");
    assert_eq!(res.outcome, "fled");
    assert_eq!(res.rounds, 1);
    assert_eq!(res.ledger.stat(StatKind::FightsFled, Some("shadow_wraith")), 1);
}

#[test]
fn round_cap_yields_stalemate() {
    let mut cfg = FightConfig::new("goblin");
    cfg.character.stats.attack = 0;
    cfg.character.max_hp = 100_000;
    cfg.max_rounds = 3;
    let res = simulate_fight(&cfg).expect("fight ran");
    assert_eq!(res.outcome, "stalemate");
    assert_eq!(res.rounds, 3);
}

#[test]
fn bad_command_or_enemy_is_reported() {
    let mut cfg = FightConfig::new("goblin");
    cfg.commands = vec!["dance".to_string()];
    assert!(simulate_fight(&cfg).is_err());
    assert!(simulate_fight(&FightConfig::new("dragon")).is_err());
}

#[test]
fn many_trials_add_up() {
    let mut cfg = FightConfig::new("ember_imp");
    cfg.seed = 10;
    let summary = simulate_fight_many(&cfg, 25).expect("trials");
    assert_eq!(summary.trials, 25);
    assert_eq!(
        summary.victories + summary.defeats + summary.fled + summary.stalemates,
        25
    );
    assert!(summary.average_rounds > 0.0);
    assert!((0.0..=1.0).contains(&summary.win_rate));
}

#[test]
fn yaml_config_with_gear_and_inventory() {
    let text = r#"
enemy: marsh_viper
enemy_level: 2
seed: 4
character:
  name: Ayla
  max_hp: 80
  max_mp: 12
  gear:
    - gear: heart_amulet
inventory:
  antidote: 2
commands: [attack, "use:antidote", run]
"#;
    let cfg = parse_config(text, Path::new("fight.yaml")).expect("parse");
    assert_eq!(cfg.enemy, "marsh_viper");
    assert_eq!(cfg.character.name, "Ayla");
    assert_eq!(
        cfg.character.gear,
        vec![GearSpec::HeartAmulet { hp: 10, mp_cost: 4 }]
    );
    assert_eq!(cfg.inventory.get("antidote"), Some(&2));
    assert_eq!(cfg.max_rounds, 50);
    let res = simulate_fight(&cfg).expect("fight ran");
    assert!(res.rounds <= 3);
}

#[test]
fn json_config_by_extension() {
    let text = r#"{"enemy": "frost_sprite", "seed": 3, "commands": ["attack"]}"#;
    let cfg = parse_config(text, Path::new("fight.json")).expect("parse");
    assert_eq!(cfg.enemy, "frost_sprite");
    assert_eq!(cfg.enemy_level, 1);
    assert!(parse_config(text, Path::new("fight.yaml")).is_ok());
    assert!(parse_config("enemy: [", Path::new("fight.yml")).is_err());
}

#[test]
fn player_commands_parse() {
    assert_eq!("attack".parse::<PlayerCommand>(), Ok(PlayerCommand::Attack));
    assert_eq!(" RUN ".parse::<PlayerCommand>(), Ok(PlayerCommand::Run));
    assert_eq!(
        "use:antidote".parse::<PlayerCommand>(),
        Ok(PlayerCommand::Use("antidote".to_string()))
    );
    assert!("use:".parse::<PlayerCommand>().is_err());
    assert!("dance".parse::<PlayerCommand>().is_err());
    assert_eq!(PlayerCommand::Use("mana_potion".to_string()).to_string(), "use:mana_potion");
}
