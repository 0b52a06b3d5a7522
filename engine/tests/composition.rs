use fightcore::combat::base::ATTACK;
use fightcore::combat::drain_life::DRAIN_LIFE;
use fightcore::combat::furious::GET_FURIOUS;
use fightcore::combat::{BaseEnemy, DrainLife, Furious};
use fightcore::{
    ActionDescriptor, ActionName, ActionTable, AttackProperties, Behavior, Combatant, CombatError,
    Composition, Dice, Side, StatBlock, Turn, WeightedAction, WeightedTable,
};

fn base() -> BaseEnemy {
    BaseEnemy {
        kind: "dummy".to_string(),
        attack_weight: 60,
        experience: 0,
        gold: 0,
    }
}

fn pair() -> (Combatant, Combatant) {
    (
        Combatant::new("Wraith", Side::Enemy, 1, 100, StatBlock::default()),
        Combatant::new("Hero", Side::Character, 1, 100, StatBlock::default()),
    )
}

fn names(table: &WeightedTable) -> Vec<&'static str> {
    let mut names: Vec<_> = table.iter().map(|w| w.action).collect();
    names.sort_unstable();
    names
}

#[test]
fn stacking_modules_keeps_every_action_in_any_order() {
    let (me, them) = pair();
    let forward = Composition::new()
        .with(base())
        .with(DrainLife::new(40))
        .with(Furious { weight: 15 });
    let backward = Composition::new()
        .with(base())
        .with(Furious { weight: 15 })
        .with(DrainLife::new(40));

    let a = forward.weighted_actions(&me, &them);
    let b = backward.weighted_actions(&me, &them);
    assert_eq!(names(&a), vec![ATTACK, DRAIN_LIFE, GET_FURIOUS]);
    assert_eq!(names(&a), names(&b));
    assert!(forward.validate(&me, &them).is_ok());
    assert!(backward.validate(&me, &them).is_ok());
}

#[test]
fn weighted_table_keeps_declared_order() {
    let (me, them) = pair();
    let layers = Composition::new().with(base()).with(DrainLife::new(40));
    let rendered = layers
        .weighted_actions(&me, &them)
        .iter()
        .map(|w| format!("{}={}", w.action, w.weight))
        .collect::<Vec<_>>()
        .join(", ");
    insta::assert_snapshot!(rendered, @"attack=60, drain_life=40");
}

#[test]
fn zero_weight_actions_are_declared_but_not_weighted() {
    let (me, them) = pair();
    let layers = Composition::new().with(base()).with(Furious { weight: 15 });
    let table = layers.fight_actions(&me, &them);
    assert!(table.contains("furious_attack"));
    assert!(table.contains("catch_breath"));
    let weighted = layers.weighted_actions(&me, &them);
    assert!(!weighted.iter().any(|w| w.action == "furious_attack"));
}

#[test]
fn unknown_action_is_reported() {
    let (mut me, mut them) = pair();
    let layers = Composition::new().with(base());
    let mut dice = Dice::from_scripted(vec![0]);
    let mut turn = Turn {
        actor: &mut me,
        target: &mut them,
        dice: &mut dice,
    };
    assert_eq!(
        layers.execute("moonwalk", &mut turn),
        Err(CombatError::UnknownActionName("moonwalk".to_string()))
    );
}

/// Injects a weighted action nobody declared.
#[derive(Debug)]
struct Vanish;

impl Behavior for Vanish {
    fn module(&self) -> &'static str {
        "vanish"
    }

    fn weighted_actions(
        &self,
        _me: &Combatant,
        _opponent: &Combatant,
        mut table: WeightedTable,
    ) -> WeightedTable {
        table.push(WeightedAction::new("vanish", 5));
        table
    }
}

#[test]
fn undeclared_weighted_action_fails_validation() {
    let (me, them) = pair();
    let layers = Composition::new().with(base()).with(Vanish);
    assert_eq!(
        layers.validate(&me, &them),
        Err(CombatError::UnknownActionName("vanish".to_string()))
    );
}

/// Claims `attack` a second time; the first declaring layer keeps it.
#[derive(Debug)]
struct Imposter;

impl Behavior for Imposter {
    fn module(&self) -> &'static str {
        "imposter"
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

    fn perform(&self, action: ActionName, _turn: &mut Turn<'_>) -> Option<Vec<String>> {
        (action == ATTACK).then(|| vec!["imposter".to_string()])
    }
}

#[test]
fn dispatch_goes_to_the_declaring_layer() {
    let (mut me, mut them) = pair();
    me.stats.attack = 10;
    let layers = Composition::new().with(base()).with(Imposter);
    let mut dice = Dice::from_scripted(vec![0]);
    let mut turn = Turn {
        actor: &mut me,
        target: &mut them,
        dice: &mut dice,
    };
    let messages = layers.execute(ATTACK, &mut turn).expect("attack runs");
    assert_eq!(messages, vec!["Wraith attacks Hero, dealing *10* damage.".to_string()]);
    assert_eq!(them.hp(), 90);
}

#[test]
fn modules_are_listed_in_layer_order() {
    let layers = Composition::new()
        .with(base())
        .with(Furious { weight: 1 })
        .with(DrainLife::new(1));
    assert_eq!(layers.modules(), vec!["enemy", "furious", "drain_life"]);
    assert_eq!(layers.len(), 3);
}
