use fightcore::{Combatant, Composition, FlagKey, FlagStore, FlagValue, Side, StatBlock};

const TURNS_A: FlagKey = FlagKey::new("alpha", "turns");
const TURNS_B: FlagKey = FlagKey::new("beta", "turns");

#[test]
fn namespaced_keys_do_not_collide() {
    let mut flags = FlagStore::new();
    flags.set_countdown(TURNS_A, 3);
    flags.set(TURNS_B);

    assert_eq!(flags.countdown(&TURNS_A), Some(3));
    assert_eq!(flags.countdown(&TURNS_B), None);
    assert_eq!(flags.get(&TURNS_B, FlagValue::Countdown(9)), FlagValue::Set);
    assert_eq!(TURNS_A.to_string(), "alpha.turns");

    assert!(flags.clear(&TURNS_A));
    assert!(flags.has(&TURNS_B));
}

#[test]
fn get_falls_back_to_default() {
    let flags = FlagStore::new();
    assert_eq!(
        flags.get(&TURNS_A, FlagValue::Countdown(2)),
        FlagValue::Countdown(2)
    );
}

#[test]
fn decrement_removes_at_zero_and_ignores_plain_flags() {
    let mut flags = FlagStore::new();
    flags.set_countdown(TURNS_A, 2);
    flags.set(TURNS_B);

    assert_eq!(flags.decrement(&TURNS_A), Some(1));
    assert_eq!(flags.decrement(&TURNS_A), Some(0));
    assert!(!flags.has(&TURNS_A));
    assert_eq!(flags.decrement(&TURNS_A), None);

    assert_eq!(flags.decrement(&TURNS_B), None);
    assert!(flags.has(&TURNS_B));
}

#[test]
fn zero_countdown_clears() {
    let mut flags = FlagStore::new();
    flags.set(TURNS_A);
    flags.set_countdown(TURNS_A, 0);
    assert!(flags.is_empty());
}

#[test]
fn clear_module_keeps_other_namespaces() {
    let mut flags = FlagStore::new();
    flags.set(FlagKey::owned("labyrinth", "boss_defeated_minotaur"));
    flags.set(FlagKey::new("labyrinth", "hallways_completed"));
    flags.set(TURNS_B);

    flags.clear_module("labyrinth");
    assert_eq!(flags.len(), 1);
    assert!(flags.has(&TURNS_B));
}

#[test]
fn countdown_expires_after_n_post_round_calls() {
    let mut me = Combatant::new("Imp", Side::Enemy, 1, 10, StatBlock::default());
    let opponent = Combatant::new("Hero", Side::Character, 1, 10, StatBlock::default());
    let layers = Composition::new();
    me.flags.set_countdown(TURNS_A, 3);
    me.flags.set(TURNS_B);

    layers.post_round(&mut me, &opponent);
    layers.post_round(&mut me, &opponent);
    assert_eq!(me.flags.countdown(&TURNS_A), Some(1));

    layers.post_round(&mut me, &opponent);
    assert!(!me.flags.has(&TURNS_A));
    assert!(me.flags.has(&TURNS_B));
}

#[test]
fn store_serializes_as_entry_sequence() {
    let mut flags = FlagStore::new();
    flags.set_countdown(TURNS_A, 2);
    let json = serde_json::to_string(&flags).expect("serialize");
    let back: FlagStore = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back.countdown(&TURNS_A), Some(2));
}
