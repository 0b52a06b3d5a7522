use fightcore::status::MAX_STACKS;
use fightcore::{
    apply_status, clear_status, tick_statuses, Combatant, Side, StatBlock, StatusKind, StatusParams,
};

fn dummy(hp: i32) -> Combatant {
    Combatant::new(
        "Dummy",
        Side::Enemy,
        1,
        hp,
        StatBlock {
            accuracy: 30,
            evasion: 30,
            ..StatBlock::default()
        },
    )
}

fn params(kind: StatusKind, potency: i32) -> StatusParams {
    StatusParams::new(kind, "test", potency)
}

#[test]
fn burn_ticks_then_expires() {
    let mut target = dummy(100);
    let msgs = apply_status(&mut target, StatusKind::Burned, params(StatusKind::Burned, 5));
    assert_eq!(msgs, vec!["Dummy is now burning!".to_string()]);

    tick_statuses(&mut target);
    tick_statuses(&mut target);
    assert_eq!(target.hp(), 90);
    assert!(target.statuses.has(StatusKind::Burned));

    let last = tick_statuses(&mut target);
    assert_eq!(target.hp(), 85);
    assert!(!target.statuses.has(StatusKind::Burned));
    assert_eq!(last.last().map(String::as_str), Some("Dummy is no longer burning."));
}

#[test]
fn reapplying_refreshes_duration_without_stacking() {
    let mut target = dummy(100);
    apply_status(&mut target, StatusKind::Burned, params(StatusKind::Burned, 2));
    tick_statuses(&mut target);
    let msgs = apply_status(&mut target, StatusKind::Burned, params(StatusKind::Burned, 4));
    assert_eq!(msgs, vec!["Dummy is burning again.".to_string()]);

    let effect = target.statuses.get(StatusKind::Burned).expect("still burning");
    assert_eq!(effect.stacks, 1);
    assert_eq!(effect.potency, 4);
    assert_eq!(target.statuses.len(), 1);
}

#[test]
fn poison_stacks_up_to_the_cap() {
    let mut target = dummy(200);
    for _ in 0..(MAX_STACKS + 2) {
        apply_status(&mut target, StatusKind::Poisoned, params(StatusKind::Poisoned, 2));
    }
    assert_eq!(
        target.statuses.get(StatusKind::Poisoned).map(|e| e.stacks),
        Some(MAX_STACKS)
    );

    tick_statuses(&mut target);
    assert_eq!(target.hp(), 200 - 2 * MAX_STACKS as i32);
}

#[test]
fn stat_penalties_apply_while_active() {
    let mut target = dummy(50);
    apply_status(&mut target, StatusKind::Chilled, params(StatusKind::Chilled, 0));
    apply_status(&mut target, StatusKind::Dazed, params(StatusKind::Dazed, 0));

    let stats = target.effective_stats();
    assert_eq!(stats.evasion, 15);
    assert_eq!(stats.accuracy, 5);
    // base block untouched
    assert_eq!(target.stats.evasion, 30);

    tick_statuses(&mut target);
    tick_statuses(&mut target);
    assert!(target.statuses.is_empty());
    assert_eq!(target.effective_stats(), target.stats);
}

#[test]
fn regeneration_is_capped_at_max_hp() {
    let mut target = dummy(40);
    target.decrease_hp(3);
    apply_status(
        &mut target,
        StatusKind::Regenerating,
        params(StatusKind::Regenerating, 10),
    );
    let msgs = tick_statuses(&mut target);
    assert_eq!(target.hp(), 40);
    assert_eq!(msgs[0], "Dummy regenerates *3* HP.");
}

#[test]
fn ticking_stops_once_defeated() {
    let mut target = dummy(5);
    apply_status(&mut target, StatusKind::Burned, params(StatusKind::Burned, 10));
    apply_status(
        &mut target,
        StatusKind::Regenerating,
        params(StatusKind::Regenerating, 10),
    );
    tick_statuses(&mut target);
    assert!(target.is_defeated());
    assert_eq!(target.hp(), 0);
}

#[test]
fn indefinite_statuses_never_expire() {
    let mut target = dummy(1000);
    apply_status(
        &mut target,
        StatusKind::Burned,
        params(StatusKind::Burned, 1).indefinite(),
    );
    for _ in 0..20 {
        tick_statuses(&mut target);
    }
    assert!(target.statuses.has(StatusKind::Burned));
    assert_eq!(target.hp(), 980);

    assert!(clear_status(&mut target, StatusKind::Burned));
    assert!(!clear_status(&mut target, StatusKind::Burned));
}

#[test]
fn explicit_duration_overrides_default() {
    let mut target = dummy(100);
    apply_status(
        &mut target,
        StatusKind::Dazed,
        params(StatusKind::Dazed, 0).rounds(1),
    );
    tick_statuses(&mut target);
    assert!(!target.statuses.has(StatusKind::Dazed));
}
