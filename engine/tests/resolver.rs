use fightcore::{
    resolve_attack, AttackOutcome, AttackProperties, Combatant, Dice, Hit, Side, StatBlock,
};

fn fighter(stats: StatBlock) -> Combatant {
    Combatant::new("Fighter", Side::Character, 1, 100, stats)
}

fn target(stats: StatBlock) -> Combatant {
    Combatant::new("Dummy", Side::Enemy, 1, 15, stats)
}

fn plain_attack(attack: i32) -> StatBlock {
    StatBlock {
        attack,
        ..StatBlock::default()
    }
}

#[test]
fn guaranteed_hit_deals_base_damage() {
    let attacker = fighter(plain_attack(20));
    let mut defender = target(StatBlock::default());
    let mut dice = Dice::from_scripted(vec![0]);

    let outcome = resolve_attack(&mut dice, &attacker, &defender, AttackProperties::IS_ATTACK);
    assert_eq!(outcome, AttackOutcome::Hit(Hit { damage: 20, crit: false }));

    // the resolver never touches HP
    assert_eq!(defender.hp(), 15);
    if let AttackOutcome::Hit(hit) = outcome {
        defender.decrease_hp(hit.damage as i32);
    }
    assert_eq!(defender.hp(), 0);
    assert!(defender.is_defeated());
}

#[test]
fn evasion_gap_dodges() {
    let attacker = fighter(plain_attack(20));
    let defender = target(StatBlock {
        evasion: 200,
        ..StatBlock::default()
    });
    // dodge capped at 75%: 10 dodges, 80 does not
    let mut dice = Dice::from_scripted(vec![10]);
    assert_eq!(
        resolve_attack(&mut dice, &attacker, &defender, AttackProperties::IS_ATTACK),
        AttackOutcome::Dodged
    );
    let mut dice = Dice::from_scripted(vec![80, 0, 0]);
    assert!(matches!(
        resolve_attack(&mut dice, &attacker, &defender, AttackProperties::IS_ATTACK),
        AttackOutcome::Hit(_)
    ));
}

#[test]
fn undodgeable_skips_the_dodge_roll() {
    let attacker = fighter(plain_attack(20));
    let defender = target(StatBlock {
        evasion: 200,
        ..StatBlock::default()
    });
    let mut dice = Dice::from_scripted(vec![0]);
    let props = AttackProperties::IS_ATTACK | AttackProperties::UNDODGEABLE;
    assert_eq!(
        resolve_attack(&mut dice, &attacker, &defender, props),
        AttackOutcome::Hit(Hit { damage: 20, crit: false })
    );
}

#[test]
fn certain_miss() {
    let attacker = fighter(StatBlock {
        attack: 20,
        miss_chance: 100,
        ..StatBlock::default()
    });
    let defender = target(StatBlock::default());
    let mut dice = Dice::from_scripted(vec![99]);
    assert_eq!(
        resolve_attack(&mut dice, &attacker, &defender, AttackProperties::IS_ATTACK),
        AttackOutcome::Missed
    );
}

#[test]
fn defence_reduces_and_piercing_ignores_it() {
    let attacker = fighter(plain_attack(20));
    let defender = target(StatBlock {
        defence: 100,
        ..StatBlock::default()
    });
    let mut dice = Dice::from_scripted(vec![0]);
    assert_eq!(
        resolve_attack(&mut dice, &attacker, &defender, AttackProperties::IS_ATTACK),
        AttackOutcome::Hit(Hit { damage: 10, crit: false })
    );
    let props = AttackProperties::IS_ATTACK | AttackProperties::PIERCING;
    assert_eq!(
        resolve_attack(&mut dice, &attacker, &defender, props),
        AttackOutcome::Hit(Hit { damage: 20, crit: false })
    );
}

#[test]
fn crit_multiplies_by_one_and_a_half() {
    let attacker = fighter(StatBlock {
        attack: 20,
        crit_chance: 100,
        ..StatBlock::default()
    });
    let defender = target(StatBlock::default());
    let mut dice = Dice::from_scripted(vec![0]);
    assert_eq!(
        resolve_attack(&mut dice, &attacker, &defender, AttackProperties::IS_ATTACK),
        AttackOutcome::Hit(Hit { damage: 30, crit: true })
    );
}

#[test]
fn fractional_damage_rounds_up() {
    // 7 * 100 / 150 = 4.67
    let attacker = fighter(plain_attack(7));
    let defender = target(StatBlock {
        defence: 50,
        ..StatBlock::default()
    });
    let mut dice = Dice::from_scripted(vec![0]);
    assert_eq!(
        resolve_attack(&mut dice, &attacker, &defender, AttackProperties::IS_ATTACK),
        AttackOutcome::Hit(Hit { damage: 5, crit: false })
    );
}

#[test]
fn zero_attack_lands_for_nothing() {
    let attacker = fighter(StatBlock::default());
    let defender = target(StatBlock::default());
    let mut dice = Dice::from_scripted(vec![0]);
    assert_eq!(
        resolve_attack(&mut dice, &attacker, &defender, AttackProperties::IS_ATTACK),
        AttackOutcome::Hit(Hit { damage: 0, crit: false })
    );
}

#[test]
fn variance_stays_inside_its_band() {
    let attacker = fighter(StatBlock {
        attack: 20,
        variance: 10,
        ..StatBlock::default()
    });
    let defender = target(StatBlock::default());
    for roll in 0..21 {
        // dodge, miss, variance, crit
        let mut dice = Dice::from_scripted(vec![99, 99, roll, 99]);
        match resolve_attack(&mut dice, &attacker, &defender, AttackProperties::IS_ATTACK) {
            AttackOutcome::Hit(hit) => {
                assert!((18..=22).contains(&hit.damage), "roll {} gave {}", roll, hit.damage);
                assert!(!hit.crit);
            }
            other => panic!("expected a hit, got {:?}", other),
        }
    }
}

#[test]
fn chilled_defender_is_easier_to_hit() {
    use fightcore::{apply_status, StatusKind, StatusParams};

    let attacker = fighter(plain_attack(20));
    let mut defender = target(StatBlock {
        evasion: 20,
        ..StatBlock::default()
    });
    apply_status(
        &mut defender,
        StatusKind::Chilled,
        StatusParams::new(StatusKind::Chilled, "test", 1),
    );
    assert_eq!(defender.effective_stats().evasion, 5);

    // 10 would dodge at 20% evasion, not at 5%
    let mut dice = Dice::from_scripted(vec![10, 99, 99]);
    assert!(matches!(
        resolve_attack(&mut dice, &attacker, &defender, AttackProperties::IS_ATTACK),
        AttackOutcome::Hit(_)
    ));
}
