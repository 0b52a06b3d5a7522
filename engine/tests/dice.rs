use fightcore::Dice;

#[test]
fn same_seed_same_sequence() {
    let mut a = Dice::from_seed(2025);
    let mut b = Dice::from_seed(2025);
    let xs: Vec<u32> = (0..32).map(|_| a.below(1000)).collect();
    let ys: Vec<u32> = (0..32).map(|_| b.below(1000)).collect();
    assert_eq!(xs, ys);
    assert!(xs.iter().all(|&x| x < 1000));
}

#[test]
fn scripted_values_cycle_modulo_bound() {
    let mut dice = Dice::from_scripted(vec![7, 105, 42]);
    assert_eq!(dice.below(10), 7);
    assert_eq!(dice.percent(), 5);
    assert_eq!(dice.below(40), 2);
    // wraps around
    assert_eq!(dice.below(10), 7);
}

#[test]
fn chance_bounds() {
    let mut dice = Dice::from_scripted(vec![0, 99]);
    assert!(!dice.chance(0));
    assert!(dice.chance(100));
    assert!(dice.chance(150));
    assert!(!dice.chance(-5));
}

#[test]
fn empty_script_draws_zero() {
    let mut dice = Dice::from_scripted(vec![]);
    assert_eq!(dice.below(6), 0);
    assert_eq!(dice.below(1), 0);
}
