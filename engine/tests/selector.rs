use fightcore::{select_action, CombatError, Dice, WeightedAction};

fn table() -> Vec<WeightedAction> {
    vec![
        WeightedAction::new("a", 1),
        WeightedAction::new("b", 2),
        WeightedAction::new("c", 3),
    ]
}

#[test]
fn boundary_draws_pick_by_cumulative_weight() {
    // total 6: draw 0 -> a, 1..=2 -> b, 3..=5 -> c
    let expected = ["a", "b", "b", "c", "c", "c"];
    for (draw, want) in expected.iter().enumerate() {
        let mut dice = Dice::from_scripted(vec![draw as u32]);
        assert_eq!(select_action(&mut dice, &table()), Ok(*want), "draw {}", draw);
    }
}

#[test]
fn zero_weight_entries_are_never_picked() {
    let table = vec![
        WeightedAction::new("never", 0),
        WeightedAction::new("always", 4),
    ];
    for draw in 0..4 {
        let mut dice = Dice::from_scripted(vec![draw]);
        assert_eq!(select_action(&mut dice, &table), Ok("always"));
    }
}

#[test]
fn empty_or_all_zero_table_is_an_error() {
    let mut dice = Dice::from_seed(1);
    assert_eq!(
        select_action(&mut dice, &[]),
        Err(CombatError::InvalidActionSelection)
    );
    let zeros = vec![WeightedAction::new("a", 0), WeightedAction::new("b", 0)];
    assert_eq!(
        select_action(&mut dice, &zeros),
        Err(CombatError::InvalidActionSelection)
    );
}

#[test]
fn seeded_selection_is_reproducible_and_roughly_weighted() {
    let mut first = Dice::from_seed(77);
    let mut second = Dice::from_seed(77);
    let mut counts = [0u32; 3];
    for _ in 0..600 {
        let a = select_action(&mut first, &table()).expect("pick");
        let b = select_action(&mut second, &table()).expect("pick");
        assert_eq!(a, b);
        match a {
            "a" => counts[0] += 1,
            "b" => counts[1] += 1,
            _ => counts[2] += 1,
        }
    }
    assert!(counts[0] < counts[1] && counts[1] < counts[2], "{:?}", counts);
}
