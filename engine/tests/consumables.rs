use fightcore::{
    apply_status, consumable_by_id, Combatant, Consumable, Ledger, Progression, Side, StatBlock,
    StatKind, StatusKind, StatusParams,
};

fn hero() -> Combatant {
    Combatant::new("Hero", Side::Character, 1, 100, StatBlock::default())
}

#[test]
fn lookup_by_inventory_key() {
    for id in ["health_potion", "mana_potion", "antidote"] {
        let item = consumable_by_id(id).expect("known item");
        assert_eq!(item.id(), id);
    }
    assert!(consumable_by_id("moondrop").is_none());
}

#[test]
fn health_potion_needs_missing_hp() {
    let potion = consumable_by_id("health_potion").expect("potion");
    let mut c = hero();
    assert!(!potion.can_be_used(&c));
    c.decrease_hp(70);
    assert!(potion.can_be_used(&c));

    let mut ledger = Ledger::with_items([("health_potion", 2)]);
    let messages = potion.consume(&mut c, &mut ledger);
    assert_eq!(c.hp(), 80);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("*50*"));
    assert_eq!(ledger.item_count("health_potion"), 1);
    assert_eq!(ledger.stat(StatKind::ItemsConsumed, Some("health_potion")), 1);
}

#[test]
fn mana_potion_needs_a_mana_pool() {
    let potion = consumable_by_id("mana_potion").expect("potion");
    let plain = hero();
    assert!(!potion.can_be_used(&plain));

    let mut caster = hero().with_mana(30);
    assert!(!potion.can_be_used(&caster));
    assert!(caster.spend_mp(25));
    assert!(potion.can_be_used(&caster));
    potion.apply(&mut caster);
    assert_eq!(caster.mp(), 25);
}

#[test]
fn antidote_clears_poison_only() {
    let antidote = consumable_by_id("antidote").expect("antidote");
    let mut c = hero();
    assert!(!antidote.can_be_used(&c));

    apply_status(
        &mut c,
        StatusKind::Poisoned,
        StatusParams::new(StatusKind::Poisoned, "Viper", 3),
    );
    apply_status(
        &mut c,
        StatusKind::Burned,
        StatusParams::new(StatusKind::Burned, "Imp", 2),
    );
    assert!(antidote.can_be_used(&c));

    let mut ledger = Ledger::default();
    ledger.add_item("antidote", 1);
    antidote.consume(&mut c, &mut ledger);
    assert!(!c.statuses.has(StatusKind::Poisoned));
    assert!(c.statuses.has(StatusKind::Burned));
    assert!(!ledger.has_item("antidote"));
}
