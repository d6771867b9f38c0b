use shelf_pack_core::prelude::*;
use shelf_pack_core::validate_items;

#[test]
fn zero_strip_width_is_rejected() {
    let cfg = ShelfConfig {
        strip_width: 0,
        ..Default::default()
    };
    match cfg.validate() {
        Err(ShelfPackError::InvalidConfig(msg)) => assert!(msg.contains("strip_width")),
        other => panic!("Expected InvalidConfig error, got {:?}", other),
    }
}

#[test]
fn zero_limits_are_rejected() {
    let cfg = ShelfConfig::builder().max_shelves(0).build();
    assert!(matches!(
        cfg.validate(),
        Err(ShelfPackError::InvalidConfig(msg)) if msg.contains("max_shelves")
    ));
    let cfg = ShelfConfig::builder().max_items(0).build();
    assert!(matches!(
        cfg.validate(),
        Err(ShelfPackError::InvalidConfig(msg)) if msg.contains("max_items")
    ));
}

#[test]
fn defaults_match_classic_constants() {
    let cfg = ShelfConfig::default();
    assert_eq!(cfg.strip_width, 100);
    assert_eq!(cfg.max_shelves, 10);
    assert_eq!(cfg.max_items, 100);
    assert_eq!(cfg.sort_order, SortOrder::HeightDesc);
    assert!(cfg.validate().is_ok());
}

#[test]
fn zero_sized_item_reports_its_index() {
    let items = vec![Item::new(10, 10), Item::new(10, 10), Item::new(0, 5)];
    match pack_items(&items, &ShelfConfig::default()) {
        Err(ShelfPackError::InvalidItem {
            index,
            width,
            height,
            reason,
        }) => {
            assert_eq!(index, 2);
            assert_eq!((width, height), (0, 5));
            assert_eq!(reason, ItemFault::NonPositive);
        }
        other => panic!("Expected InvalidItem error, got {:?}", other),
    }
}

#[test]
fn item_wider_than_strip_is_rejected_up_front() {
    let items = vec![Item::new(10, 10), Item::new(101, 1)];
    let err = pack_items(&items, &ShelfConfig::default()).unwrap_err();
    match err {
        ShelfPackError::InvalidItem { index, reason, .. } => {
            assert_eq!(index, 1);
            assert_eq!(reason, ItemFault::TooWide { strip_width: 100 });
        }
        other => panic!("Expected InvalidItem error, got {:?}", other),
    }
}

#[test]
fn item_exactly_strip_width_is_fine() {
    let report = pack_items(&[Item::new(100, 4)], &ShelfConfig::default()).expect("pack");
    assert_eq!(report.shelves[0].used_width, 100);
}

#[test]
fn too_many_items() {
    let cfg = ShelfConfig::builder().max_items(3).build();
    let items = vec![Item::new(1, 1); 4];
    match validate_items(&items, &cfg) {
        Err(ShelfPackError::TooManyItems { count, max }) => {
            assert_eq!(count, 4);
            assert_eq!(max, 3);
        }
        other => panic!("Expected TooManyItems error, got {:?}", other),
    }
}

#[test]
fn invalid_config_wins_over_invalid_items() {
    let cfg = ShelfConfig::builder().strip_width(0).build();
    let err = pack_items(&[Item::new(0, 0)], &cfg).unwrap_err();
    assert!(matches!(err, ShelfPackError::InvalidConfig(_)));
}

#[test]
fn error_messages_carry_context() {
    let err = pack_items(&[Item::new(120, 3)], &ShelfConfig::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid item #0 (120x3): width exceeds strip width 100"
    );
}

#[test]
fn config_deserializes_with_defaults() {
    let cfg: ShelfConfig =
        serde_json::from_str(r#"{"strip_width": 50, "strategy": "next_fit"}"#).unwrap();
    assert_eq!(cfg.strip_width, 50);
    assert_eq!(cfg.strategy, ShelfPolicy::NextFit);
    assert_eq!(cfg.max_shelves, 10);
    assert_eq!(cfg.sort_order, SortOrder::HeightDesc);
}

#[test]
fn policy_parses_common_spellings() {
    for s in ["next-fit", "NextFit", "nf", "NFDH"] {
        assert_eq!(s.parse::<ShelfPolicy>(), Ok(ShelfPolicy::NextFit), "{}", s);
    }
    for s in ["first-fit", "first_fit", "ff", "ffdh"] {
        assert_eq!(s.parse::<ShelfPolicy>(), Ok(ShelfPolicy::FirstFit), "{}", s);
    }
    assert!("best-fit".parse::<ShelfPolicy>().is_err());
    assert_eq!(ShelfPolicy::NextFit.to_string(), "next-fit");
}
