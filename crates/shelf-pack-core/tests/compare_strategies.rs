use shelf_pack_core::prelude::*;

fn divergent_items() -> Vec<Item> {
    [(60, 10), (50, 8), (50, 6), (40, 12), (90, 7), (10, 5)]
        .into_iter()
        .map(Item::from)
        .collect()
}

#[test]
fn both_runs_succeed_and_first_fit_is_best() {
    let cmp = compare_strategies(&divergent_items(), &ShelfConfig::default()).expect("compare");
    let nf = cmp.next_fit.as_ref().expect("next-fit");
    let ff = cmp.first_fit.as_ref().expect("first-fit");
    assert_eq!(nf.total_height, 33);
    assert_eq!(ff.total_height, 27);
    let best = cmp.best().unwrap();
    assert_eq!(best.policy, ShelfPolicy::FirstFit);
    assert!(cmp.get(ShelfPolicy::NextFit).is_ok());
}

#[test]
fn capacity_failure_is_per_strategy() {
    let cfg = ShelfConfig::builder().max_shelves(3).build();
    let cmp = compare_strategies(&divergent_items(), &cfg).expect("compare");
    assert!(matches!(
        cmp.next_fit,
        Err(ShelfPackError::CapacityExceeded { placed: 4, total: 6, .. })
    ));
    assert_eq!(cmp.first_fit.as_ref().unwrap().shelves.len(), 3);
    assert_eq!(cmp.best().unwrap().policy, ShelfPolicy::FirstFit);
}

#[test]
fn tie_goes_to_first_fit() {
    let items = vec![Item::new(60, 10), Item::new(50, 8)];
    let cmp = compare_strategies(&items, &ShelfConfig::default()).unwrap();
    assert_eq!(
        cmp.next_fit.as_ref().unwrap().total_height,
        cmp.first_fit.as_ref().unwrap().total_height
    );
    assert_eq!(cmp.best().unwrap().policy, ShelfPolicy::FirstFit);
}

#[test]
fn validation_errors_are_returned_once() {
    let err = compare_strategies(&[Item::new(0, 1)], &ShelfConfig::default()).unwrap_err();
    assert!(matches!(err, ShelfPackError::InvalidItem { index: 0, .. }));
}

#[test]
fn both_fail_gives_no_best() {
    let cfg = ShelfConfig::builder().max_shelves(1).build();
    let cmp = compare_strategies(&divergent_items(), &cfg).unwrap();
    assert!(cmp.next_fit.is_err());
    assert!(cmp.first_fit.is_err());
    assert!(cmp.best().is_none());
}

#[test]
fn parallel_flag_gives_same_results() {
    let seq = compare_strategies(&divergent_items(), &ShelfConfig::default()).unwrap();
    let cfg = ShelfConfig::builder().parallel(true).build();
    let par = compare_strategies(&divergent_items(), &cfg).unwrap();
    assert_eq!(
        seq.next_fit.as_ref().unwrap(),
        par.next_fit.as_ref().unwrap()
    );
    assert_eq!(
        seq.first_fit.as_ref().unwrap(),
        par.first_fit.as_ref().unwrap()
    );
}
