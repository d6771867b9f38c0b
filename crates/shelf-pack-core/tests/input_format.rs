use shelf_pack_core::prelude::*;
use shelf_pack_core::{parse_items, read_items};

#[test]
fn parses_generator_output() {
    let text = "Given width: 100\nNumber of rectangles: 3\nWidth\tHeight\n60\t10\n50\t8\n40\t12\n";
    let list = parse_items(text).expect("parse");
    assert_eq!(list.given_width, Some(100));
    assert_eq!(
        list.items,
        vec![Item::new(60, 10), Item::new(50, 8), Item::new(40, 12)]
    );
}

#[test]
fn bare_pairs_with_comments_and_blank_lines() {
    let text = "# two items\n\n  10 20\n30   40\n";
    let list = parse_items(text).expect("parse");
    assert_eq!(list.given_width, None);
    assert_eq!(list.items, vec![Item::new(10, 20), Item::new(30, 40)]);
}

#[test]
fn negative_dimension_is_an_invalid_item() {
    let text = "10 10\n5 -3\n";
    match parse_items(text) {
        Err(ShelfPackError::InvalidItem {
            index,
            width,
            height,
            reason,
        }) => {
            assert_eq!(index, 1);
            assert_eq!((width, height), (5, -3));
            assert_eq!(reason, ItemFault::NonPositive);
        }
        other => panic!("Expected InvalidItem error, got {:?}", other),
    }
}

#[test]
fn malformed_line_reports_line_number() {
    let text = "Given width: 100\n10 10\n10 ten\n";
    match parse_items(text) {
        Err(ShelfPackError::Parse { line, message }) => {
            assert_eq!(line, 3);
            assert!(message.contains("ten"), "{}", message);
        }
        other => panic!("Expected Parse error, got {:?}", other),
    }
}

#[test]
fn wrong_field_count_is_rejected() {
    assert!(matches!(
        parse_items("10 10 10\n"),
        Err(ShelfPackError::Parse { line: 1, .. })
    ));
}

#[test]
fn declared_count_must_match() {
    let text = "Number of rectangles: 3\n1 1\n2 2\n";
    match parse_items(text) {
        Err(ShelfPackError::Parse { line, message }) => {
            assert_eq!(line, 1);
            assert!(message.contains("declared 3"), "{}", message);
        }
        other => panic!("Expected Parse error, got {:?}", other),
    }
}

#[test]
fn unknown_header_is_rejected() {
    assert!(matches!(
        parse_items("Bin height: 4\n"),
        Err(ShelfPackError::Parse { line: 1, .. })
    ));
}

#[test]
fn zero_given_width_is_rejected() {
    assert!(matches!(
        parse_items("Given width: 0\n"),
        Err(ShelfPackError::Parse { .. })
    ));
}

#[test]
fn reads_from_file() {
    let path = std::env::temp_dir().join(format!("shelf_pack_input_{}.txt", std::process::id()));
    std::fs::write(&path, "Given width: 50\nNumber of rectangles: 2\nWidth\tHeight\n25\t3\n25\t4\n")
        .unwrap();
    let list = read_items(&path).expect("read");
    std::fs::remove_file(&path).ok();
    assert_eq!(list.given_width, Some(50));

    let cfg = ShelfConfig::builder()
        .strip_width(list.given_width.unwrap())
        .build();
    let report = pack_items(&list.items, &cfg).expect("pack");
    assert_eq!(report.shelves.len(), 1);
    assert_eq!(report.total_height, 4);
}

#[test]
fn missing_file_is_io_error() {
    let err = read_items("/definitely/not/here.txt").unwrap_err();
    assert!(matches!(err, ShelfPackError::Io(_)));
}
