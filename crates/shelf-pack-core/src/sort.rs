use std::cmp::Ordering;

use crate::config::SortOrder;
use crate::model::Item;

/// Taller items first.
pub fn compare_height_desc(a: &Item, b: &Item) -> Ordering {
    b.height.cmp(&a.height)
}

/// Returns `(input_index, item)` pairs in packing order.
///
/// The sort is stable, so equal keys keep their input order and output is reproducible.
pub fn sort_items(items: &[Item], order: SortOrder) -> Vec<(usize, Item)> {
    let mut out: Vec<(usize, Item)> = items.iter().copied().enumerate().collect();
    match order {
        SortOrder::None => {}
        SortOrder::HeightDesc => out.sort_by(|a, b| compare_height_desc(&a.1, &b.1)),
        SortOrder::AreaDesc => out.sort_by(|a, b| {
            b.1.area()
                .cmp(&a.1.area())
                .then_with(|| compare_height_desc(&a.1, &b.1))
        }),
        SortOrder::WidthDesc => out.sort_by(|a, b| {
            b.1.width
                .cmp(&a.1.width)
                .then_with(|| compare_height_desc(&a.1, &b.1))
        }),
    }
    out
}
