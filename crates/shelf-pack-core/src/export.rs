use serde_json::{Value, json};

use crate::report::PackReport;

/// Serialize a `PackReport` as `{ shelves, totalHeight, stats, meta }`.
///
/// Each shelf carries its `y` offset in the stacked strip and its placements,
/// so consumers can draw the layout without recomputing it.
pub fn to_json(report: &PackReport) -> Value {
    let offsets = report.shelf_offsets();
    let shelves_val = report
        .shelves
        .iter()
        .zip(offsets)
        .map(|(s, y)| {
            let items: Vec<Value> = s
                .placements
                .iter()
                .map(|p| {
                    json!({
                        "item": p.item,
                        "x": p.x,
                        "y": y,
                        "w": p.width,
                        "h": p.height,
                    })
                })
                .collect();
            json!({
                "index": s.index,
                "y": y,
                "usedWidth": s.used_width,
                "maxHeight": s.max_height,
                "items": items,
            })
        })
        .collect::<Vec<_>>();
    json!({
        "shelves": shelves_val,
        "totalHeight": report.total_height,
        "stats": report.stats(),
        "meta": meta(report),
    })
}

/// Flat `{ item index -> placement }` view, keyed by the input position.
pub fn to_json_hash(report: &PackReport) -> Value {
    let offsets = report.shelf_offsets();
    let mut items = serde_json::Map::new();
    for (shelf, y) in report.shelves.iter().zip(offsets) {
        for p in &shelf.placements {
            items.insert(
                p.item.to_string(),
                json!({
                    "shelf": p.shelf,
                    "x": p.x,
                    "y": y,
                    "w": p.width,
                    "h": p.height,
                }),
            );
        }
    }
    json!({ "items": items, "totalHeight": report.total_height, "meta": meta(report) })
}

fn meta(report: &PackReport) -> Value {
    json!({
        "schemaVersion": "1",
        "app": "shelf-pack",
        "version": env!("CARGO_PKG_VERSION"),
        "policy": report.policy.as_str(),
        "stripWidth": report.strip_width,
    })
}
