use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ShelfPolicy;
use crate::model::{Placement, Shelf};

/// One row of the per-shelf summary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShelfRow {
    pub index: usize,
    pub used_width: u32,
    pub max_height: u32,
}

/// Result of a packing run: the shelves actually used, in creation order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackReport {
    pub policy: ShelfPolicy,
    pub strip_width: u32,
    pub shelves: Vec<Shelf>,
    /// Sum of every shelf's `max_height`.
    pub total_height: u64,
}

impl PackReport {
    pub fn new(policy: ShelfPolicy, strip_width: u32, shelves: Vec<Shelf>) -> Self {
        let total_height = shelves.iter().map(|s| s.max_height as u64).sum();
        Self {
            policy,
            strip_width,
            shelves,
            total_height,
        }
    }

    pub fn empty(policy: ShelfPolicy, strip_width: u32) -> Self {
        Self::new(policy, strip_width, Vec::new())
    }

    pub fn rows(&self) -> Vec<ShelfRow> {
        self.shelves
            .iter()
            .map(|s| ShelfRow {
                index: s.index,
                used_width: s.used_width,
                max_height: s.max_height,
            })
            .collect()
    }

    pub fn num_items(&self) -> usize {
        self.shelves.iter().map(|s| s.placements.len()).sum()
    }

    /// All placements ordered by shelf, then left to right.
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.shelves.iter().flat_map(|s| s.placements.iter())
    }

    /// Starting `y` of each shelf when shelves are stacked in creation order.
    pub fn shelf_offsets(&self) -> Vec<u64> {
        let mut y = 0u64;
        self.shelves
            .iter()
            .map(|s| {
                let top = y;
                y += s.max_height as u64;
                top
            })
            .collect()
    }

    /// Computes packing statistics for this report.
    pub fn stats(&self) -> PackStats {
        let num_shelves = self.shelves.len();
        let mut num_items = 0;
        let mut item_area = 0u64;
        let mut used_width_sum = 0u64;
        let mut tallest_shelf = 0u32;
        for shelf in &self.shelves {
            num_items += shelf.placements.len();
            used_width_sum += shelf.used_width as u64;
            tallest_shelf = tallest_shelf.max(shelf.max_height);
            for p in &shelf.placements {
                item_area += (p.width as u64) * (p.height as u64);
            }
        }
        let strip_area = (self.strip_width as u64) * self.total_height;
        let coverage = if strip_area > 0 {
            item_area as f64 / strip_area as f64
        } else {
            0.0
        };
        let mean_fill = if num_shelves > 0 && self.strip_width > 0 {
            used_width_sum as f64 / (num_shelves as f64 * self.strip_width as f64)
        } else {
            0.0
        };
        PackStats {
            num_shelves,
            num_items,
            total_height: self.total_height,
            item_area,
            strip_area,
            coverage,
            mean_fill,
            tallest_shelf,
        }
    }
}

/// Renders the classic text form: one `Shelf {i}: Width {w}, Height {h}` line per shelf
/// (1-indexed) followed by `Height of all shelves: {total}`.
impl fmt::Display for PackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.shelves {
            writeln!(
                f,
                "Shelf {}: Width {}, Height {}",
                s.index + 1,
                s.used_width,
                s.max_height
            )?;
        }
        writeln!(f, "Height of all shelves: {}", self.total_height)
    }
}

/// Statistics about shelf packing efficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PackStats {
    pub num_shelves: usize,
    pub num_items: usize,
    pub total_height: u64,
    /// Sum of item width * height.
    pub item_area: u64,
    /// `strip_width * total_height`.
    pub strip_area: u64,
    /// item_area / strip_area (0.0 to 1.0). Higher is better.
    pub coverage: f64,
    /// Average used_width / strip_width across shelves.
    pub mean_fill: f64,
    pub tallest_shelf: u32,
}

impl PackStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Shelves: {}, Items: {}, Total Height: {}, Coverage: {:.2}%, Mean Fill: {:.2}%, Wasted Area: {}",
            self.num_shelves,
            self.num_items,
            self.total_height,
            self.coverage * 100.0,
            self.mean_fill * 100.0,
            self.wasted_area(),
        )
    }

    pub fn wasted_area(&self) -> u64 {
        self.strip_area.saturating_sub(self.item_area)
    }

    /// Returns wasted space as a percentage (0.0 to 100.0).
    pub fn waste_percentage(&self) -> f64 {
        if self.strip_area > 0 {
            (self.wasted_area() as f64 / self.strip_area as f64) * 100.0
        } else {
            0.0
        }
    }
}
