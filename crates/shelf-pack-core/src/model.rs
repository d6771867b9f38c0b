use serde::{Deserialize, Serialize};

use crate::error::{ItemFault, Result, ShelfPackError};

/// Axis-aligned rectangle to be packed. Never mutated once created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Item {
    pub width: u32,
    pub height: u32,
}

impl Item {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }

    /// Checks positivity and that the item can fit on an empty shelf.
    /// `index` is the item's position in the input batch and is echoed back in the error.
    pub fn validate(&self, index: usize, strip_width: u32) -> Result<()> {
        let reason = if self.width == 0 || self.height == 0 {
            ItemFault::NonPositive
        } else if self.width > strip_width {
            ItemFault::TooWide { strip_width }
        } else {
            return Ok(());
        };
        Err(ShelfPackError::InvalidItem {
            index,
            width: self.width as i64,
            height: self.height as i64,
            reason,
        })
    }
}

impl From<(u32, u32)> for Item {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Where an item ended up.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    /// Position of the item in the original (unsorted) input.
    pub item: usize,
    /// Index of the shelf in creation order.
    pub shelf: usize,
    /// Left offset on the shelf.
    pub x: u32,
    pub width: u32,
    pub height: u32,
}

/// A horizontal row of fixed maximum width. Its height contribution is its tallest item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shelf {
    pub index: usize,
    pub used_width: u32,
    pub max_height: u32,
    pub placements: Vec<Placement>,
}

impl Shelf {
    /// Opens an empty shelf (`used_width = 0`, `max_height = 0`).
    pub fn open(index: usize) -> Self {
        Self {
            index,
            used_width: 0,
            max_height: 0,
            placements: Vec::new(),
        }
    }

    pub fn fits(&self, item: &Item, strip_width: u32) -> bool {
        item.width <= self.remaining(strip_width)
    }

    pub fn remaining(&self, strip_width: u32) -> u32 {
        strip_width.saturating_sub(self.used_width)
    }

    /// Appends `item` at the current right edge. Callers check `fits` first.
    pub fn place(&mut self, item_index: usize, item: &Item) -> Placement {
        let placement = Placement {
            item: item_index,
            shelf: self.index,
            x: self.used_width,
            width: item.width,
            height: item.height,
        };
        self.used_width += item.width;
        self.max_height = self.max_height.max(item.height);
        self.placements.push(placement);
        placement
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
