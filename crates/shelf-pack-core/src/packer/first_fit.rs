use tracing::{debug, trace, warn};

use super::ShelfAllocator;
use crate::config::ShelfPolicy;
use crate::model::{Item, Placement, Shelf};

/// First-Fit shelf allocation: the earliest-created shelf with enough remaining width wins.
pub struct FirstFitAllocator {
    strip_width: u32,
    max_shelves: usize,
    shelves: Vec<Shelf>,
}

impl FirstFitAllocator {
    pub fn new(strip_width: u32, max_shelves: usize) -> Self {
        Self {
            strip_width,
            max_shelves,
            shelves: Vec::new(),
        }
    }

    /// Index of the first shelf in creation order that can take `item`.
    fn find(&self, item: &Item) -> Option<usize> {
        self.shelves
            .iter()
            .position(|s| s.fits(item, self.strip_width))
    }
}

impl ShelfAllocator for FirstFitAllocator {
    fn policy(&self) -> ShelfPolicy {
        ShelfPolicy::FirstFit
    }

    fn can_pack(&self, item: &Item) -> bool {
        item.width <= self.strip_width
            && (self.find(item).is_some() || self.shelves.len() < self.max_shelves)
    }

    fn pack(&mut self, index: usize, item: &Item) -> Option<Placement> {
        if item.width > self.strip_width {
            return None;
        }
        if let Some(i) = self.find(item) {
            let p = self.shelves[i].place(index, item);
            trace!(item = index, shelf = i, x = p.x, "placed");
            return Some(p);
        }
        let next = self.shelves.len();
        if next >= self.max_shelves {
            warn!(
                item = index,
                max_shelves = self.max_shelves,
                "first-fit exhausted shelves"
            );
            return None;
        }
        debug!(shelf = next, "open shelf");
        let mut shelf = Shelf::open(next);
        let p = shelf.place(index, item);
        self.shelves.push(shelf);
        Some(p)
    }

    fn shelves(&self) -> &[Shelf] {
        &self.shelves
    }

    fn into_shelves(self: Box<Self>) -> Vec<Shelf> {
        self.shelves
    }
}
