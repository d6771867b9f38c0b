use tracing::{debug, trace, warn};

use super::ShelfAllocator;
use crate::config::ShelfPolicy;
use crate::model::{Item, Placement, Shelf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextFitState {
    NoShelfOpen,
    /// Index of the current (most recently opened) shelf.
    ShelfOpen(usize),
    /// A new shelf was needed past the limit. Terminal.
    Exhausted,
    /// Every item was placed and the run was finished. Terminal.
    Done,
}

/// Next-Fit shelf allocation: only the current shelf is ever considered.
pub struct NextFitAllocator {
    strip_width: u32,
    max_shelves: usize,
    shelves: Vec<Shelf>,
    state: NextFitState,
}

impl NextFitAllocator {
    pub fn new(strip_width: u32, max_shelves: usize) -> Self {
        Self {
            strip_width,
            max_shelves,
            shelves: Vec::new(),
            state: NextFitState::NoShelfOpen,
        }
    }

    pub fn state(&self) -> NextFitState {
        self.state
    }

    fn open_and_place(&mut self, index: usize, item: &Item) -> Option<Placement> {
        let next = self.shelves.len();
        if next >= self.max_shelves {
            warn!(
                item = index,
                max_shelves = self.max_shelves,
                "next-fit exhausted shelves"
            );
            self.state = NextFitState::Exhausted;
            return None;
        }
        debug!(shelf = next, "open shelf");
        let mut shelf = Shelf::open(next);
        let p = shelf.place(index, item);
        self.shelves.push(shelf);
        self.state = NextFitState::ShelfOpen(next);
        Some(p)
    }
}

impl ShelfAllocator for NextFitAllocator {
    fn policy(&self) -> ShelfPolicy {
        ShelfPolicy::NextFit
    }

    fn can_pack(&self, item: &Item) -> bool {
        if item.width > self.strip_width {
            return false;
        }
        match self.state {
            NextFitState::NoShelfOpen => self.max_shelves > 0,
            NextFitState::ShelfOpen(cur) => {
                self.shelves[cur].fits(item, self.strip_width)
                    || self.shelves.len() < self.max_shelves
            }
            NextFitState::Exhausted | NextFitState::Done => false,
        }
    }

    fn pack(&mut self, index: usize, item: &Item) -> Option<Placement> {
        if item.width > self.strip_width {
            return None;
        }
        match self.state {
            NextFitState::Exhausted | NextFitState::Done => None,
            NextFitState::NoShelfOpen => self.open_and_place(index, item),
            NextFitState::ShelfOpen(cur) => {
                let shelf = &mut self.shelves[cur];
                if shelf.fits(item, self.strip_width) {
                    let p = shelf.place(index, item);
                    trace!(item = index, shelf = cur, x = p.x, "placed");
                    Some(p)
                } else {
                    // The current shelf is superseded for good.
                    self.open_and_place(index, item)
                }
            }
        }
    }

    fn shelves(&self) -> &[Shelf] {
        &self.shelves
    }

    fn finish(&mut self) {
        if self.state != NextFitState::Exhausted {
            debug!(shelves = self.shelves.len(), "next-fit done");
            self.state = NextFitState::Done;
        }
    }

    fn into_shelves(self: Box<Self>) -> Vec<Shelf> {
        self.shelves
    }
}
