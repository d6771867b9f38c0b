use crate::config::{ShelfConfig, ShelfPolicy};
use crate::model::{Item, Placement, Shelf};

pub mod first_fit;
pub mod next_fit;

pub use first_fit::FirstFitAllocator;
pub use next_fit::NextFitAllocator;

/// An allocator places items onto shelves of a fixed strip width.
///
/// Implementations must never let a shelf's `used_width` exceed the strip width and
/// must never open more than the configured number of shelves.
/// `pack` returns `None` when the item needs a new shelf but the limit is reached.
pub trait ShelfAllocator {
    fn policy(&self) -> ShelfPolicy;
    fn can_pack(&self, item: &Item) -> bool;
    fn pack(&mut self, index: usize, item: &Item) -> Option<Placement>;
    fn shelves(&self) -> &[Shelf];
    /// Marks a successful run as finished. Later `pack` calls may be refused.
    fn finish(&mut self) {}
    fn into_shelves(self: Box<Self>) -> Vec<Shelf>;
}

/// Builds the allocator for `policy` with the strip width and shelf limit from `cfg`.
pub fn allocator_for(policy: ShelfPolicy, cfg: &ShelfConfig) -> Box<dyn ShelfAllocator> {
    match policy {
        ShelfPolicy::NextFit => Box::new(NextFitAllocator::new(cfg.strip_width, cfg.max_shelves)),
        ShelfPolicy::FirstFit => {
            Box::new(FirstFitAllocator::new(cfg.strip_width, cfg.max_shelves))
        }
    }
}
