//! Core library for packing rectangles onto fixed-width shelves.
//!
//! - Algorithms: Next-Fit and First-Fit shelf allocation (NFDH / FFDH when height-sorted)
//! - Pipeline: `pack_items` validates, sorts and allocates, returning a `PackReport`
//! - Data model is serde-serializable; a JSON exporter and a plain-text item reader are included.
//!
//! Quick example:
//! ```
//! use shelf_pack_core::prelude::*;
//! # fn main() -> Result<(), shelf_pack_core::ShelfPackError> {
//! let items = vec![Item::new(60, 10), Item::new(50, 8), Item::new(50, 6), Item::new(40, 12)];
//! let cfg = ShelfConfig::builder()
//!     .strip_width(100)
//!     .strategy(ShelfPolicy::NextFit)
//!     .build();
//! let report = pack_items(&items, &cfg)?;
//! assert_eq!(report.total_height, 20);
//! print!("{}", report);
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod model;
pub mod packer;
pub mod pipeline;
pub mod report;
pub mod sort;

pub use config::*;
pub use error::*;
pub use export::*;
pub use input::*;
pub use model::*;
pub use packer::*;
pub use pipeline::*;
pub use report::*;
pub use sort::*;

/// Convenience prelude for common types and functions.
/// Importing `shelf_pack_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{ShelfConfig, ShelfConfigBuilder, ShelfPolicy, SortOrder};
    pub use crate::error::{ItemFault, ShelfPackError};
    pub use crate::model::{Item, Placement, Shelf};
    pub use crate::packer::{FirstFitAllocator, NextFitAllocator, ShelfAllocator};
    pub use crate::report::{PackReport, PackStats, ShelfRow};
    pub use crate::{StrategyComparison, compare_strategies, pack_items, pack_with, sort_items};
}
