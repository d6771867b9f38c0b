use std::fmt;

use thiserror::Error;

use crate::config::ShelfPolicy;
use crate::report::PackReport;

/// Why a single input item was rejected before packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFault {
    /// Width or height is zero or negative.
    NonPositive,
    /// Width alone exceeds the strip width, so no shelf can ever hold it.
    TooWide { strip_width: u32 },
}

impl fmt::Display for ItemFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemFault::NonPositive => write!(f, "width and height must be positive"),
            ItemFault::TooWide { strip_width } => {
                write!(f, "width exceeds strip width {}", strip_width)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ShelfPackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid item #{index} ({width}x{height}): {reason}")]
    InvalidItem {
        index: usize,
        width: i64,
        height: i64,
        reason: ItemFault,
    },
    #[error("Too many items: {count} (max {max})")]
    TooManyItems { count: usize, max: usize },
    #[error(
        "{policy} ran out of shelves: placed {placed}/{total} items using all {max_shelves} shelves"
    )]
    CapacityExceeded {
        policy: ShelfPolicy,
        max_shelves: usize,
        placed: usize,
        total: usize,
        /// Shelves built before the limit was hit.
        partial: Box<PackReport>,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, ShelfPackError>;
