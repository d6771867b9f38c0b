use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default strip width shared by every shelf.
pub const DEFAULT_STRIP_WIDTH: u32 = 100;
/// Default upper bound on the number of shelves one run may open.
pub const DEFAULT_MAX_SHELVES: usize = 10;
/// Default upper bound on the number of input items.
pub const DEFAULT_MAX_ITEMS: usize = 100;

/// Shelf selection policy.
/// Key notes:
///   - `NextFit` only looks at the most recently opened shelf (NFDH when items are height-sorted)
///   - `FirstFit` scans every open shelf in creation order (FFDH when items are height-sorted)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShelfPolicy {
    /// O(1) per item; superseded shelves are never revisited.
    NextFit,
    /// O(shelves) per item; backfills earlier shelves with spare width.
    FirstFit,
}

impl ShelfPolicy {
    pub const ALL: [ShelfPolicy; 2] = [ShelfPolicy::NextFit, ShelfPolicy::FirstFit];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShelfPolicy::NextFit => "next-fit",
            ShelfPolicy::FirstFit => "first-fit",
        }
    }
}

impl fmt::Display for ShelfPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShelfPolicy {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "next-fit" | "nextfit" | "next_fit" | "nf" | "nfdh" => Ok(Self::NextFit),
            "first-fit" | "firstfit" | "first_fit" | "ff" | "ffdh" => Ok(Self::FirstFit),
            _ => Err(()),
        }
    }
}

/// Sorting orders applied before allocation. Sorting is stable, so ties keep input order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    HeightDesc,
    AreaDesc,
    WidthDesc,
    None,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::HeightDesc => "height_desc",
            SortOrder::AreaDesc => "area_desc",
            SortOrder::WidthDesc => "width_desc",
            SortOrder::None => "none",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "height_desc" => Ok(Self::HeightDesc),
            "area_desc" => Ok(Self::AreaDesc),
            "width_desc" => Ok(Self::WidthDesc),
            "none" => Ok(Self::None),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShelfConfig {
    /// Fixed horizontal capacity of every shelf.
    #[serde(default = "default_strip_width")]
    pub strip_width: u32,
    /// Maximum number of shelves a single run may open.
    #[serde(default = "default_max_shelves")]
    pub max_shelves: usize,
    /// Maximum number of items accepted per batch.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    #[serde(default = "default_strategy")]
    pub strategy: ShelfPolicy,
    #[serde(default = "default_sort_order")]
    pub sort_order: SortOrder,
    /// Run both strategies concurrently in `compare_strategies` when feature "parallel" is on.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            strip_width: default_strip_width(),
            max_shelves: default_max_shelves(),
            max_items: default_max_items(),
            strategy: default_strategy(),
            sort_order: default_sort_order(),
            parallel: false,
        }
    }
}

impl ShelfConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if the strip width, shelf limit or item limit is zero.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ShelfPackError;

        if self.strip_width == 0 {
            return Err(ShelfPackError::InvalidConfig(
                "strip_width must be greater than 0".into(),
            ));
        }
        if self.max_shelves == 0 {
            return Err(ShelfPackError::InvalidConfig(
                "max_shelves must be greater than 0".into(),
            ));
        }
        if self.max_items == 0 {
            return Err(ShelfPackError::InvalidConfig(
                "max_items must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

fn default_strip_width() -> u32 {
    DEFAULT_STRIP_WIDTH
}
fn default_max_shelves() -> usize {
    DEFAULT_MAX_SHELVES
}
fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}
fn default_strategy() -> ShelfPolicy {
    ShelfPolicy::FirstFit
}
fn default_sort_order() -> SortOrder {
    SortOrder::HeightDesc
}

/// Builder for `ShelfConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct ShelfConfigBuilder {
    cfg: ShelfConfig,
}

impl ShelfConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: ShelfConfig::default(),
        }
    }
    pub fn strip_width(mut self, v: u32) -> Self {
        self.cfg.strip_width = v;
        self
    }
    pub fn max_shelves(mut self, v: usize) -> Self {
        self.cfg.max_shelves = v;
        self
    }
    pub fn max_items(mut self, v: usize) -> Self {
        self.cfg.max_items = v;
        self
    }
    pub fn strategy(mut self, v: ShelfPolicy) -> Self {
        self.cfg.strategy = v;
        self
    }
    pub fn sort_order(mut self, v: SortOrder) -> Self {
        self.cfg.sort_order = v;
        self
    }
    pub fn parallel(mut self, v: bool) -> Self {
        self.cfg.parallel = v;
        self
    }
    pub fn build(self) -> ShelfConfig {
        self.cfg
    }
}

impl ShelfConfig {
    /// Create a fluent builder for `ShelfConfig`.
    pub fn builder() -> ShelfConfigBuilder {
        ShelfConfigBuilder::new()
    }
}
