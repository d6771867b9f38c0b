use tracing::{debug, instrument, warn};

use crate::config::{ShelfConfig, ShelfPolicy};
use crate::error::{Result, ShelfPackError};
use crate::model::Item;
use crate::packer::allocator_for;
use crate::report::PackReport;
use crate::sort::sort_items;

#[cfg(feature = "parallel")]
use rayon::join;

/// Checks the config, the batch size and every item, in that order.
/// The first violation is returned and nothing is packed.
pub fn validate_items(items: &[Item], cfg: &ShelfConfig) -> Result<()> {
    cfg.validate()?;
    if items.len() > cfg.max_items {
        return Err(ShelfPackError::TooManyItems {
            count: items.len(),
            max: cfg.max_items,
        });
    }
    for (i, item) in items.iter().enumerate() {
        item.validate(i, cfg.strip_width)?;
    }
    Ok(())
}

/// Packs `items` with the strategy and ordering configured in `cfg`.
///
/// Notes:
/// - Sorting is stable for deterministic results.
/// - Empty input is not an error; it yields a report with no shelves and `total_height == 0`.
/// - When the shelf limit is hit, `CapacityExceeded` carries the partial report.
pub fn pack_items(items: &[Item], cfg: &ShelfConfig) -> Result<PackReport> {
    pack_with(items, cfg, cfg.strategy)
}

/// Same as [`pack_items`] but with an explicit strategy, ignoring `cfg.strategy`.
pub fn pack_with(items: &[Item], cfg: &ShelfConfig, policy: ShelfPolicy) -> Result<PackReport> {
    validate_items(items, cfg)?;
    pack_validated(items, cfg, policy)
}

#[instrument(skip_all, fields(policy = %policy, items = items.len()))]
fn pack_validated(items: &[Item], cfg: &ShelfConfig, policy: ShelfPolicy) -> Result<PackReport> {
    if items.is_empty() {
        return Ok(PackReport::empty(policy, cfg.strip_width));
    }
    let ordered = sort_items(items, cfg.sort_order);
    let mut alloc = allocator_for(policy, cfg);
    for (placed, (index, item)) in ordered.iter().enumerate() {
        if !(alloc.can_pack(item) && alloc.pack(*index, item).is_some()) {
            warn!(item = *index, placed, "shelf limit reached");
            let partial = PackReport::new(policy, cfg.strip_width, alloc.into_shelves());
            return Err(ShelfPackError::CapacityExceeded {
                policy,
                max_shelves: cfg.max_shelves,
                placed,
                total: items.len(),
                partial: Box::new(partial),
            });
        }
    }
    alloc.finish();
    let report = PackReport::new(policy, cfg.strip_width, alloc.into_shelves());
    debug!(
        %policy,
        shelves = report.shelves.len(),
        total_height = report.total_height,
        "packed"
    );
    Ok(report)
}

/// Outcome of running both strategies on the same input.
#[derive(Debug)]
pub struct StrategyComparison {
    pub next_fit: Result<PackReport>,
    pub first_fit: Result<PackReport>,
}

impl StrategyComparison {
    pub fn get(&self, policy: ShelfPolicy) -> &Result<PackReport> {
        match policy {
            ShelfPolicy::NextFit => &self.next_fit,
            ShelfPolicy::FirstFit => &self.first_fit,
        }
    }

    /// The successful report with the lowest total height. First-Fit wins ties.
    pub fn best(&self) -> Option<&PackReport> {
        match (&self.next_fit, &self.first_fit) {
            (Ok(nf), Ok(ff)) => Some(if nf.total_height < ff.total_height {
                nf
            } else {
                ff
            }),
            (Ok(nf), Err(_)) => Some(nf),
            (Err(_), Ok(ff)) => Some(ff),
            (Err(_), Err(_)) => None,
        }
    }
}

/// Runs Next-Fit and First-Fit on the same items. Each run owns its own shelves.
///
/// Validation errors are returned directly; capacity failures are reported per strategy.
/// With feature "parallel" and `cfg.parallel`, both runs execute concurrently.
pub fn compare_strategies(items: &[Item], cfg: &ShelfConfig) -> Result<StrategyComparison> {
    validate_items(items, cfg)?;

    #[cfg(feature = "parallel")]
    {
        if cfg.parallel {
            let (next_fit, first_fit) = join(
                || pack_validated(items, cfg, ShelfPolicy::NextFit),
                || pack_validated(items, cfg, ShelfPolicy::FirstFit),
            );
            return Ok(StrategyComparison {
                next_fit,
                first_fit,
            });
        }
    }

    Ok(StrategyComparison {
        next_fit: pack_validated(items, cfg, ShelfPolicy::NextFit),
        first_fit: pack_validated(items, cfg, ShelfPolicy::FirstFit),
    })
}
