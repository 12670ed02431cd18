//! The in-memory stock mapping and its mutations.

use std::collections::HashMap;

use chrono::Local;
use stockpile_core::{ItemName, Quantity};

use crate::audit::AuditLog;
use crate::error::{InventoryError, InventoryResult};

/// Cutoff used by [`InventoryStore::check_low_stock_default`].
pub const DEFAULT_LOW_STOCK_THRESHOLD: Quantity = Quantity::Whole(5);

/// One entry of the mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct StockLevel {
    pub item: ItemName,
    pub quantity: Quantity,
}

/// Insertion-ordered mapping of item → quantity.
///
/// `remove` never leaves an entry at or below zero. `add` does not floor: a
/// negative addition can drive an entry to zero or below and it stays there
/// until removed or overwritten by `load`.
///
/// Lookups go through a name → position index; `levels` keeps the order.
///
/// Not synchronized. Wrap it in a `Mutex` to share across threads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryStore {
    levels: Vec<StockLevel>,
    index: HashMap<ItemName, usize>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `qty` (which may be zero or negative) to `item`, creating the entry
    /// if needed. Returns the new total.
    pub fn add(&mut self, item: &str, qty: impl Into<Quantity>) -> InventoryResult<Quantity> {
        self.apply_add(item, qty.into()).map(|(_, total)| total)
    }

    /// Same as [`add`](Self::add), and on success appends a timestamped line to `audit`.
    pub fn add_audited(
        &mut self,
        item: &str,
        qty: impl Into<Quantity>,
        audit: &mut AuditLog,
    ) -> InventoryResult<Quantity> {
        let qty = qty.into();
        let (name, total) = self.apply_add(item, qty)?;
        audit.record_added(&Local::now(), qty, &name);
        Ok(total)
    }

    fn apply_add(&mut self, item: &str, qty: Quantity) -> InventoryResult<(ItemName, Quantity)> {
        let name = ItemName::new(item)
            .inspect_err(|err| tracing::warn!(item, "invalid item {item:?}: {err}"))?;
        let qty = qty
            .validate()
            .inspect_err(|err| tracing::warn!(item = %name, "invalid quantity: {err}"))?;

        let idx = self.position(item);
        let current = idx.map_or(Quantity::ZERO, |i| self.levels[i].quantity);
        let total = current.checked_add(qty).inspect_err(|err| {
            tracing::error!(item = %name, "cannot add {qty} of {name}: {err}");
        })?;

        match idx {
            Some(i) => self.levels[i].quantity = total,
            None => {
                let pushed = self.push_level(StockLevel {
                    item: name.clone(),
                    quantity: total,
                });
                debug_assert!(pushed.is_ok());
            }
        }
        tracing::info!(item = %name, "added {qty} of {name}");
        Ok((name, total))
    }

    /// Take `qty` away from `item`.
    ///
    /// Returns the remaining quantity, or `None` when the entry dropped to zero
    /// or below and was deleted.
    pub fn remove(
        &mut self,
        item: &str,
        qty: impl Into<Quantity>,
    ) -> InventoryResult<Option<Quantity>> {
        let qty = qty.into();
        let Some(idx) = self.position(item) else {
            tracing::warn!(item, "item '{item}' not found in inventory");
            return Err(InventoryError::not_found(item));
        };

        let remaining = match self.levels[idx].quantity.checked_sub(qty) {
            Ok(q) => q,
            Err(err) => {
                tracing::error!(item, "error removing {qty} of {item}: {err}");
                return Err(err.into());
            }
        };

        if remaining.is_positive() {
            self.levels[idx].quantity = remaining;
            tracing::info!(item, "removed {qty} of {item}, {remaining} left");
            Ok(Some(remaining))
        } else {
            self.remove_level(idx);
            tracing::info!(item, "removed {item} from inventory");
            Ok(None)
        }
    }

    /// Current quantity of `item`, zero if absent.
    pub fn quantity(&self, item: &str) -> Quantity {
        self.position(item)
            .map_or(Quantity::ZERO, |i| self.levels[i].quantity)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.position(item).is_some()
    }

    /// Items whose quantity is strictly below `threshold`, in insertion order.
    pub fn check_low_stock(&self, threshold: impl Into<Quantity>) -> Vec<&ItemName> {
        let threshold = threshold.into();
        self.levels
            .iter()
            .filter(|level| level.quantity < threshold)
            .map(|level| &level.item)
            .collect()
    }

    pub fn check_low_stock_default(&self) -> Vec<&ItemName> {
        self.check_low_stock(DEFAULT_LOW_STOCK_THRESHOLD)
    }

    /// Log one line per item.
    pub fn report(&self) {
        tracing::info!("Inventory Report:");
        for line in self.report_lines() {
            tracing::info!("{line}");
        }
    }

    /// `"<item> -> <qty>"` per entry, in iteration order.
    pub fn report_lines(&self) -> Vec<String> {
        self.iter().map(|(item, qty)| format!("{item} -> {qty}")).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemName, Quantity)> + '_ {
        self.levels.iter().map(|level| (&level.item, level.quantity))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub(crate) fn levels(&self) -> &[StockLevel] {
        &self.levels
    }

    /// Append a new entry. Hands it back if the item is already present.
    pub(crate) fn push_level(&mut self, level: StockLevel) -> Result<(), StockLevel> {
        if self.index.contains_key(&level.item) {
            return Err(level);
        }
        self.index.insert(level.item.clone(), self.levels.len());
        self.levels.push(level);
        Ok(())
    }

    fn remove_level(&mut self, idx: usize) {
        let removed = self.levels.remove(idx);
        self.index.remove(&removed.item);
        for later in &self.levels[idx..] {
            if let Some(pos) = self.index.get_mut(&later.item) {
                *pos -= 1;
            }
        }
    }

    fn position(&self, item: &str) -> Option<usize> {
        self.index.get(item).copied()
    }
}
