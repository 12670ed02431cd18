//! Scripted walk through every store operation.

use anyhow::Context;
use stockpile_inventory::{AuditLog, InventoryError, InventoryStore};

use crate::config::AppConfig;

/// Run the demo session against `config.inventory_path` and return the final store.
///
/// Expected rejections (invalid input on add, unknown item on remove) are
/// logged and skipped; file errors abort the run.
pub fn run_demo(config: &AppConfig) -> anyhow::Result<InventoryStore> {
    let mut store = InventoryStore::new();
    let mut audit = AuditLog::new();

    store.add_audited("apple", 10, &mut audit)?;
    store.add_audited("banana", -2, &mut audit)?;
    match store.add_audited("", f64::NAN, &mut audit) {
        Ok(_) => {}
        Err(err) if err.is_validation() => {}
        Err(err) => return Err(err.into()),
    }
    store.remove("apple", 3)?;
    match store.remove("orange", 1) {
        Ok(_) | Err(InventoryError::NotFound { .. }) => {}
        Err(err) => return Err(err.into()),
    }

    tracing::info!("apple stock: {}", store.quantity("apple"));
    let low: Vec<_> = store
        .check_low_stock(config.low_stock_threshold)
        .into_iter()
        .map(|item| item.as_str())
        .collect();
    tracing::info!("low items: {low:?}");

    let path = &config.inventory_path;
    store
        .save(path)
        .with_context(|| format!("failed to save inventory to {}", path.display()))?;
    store
        .load(path)
        .with_context(|| format!("failed to load inventory from {}", path.display()))?;
    store.report();

    for line in audit.entries() {
        tracing::debug!("audit: {line}");
    }
    Ok(store)
}
