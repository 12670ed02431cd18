//! Caller-owned audit trail of stock additions.

use chrono::{DateTime, TimeZone};

use stockpile_core::{ItemName, Quantity};

/// Terse, human-readable record of successful additions.
///
/// The store never owns one; callers pass it to
/// [`InventoryStore::add_audited`](crate::InventoryStore::add_audited).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLog {
    entries: Vec<String>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `"<timestamp>: Added <qty> of <item>"`.
    pub fn record_added<Tz>(&mut self, at: &DateTime<Tz>, qty: Quantity, item: &ItemName)
    where
        Tz: TimeZone,
        Tz::Offset: core::fmt::Display,
    {
        self.entries.push(format!(
            "{}: Added {qty} of {item}",
            at.format("%Y-%m-%d %H:%M:%S%.6f")
        ));
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn record_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let mut log = AuditLog::new();
        log.record_added(&at, Quantity::Whole(10), &ItemName::new("apple").unwrap());
        log.record_added(&at, Quantity::Fractional(0.5), &ItemName::new("flour").unwrap());

        assert_eq!(
            log.entries(),
            [
                "2024-03-01 09:30:00.000000: Added 10 of apple",
                "2024-03-01 09:30:00.000000: Added 0.5 of flour",
            ]
        );
    }
}
