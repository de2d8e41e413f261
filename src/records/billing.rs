use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{format_instant, parse_instant};

/// One row of the billing history.
///
/// Rows are never edited after being written; the collection keeps
/// insertion order, which is not necessarily date order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingEntry {
    /// RFC 3339 timestamp.
    pub date: String,
    /// Invoice, Receipt, Order Confirmation...
    pub document: String,
    pub service: String,
    pub order: String,
    /// ISO currency code: USD, EUR, INR...
    pub currency: String,
    pub total: f64,
}

impl BillingEntry {
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.date)
    }

    pub fn examples(now: DateTime<Utc>) -> Vec<BillingEntry> {
        vec![
            BillingEntry {
                date: format_instant(now),
                document: "Invoice".to_owned(),
                service: "Logo Design".to_owned(),
                order: "#1001".to_owned(),
                currency: "USD".to_owned(),
                total: 200.0,
            },
            BillingEntry {
                date: format_instant(now - Duration::days(35)),
                document: "Receipt".to_owned(),
                service: "Landing Page".to_owned(),
                order: "#1000".to_owned(),
                currency: "USD".to_owned(),
                total: 1200.0,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billing_entry_reads_front_end_json() {
        let json = r##"{"date":"2024-01-15T10:00:00.000Z","document":"Invoice","service":"Logo Design","order":"#1001","currency":"USD","total":200}"##;
        let entry: BillingEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.total, 200.0);
        assert_eq!(entry.order, "#1001");
        assert!(entry.parsed_date().is_some());
    }

    #[test]
    fn examples_are_dated_relative_to_now() {
        let now = parse_instant("2024-06-01T00:00:00Z").unwrap();
        let rows = BillingEntry::examples(now);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2024-06-01T00:00:00.000Z");
        assert_eq!(rows[1].date, "2024-04-27T00:00:00.000Z");
    }
}
