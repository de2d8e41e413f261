use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};

use super::export::to_delimited;
use crate::atomic;
use crate::records::{start_of_day, BillingEntry};
use crate::Result;

pub const STATEMENT_FILE_NAME: &str = "earnings-statement.csv";
pub const STATEMENT_HEADER: [&str; 6] =
    ["Date", "Document", "Service", "Order", "Currency", "Total"];

/// Inclusive calendar-date bounds. A missing bound is unbounded.
///
/// Both bounds stand for midnight UTC of their day, the way a browser
/// date input parses; a row dated later on the `to` day falls outside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Parse `YYYY-MM-DD` bounds; blank strings mean unbounded.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self> {
        let parse = |text: Option<&str>| -> Result<Option<NaiveDate>> {
            match text.map(str::trim).filter(|t| !t.is_empty()) {
                Some(t) => Ok(Some(NaiveDate::parse_from_str(t, "%Y-%m-%d")?)),
                None => Ok(None),
            }
        };
        Ok(Self::new(parse(from)?, parse(to)?))
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Undated rows only match the unbounded range.
    pub fn contains(&self, instant: Option<DateTime<Utc>>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(instant) = instant else {
            return false;
        };
        let after_from = self
            .from
            .map_or(true, |from| instant >= start_of_day(from));
        let before_to = self
            .to
            .map_or(true, |to| instant <= start_of_day(to));
        after_from && before_to
    }
}

/// What the earnings page renders: rows in range and their total.
#[derive(Debug, Clone, PartialEq)]
pub struct EarningsView {
    pub range: DateRange,
    pub rows: Vec<BillingEntry>,
    pub total: f64,
}

impl EarningsView {
    /// Filter `billing` to `range`, keeping insertion order.
    pub fn compute(billing: &[BillingEntry], range: DateRange) -> Self {
        let rows: Vec<BillingEntry> = billing
            .iter()
            .filter(|row| range.contains(row.parsed_date()))
            .cloned()
            .collect();
        let total = rows.iter().map(|row| row.total).sum();
        Self { range, rows, total }
    }

    /// The downloadable statement for the rows in view.
    pub fn statement(&self) -> String {
        let header = STATEMENT_HEADER.map(str::to_owned).to_vec();
        let body = self.rows.iter().map(|row| {
            let date = row
                .parsed_date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| row.date.clone());
            vec![
                date,
                row.document.clone(),
                row.service.clone(),
                row.order.clone(),
                row.currency.clone(),
                row.total.to_string(),
            ]
        });
        to_delimited(std::iter::once(header).chain(body))
    }

    pub fn write_statement(&self, path: &Path) -> Result<()> {
        atomic::replace(path, self.statement().as_bytes())?;
        log::info!(
            "statement with {} rows written to {}",
            self.rows.len(),
            path.display()
        );
        Ok(())
    }
}
