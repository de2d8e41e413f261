use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{format_instant, parse_instant, Identified};
use crate::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderCategory {
    #[default]
    Priority,
    Late,
    Delivered,
    Completed,
    Cancelled,
}

impl OrderCategory {
    pub const ALL: [OrderCategory; 5] = [
        OrderCategory::Priority,
        OrderCategory::Late,
        OrderCategory::Delivered,
        OrderCategory::Completed,
        OrderCategory::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderCategory::Priority => "Priority",
            OrderCategory::Late => "Late",
            OrderCategory::Delivered => "Delivered",
            OrderCategory::Completed => "Completed",
            OrderCategory::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderCategory {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                StoreError::Validation(format!("Unknown order category {s:?}"))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub category: OrderCategory,
    pub buyer: String,
    pub gig: String,
    /// RFC 3339 timestamp.
    pub due_on: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: String,
}

impl Identified for Order {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Order {
    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.due_on)
    }

    /// One example order per category.
    pub fn examples(now: DateTime<Utc>) -> Vec<Order> {
        let row = |id: &str,
                   category,
                   buyer: &str,
                   gig: &str,
                   due_in_days: i64,
                   note: Option<&str>,
                   status: &str| Order {
            id: id.to_owned(),
            category,
            buyer: buyer.to_owned(),
            gig: gig.to_owned(),
            due_on: format_instant(now + Duration::days(due_in_days)),
            note: note.map(str::to_owned),
            status: status.to_owned(),
        };

        vec![
            row(
                "o1",
                OrderCategory::Priority,
                "John Doe",
                "Logo Design",
                1,
                Some("Urgent brand refresh"),
                "In Progress",
            ),
            row(
                "o2",
                OrderCategory::Late,
                "Acme Inc.",
                "Landing Page",
                -2,
                Some("Delay approved"),
                "Delayed",
            ),
            row(
                "o3",
                OrderCategory::Delivered,
                "Maria G.",
                "Social Kit",
                -1,
                Some("Awaiting review"),
                "Delivered",
            ),
            row(
                "o4",
                OrderCategory::Completed,
                "Pixel Co",
                "App UI",
                -10,
                None,
                "Completed",
            ),
            row(
                "o5",
                OrderCategory::Cancelled,
                "Byte Ltd",
                "SEO Audit",
                5,
                Some("Client cancelled"),
                "Cancelled",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Priority", OrderCategory::Priority)]
    #[case("late", OrderCategory::Late)]
    #[case("DELIVERED", OrderCategory::Delivered)]
    #[case("Completed", OrderCategory::Completed)]
    #[case("cancelled", OrderCategory::Cancelled)]
    fn category_parses_case_insensitively(
        #[case] text: &str,
        #[case] expected: OrderCategory,
    ) {
        assert_eq!(text.parse::<OrderCategory>().unwrap(), expected);
    }

    #[test]
    fn unknown_category_is_rejected_at_the_boundary() {
        assert!("Pending".parse::<OrderCategory>().is_err());
        let json = r#"{"id":"o9","category":"Pending","buyer":"b","gig":"g","dueOn":"2024-01-01","status":"x"}"#;
        assert!(serde_json::from_str::<Order>(json).is_err());
    }

    #[test]
    fn examples_cover_every_category_once() {
        let orders = Order::examples(Utc::now());
        let categories: Vec<_> = orders.iter().map(|o| o.category).collect();
        assert_eq!(categories, OrderCategory::ALL.to_vec());
    }
}
