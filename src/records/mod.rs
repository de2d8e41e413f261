//! Record shapes persisted in the store's slots.
//!
//! Field names serialize in camelCase so that slots written by the
//! browser front-end read back unchanged.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};

use crate::{Result, StoreError};

pub mod billing;
pub mod gig;
pub mod order;
pub mod payment;
pub mod profile;
pub mod role;

pub use billing::BillingEntry;
pub use gig::{Gig, GigMedia, MediaKind, PackageExtras, PackageName, PackageTier};
pub use order::{Order, OrderCategory};
pub use payment::PaymentMethod;
pub use profile::{
    OnboardingDraft, OnboardingProfile, OnboardingProject, RegistrationDraft,
    UserCertification, UserEducation, UserProfile, UserProject,
};
pub use role::Role;

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 (what the front-end writes), a bare
/// `YYYY-MM-DDTHH:MM:SS` taken as UTC, or a calendar date
/// taken as midnight UTC.
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(start_of_day)
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Render an instant the way the front-end stores it,
/// e.g. `2024-05-10T08:30:00.000Z`.
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Records that live in a collection keyed by a string identifier.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Insert `item`, or replace the item sharing its identifier.
///
/// A replacement keeps its index; a new item goes last.
pub fn upsert_into<T: Identified>(items: &mut Vec<T>, item: T) {
    match items
        .iter()
        .position(|existing| existing.id() == item.id())
    {
        Some(idx) => items[idx] = item,
        None => items.push(item),
    }
}

/// Identifiers must be unique within one collection.
pub fn ensure_unique_ids<T: Identified>(items: &[T]) -> Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id()) {
            return Err(StoreError::Validation(format!(
                "Duplicate id {:?}",
                item.id()
            )));
        }
    }
    Ok(())
}

/// Drop every item whose identifier is `id`. Returns how many were dropped.
pub fn remove_from<T: Identified>(items: &mut Vec<T>, id: &str) -> usize {
    let before = items.len();
    items.retain(|item| item.id() != id);
    before - items.len()
}
