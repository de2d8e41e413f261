use std::fmt;

use crate::Result;

mod folder;
mod memory;

pub use folder::FolderSubstrate;
pub use memory::MemorySubstrate;

/// A string-keyed slot store holding one JSON text per key.
///
/// Implementations know nothing about what the text means;
/// typing and defaults live in [`crate::RecordStore`].
pub trait Substrate {
    /// Return the raw text stored under `key`, or `None`
    /// if the slot has never been written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Create or replace the slot under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Drop the slot under `key`. Removing an empty slot is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// List the keys of all written slots.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Every slot the front-end knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Profile,
    Onboarding,
    Registration,
    UserId,
    Role,
    Gigs,
    Billing,
    PaymentMethods,
    Orders,
}

impl Slot {
    pub const ALL: [Slot; 9] = [
        Slot::Profile,
        Slot::Onboarding,
        Slot::Registration,
        Slot::UserId,
        Slot::Role,
        Slot::Gigs,
        Slot::Billing,
        Slot::PaymentMethods,
        Slot::Orders,
    ];

    /// Slots that ship with example rows.
    pub const SEEDABLE: [Slot; 3] =
        [Slot::Billing, Slot::PaymentMethods, Slot::Orders];

    pub fn key(&self) -> &'static str {
        match self {
            Slot::Profile => "userProfile",
            Slot::Onboarding => "onboarding",
            Slot::Registration => "registration",
            Slot::UserId => "userId",
            Slot::Role => "role",
            Slot::Gigs => "gigs",
            Slot::Billing => "billingHistory",
            Slot::PaymentMethods => "paymentMethods",
            Slot::Orders => "orders",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn slot_keys_are_distinct() {
        let keys: HashSet<_> = Slot::ALL.iter().map(Slot::key).collect();
        assert_eq!(keys.len(), Slot::ALL.len());
    }
}
