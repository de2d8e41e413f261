use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::records::{
    self, BillingEntry, Gig, Identified, OnboardingDraft, Order,
    PaymentMethod, RegistrationDraft, Role, UserProfile,
};
use crate::storage::{Slot, Substrate};
use crate::{Result, StoreError};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const USER_ID_SUFFIX_LEN: usize = 6;

/// When the billing, payment-method and order slots get example rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// Empty slots read as empty lists; seeding only happens through
    /// [`RecordStore::seed_examples`].
    #[default]
    Never,
    /// The first read that finds a slot empty writes the examples
    /// and returns them.
    OnFirstRead,
}

/// Typed access to every record of one local session.
///
/// Reads never fail: a missing or malformed slot yields the
/// documented default (empty list, or `None` for single records).
/// Writes replace the whole slot, last writer wins.
pub struct RecordStore<S: Substrate> {
    substrate: S,
    seed: SeedPolicy,
}

impl<S: Substrate> RecordStore<S> {
    pub fn new(substrate: S) -> Self {
        Self {
            substrate,
            seed: SeedPolicy::default(),
        }
    }

    pub fn with_seed_policy(mut self, seed: SeedPolicy) -> Self {
        self.seed = seed;
        self
    }

    pub fn seed_policy(&self) -> SeedPolicy {
        self.seed
    }

    pub fn substrate(&self) -> &S {
        &self.substrate
    }

    pub fn into_substrate(self) -> S {
        self.substrate
    }

    /// Read and decode a slot, falling back to `None` on any problem.
    pub fn get<T: DeserializeOwned>(&self, slot: Slot) -> Option<T> {
        let text = match self.substrate.read(slot.key()) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(err) => {
                log::warn!("slot {slot} could not be read: {err}");
                return None;
            }
        };
        match serde_json::from_str::<Option<T>>(&text) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("slot {slot} holds malformed data: {err}");
                None
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&mut self, slot: Slot, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.substrate.write(slot.key(), &text)
    }

    pub fn clear(&mut self, slot: Slot) -> Result<()> {
        self.substrate.remove(slot.key())
    }

    /// Read a collection slot, empty when missing or malformed.
    pub fn list<T: DeserializeOwned>(&self, slot: Slot) -> Vec<T> {
        self.get(slot).unwrap_or_default()
    }

    /// Read a collection for rewriting. Missing or `null` is empty;
    /// anything that does not decode is an error, so the stored text
    /// is never replaced by a rewrite of nothing.
    fn load<T: DeserializeOwned>(&self, slot: Slot) -> Result<Vec<T>> {
        match self.substrate.read(slot.key())? {
            None => Ok(Vec::new()),
            Some(text) => serde_json::from_str::<Option<Vec<T>>>(&text)
                .map(Option::unwrap_or_default)
                .map_err(|e| {
                    StoreError::Parse(format!("slot {slot} holds malformed data: {e}"))
                }),
        }
    }

    /// Insert `item` or replace the one with the same id, keeping its index.
    pub fn upsert<T>(&mut self, slot: Slot, item: T) -> Result<()>
    where
        T: Identified + Serialize + DeserializeOwned,
    {
        let mut items: Vec<T> = self.load(slot)?;
        records::upsert_into(&mut items, item);
        self.set(slot, &items)
    }

    /// Remove every item with `id`. Returns whether anything was removed.
    pub fn delete<T>(&mut self, slot: Slot, id: &str) -> Result<bool>
    where
        T: Identified + Serialize + DeserializeOwned,
    {
        let mut items: Vec<T> = self.load(slot)?;
        if records::remove_from(&mut items, id) == 0 {
            return Ok(false);
        }
        self.set(slot, &items)?;
        Ok(true)
    }

    /// Write `examples` into a slot that is missing, `null` or malformed.
    /// Returns the rows now held and whether they were just written.
    fn fill_if_empty<T>(
        &mut self,
        slot: Slot,
        examples: impl FnOnce() -> Vec<T>,
    ) -> Result<(Vec<T>, bool)>
    where
        T: Serialize + DeserializeOwned,
    {
        if let Some(existing) = self.get(slot) {
            return Ok((existing, false));
        }
        let rows = examples();
        self.set(slot, &rows)?;
        log::info!("slot {slot} seeded with {} example rows", rows.len());
        Ok((rows, true))
    }

    fn seeded<T>(&mut self, slot: Slot, examples: impl FnOnce() -> Vec<T>) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        match self.seed {
            SeedPolicy::Never => Ok(self.list(slot)),
            SeedPolicy::OnFirstRead => Ok(self.fill_if_empty(slot, examples)?.0),
        }
    }

    /// Write example rows into every seedable slot that holds no data yet.
    ///
    /// Returns the slots that were seeded.
    pub fn seed_examples(&mut self) -> Result<Vec<Slot>> {
        let now = Utc::now();
        let mut seeded = Vec::new();
        for slot in Slot::SEEDABLE {
            let written = match slot {
                Slot::Billing => self.fill_if_empty(slot, || BillingEntry::examples(now))?.1,
                Slot::PaymentMethods => self.fill_if_empty(slot, PaymentMethod::examples)?.1,
                Slot::Orders => self.fill_if_empty(slot, || Order::examples(now))?.1,
                _ => false,
            };
            if written {
                seeded.push(slot);
            }
        }
        log::info!("{} slots seeded with example rows", seeded.len());
        Ok(seeded)
    }

    /// The stored profile, or one adapted from the onboarding or
    /// registration drafts, in that order.
    pub fn profile(&self) -> Option<UserProfile> {
        if let Some(profile) = self.get::<UserProfile>(Slot::Profile) {
            return Some(profile);
        }
        if let Some(draft) = self
            .onboarding_draft()
            .and_then(|draft| draft.profile)
        {
            log::debug!("profile adapted from onboarding draft");
            return Some(draft.into());
        }
        self.registration_draft().map(|draft| {
            log::debug!("profile adapted from registration draft");
            draft.into()
        })
    }

    /// Validate then persist. Nothing is written when validation fails.
    pub fn save_profile(&mut self, profile: &UserProfile) -> Result<()> {
        profile.validate()?;
        self.set(Slot::Profile, profile)
    }

    pub fn onboarding_draft(&self) -> Option<OnboardingDraft> {
        self.get(Slot::Onboarding)
    }

    pub fn save_onboarding_draft(&mut self, draft: &OnboardingDraft) -> Result<()> {
        self.set(Slot::Onboarding, draft)
    }

    pub fn registration_draft(&self) -> Option<RegistrationDraft> {
        self.get(Slot::Registration)
    }

    pub fn save_registration_draft(&mut self, draft: &RegistrationDraft) -> Result<()> {
        self.set(Slot::Registration, draft)
    }

    pub fn role(&self) -> Option<Role> {
        self.get(Slot::Role)
    }

    pub fn set_role(&mut self, role: Role) -> Result<()> {
        self.set(Slot::Role, &role)
    }

    /// The local identity, generated and persisted on first call.
    pub fn ensure_user_id(&mut self) -> Result<String> {
        if let Some(id) = self
            .get::<String>(Slot::UserId)
            .filter(|id| !id.is_empty())
        {
            return Ok(id);
        }
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)?
            .as_millis();
        let suffix: String = std::iter::repeat_with(|| {
            char::from(BASE36[fastrand::usize(..BASE36.len())])
        })
        .take(USER_ID_SUFFIX_LEN)
        .collect();
        let id = format!("u_{}_{}", to_base36(millis), suffix);
        self.set(Slot::UserId, &id)?;
        log::info!("new local identity {id}");
        Ok(id)
    }

    pub fn gigs(&self) -> Vec<Gig> {
        self.list(Slot::Gigs)
    }

    pub fn save_gigs(&mut self, gigs: &[Gig]) -> Result<()> {
        records::ensure_unique_ids(gigs)?;
        for gig in gigs {
            gig.validate()?;
        }
        self.set(Slot::Gigs, gigs)
    }

    pub fn upsert_gig(&mut self, gig: Gig) -> Result<()> {
        gig.validate()?;
        self.upsert(Slot::Gigs, gig)
    }

    pub fn delete_gig(&mut self, id: &str) -> Result<bool> {
        self.delete::<Gig>(Slot::Gigs, id)
    }

    pub fn billing(&mut self) -> Result<Vec<BillingEntry>> {
        self.seeded(Slot::Billing, || BillingEntry::examples(Utc::now()))
    }

    /// Bulk overwrite; billing rows are never edited one by one.
    pub fn save_billing(&mut self, rows: &[BillingEntry]) -> Result<()> {
        self.set(Slot::Billing, rows)
    }

    pub fn payment_methods(&mut self) -> Result<Vec<PaymentMethod>> {
        self.seeded(Slot::PaymentMethods, PaymentMethod::examples)
    }

    pub fn save_payment_methods(&mut self, methods: &[PaymentMethod]) -> Result<()> {
        self.set(Slot::PaymentMethods, methods)
    }

    pub fn orders(&mut self) -> Result<Vec<Order>> {
        self.seeded(Slot::Orders, || Order::examples(Utc::now()))
    }

    pub fn save_orders(&mut self, orders: &[Order]) -> Result<()> {
        records::ensure_unique_ids(orders)?;
        self.set(Slot::Orders, orders)
    }

    /// A missing slot is seeded first when the policy says so.
    pub fn upsert_order(&mut self, order: Order) -> Result<()> {
        if self.substrate.read(Slot::Orders.key())?.is_none() {
            self.orders()?;
        }
        self.upsert(Slot::Orders, order)
    }
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}
