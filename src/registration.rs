//! Two-step sign-up: account creation, then the seller onboarding form.
//!
//! Local records change only once every remote call has succeeded.

use crate::records::{
    RegistrationDraft, Role, UserCertification, UserEducation, UserProfile,
};
use crate::remote::{
    AccountService, AuthUser, CertificationRow, EducationRow, LanguageRow,
    SignUpMetadata, SkillRow, UserRow, UserUpdate,
};
use crate::storage::{Slot, Substrate};
use crate::{RecordStore, Result, StoreError};

/// Step one of the sign-up form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub country: String,
}

impl Registration {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("First name", &self.first_name),
            ("Last name", &self.last_name),
            ("Email", &self.email),
            ("Password", &self.password),
            ("Country", &self.country),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(StoreError::Validation(format!("{label} is required")));
            }
        }
        Ok(())
    }

    fn draft(&self) -> RegistrationDraft {
        RegistrationDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            country: Some(self.country.clone()),
        }
    }
}

/// Step two, sellers only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Onboarding {
    pub full_name: String,
    pub phone: String,
    pub country: String,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub certifications: Vec<UserCertification>,
    pub education: Vec<UserEducation>,
}

impl Onboarding {
    /// Fold the form into the profile already known locally.
    fn apply_to(&self, mut profile: UserProfile, user: &AuthUser) -> UserProfile {
        profile.full_name = self.full_name.trim().to_owned();
        if profile.email.trim().is_empty() {
            profile.email = user.email.clone().unwrap_or_default();
        }
        profile.phone = Some(self.phone.clone()).filter(|p| !p.is_empty());
        profile.country = Some(self.country.clone()).filter(|c| !c.is_empty());
        for skill in &self.skills {
            profile.add_skill(skill);
        }
        for language in &self.languages {
            profile.add_language(language);
        }
        profile.certifications = self.valid_certifications();
        profile.education = self.valid_education();
        profile
    }

    fn valid_certifications(&self) -> Vec<UserCertification> {
        self.certifications
            .iter()
            .filter(|c| !c.name.trim().is_empty())
            .cloned()
            .collect()
    }

    fn valid_education(&self) -> Vec<UserEducation> {
        self.education
            .iter()
            .filter(|e| !e.college.trim().is_empty())
            .cloned()
            .collect()
    }
}

/// Create the account and its `users` row, then remember the role,
/// the form and the account id locally.
pub async fn register<A, S>(
    service: &mut A,
    store: &mut RecordStore<S>,
    form: &Registration,
) -> Result<AuthUser>
where
    A: AccountService,
    S: Substrate,
{
    form.validate()?;

    let metadata = SignUpMetadata {
        full_name: form.full_name(),
        role: form.role,
    };
    let user = service
        .sign_up(&form.email, &form.password, &metadata)
        .await?;

    service
        .insert_user(&UserRow {
            id: user.id.clone(),
            email: form.email.clone(),
            role: form.role,
            full_name: form.full_name(),
            country: form.country.clone(),
        })
        .await
        .map_err(|e| {
            log::warn!("users row for {} not created: {e}", user.id);
            StoreError::Remote("Failed to create user profile".to_owned())
        })?;

    // The role goes last: a session with a role is a registered one.
    store.save_registration_draft(&form.draft())?;
    store.set(Slot::UserId, &user.id)?;
    store.set_role(form.role)?;
    log::info!("registered {} as {}", user.id, form.role);
    Ok(user)
}

/// Push the onboarding form to the user tables, then save the
/// resulting profile locally.
pub async fn complete_onboarding<A, S>(
    service: &mut A,
    store: &mut RecordStore<S>,
    user: &AuthUser,
    form: &Onboarding,
) -> Result<UserProfile>
where
    A: AccountService,
    S: Substrate,
{
    let profile = form.apply_to(store.profile().unwrap_or_default(), user);
    profile.validate()?;

    service
        .update_user(
            &user.id,
            &UserUpdate {
                full_name: form.full_name.clone(),
                phone: form.phone.clone(),
                country: form.country.clone(),
                bio: form.skills.join(", "),
                website: String::new(),
            },
        )
        .await
        .map_err(|e| {
            log::warn!("users row for {} not updated: {e}", user.id);
            StoreError::Remote("Failed to update profile".to_owned())
        })?;

    let skills: Vec<_> = form
        .skills
        .iter()
        .map(|skill| SkillRow {
            user_id: user.id.clone(),
            skill: skill.clone(),
        })
        .collect();
    if !skills.is_empty() {
        service
            .insert_skills(&skills)
            .await
            .map_err(|e| StoreError::Remote(format!("Failed to save skills: {e}")))?;
    }

    let languages: Vec<_> = form
        .languages
        .iter()
        .map(|language| LanguageRow {
            user_id: user.id.clone(),
            language: language.clone(),
        })
        .collect();
    if !languages.is_empty() {
        service
            .insert_languages(&languages)
            .await
            .map_err(|e| StoreError::Remote(format!("Failed to save languages: {e}")))?;
    }

    let certifications: Vec<_> = form
        .valid_certifications()
        .into_iter()
        .map(|c| CertificationRow {
            user_id: user.id.clone(),
            name: c.name,
            issued_by: c.by,
            year: c.year,
        })
        .collect();
    if !certifications.is_empty() {
        service
            .insert_certifications(&certifications)
            .await
            .map_err(|e| {
                StoreError::Remote(format!("Failed to save certifications: {e}"))
            })?;
    }

    let education: Vec<_> = form
        .valid_education()
        .into_iter()
        .map(|e| EducationRow {
            user_id: user.id.clone(),
            college: e.college,
            degree: e.degree,
            year: e.year,
        })
        .collect();
    if !education.is_empty() {
        service
            .insert_education(&education)
            .await
            .map_err(|e| StoreError::Remote(format!("Failed to save education: {e}")))?;
    }

    store.save_profile(&profile)?;
    log::info!("onboarding completed for {}", user.id);
    Ok(profile)
}

/// Blocking form of [`register`].
pub fn register_sync<A, S>(
    service: &mut A,
    store: &mut RecordStore<S>,
    form: &Registration,
) -> Result<AuthUser>
where
    A: AccountService,
    S: Substrate,
{
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(register(service, store, form))
}

/// Blocking form of [`complete_onboarding`].
pub fn complete_onboarding_sync<A, S>(
    service: &mut A,
    store: &mut RecordStore<S>,
    user: &AuthUser,
    form: &Onboarding,
) -> Result<UserProfile>
where
    A: AccountService,
    S: Substrate,
{
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(complete_onboarding(service, store, user, form))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySubstrate;
    use std::cell::RefCell;

    /// Records every call and rejects the one named in `reject`.
    #[derive(Default)]
    struct FakeService {
        calls: RefCell<Vec<&'static str>>,
        reject: Option<&'static str>,
    }

    impl FakeService {
        fn rejecting(call: &'static str) -> Self {
            Self {
                reject: Some(call),
                ..Default::default()
            }
        }

        fn record(&self, call: &'static str) -> Result<()> {
            self.calls.borrow_mut().push(call);
            if self.reject == Some(call) {
                return Err(StoreError::Remote(format!("{call} refused")));
            }
            Ok(())
        }
    }

    impl AccountService for FakeService {
        async fn sign_up(
            &mut self,
            email: &str,
            _password: &str,
            _metadata: &SignUpMetadata,
        ) -> Result<AuthUser> {
            self.record("sign_up")?;
            Ok(AuthUser {
                id: "remote-1".to_owned(),
                email: Some(email.to_owned()),
            })
        }

        async fn sign_in(&mut self, email: &str, _password: &str) -> Result<AuthUser> {
            self.record("sign_in")?;
            Ok(AuthUser {
                id: "remote-1".to_owned(),
                email: Some(email.to_owned()),
            })
        }

        async fn insert_user(&self, _row: &UserRow) -> Result<()> {
            self.record("insert_user")
        }

        async fn update_user(&self, _id: &str, _update: &UserUpdate) -> Result<()> {
            self.record("update_user")
        }

        async fn insert_skills(&self, _rows: &[SkillRow]) -> Result<()> {
            self.record("insert_skills")
        }

        async fn insert_languages(&self, _rows: &[LanguageRow]) -> Result<()> {
            self.record("insert_languages")
        }

        async fn insert_certifications(&self, _rows: &[CertificationRow]) -> Result<()> {
            self.record("insert_certifications")
        }

        async fn insert_education(&self, _rows: &[EducationRow]) -> Result<()> {
            self.record("insert_education")
        }
    }

    fn form(role: Role) -> Registration {
        Registration {
            role,
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "secret".to_owned(),
            country: "India".to_owned(),
        }
    }

    fn onboarding() -> Onboarding {
        Onboarding {
            full_name: "Ada Lovelace".to_owned(),
            phone: "+91 1234".to_owned(),
            country: "India".to_owned(),
            skills: vec!["Logo design".to_owned()],
            languages: vec![],
            certifications: vec![
                UserCertification {
                    name: "Design 101".to_owned(),
                    by: "School".to_owned(),
                    year: "2020".to_owned(),
                },
                UserCertification::default(),
            ],
            education: vec![UserEducation::default()],
        }
    }

    #[tokio::test]
    async fn register_records_role_and_draft() {
        let mut service = FakeService::default();
        let mut store = RecordStore::new(MemorySubstrate::new());

        let user = register(&mut service, &mut store, &form(Role::Seller))
            .await
            .unwrap();

        assert_eq!(user.id, "remote-1");
        assert_eq!(*service.calls.borrow(), vec!["sign_up", "insert_user"]);
        assert_eq!(store.role(), Some(Role::Seller));
        assert_eq!(store.profile().unwrap().full_name, "Ada Lovelace");
        assert_eq!(store.ensure_user_id().unwrap(), "remote-1");
    }

    #[tokio::test]
    async fn missing_field_blocks_before_any_call() {
        let mut service = FakeService::default();
        let mut store = RecordStore::new(MemorySubstrate::new());
        let mut incomplete = form(Role::Buyer);
        incomplete.password = String::new();

        let err = register(&mut service, &mut store, &incomplete)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
        assert!(service.calls.borrow().is_empty());
        assert!(store.substrate().keys().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejected_sign_up_leaves_store_untouched() {
        let mut service = FakeService::rejecting("sign_up");
        let mut store = RecordStore::new(MemorySubstrate::new());

        let err = register(&mut service, &mut store, &form(Role::Seller))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Remote service rejected the request: sign_up refused");
        assert_eq!(store.role(), None);
    }

    #[tokio::test]
    async fn onboarding_pushes_only_non_empty_tables() {
        let mut service = FakeService::default();
        let mut store = RecordStore::new(MemorySubstrate::new());
        let user = register(&mut service, &mut store, &form(Role::Seller))
            .await
            .unwrap();

        let profile = complete_onboarding(&mut service, &mut store, &user, &onboarding())
            .await
            .unwrap();

        assert_eq!(
            *service.calls.borrow(),
            vec![
                "sign_up",
                "insert_user",
                "update_user",
                "insert_skills",
                "insert_certifications"
            ]
        );
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.certifications.len(), 1);
        assert!(profile.education.is_empty());
        assert_eq!(store.profile(), Some(profile));
    }

    #[tokio::test]
    async fn rejection_mid_onboarding_leaves_local_state_untouched() {
        let mut service = FakeService::rejecting("insert_certifications");
        let mut store = RecordStore::new(MemorySubstrate::new());
        let prior = UserProfile::new("Old Name", "ada@example.com");
        store.save_profile(&prior).unwrap();
        let user = AuthUser {
            id: "remote-1".to_owned(),
            email: Some("ada@example.com".to_owned()),
        };

        let err = complete_onboarding(&mut service, &mut store, &user, &onboarding())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to save certifications"));
        assert_eq!(store.profile(), Some(prior));
        assert_eq!(store.substrate().keys().unwrap(), vec![Slot::Profile.key()]);
    }

    /// Memory slots that refuse writes to one key.
    struct RefusingSubstrate {
        inner: MemorySubstrate,
        refuse: &'static str,
    }

    impl Substrate for RefusingSubstrate {
        fn read(&self, key: &str) -> Result<Option<String>> {
            self.inner.read(key)
        }

        fn write(&mut self, key: &str, value: &str) -> Result<()> {
            if key == self.refuse {
                return Err(StoreError::Storage("test".to_owned(), format!("{key} refused")));
            }
            self.inner.write(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }

        fn keys(&self) -> Result<Vec<String>> {
            self.inner.keys()
        }
    }

    #[tokio::test]
    async fn failed_local_write_leaves_no_role() {
        for refuse in [Slot::Registration.key(), Slot::UserId.key()] {
            let mut service = FakeService::default();
            let mut store = RecordStore::new(RefusingSubstrate {
                inner: MemorySubstrate::new(),
                refuse,
            });

            let err = register(&mut service, &mut store, &form(Role::Seller))
                .await
                .unwrap_err();

            assert!(matches!(err, StoreError::Storage(..)));
            assert_eq!(store.role(), None);
        }
    }

    #[test]
    fn sync_wrapper_runs_the_flow() {
        let mut service = FakeService::default();
        let mut store = RecordStore::new(MemorySubstrate::new());
        let user = register_sync(&mut service, &mut store, &form(Role::Buyer)).unwrap();
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
        assert_eq!(store.role(), Some(Role::Buyer));
    }
}
