//! Hosted account service: sign-up, sign-in and the user tables.
//!
//! Calls are never retried. A rejection surfaces as
//! [`crate::StoreError::Remote`] carrying the service's message.

use serde::{Deserialize, Serialize};

use crate::records::Role;
use crate::Result;

mod http;

pub use http::{rejection_message, HttpAccountService};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Attached to the account at sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpMetadata {
    pub full_name: String,
    pub role: Role,
}

/// Row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub full_name: String,
    pub country: String,
}

/// Columns rewritten when onboarding completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    pub full_name: String,
    pub phone: String,
    pub country: String,
    pub bio: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillRow {
    pub user_id: String,
    pub skill: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageRow {
    pub user_id: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificationRow {
    pub user_id: String,
    pub name: String,
    pub issued_by: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EducationRow {
    pub user_id: String,
    pub college: String,
    pub degree: String,
    pub year: String,
}

#[allow(async_fn_in_trait)]
pub trait AccountService {
    async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        metadata: &SignUpMetadata,
    ) -> Result<AuthUser>;

    async fn sign_in(&mut self, email: &str, password: &str) -> Result<AuthUser>;

    async fn insert_user(&self, row: &UserRow) -> Result<()>;

    async fn update_user(&self, id: &str, update: &UserUpdate) -> Result<()>;

    async fn insert_skills(&self, rows: &[SkillRow]) -> Result<()>;

    async fn insert_languages(&self, rows: &[LanguageRow]) -> Result<()>;

    async fn insert_certifications(&self, rows: &[CertificationRow]) -> Result<()>;

    async fn insert_education(&self, rows: &[EducationRow]) -> Result<()>;
}
