use serde::{Deserialize, Deserializer, Serialize};

use crate::{Result, StoreError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCertification {
    #[serde(default)]
    pub name: String,
    /// Issuing body.
    #[serde(default)]
    pub by: String,
    #[serde(default)]
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEducation {
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Usually a data URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<UserProject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<UserCertification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<UserEducation>,
}

impl UserProfile {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    /// Required fields must be filled before the profile is written.
    /// Everything else is free text.
    pub fn validate(&self) -> Result<()> {
        if self.full_name.trim().is_empty() {
            return Err(StoreError::Validation(
                "Full name is required".to_owned(),
            ));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(StoreError::Validation("Email is required".to_owned()));
        }
        if !email.contains('@') {
            return Err(StoreError::Validation(format!(
                "{email:?} is not an email address"
            )));
        }
        Ok(())
    }

    /// Returns `false` if the skill was blank or already listed.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        push_unique(&mut self.skills, skill)
    }

    pub fn remove_skill(&mut self, index: usize) -> Option<String> {
        (index < self.skills.len()).then(|| self.skills.remove(index))
    }

    /// Returns `false` if the language was blank or already listed.
    pub fn add_language(&mut self, language: &str) -> bool {
        push_unique(&mut self.languages, language)
    }

    pub fn remove_language(&mut self, language: &str) -> bool {
        let before = self.languages.len();
        self.languages.retain(|l| l != language);
        before != self.languages.len()
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || values.iter().any(|v| v == value) {
        return false;
    }
    values.push(value.to_owned());
    true
}

/// Lists written by older front-end builds may be `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Draft left by the onboarding wizard; only its `profile` is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingDraft {
    #[serde(default)]
    pub profile: Option<OnboardingProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingProject {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    /// Images picked during onboarding are not carried over.
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<OnboardingProject>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certifications: Vec<UserCertification>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<UserEducation>,
}

impl From<OnboardingProfile> for UserProfile {
    fn from(draft: OnboardingProfile) -> Self {
        UserProfile {
            full_name: draft.full_name,
            email: draft.email,
            country: draft.country,
            languages: draft.languages,
            skills: draft.skills,
            projects: draft
                .projects
                .into_iter()
                .map(|p| UserProject {
                    image: None,
                    link: p.link,
                    description: p.description,
                })
                .collect(),
            certifications: draft.certifications,
            education: draft.education,
            ..Default::default()
        }
    }
}

/// Step-one registration form, kept so the profile can be prefilled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDraft {
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub country: Option<String>,
}

impl RegistrationDraft {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

impl From<RegistrationDraft> for UserProfile {
    fn from(draft: RegistrationDraft) -> Self {
        UserProfile {
            full_name: draft.full_name(),
            email: draft.email,
            country: draft.country,
            ..Default::default()
        }
    }
}
