use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{
    AccountService, AuthUser, CertificationRow, EducationRow, LanguageRow,
    SignUpMetadata, SkillRow, UserRow, UserUpdate,
};
use crate::config::RemoteConfig;
use crate::{Result, StoreError};

const USERS_TABLE: &str = "users";

/// Talks to a GoTrue/PostgREST style backend over HTTPS.
pub struct HttpAccountService {
    client: reqwest::Client,
    base: Url,
    api_key: String,
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct AuthResponse {
    access_token: Option<String>,
    user: Option<AuthUser>,
    // Sign-up without a session answers with the bare user.
    id: Option<String>,
    email: Option<String>,
}

impl AuthResponse {
    fn into_user(self) -> Option<AuthUser> {
        self.user.or_else(|| {
            self.id.map(|id| AuthUser {
                id,
                email: self.email,
            })
        })
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a SignUpMetadata>,
}

impl HttpAccountService {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.api_key).map_err(|e| {
                StoreError::Validation(format!("API key is not a valid header: {e}"))
            })?,
        );
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        // `Url::join` replaces the last segment unless the path ends in `/`.
        let mut base = config.url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client,
            base,
            api_key: config.api_key.clone(),
            access_token: None,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base.join(path).map_err(|e| {
            StoreError::Validation(format!("Bad endpoint {path}: {e}"))
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let token = self
            .access_token
            .as_deref()
            .unwrap_or(&self.api_key);
        self.client
            .request(method, url)
            .bearer_auth(token)
    }

    async fn authenticate(&mut self, url: Url, credentials: &Credentials<'_>) -> Result<AuthUser> {
        let response = self
            .request(Method::POST, url)
            .json(credentials)
            .send()
            .await?;
        let body: AuthResponse = check(response).await?.json().await?;
        if let Some(token) = &body.access_token {
            self.access_token = Some(token.clone());
        }
        body.into_user()
            .ok_or_else(|| StoreError::Remote("No user in auth response".to_owned()))
    }

    async fn insert<T: Serialize>(&self, table: &str, rows: &[T]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let url = self.endpoint(&format!("rest/v1/{table}"))?;
        let response = self
            .request(Method::POST, url)
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;
        check(response).await?;
        log::debug!("{} rows inserted into {}", rows.len(), table);
        Ok(())
    }
}

impl AccountService for HttpAccountService {
    async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        metadata: &SignUpMetadata,
    ) -> Result<AuthUser> {
        let url = self.endpoint("auth/v1/signup")?;
        let credentials = Credentials {
            email,
            password,
            data: Some(metadata),
        };
        self.authenticate(url, &credentials).await
    }

    async fn sign_in(&mut self, email: &str, password: &str) -> Result<AuthUser> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.query_pairs_mut()
            .append_pair("grant_type", "password");
        let credentials = Credentials {
            email,
            password,
            data: None,
        };
        self.authenticate(url, &credentials).await
    }

    async fn insert_user(&self, row: &UserRow) -> Result<()> {
        self.insert(USERS_TABLE, std::slice::from_ref(row)).await
    }

    async fn update_user(&self, id: &str, update: &UserUpdate) -> Result<()> {
        let mut url = self.endpoint(&format!("rest/v1/{USERS_TABLE}"))?;
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{id}"));
        let response = self
            .request(Method::PATCH, url)
            .header("Prefer", "return=minimal")
            .json(update)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn insert_skills(&self, rows: &[SkillRow]) -> Result<()> {
        self.insert("user_skills", rows).await
    }

    async fn insert_languages(&self, rows: &[LanguageRow]) -> Result<()> {
        self.insert("user_languages", rows).await
    }

    async fn insert_certifications(&self, rows: &[CertificationRow]) -> Result<()> {
        self.insert("user_certifications", rows).await
    }

    async fn insert_education(&self, rows: &[EducationRow]) -> Result<()> {
        self.insert("user_education", rows).await
    }
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = rejection_message(status, &body);
    log::warn!("remote call rejected ({status}): {message}");
    Err(StoreError::Remote(message))
}

/// Pick the human-readable reason out of an error body.
pub fn rejection_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["msg", "message", "error_description", "error"]
                .iter()
                .find_map(|field| {
                    value
                        .get(field)
                        .and_then(|v| v.as_str())
                        .filter(|s| !s.trim().is_empty())
                        .map(str::to_owned)
                })
        })
        .unwrap_or_else(|| status.to_string())
}
