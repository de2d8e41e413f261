use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    FolderSubstrate, RecordStore, Result, SeedPolicy, StoreError, CONFIG_FILE,
    GIGBOOK_FOLDER,
};

pub const ROOT_ENV: &str = "GIGBOOK_ROOT";
pub const REMOTE_URL_ENV: &str = "GIGBOOK_REMOTE_URL";
pub const REMOTE_KEY_ENV: &str = "GIGBOOK_REMOTE_KEY";

/// Hosted account service endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub url: Url,
    pub api_key: String,
}

/// Settings read from `<config_dir>/gigbook/config.json`.
///
/// Every field is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default)]
    pub seed: SeedPolicy,
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        log::debug!("config loaded from {}", path.display());
        Ok(config)
    }

    /// Where the config file is looked up, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(GIGBOOK_FOLDER).join(CONFIG_FILE))
    }

    /// Load the default config file. A missing or broken file gives the
    /// default config.
    pub fn discover() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|err| {
            log::warn!("ignoring config at {}: {err}", path.display());
            Self::default()
        })
    }

    /// Root folder from the argument, then `GIGBOOK_ROOT`, then the
    /// config file, then the platform data dir.
    pub fn resolve_root(&self, arg: Option<&Path>) -> Result<PathBuf> {
        self.resolve_root_with(arg, std::env::var_os(ROOT_ENV))
    }

    pub fn resolve_root_with(
        &self,
        arg: Option<&Path>,
        env: Option<OsString>,
    ) -> Result<PathBuf> {
        if let Some(path) = arg {
            return Ok(path.to_path_buf());
        }
        if let Some(value) = env.filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(value));
        }
        if let Some(root) = &self.root {
            return Ok(root.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(GIGBOOK_FOLDER))
            .ok_or_else(|| {
                StoreError::Storage(
                    GIGBOOK_FOLDER.to_owned(),
                    "No data directory on this platform".to_owned(),
                )
            })
    }

    /// Endpoint from `GIGBOOK_REMOTE_URL`/`GIGBOOK_REMOTE_KEY`, else
    /// from the config file.
    pub fn remote(&self) -> Result<Option<RemoteConfig>> {
        self.remote_with(
            std::env::var(REMOTE_URL_ENV).ok(),
            std::env::var(REMOTE_KEY_ENV).ok(),
        )
    }

    pub fn remote_with(
        &self,
        url: Option<String>,
        api_key: Option<String>,
    ) -> Result<Option<RemoteConfig>> {
        let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
            return Ok(self.remote.clone());
        };
        let url = Url::parse(url.trim()).map_err(|e| {
            StoreError::Validation(format!("{REMOTE_URL_ENV} is not a URL: {e}"))
        })?;
        let api_key = api_key
            .or_else(|| self.remote.as_ref().map(|r| r.api_key.clone()))
            .ok_or_else(|| {
                StoreError::Validation(format!("{REMOTE_KEY_ENV} is not set"))
            })?;
        Ok(Some(RemoteConfig { url, api_key }))
    }

    /// Open the folder-backed store at the resolved root.
    pub fn open_store(
        &self,
        arg: Option<&Path>,
    ) -> Result<RecordStore<FolderSubstrate>> {
        let root = self.resolve_root(arg)?;
        log::info!("opening store at {}", root.display());
        let substrate = FolderSubstrate::new(GIGBOOK_FOLDER.to_owned(), &root)?;
        Ok(RecordStore::new(substrate).with_seed_policy(self.seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Substrate;
    use tempdir::TempDir;

    #[test]
    fn root_priority_order() {
        let config = Config {
            root: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        let env = Some(OsString::from("/from/env"));

        assert_eq!(
            config
                .resolve_root_with(Some(Path::new("/from/arg")), env.clone())
                .unwrap(),
            PathBuf::from("/from/arg")
        );
        assert_eq!(
            config.resolve_root_with(None, env).unwrap(),
            PathBuf::from("/from/env")
        );
        assert_eq!(
            config
                .resolve_root_with(None, Some(OsString::new()))
                .unwrap(),
            PathBuf::from("/from/config")
        );
    }

    #[test]
    fn partial_config_file_fills_defaults() {
        let dir = TempDir::new("gigbook_config").unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"seed": "on_first_read"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.seed, SeedPolicy::OnFirstRead);
        assert_eq!(config.root, None);
        assert_eq!(config.remote, None);

        fs::write(&path, "{broken").unwrap();
        assert!(matches!(Config::load(&path), Err(StoreError::Parse(_))));
    }

    #[test]
    fn remote_from_env_overrides_file() {
        let config = Config {
            remote: Some(RemoteConfig {
                url: Url::parse("https://file.example.co/").unwrap(),
                api_key: "file-key".to_owned(),
            }),
            ..Default::default()
        };

        let remote = config
            .remote_with(Some("https://env.example.co/".to_owned()), None)
            .unwrap()
            .unwrap();
        assert_eq!(remote.url.host_str(), Some("env.example.co"));
        assert_eq!(remote.api_key, "file-key");

        assert_eq!(config.remote_with(None, None).unwrap(), config.remote);
        assert!(config
            .remote_with(Some("not a url".to_owned()), Some("k".to_owned()))
            .is_err());
        assert!(Config::default()
            .remote_with(Some("https://env.example.co/".to_owned()), None)
            .is_err());
    }

    #[test]
    fn open_store_uses_the_seed_policy() {
        let dir = TempDir::new("gigbook_config").unwrap();
        let config = Config {
            seed: SeedPolicy::OnFirstRead,
            ..Default::default()
        };
        let mut store = config.open_store(Some(dir.path())).unwrap();
        assert_eq!(store.seed_policy(), SeedPolicy::OnFirstRead);
        assert_eq!(store.orders().unwrap().len(), 5);
        assert!(store
            .substrate()
            .keys()
            .unwrap()
            .contains(&"orders".to_owned()));
    }
}
