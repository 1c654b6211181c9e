//! Environment-driven configuration structures shared by all binaries.

use std::{env, fmt, fs, path::Path};

use hex::encode as hex_encode;
use serde::Deserialize;
use sha3::{Digest, Sha3_256};
use thiserror::Error;

/// Identifying strings for one backend project, as issued by the hosting
/// platform. The record is never mutated after construction.
///
/// Loading is lenient: absent fields come back empty and are reported by
/// [`ClientConfig::missing_fields`] when the client is initialized.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    api_key: String,
    auth_domain: String,
    project_id: String,
    storage_bucket: String,
    messaging_sender_id: String,
    app_id: String,
}

impl ClientConfig {
    /// Field names in declaration order, using the platform's spelling.
    pub const FIELD_NAMES: [&'static str; 6] = [
        "apiKey",
        "authDomain",
        "projectId",
        "storageBucket",
        "messagingSenderId",
        "appId",
    ];

    pub fn new(
        api_key: impl Into<String>,
        auth_domain: impl Into<String>,
        project_id: impl Into<String>,
        storage_bucket: impl Into<String>,
        messaging_sender_id: impl Into<String>,
        app_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            auth_domain: auth_domain.into(),
            project_id: project_id.into(),
            storage_bucket: storage_bucket.into(),
            messaging_sender_id: messaging_sender_id.into(),
            app_id: app_id.into(),
        }
    }

    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Loads the client record from the process environment. When
    /// `BAAS_CONFIG_FILE` points at a JSON file, that file wins over the
    /// individual `BAAS_*` variables.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        hydrate_env_file()?;

        if let Some(path) = get_optional_var("BAAS_CONFIG_FILE") {
            return Self::from_json_file(path);
        }

        Ok(Self {
            api_key: get_optional_var("BAAS_API_KEY").unwrap_or_default(),
            auth_domain: get_optional_var("BAAS_AUTH_DOMAIN").unwrap_or_default(),
            project_id: get_optional_var("BAAS_PROJECT_ID").unwrap_or_default(),
            storage_bucket: get_optional_var("BAAS_STORAGE_BUCKET").unwrap_or_default(),
            messaging_sender_id: get_optional_var("BAAS_MESSAGING_SENDER_ID")
                .unwrap_or_default(),
            app_id: get_optional_var("BAAS_APP_ID").unwrap_or_default(),
        })
    }

    /// Parses the JSON object literal the hosting console hands out. Values
    /// are trimmed the same way environment variables are.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(raw)
            .map(Self::trimmed)
            .map_err(|source| ConfigError::InvalidJson { source })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn auth_domain(&self) -> &str {
        &self.auth_domain
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn storage_bucket(&self) -> &str {
        &self.storage_bucket
    }

    pub fn messaging_sender_id(&self) -> &str {
        &self.messaging_sender_id
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Names of the fields that are empty or whitespace-only.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        Self::FIELD_NAMES
            .iter()
            .zip(self.fields())
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect()
    }

    /// SHA3-256 digest over every field. Two records are interchangeable
    /// exactly when their fingerprints match.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha3_256::new();
        for value in self.fields() {
            hasher.update(value.as_bytes());
            hasher.update([0u8]);
        }
        hex_encode(hasher.finalize())
    }

    fn trimmed(self) -> Self {
        Self::new(
            self.api_key.trim(),
            self.auth_domain.trim(),
            self.project_id.trim(),
            self.storage_bucket.trim(),
            self.messaging_sender_id.trim(),
            self.app_id.trim(),
        )
    }

    fn fields(&self) -> [&str; 6] {
        [
            self.api_key.as_str(),
            self.auth_domain.as_str(),
            self.project_id.as_str(),
            self.storage_bucket.as_str(),
            self.messaging_sender_id.as_str(),
            self.app_id.as_str(),
        ]
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("auth_domain", &self.auth_domain)
            .field("project_id", &self.project_id)
            .field("storage_bucket", &self.storage_bucket)
            .field("messaging_sender_id", &self.messaging_sender_id)
            .field("app_id", &self.app_id)
            .finish()
    }
}

#[derive(Debug, Default, Clone)]
pub struct ClientConfigBuilder {
    api_key: String,
    auth_domain: String,
    project_id: String,
    storage_bucket: String,
    messaging_sender_id: String,
    app_id: String,
}

impl ClientConfigBuilder {
    pub fn api_key(mut self, value: impl Into<String>) -> Self {
        self.api_key = value.into();
        self
    }

    pub fn auth_domain(mut self, value: impl Into<String>) -> Self {
        self.auth_domain = value.into();
        self
    }

    pub fn project_id(mut self, value: impl Into<String>) -> Self {
        self.project_id = value.into();
        self
    }

    pub fn storage_bucket(mut self, value: impl Into<String>) -> Self {
        self.storage_bucket = value.into();
        self
    }

    pub fn messaging_sender_id(mut self, value: impl Into<String>) -> Self {
        self.messaging_sender_id = value.into();
        self
    }

    pub fn app_id(mut self, value: impl Into<String>) -> Self {
        self.app_id = value.into();
        self
    }

    pub fn build(self) -> ClientConfig {
        ClientConfig {
            api_key: self.api_key,
            auth_domain: self.auth_domain,
            project_id: self.project_id,
            storage_bucket: self.storage_bucket,
            messaging_sender_id: self.messaging_sender_id,
            app_id: self.app_id,
        }
    }
}

/// HTTP bind settings for the API binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    api_bind_address: String,
}

impl ApiConfig {
    /// Loads only the environment variables required by the API binary.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        hydrate_env_file()?;

        Ok(Self {
            api_bind_address: get_required_var("API_BIND_ADDRESS")?,
        })
    }

    pub fn api_bind_address(&self) -> &str {
        &self.api_bind_address
    }
}

fn get_required_var(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(ConfigError::MissingVar { key })
            } else {
                Ok(trimmed.to_string())
            }
        }
        Err(_) => Err(ConfigError::MissingVar { key }),
    }
}

fn get_optional_var(key: &'static str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub fn hydrate_env_file() -> Result<(), ConfigError> {
    if env::var_os("BAAS_SKIP_DOTENV").is_some() {
        return Ok(());
    }
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(ConfigError::Dotenv { source: err }),
    }

    Ok(())
}

/// Errors emitted when `.env` hydration or configuration parsing fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable `{key}`")]
    MissingVar { key: &'static str },
    #[error("failed to read config file `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid client config json: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to load .env file: {source}")]
    Dotenv {
        #[from]
        source: dotenvy::Error,
    },
}
