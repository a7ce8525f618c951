use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::{AadBinding, AppSecret, VaultCrypto};
use crate::errors::{PwVaultError, Result};
use crate::generator::GeneratorSettings;

/// Environment variable that overrides the configured application secret.
pub const APP_SECRET_ENV: &str = "PWVAULT_APP_SECRET";

/// Project-level configuration, loaded from `.pwvault.toml`.
///
/// Every field has a sensible default so pwvault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Application secret mixed into every derived key.
    /// `PWVAULT_APP_SECRET` takes precedence over this value.
    #[serde(default, skip_serializing)]
    pub app_secret: Option<String>,

    /// Associated-data binding for new and existing blobs.
    #[serde(default)]
    pub aad_binding: AadBinding,

    /// Cache derived keys for the lifetime of the process.
    #[serde(default)]
    pub cache_keys: bool,

    /// Entry store file (relative to the project root).
    #[serde(default = "default_store_file")]
    pub store_file: String,

    /// Defaults for `pwvault generate` and `add --generate`.
    #[serde(default)]
    pub generator: GeneratorSettings,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_store_file() -> String {
    "pwvault.json".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_secret: None,
            aad_binding: AadBinding::default(),
            cache_keys: false,
            store_file: default_store_file(),
            generator: GeneratorSettings::default(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".pwvault.toml";

    /// Load settings from `<project_dir>/.pwvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PwVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;
        settings.generator.validate().map_err(|e| {
            PwVaultError::ConfigError(format!("{}: {e}", config_path.display()))
        })?;

        tracing::debug!(path = %config_path.display(), "loaded config file");
        Ok(settings)
    }

    /// Build the full path to the entry store.
    ///
    /// Example: `project_dir/pwvault.json`
    pub fn store_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.store_file)
    }

    /// Resolve the application secret: env var, then config, then the
    /// built-in fallback.
    pub fn app_secret(&self) -> Result<AppSecret> {
        let from_env = std::env::var(APP_SECRET_ENV).ok().filter(|s| !s.is_empty());
        self.resolve_app_secret(from_env)
    }

    fn resolve_app_secret(&self, from_env: Option<String>) -> Result<AppSecret> {
        if let Some(secret) = from_env {
            tracing::debug!("app secret taken from {APP_SECRET_ENV}");
            return AppSecret::new(secret);
        }
        if let Some(secret) = &self.app_secret {
            tracing::debug!("app secret taken from config file");
            return AppSecret::new(secret.clone());
        }
        tracing::warn!(
            "no app secret configured; using the built-in default (set {APP_SECRET_ENV} to override)"
        );
        Ok(AppSecret::legacy())
    }

    /// Build a `VaultCrypto` configured from these settings.
    pub fn build_crypto(&self) -> Result<VaultCrypto> {
        let crypto = VaultCrypto::new(self.app_secret()?).with_binding(self.aad_binding);
        Ok(if self.cache_keys {
            crypto.with_key_cache()
        } else {
            crypto
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────
