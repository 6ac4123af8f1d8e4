//! Configuration layering, fallback logic, and environment overrides

use std::collections::HashMap;
use std::time::Duration;

use camino::Utf8PathBuf;
use url::Url;

use crate::settings::{self, DocliToml, ResolverSection, CONFIG_FILE_NAME};
use crate::ConfigResult;
use docli_core::error::DocliError;
use docli_registry::{
    Endpoints, DEFAULT_CDN_ASSET_URL, DEFAULT_CDN_DATA_URL, DEFAULT_REGISTRY_URL, DEFAULT_TIMEOUT,
};

/// Prefix of environment variables read as overrides
pub const ENV_PREFIX: &str = "DOCLI_";

/// Fully layered settings the resolver is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    pub registry_url: String,
    pub cdn_data_url: String,
    pub cdn_asset_url: String,
    pub timeout_secs: u64,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            cdn_data_url: DEFAULT_CDN_DATA_URL.to_string(),
            cdn_asset_url: DEFAULT_CDN_ASSET_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl ResolverSettings {
    /// Base URLs for the registry client
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            registry_url: self.registry_url.clone(),
            cdn_data_url: self.cdn_data_url.clone(),
            cdn_asset_url: self.cdn_asset_url.clone(),
        }
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check every URL is absolute http(s) and the timeout is positive
    pub fn validate(&self) -> ConfigResult<()> {
        validate_url("registry-url", &self.registry_url)?;
        validate_url("cdn-data-url", &self.cdn_data_url)?;
        validate_url("cdn-asset-url", &self.cdn_asset_url)?;

        if self.timeout_secs == 0 {
            return Err(DocliError::ConfigValidation {
                field: "timeout-secs".to_string(),
                reason: "timeout must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
}

/// Configuration layering and merging
pub struct ConfigLayering;

/// Where the base layer of the settings came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Built-in defaults, no docli.toml found
    Defaults,
    /// Project docli.toml file
    ProjectToml(Utf8PathBuf),
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Load project configuration, falling back to defaults when absent
    pub async fn load_project_config(&self) -> ConfigResult<(DocliToml, ConfigSource)> {
        let path = self.resolve_config_path(CONFIG_FILE_NAME)?;
        if path.exists() {
            let config = settings::load_from_file(&path).await?;
            return Ok((config, ConfigSource::ProjectToml(path)));
        }

        Ok((DocliToml::default(), ConfigSource::Defaults))
    }

    /// Find configuration file in project (walks up directory tree)
    pub fn resolve_config_path(&self, filename: &str) -> ConfigResult<Utf8PathBuf> {
        let mut current = self.cwd.as_path();

        loop {
            let config_path = current.join(filename);
            if config_path.exists() {
                return Ok(config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        // Path in the working directory even though it doesn't exist
        Ok(self.cwd.join(filename))
    }

    /// Layer docli.toml, `DOCLI_*` variables and CLI overrides into settings
    pub async fn load_settings(
        &self,
        cli_overrides: HashMap<String, String>,
    ) -> ConfigResult<(ResolverSettings, ConfigSource)> {
        let (config, source) = self.load_project_config().await?;
        let settings = ConfigLayering::merge(
            Some(config.resolver),
            ConfigLayering::collect_env_overrides(),
            cli_overrides,
        )?;
        Ok((settings, source))
    }
}

impl ConfigLayering {
    /// Merge layers over the defaults; later layers win
    pub fn merge(
        file: Option<ResolverSection>,
        env_overrides: HashMap<String, String>,
        cli_overrides: HashMap<String, String>,
    ) -> ConfigResult<ResolverSettings> {
        let mut merged = ResolverSettings::default();

        if let Some(section) = file {
            Self::apply_file(&mut merged, section);
        }

        Self::apply_env_overrides(&mut merged, &env_overrides)?;

        // CLI flags have the highest priority
        Self::apply_cli_overrides(&mut merged, &cli_overrides)?;

        merged.validate()?;
        Ok(merged)
    }

    fn apply_file(settings: &mut ResolverSettings, section: ResolverSection) {
        if let Some(url) = section.registry_url {
            settings.registry_url = url;
        }
        if let Some(url) = section.cdn_data_url {
            settings.cdn_data_url = url;
        }
        if let Some(url) = section.cdn_asset_url {
            settings.cdn_asset_url = url;
        }
        if let Some(secs) = section.timeout_secs {
            settings.timeout_secs = secs;
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(
        settings: &mut ResolverSettings,
        overrides: &HashMap<String, String>,
    ) -> ConfigResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "DOCLI_REGISTRY_URL" => settings.registry_url = value.clone(),
                "DOCLI_CDN_DATA_URL" => settings.cdn_data_url = value.clone(),
                "DOCLI_CDN_ASSET_URL" => settings.cdn_asset_url = value.clone(),
                "DOCLI_TIMEOUT_SECS" => settings.timeout_secs = parse_timeout(key, value)?,
                _ => {
                    // Unknown environment variable, ignore
                }
            }
        }

        Ok(())
    }

    /// Apply CLI flag overrides
    fn apply_cli_overrides(
        settings: &mut ResolverSettings,
        overrides: &HashMap<String, String>,
    ) -> ConfigResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "registry-url" => settings.registry_url = value.clone(),
                "cdn-data-url" => settings.cdn_data_url = value.clone(),
                "cdn-asset-url" => settings.cdn_asset_url = value.clone(),
                "timeout-secs" => settings.timeout_secs = parse_timeout(key, value)?,
                _ => {
                    // Unknown CLI override, ignore
                }
            }
        }

        Ok(())
    }

    /// Collect environment variable overrides
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect()
    }
}

fn parse_timeout(field: &str, value: &str) -> ConfigResult<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| DocliError::ConfigValidation {
            field: field.to_string(),
            reason: format!("Invalid timeout '{}': {}", value, e),
        })
}

fn validate_url(field: &str, value: &str) -> ConfigResult<()> {
    let url = Url::parse(value).map_err(|e| DocliError::ConfigValidation {
        field: field.to_string(),
        reason: format!("Invalid URL '{}': {}", value, e),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(DocliError::ConfigValidation {
            field: field.to_string(),
            reason: format!("Unsupported URL scheme '{}' in '{}'", scheme, value),
        }),
    }
}
