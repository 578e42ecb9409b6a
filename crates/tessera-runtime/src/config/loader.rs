//! Configuration loader using figment.
//!
//! # Feature Flags
//!
//! - `toml-config` *(default)*: enables TOML files (`tessera.toml`)
//! - `yaml-config`: enables YAML files (`tessera.yaml`, `tessera.yml`)
//!
//! # Configuration Priority (lowest to highest)
//!
//! 1. Built-in defaults ([`DEFAULT_OPTIONS`](super::schema::DEFAULT_OPTIONS))
//! 2. Programmatic overrides ([`ConfigLoader::merge`])
//! 3. Main config file (`tessera.toml`)
//! 4. Locale files (`tessera_fr.toml`, then `tessera_fr_CA.toml`)
//! 5. Environment variables (`TESSERA_*`)
//!
//! # Environment Variable Mapping
//!
//! Environment variables use the `TESSERA_` prefix with `__` as separator:
//!
//! - `TESSERA_DEV_MODE=true` → `dev_mode = true`
//! - `TESSERA_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `TESSERA_GROUPS__GLOBAL__FEATURE__PAGEABLE=false` →
//!   `groups.global.feature.pageable = false`
//!
//! # Example
//!
//! ```rust,ignore
//! use tessera_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .file("./config/tessera.toml")
//!     .load_locale("fr_CA")?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(any(feature = "yaml-config", feature = "toml-config"))]
use figment::providers::Format;
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
#[cfg(feature = "yaml-config")]
use figment::providers::Yaml;
use figment::providers::{Env, Serialized};
use tracing::{debug, info, trace};

use super::error::{ConfigError, ConfigResult};
use super::schema::RuntimeConfig;
use super::validation::validate_config;

/// Base name of every configuration file.
const FILE_STEM: &str = "tessera";

/// Produces the configuration for a locale.
///
/// The template cache only talks to this trait, so tests and embedders can
/// hand it a fixed [`RuntimeConfig`] instead of a file based loader.
pub trait OptionSource: Send + Sync {
    /// Loads the configuration that applies to `locale`.
    fn load(&self, locale: &str) -> ConfigResult<RuntimeConfig>;
}

impl OptionSource for RuntimeConfig {
    fn load(&self, _locale: &str) -> ConfigResult<RuntimeConfig> {
        Ok(self.clone())
    }
}

/// Configuration loader with figment-based multi-source support.
///
/// # Example
///
/// ```rust,ignore
/// let config = ConfigLoader::new()
///     .file("tessera.toml")
///     .without_env()
///     .load()?;
/// ```
#[derive(Clone)]
pub struct ConfigLoader {
    /// Base figment instance.
    figment: Figment,
    /// Search paths for configuration files.
    search_paths: Vec<PathBuf>,
    /// Whether to load environment variables.
    load_env: bool,
    /// Specific config file to load (overrides search).
    config_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a new configuration loader with defaults.
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds current directory to search paths.
    pub fn with_current_dir(self) -> Self {
        if let Ok(cwd) = std::env::current_dir() {
            self.search_path(cwd)
        } else {
            self
        }
    }

    /// Adds user config directory to search paths.
    pub fn with_user_config_dir(self) -> Self {
        if let Some(config_dir) = dirs::config_dir() {
            self.search_path(config_dir.join(FILE_STEM))
        } else {
            self
        }
    }

    /// Sets a specific configuration file to load.
    ///
    /// Locale files are looked up next to it.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables loading environment variables (default: true).
    pub fn with_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges additional configuration programmatically.
    pub fn merge(mut self, config: RuntimeConfig) -> Self {
        self.figment = self.figment.merge(Serialized::defaults(config));
        self
    }

    /// Loads the configuration without locale files.
    pub fn load(&self) -> ConfigResult<RuntimeConfig> {
        self.load_locale("")
    }

    /// Loads the configuration that applies to `locale` (`fr`, `fr_CA` or
    /// `fr-CA`).
    pub fn load_locale(&self, locale: &str) -> ConfigResult<RuntimeConfig> {
        let figment = self.build_figment(locale)?;

        let config: RuntimeConfig = figment
            .extract()
            .map_err(|e| ConfigError::ParseError(format!("Failed to extract configuration: {e}")))?;
        validate_config(&config)?;

        debug!(
            locale,
            groups = config.groups.len(),
            dev_mode = config.dev_mode,
            logging_level = %config.logging.level,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Builds the figment instance with all sources.
    fn build_figment(&self, locale: &str) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(RuntimeConfig::default()));
        figment = figment.merge(self.figment.clone());

        if let Some(path) = &self.config_file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            info!(path = %path.display(), "Loading configuration file");
            figment = Self::merge_config_file(figment, path)?;
            for locale_path in locale_variants(path, locale) {
                if locale_path.exists() {
                    debug!(path = %locale_path.display(), "Loading locale configuration");
                    figment = Self::merge_config_file(figment, &locale_path)?;
                }
            }
        } else {
            figment = self.load_config_files(figment, locale);
        }

        if self.load_env {
            trace!("Loading environment variables with TESSERA_ prefix");
            figment = figment.merge(Env::prefixed("TESSERA_").split("__"));
        }

        Ok(figment)
    }

    /// Merges a single config file into the figment, dispatching on file extension.
    ///
    /// Only extensions enabled via feature flags are accepted.
    fn merge_config_file(figment: Figment, path: &Path) -> ConfigResult<Figment> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            #[cfg(feature = "toml-config")]
            "toml" => Ok(figment.merge(Toml::file(path))),
            #[cfg(feature = "yaml-config")]
            "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
            _ => Err(ConfigError::ParseError(format!(
                "Unsupported or disabled configuration file format: .{ext}"
            ))),
        }
    }

    /// Resolves the effective list of search paths.
    fn resolve_search_paths(&self) -> Vec<PathBuf> {
        if self.search_paths.is_empty() {
            let mut paths = Vec::new();
            if let Ok(cwd) = std::env::current_dir() {
                paths.push(cwd);
            }
            if let Some(config_dir) = dirs::config_dir() {
                paths.push(config_dir.join(FILE_STEM));
            }
            paths
        } else {
            self.search_paths.clone()
        }
    }

    /// Searches for configuration files, stopping at the first search path
    /// that holds a main file. Locale files are merged after it.
    fn load_config_files(&self, mut figment: Figment, locale: &str) -> Figment {
        let mut extensions: Vec<&str> = Vec::new();
        #[cfg(feature = "toml-config")]
        extensions.push("toml");
        #[cfg(feature = "yaml-config")]
        extensions.extend(["yaml", "yml"]);

        for search_path in self.resolve_search_paths() {
            let mut found = false;
            for ext in &extensions {
                let base_path = search_path.join(format!("{FILE_STEM}.{ext}"));
                if !base_path.exists() {
                    continue;
                }
                info!(path = %base_path.display(), "Loading configuration file");
                // Only extensions enabled above are tried, so this cannot fail.
                if let Ok(merged) = Self::merge_config_file(figment.clone(), &base_path) {
                    figment = merged;
                }
                for locale_path in locale_variants(&base_path, locale) {
                    if locale_path.exists() {
                        debug!(path = %locale_path.display(), "Loading locale configuration");
                        if let Ok(merged) = Self::merge_config_file(figment.clone(), &locale_path) {
                            figment = merged;
                        }
                    }
                }
                found = true;
            }
            if found {
                return figment;
            }
        }

        debug!("No configuration file found, using defaults");
        figment
    }
}

impl OptionSource for ConfigLoader {
    fn load(&self, locale: &str) -> ConfigResult<RuntimeConfig> {
        self.load_locale(locale)
    }
}

/// Locale specific siblings of `base`, least specific first:
/// `tessera_fr.toml`, then `tessera_fr_CA.toml`.
fn locale_variants(base: &Path, locale: &str) -> Vec<PathBuf> {
    let stem = base
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(FILE_STEM);
    let ext = base.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let mut parts = locale
        .split(['_', '-'])
        .map(str::trim)
        .filter(|part| !part.is_empty());
    let mut variants = Vec::new();
    let Some(language) = parts.next() else {
        return variants;
    };
    let language = language.to_lowercase();
    variants.push(base.with_file_name(format!("{stem}_{language}.{ext}")));
    if let Some(region) = parts.next() {
        let region = region.to_uppercase();
        variants.push(base.with_file_name(format!("{stem}_{language}_{region}.{ext}")));
    }
    variants
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConfigLoader::new()
            .search_path("/nonexistent")
            .without_env()
            .load()
            .unwrap();

        assert_eq!(config.logging.level.as_str(), "info");
        assert_eq!(config.group_names(), ["global"]);
    }

    #[test]
    fn test_locale_variants() {
        let base = Path::new("/etc/tessera.toml");
        assert_eq!(
            locale_variants(base, "fr-ca"),
            [
                PathBuf::from("/etc/tessera_fr.toml"),
                PathBuf::from("/etc/tessera_fr_CA.toml")
            ]
        );
        assert_eq!(
            locale_variants(base, "EN"),
            [PathBuf::from("/etc/tessera_en.toml")]
        );
        assert!(locale_variants(base, "").is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigLoader::new()
            .file("/nonexistent/tessera.toml")
            .without_env()
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
