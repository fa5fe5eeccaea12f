//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/pokedex/pokedex.toml` (or `--config FILE`)
//! 3. Environment variables: `POKEDEX_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::domain::{Catalog, RecordId, DEFAULT_STARTERS};

/// Unified configuration for pokedex.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Alternative catalog file (default: built-in first generation)
    pub catalog: Option<PathBuf>,
    /// Catalog ids offered as starters, in menu order
    pub starters: Vec<RecordId>,
    /// Colored terminal output
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: None,
            starters: DEFAULT_STARTERS.to_vec(),
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub catalog: Option<PathBuf>,
    pub starters: Option<Vec<RecordId>>,
    pub color: Option<bool>,
}

/// Get the XDG config directory for pokedex.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pokedex").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("pokedex.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// The `POKEDEX_*` variables of the process environment.
fn env_source() -> Environment {
    Environment::with_prefix("POKEDEX")
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("starters")
        .try_parsing(true)
}

/// `None` when the key is absent.
fn env_value<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            catalog: overlay.catalog.clone().or_else(|| self.catalog.clone()),
            starters: overlay
                .starters
                .clone()
                .unwrap_or_else(|| self.starters.clone()),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    fn expand_paths(&mut self) {
        if let Some(catalog) = &self.catalog {
            let expanded = expand_env_vars(catalog.to_string_lossy().as_ref());
            self.catalog = Some(PathBuf::from(expanded));
        }
    }

    /// Load settings with layered precedence from the global config file.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref())
    }

    /// Load settings using `path` in place of the global config file.
    ///
    /// Unlike the global file, an explicitly given file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ApplicationError> {
        if !path.exists() {
            return Err(ApplicationError::Config {
                message: format!("config file not found: {}", path.display()),
            });
        }
        Self::load_layers(Some(path))
    }

    #[instrument(level = "debug")]
    fn load_layers(file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file
        if let Some(path) = file {
            if path.exists() {
                debug!("Loading config from {}", path.display());
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current, env_source())?;

        current.expand_paths();
        Ok(current)
    }

    /// Apply POKEDEX_* environment variables as explicit overrides.
    ///
    /// An unset variable leaves the field alone; a malformed one is an error.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value(config.get_string("catalog"))? {
            settings.catalog = Some(PathBuf::from(val));
        }
        // a lone id parses as an integer rather than a list
        let starters = match config.get::<Vec<RecordId>>("starters") {
            Err(e) if !matches!(e, ConfigError::NotFound(_)) => config
                .get::<RecordId>("starters")
                .map(|id| vec![id])
                .map_err(|_| e),
            other => other,
        };
        if let Some(val) = env_value(starters)? {
            settings.starters = val;
        }
        if let Some(val) = env_value(config.get_bool("color"))? {
            settings.color = val;
        }
        Ok(settings)
    }

    /// Catalog selected by these settings, with the configured starters.
    #[instrument(level = "debug", skip(self))]
    pub fn load_catalog(&self) -> Result<Catalog, ApplicationError> {
        let catalog = match &self.catalog {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin()?,
        };
        Ok(catalog.with_starters(&self.starters)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        env_source().source(Some(map))
    }

    #[test]
    fn given_starters_list_in_env_when_applied_then_replaces_defaults() {
        let env = env_of(&[("POKEDEX_STARTERS", "25,133"), ("POKEDEX_COLOR", "false")]);

        let settings = Settings::apply_env_overrides(Settings::default(), env).unwrap();

        assert_eq!(settings.starters, vec![25, 133]);
        assert!(!settings.color);
        assert!(settings.catalog.is_none());
    }

    #[test]
    fn given_single_starter_in_env_when_applied_then_list_of_one() {
        let env = env_of(&[("POKEDEX_STARTERS", "25")]);

        let settings = Settings::apply_env_overrides(Settings::default(), env).unwrap();

        assert_eq!(settings.starters, vec![25]);
    }

    #[test]
    fn given_no_env_vars_when_applied_then_settings_unchanged() {
        let settings = Settings::apply_env_overrides(Settings::default(), env_of(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn given_malformed_starters_in_env_when_applied_then_config_error() {
        let env = env_of(&[("POKEDEX_STARTERS", "pikachu,eevee")]);

        let result = Settings::apply_env_overrides(Settings::default(), env);

        assert!(matches!(result, Err(ApplicationError::Config { .. })));
    }

    #[test]
    fn given_malformed_color_in_env_when_applied_then_config_error() {
        let env = env_of(&[("POKEDEX_COLOR", "sometimes")]);

        let result = Settings::apply_env_overrides(Settings::default(), env);

        assert!(matches!(result, Err(ApplicationError::Config { .. })));
    }

    #[test]
    fn overlay_replaces_only_specified_fields() {
        let base = Settings::default();
        let overlay = RawSettings {
            starters: Some(vec![25]),
            ..RawSettings::default()
        };
        let merged = base.merge_with(&overlay);
        assert_eq!(merged.starters, vec![25]);
        assert!(merged.color);
        assert!(merged.catalog.is_none());
    }
}
