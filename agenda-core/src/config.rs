//! Global agenda configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, AgendaResult};
use crate::grid::ViewMode;
use crate::zone::Zone;

static DEFAULT_DATA_DIR: &str = "~/.local/share/agenda";
static DEFAULT_TIME_ZONE: &str = "UTC";

/// Prefix for environment variables overriding file values, e.g. `AGENDA_TIME_ZONE`.
pub const ENV_PREFIX: &str = "AGENDA";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_time_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}

/// Configuration at ~/.config/agenda/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AgendaConfig {
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    #[serde(default)]
    pub default_view: ViewMode,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        AgendaConfig {
            data_dir: default_data_dir(),
            time_zone: default_time_zone(),
            default_view: ViewMode::default(),
        }
    }
}

impl AgendaConfig {
    pub fn config_path() -> AgendaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AgendaError::Config("Could not determine config directory".into()))?
            .join("agenda");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/agenda/config.toml, creating it on first run.
    pub fn load() -> AgendaResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing) with environment overrides on top.
    pub fn load_from(path: &Path) -> AgendaResult<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: &Path, env: Environment) -> AgendaResult<Self> {
        let config: AgendaConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(env)
            .build()
            .map_err(|e| AgendaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AgendaError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> AgendaResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| AgendaError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| AgendaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> AgendaResult<()> {
        let contents = format!(
            "\
# agenda configuration

# Where events are stored:
# data_dir = \"{}\"

# IANA time zone used to decide which day an event falls on:
# time_zone = \"{}\"

# View used by `agenda show` (week, month or year):
# default_view = \"month\"
",
            DEFAULT_DATA_DIR, DEFAULT_TIME_ZONE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AgendaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AgendaError::Config(format!("Could not write config file: {e}")))?;

        tracing::info!(path = %path.display(), "created default config");
        Ok(())
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// The data directory in display-friendly form, keeping `~`.
    pub fn display_path(&self) -> &Path {
        &self.data_dir
    }

    pub fn zone(&self) -> AgendaResult<Zone> {
        Zone::parse(&self.time_zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = AgendaConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.data_dir, default_data_dir());
        assert_eq!(config.default_view, ViewMode::Month);
        assert_eq!(config.zone().unwrap(), Zone::UTC);
    }

    #[test]
    fn commented_default_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        AgendaConfig::create_default_config(&path).unwrap();
        let config = AgendaConfig::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.data_dir, default_data_dir());
        assert_eq!(config.time_zone, "UTC");
    }

    #[test]
    fn file_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/srv/agenda\"\ntime_zone = \"Europe/Berlin\"\ndefault_view = \"week\"\n",
        )
        .unwrap();

        let config = AgendaConfig::load_from(&path).unwrap();

        assert_eq!(config.data_path(), PathBuf::from("/srv/agenda"));
        assert_eq!(config.default_view, ViewMode::Week);
        assert_eq!(config.zone().unwrap().name(), "Europe/Berlin");
    }

    fn env_with(vars: &[(&str, &str)]) -> Environment {
        let mut map = Map::new();
        for (key, value) in vars {
            map.insert(key.to_string(), value.to_string());
        }
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn environment_overrides_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "time_zone = \"Europe/Berlin\"\ndefault_view = \"week\"\n").unwrap();

        let env = env_with(&[("AGENDA_TIME_ZONE", "Asia/Bangkok"), ("AGENDA_DATA_DIR", "/srv/agenda")]);
        let config = AgendaConfig::load_with_env(&path, env).unwrap();

        assert_eq!(config.zone().unwrap().name(), "Asia/Bangkok");
        assert_eq!(config.data_path(), PathBuf::from("/srv/agenda"));
        assert_eq!(config.default_view, ViewMode::Week);
    }

    #[test]
    fn unrelated_variables_are_ignored() {
        let dir = tempfile::tempdir().unwrap();

        let env = env_with(&[("AGENDA_LOG", "debug"), ("HOME", "/root")]);
        let config = AgendaConfig::load_with_env(&dir.path().join("config.toml"), env).unwrap();

        assert_eq!(config.time_zone, "UTC");
    }

    #[test]
    fn unknown_zone_is_rejected() {
        let config = AgendaConfig {
            time_zone: "Mars/Olympus".to_string(),
            ..AgendaConfig::default()
        };

        assert!(matches!(config.zone(), Err(AgendaError::InvalidZone(_))));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = AgendaConfig {
            data_dir: PathBuf::from("/tmp/agenda-data"),
            time_zone: "Asia/Bangkok".to_string(),
            default_view: ViewMode::Year,
        };

        config.save_to(&path).unwrap();

        assert_eq!(AgendaConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn tilde_is_expanded() {
        let config = AgendaConfig::default();

        assert!(config.data_path().ends_with(".local/share/agenda"));
        assert_eq!(config.display_path(), Path::new(DEFAULT_DATA_DIR));
    }
}
