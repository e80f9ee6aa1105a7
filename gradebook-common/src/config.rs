//! Configuration loading and data folder resolution
//!
//! Data folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. `GRADEBOOK_DATA_FOLDER` environment variable
//! 3. `data_folder` in the TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! Store file names are resolved against the data folder, never the
//! current working directory.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Environment variable overriding the data folder
pub const ENV_DATA_FOLDER: &str = "GRADEBOOK_DATA_FOLDER";

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_CURRICULUM_FILE: &str = "disciplinas.json";
pub const DEFAULT_GRADES_FILE: &str = "notas.json";

/// Bootstrap configuration loaded from TOML file
///
/// Every key is optional; a missing file means all defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Folder holding the curriculum and grade files
    #[serde(default)]
    pub data_folder: Option<PathBuf>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// HTTP bind address
    #[serde(default)]
    pub bind_address: Option<String>,

    /// Curriculum file name (relative to the data folder) or absolute path
    #[serde(default = "default_curriculum_file")]
    pub curriculum_file: PathBuf,

    /// Grade store file name (relative to the data folder) or absolute path
    #[serde(default = "default_grades_file")]
    pub grades_file: PathBuf,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            data_folder: None,
            port: None,
            bind_address: None,
            curriculum_file: default_curriculum_file(),
            grades_file: default_grades_file(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_curriculum_file() -> PathBuf {
    PathBuf::from(DEFAULT_CURRICULUM_FILE)
}

fn default_grades_file() -> PathBuf {
    PathBuf::from(DEFAULT_GRADES_FILE)
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Values given on the command line (or their clap env fallbacks)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_folder: Option<PathBuf>,
    pub port: Option<u16>,
    pub bind_address: Option<String>,
}

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_folder: PathBuf,
    pub curriculum_path: PathBuf,
    pub grades_path: PathBuf,
    pub bind_address: String,
    pub port: u16,
    pub log_level: String,
}

impl Settings {
    pub fn resolve(cli: &CliOverrides, config: &TomlConfig) -> Self {
        let data_folder = resolve_data_folder(cli.data_folder.as_deref(), config);
        Self {
            curriculum_path: data_folder.join(&config.curriculum_file),
            grades_path: data_folder.join(&config.grades_file),
            data_folder,
            bind_address: cli
                .bind_address
                .clone()
                .or_else(|| config.bind_address.clone())
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port: cli.port.or(config.port).unwrap_or(DEFAULT_PORT),
            log_level: config.logging.level.clone(),
        }
    }
}

/// Load the TOML config file
///
/// With an explicit `path`, the file must exist. Without one, the default
/// location is tried and `Ok(None)` returned when it is absent. A file
/// that exists but does not parse is always an error.
pub fn load_toml_config(path: Option<&Path>) -> Result<Option<TomlConfig>> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(None),
        },
    };

    let content = std::fs::read_to_string(&path).map_err(|e| {
        Error::Config(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_toml_config(&content)
        .map(Some)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

pub fn parse_toml_config(content: &str) -> Result<TomlConfig> {
    toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
}

/// `<config_dir>/gradebook/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gradebook").join("config.toml"))
}

/// Data folder following the priority order in the module docs
pub fn resolve_data_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ENV_DATA_FOLDER) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.data_folder {
        return path.clone();
    }

    default_data_folder()
}

/// OS-dependent default data folder
pub fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("gradebook"))
        .unwrap_or_else(|| PathBuf::from("./gradebook_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse_toml_config("").unwrap();
        assert!(config.data_folder.is_none());
        assert!(config.port.is_none());
        assert_eq!(config.curriculum_file, PathBuf::from("disciplinas.json"));
        assert_eq!(config.grades_file, PathBuf::from("notas.json"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse_toml_config(
            r#"
            data_folder = "/srv/boletim"
            port = 8080
            bind_address = "0.0.0.0"
            curriculum_file = "curriculo.json"
            grades_file = "/var/lib/boletim/notas.json"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_folder, Some(PathBuf::from("/srv/boletim")));
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.bind_address.as_deref(), Some("0.0.0.0"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_invalid_config_is_error() {
        assert!(matches!(
            parse_toml_config("port = \"not a number\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_absolute_store_path_ignores_data_folder() {
        let config = TomlConfig {
            grades_file: PathBuf::from("/var/lib/boletim/notas.json"),
            ..TomlConfig::default()
        };
        let cli = CliOverrides {
            data_folder: Some(PathBuf::from("/tmp/gradebook")),
            ..CliOverrides::default()
        };

        let settings = Settings::resolve(&cli, &config);
        assert_eq!(settings.curriculum_path, PathBuf::from("/tmp/gradebook/disciplinas.json"));
        assert_eq!(settings.grades_path, PathBuf::from("/var/lib/boletim/notas.json"));
    }

    #[test]
    fn test_cli_port_and_bind_override_config() {
        let config = TomlConfig {
            port: Some(8080),
            bind_address: Some("0.0.0.0".to_string()),
            ..TomlConfig::default()
        };
        let cli = CliOverrides {
            data_folder: Some(PathBuf::from("/tmp/gradebook")),
            port: Some(9090),
            bind_address: None,
        };

        let settings = Settings::resolve(&cli, &config);
        assert_eq!(settings.port, 9090);
        assert_eq!(settings.bind_address, "0.0.0.0");

        let defaults = Settings::resolve(
            &CliOverrides {
                data_folder: Some(PathBuf::from("/tmp/gradebook")),
                ..CliOverrides::default()
            },
            &TomlConfig::default(),
        );
        assert_eq!(defaults.port, DEFAULT_PORT);
        assert_eq!(defaults.bind_address, DEFAULT_BIND_ADDRESS);
    }
}
