use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

pub const DEFAULT_CONFIG: &str = "readout.ini";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Ini { path: PathBuf, source: ini::Error },
    #[error("missing [{0}] section")]
    MissingSection(&'static str),
    #[error("missing key {0} in [launch]")]
    MissingKey(&'static str),
}

/// What to read: which archive, and which map inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadoutConfig {
    pub pak: PathBuf,
    pub map: String,
}

impl Default for ReadoutConfig {
    fn default() -> Self {
        Self {
            pak: PathBuf::from("pak0.pak"),
            map: "start".to_owned(),
        }
    }
}

impl ReadoutConfig {
    /// Read `path`, falling back to the defaults when there is no such file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("No {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Ini {
            path: path.to_owned(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let launch = ini
            .section(Some("launch"))
            .ok_or(ConfigError::MissingSection("launch"))?;

        let pak = launch.get("pak").ok_or(ConfigError::MissingKey("pak"))?;
        let map = launch.get("map").ok_or(ConfigError::MissingKey("map"))?;

        Ok(Self {
            pak: PathBuf::from(pak),
            map: map.to_owned(),
        })
    }
}

#[cfg(test)]
mod config_tests {
    use std::path::{Path, PathBuf};

    use ini::Ini;

    use super::{ConfigError, ReadoutConfig};

    #[test]
    fn reads_launch_section() {
        let ini = Ini::load_from_str("[launch]\npak = id1/pak0.pak\nmap = e1m1\n").unwrap();
        let config = ReadoutConfig::from_ini(&ini).unwrap();
        assert_eq!(config.pak, PathBuf::from("id1/pak0.pak"));
        assert_eq!(config.map, "e1m1");
    }

    #[test]
    fn missing_key() {
        let ini = Ini::load_from_str("[launch]\npak = pak0.pak\n").unwrap();
        assert!(matches!(
            ReadoutConfig::from_ini(&ini),
            Err(ConfigError::MissingKey("map"))
        ));
    }

    #[test]
    fn missing_section() {
        let ini = Ini::load_from_str("[game]\nname = id1\n").unwrap();
        assert!(matches!(
            ReadoutConfig::from_ini(&ini),
            Err(ConfigError::MissingSection("launch"))
        ));
    }

    #[test]
    fn no_file_means_defaults() {
        let config = ReadoutConfig::load(Path::new("/nonexistent/readout.ini")).unwrap();
        assert_eq!(config, ReadoutConfig::default());
    }
}
