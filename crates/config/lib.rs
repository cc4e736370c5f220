mod style;

pub use style::Style;

use log::info;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = ".sales-report.yml";
pub const DEFAULT_DATA_FILE: &str = "cleaned_superstore.csv";
pub const DEFAULT_IMAGES_DIR: &str = "images";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot open config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_data")]
    pub data: PathBuf,
    #[serde(default = "default_images")]
    pub images: PathBuf,
    #[serde(default)]
    pub style: Style,
}

fn default_data() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_images() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGES_DIR)
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: default_data(),
            images: default_images(),
            style: Style::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(filename: P) -> Result<Config, ConfigError> {
        let path = filename.as_ref();
        let reader = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_reader(reader).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 配置文件不存在时使用默认值
    pub fn load_or_default<P: AsRef<Path>>(filename: P) -> Result<Config, ConfigError> {
        let path = filename.as_ref();
        if !path.exists() {
            info!("config file {:?} not found, using defaults", path);
            return Ok(Config::default());
        }
        Config::load(path)
    }
}
