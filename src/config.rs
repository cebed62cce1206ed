use std::{env, fs, path::PathBuf};

use directories::BaseDirs;
use lazy_static::lazy_static;
use serde::Deserialize;

const CONFIG: &str = include_str!("../.config/config.json5");

/// Directories the engine may write to (log file, cached payloads)
#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
}

/// Settings for the refresh collaborator
#[derive(Clone, Debug, Deserialize)]
pub struct RefreshConfig {
    /// Endpoint answering the filtered row fetch
    #[serde(default)]
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

impl Config {
    pub fn from_path(config_path: Option<&PathBuf>) -> Result<Self, config::ConfigError> {
        let data_dir = get_data_dir();
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_str().unwrap())?
            .set_default("config_dir", config_dir.to_str().unwrap())?;

        // Determine primary config file path
        let home_cfg = default_home_config_path();
        let selected_path = if let Some(p) = config_path {
            expand_tilde(p)
        } else {
            // Seed the default file with the embedded defaults on first use
            if !home_cfg.exists() {
                if let Some(parent) = home_cfg.parent() {
                    let _ = fs::create_dir_all(parent);
                }
                let _ = fs::write(&home_cfg, CONFIG);
            }
            home_cfg
        };

        builder = builder.add_source(
            config::File::from(selected_path)
                .format(config::FileFormat::Json5)
                .required(true),
        );

        builder.build()?.try_deserialize()
    }
}

fn expand_tilde(path: &PathBuf) -> PathBuf {
    if let Some(s) = path.to_str() {
        if s.starts_with("~") {
            if let Some(base) = BaseDirs::new() {
                return PathBuf::from(s.replacen("~", base.home_dir().to_str().unwrap_or(""), 1));
            }
        }
    }
    path.clone()
}

fn default_home_config_path() -> PathBuf {
    if let Some(base) = BaseDirs::new() {
        return base.home_dir().join(".tableify-config.json5");
    }
    PathBuf::from(".tableify-config.json5")
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else {
        PathBuf::from(".").join(".config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_parse() {
        let cfg: Config = json5::from_str(CONFIG).unwrap();
        assert_eq!(cfg.refresh.timeout_secs, 30);
        assert!(cfg.refresh.endpoint.is_empty());
    }

    #[test]
    fn test_refresh_config_defaults() {
        let cfg = RefreshConfig::default();
        assert_eq!(cfg.timeout_secs, 30);
    }
}
