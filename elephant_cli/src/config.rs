use std::path::{Path, PathBuf};

use elephant_backend::notify::MailerConfig;
use elephant_entities::StorageConfig;

const CONFIG_ENV_VAR: &str = "ELEPHANT_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./elephant.yaml";

#[derive(Debug, serde::Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub logging_config: String,
    pub mail: Option<MailerConfig>,
    pub deck: DeckConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage: StorageConfig::default(),
            logging_config: "info,sqlx::query=warn".into(),
            mail: None,
            deck: DeckConfig::default(),
        }
    }
}

#[derive(Debug, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DeckConfig {
    pub title: String,
    pub output_dir: PathBuf,
    pub compile_pdf: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        DeckConfig {
            title: "White Elephant Participants".into(),
            output_dir: PathBuf::from("."),
            compile_pdf: false,
        }
    }
}

/// The explicit path wins over the environment, which wins over the default
/// file. Only a default file that does not exist is skipped silently.
fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    default_path.exists().then_some(default_path)
}

pub(crate) fn read_config_inner(path: &Path) -> Result<Config, anyhow::Error> {
    let config = std::fs::read_to_string(path)?;
    let config = serde_yaml::from_str::<Config>(&config)?;
    Ok(config)
}

pub fn read_config(explicit: Option<&Path>) -> Config {
    let Some(path) = config_path(explicit) else {
        return Config::default();
    };

    match read_config_inner(&path) {
        Ok(config) => config,
        Err(e) => {
            //Print to stderr, since logging is set up in the config
            eprintln!("Warning: Failed to read config {}: {}", path.display(), e);
            Config::default()
        }
    }
}
