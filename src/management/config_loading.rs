use std::fs::File;
use std::path::Path;
use bevy::log::{info, warn};
use ron::de::{from_reader, SpannedError};
use thiserror::Error;
use crate::serialization::scene_config::SceneConfig;

pub const DEFAULT_CONFIG_PATH: &str = "assets/scenes/freight.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not open scene config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed scene config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: SpannedError,
    },
}

pub fn load_scene_config(path: impl AsRef<Path>) -> Result<SceneConfig, ConfigError> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    let file = File::open(path).map_err(|source| ConfigError::Io { path: shown.clone(), source })?;
    let config: SceneConfig = from_reader(file).map_err(|source| ConfigError::Parse { path: shown.clone(), source })?;

    info!("loaded scene config from {}", shown);
    Ok(config)
}

pub fn parse_scene_config(text: &str) -> Result<SceneConfig, ConfigError> {
    ron::from_str(text).map_err(|source| ConfigError::Parse { path: "<inline>".to_string(), source })
}

/// Loads `path`, falling back to the built-in defaults when the file is missing or broken.
pub fn load_or_default(path: impl AsRef<Path>) -> SceneConfig {
    match load_scene_config(path) {
        Ok(config) => config,
        Err(error) => {
            warn!("{}; using default scene config", error);
            SceneConfig::default()
        }
    }
}
