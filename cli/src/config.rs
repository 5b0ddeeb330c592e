// SPDX-FileCopyrightText: 2025-2026 Horario Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use horario_core::{APP_NAME, Config as CoreConfig};

const HORARIO_CONFIG_ENV: &str = "HORARIO_CONFIG";

/// Loads the core configuration.
///
/// Lookup order: the explicit path, `$HORARIO_CONFIG`, then the user config directory.
/// Built-in defaults apply when none of them names an existing file.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<CoreConfig, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(HORARIO_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let Some(config) = get_config_dir()
            .map(|dir| dir.join(format!("{APP_NAME}/config.toml")))
            .filter(|config| config.exists())
        else {
            tracing::debug!("no config file found, using built-in defaults");
            return Ok(CoreConfig::default());
        };
        config
    };

    tracing::debug!(path = %path.display(), "reading config file");
    let raw = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map_err(|e| format!("Invalid config file at {}: {}", path.display(), e))?;
    Ok(raw.core)
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Option<PathBuf> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir
}
