//! Application-level configuration loading, including the pass-the-ball defaults.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::session::BallSettings;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "MINIGAMES_CONFIG_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    pass_the_ball: BallSettings,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        starting_balls = app_config.pass_the_ball.starting_balls,
                        cycle_timer_secs = app_config.pass_the_ball.cycle_timer_secs,
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse the JSON representation of the configuration.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    /// Settings applied to new pass-the-ball sessions.
    pub fn pass_the_ball(&self) -> BallSettings {
        self.pass_the_ball
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    pass_the_ball: RawBallSettings,
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the pass-the-ball section.
struct RawBallSettings {
    starting_balls: Option<u32>,
    cycle_timer_secs: Option<u32>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = BallSettings::default();
        let starting_balls = match value.pass_the_ball.starting_balls {
            Some(0) => {
                warn!(
                    fallback = defaults.starting_balls,
                    "starting_balls must be positive; using default"
                );
                defaults.starting_balls
            }
            Some(count) => count,
            None => defaults.starting_balls,
        };

        Self {
            pass_the_ball: BallSettings {
                starting_balls,
                cycle_timer_secs: value
                    .pass_the_ball
                    .cycle_timer_secs
                    .unwrap_or(defaults.cycle_timer_secs),
            },
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
