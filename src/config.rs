use lazy_static::lazy_static;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{env, fs, time::Duration};

use crate::timer::{DEFAULT_COUNTDOWN, TICK_INTERVAL};

const DEFAULT_SETTINGS_FILE: &str = "/home/root/.config/lucky-finger.json";
const SETTINGS_ENV: &str = "LUCKY_FINGER_CONFIG";

lazy_static! {
    static ref SETTINGS_FILE: String =
        env::var(SETTINGS_ENV).unwrap_or_else(|_| DEFAULT_SETTINGS_FILE.to_string());
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(default)]
pub struct Settings {
    pub countdown_ms: u64,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            countdown_ms: DEFAULT_COUNTDOWN.as_millis() as u64,
            seed: None,
        }
    }
}

impl Settings {
    /// Never shorter than one tick, so there is always at least one number shown.
    pub fn countdown(&self) -> Duration {
        Duration::from_millis(self.countdown_ms).max(TICK_INTERVAL)
    }

    pub fn parse(raw: &[u8]) -> Result<Settings, serde_json::Error> {
        serde_json::from_slice(raw)
    }

    pub fn load_from(path: &str) -> Settings {
        match fs::read(path) {
            Ok(raw) => match Settings::parse(&raw) {
                Ok(settings) => {
                    info!("Loaded settings from {path}: {settings:?}");
                    settings
                }
                Err(err) => {
                    warn!("Error loading settings from {path}: {err}");
                    Settings::default()
                }
            },
            Err(err) => {
                warn!("Can't read settings from {path}: {err}");
                let settings = Settings::default();
                match serde_json::to_vec_pretty(&settings) {
                    Ok(dumped) => match fs::write(path, dumped) {
                        Ok(()) => info!("Dumped default settings to {path}"),
                        Err(err) => warn!("Can't write default settings to {path}: {err}"),
                    },
                    Err(err) => warn!("Can't serialise default settings: {err}"),
                }
                settings
            }
        }
    }

    pub fn load() -> Settings {
        Settings::load_from(&SETTINGS_FILE)
    }
}
