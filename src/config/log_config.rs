use std::path::PathBuf;

use serde::{de, Deserialize, Deserializer};
use tracing::Level;

fn default_level() -> Level {
    Level::INFO
}

fn deserialize_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Level, D::Error> {
    let level = String::deserialize(deserializer)?;
    level.parse::<Level>().map_err(|_| {
        de::Error::invalid_value(
            de::Unexpected::Str(&level),
            &"one of trace, debug, info, warn, error",
        )
    })
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    #[serde(default = "default_level", deserialize_with = "deserialize_level")]
    level: Level,
    /// Mirror of the log without ANSI colors.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl LogConfig {
    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_level(),
            file: None,
        }
    }
}
