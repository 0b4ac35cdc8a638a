//! Runtime settings
//!
//! Read from the page query string (`?game=runner&seed=7&log=debug&tuning=tuning.json`).
//! Nothing is persisted between visits.

use crate::sim::GameKind;

/// Default location of the platformer level file, relative to the page
pub const DEFAULT_LEVELS_URL: &str = "levels.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Which game to run
    pub game: GameKind,
    /// RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Where the platformer fetches its levels
    pub levels_url: String,
    /// Optional balance overrides, see [`crate::Tuning`]
    pub tuning_url: Option<String>,
    /// Log verbosity
    pub log_level: log::LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameKind::default(),
            seed: None,
            levels_url: DEFAULT_LEVELS_URL.to_string(),
            tuning_url: None,
            log_level: log::LevelFilter::Info,
        }
    }
}

impl Settings {
    /// Parse a query string, with or without the leading `?`.
    /// Unknown keys and unparsable values are logged and ignored.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "game" => match GameKind::from_str(value) {
                    Some(kind) => settings.game = kind,
                    None => log::warn!("Unknown game '{}', using {}", value, settings.game.as_str()),
                },
                "seed" => match value.parse() {
                    Ok(seed) => settings.seed = Some(seed),
                    Err(_) => log::warn!("Ignoring non-numeric seed '{}'", value),
                },
                "levels" if !value.is_empty() => settings.levels_url = value.to_string(),
                "tuning" if !value.is_empty() => settings.tuning_url = Some(value.to_string()),
                "log" => match value.parse() {
                    Ok(level) => settings.log_level = level,
                    Err(_) => log::warn!("Unknown log level '{}'", value),
                },
                _ => log::debug!("Ignoring query parameter '{}'", key),
            }
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_default() {
        assert_eq!(Settings::from_query(""), Settings::default());
        assert_eq!(Settings::from_query("?"), Settings::default());
    }

    #[test]
    fn test_full_query() {
        let settings = Settings::from_query(
            "?game=classic&seed=1234&levels=custom.json&tuning=slow.json&log=debug",
        );
        assert_eq!(settings.game, GameKind::RunnerClassic);
        assert_eq!(settings.seed, Some(1234));
        assert_eq!(settings.levels_url, "custom.json");
        assert_eq!(settings.tuning_url.as_deref(), Some("slow.json"));
        assert_eq!(settings.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn test_bad_values_are_ignored() {
        let settings = Settings::from_query("game=tetris&seed=abc&log=loud&levels=&tuning=&x");
        assert_eq!(settings, Settings::default());
    }
}
