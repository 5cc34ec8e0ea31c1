//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use game_core::{GameConfig, LayoutKind, MapConfig, ViewportSize};

/// Everything the binary needs to start a session.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub game: GameConfig,
    /// Fixed seed; the wall clock is used when unset.
    pub seed: Option<u64>,
    /// Directory for per-session log files. Logs go to stderr only when unset.
    pub log_dir: Option<PathBuf>,
    /// Print the end-of-session summary as JSON.
    pub report_json: bool,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_SEED` - Generation seed (default: current time in milliseconds)
    /// - `DUNGEON_MAP_WIDTH` / `DUNGEON_MAP_HEIGHT` - Map size (default: 100x100)
    /// - `DUNGEON_LAYOUT` - `rooms` or `maze` (default: rooms)
    /// - `DUNGEON_HOSTILES` - Hostiles placed at start (default: 3)
    /// - `DUNGEON_VISION_RADIUS` - Player sight radius (default: 10)
    /// - `DUNGEON_VIEWPORT_WIDTH` / `DUNGEON_VIEWPORT_HEIGHT` - Camera window (default: 50x50)
    /// - `DUNGEON_LOG_DIR` - Write `client.log` under this directory
    /// - `DUNGEON_REPORT_JSON` - Emit the summary as JSON (default: false)
    ///
    /// Values that fail to parse fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.seed = read_env(&lookup, "DUNGEON_SEED");

        let mut map = MapConfig::default();
        if let Some(width) = read_env(&lookup, "DUNGEON_MAP_WIDTH") {
            map.width = width;
        }
        if let Some(height) = read_env(&lookup, "DUNGEON_MAP_HEIGHT") {
            map.height = height;
        }
        if let Some(layout) = read_env::<LayoutKind>(&lookup, "DUNGEON_LAYOUT") {
            map.layout = layout;
        }
        config.game = config.game.with_map(map);

        if let Some(count) = read_env(&lookup, "DUNGEON_HOSTILES") {
            config.game = config.game.with_hostile_count(count);
        }
        if let Some(radius) = read_env(&lookup, "DUNGEON_VISION_RADIUS") {
            config.game = config.game.with_vision_radius(radius);
        }

        let mut viewport = ViewportSize::default();
        if let Some(width) = read_env(&lookup, "DUNGEON_VIEWPORT_WIDTH") {
            viewport.width = width;
        }
        if let Some(height) = read_env(&lookup, "DUNGEON_VIEWPORT_HEIGHT") {
            viewport.height = height;
        }
        config.game = config.game.with_viewport(viewport);

        config.log_dir = lookup("DUNGEON_LOG_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        // Setting the variable without a parsable value counts as "true".
        config.report_json = match lookup("DUNGEON_REPORT_JSON") {
            Some(value) => value.trim().parse::<bool>().unwrap_or(true),
            None => false,
        };

        config
    }

    /// Configured seed, or the current time in milliseconds.
    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_millis() as u64)
                .unwrap_or_default()
        })
    }
}

fn read_env<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key)?.trim().parse().ok()
}
