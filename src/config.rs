/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to defaults if the file is missing, unreadable or invalid.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::sim::session::SimSettings;
use crate::sim::world::DEFAULT_FLOOD_SECONDS;

const CONFIG_FILE: &str = "config.toml";

// ── Errors ──

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct GameConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub character: CharacterConfig,
    #[serde(default)]
    pub frame: FrameConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Fixed world seed. Unset means a fresh seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_flood_seconds")]
    pub flood_seconds: f32,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct CharacterConfig {
    #[serde(default = "default_speed")]
    pub speed: f32,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct FrameConfig {
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct LogConfig {
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
    /// `EnvFilter` directive; `RUST_LOG` wins when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

// ── Defaults ──

fn default_flood_seconds() -> f32 { DEFAULT_FLOOD_SECONDS }
fn default_speed() -> f32 { 150.0 }
fn default_tick_rate() -> u64 { 16 }  // ~60 fps
fn default_log_file() -> PathBuf { PathBuf::from("bridge_keeper.log") }
fn default_log_filter() -> String { "info".into() }

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig { seed: None, flood_seconds: default_flood_seconds() }
    }
}

impl Default for CharacterConfig {
    fn default() -> Self {
        CharacterConfig { speed: default_speed() }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        FrameConfig { tick_rate_ms: default_tick_rate() }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig { file: default_log_file(), filter: default_log_filter() }
    }
}

// ── Loading ──

impl GameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    /// Load `config.toml` from the first candidate directory that has one.
    /// Never fails: on a bad file the defaults come back together with the
    /// error, so the caller can log it once logging is up.
    pub fn load() -> (Self, Option<ConfigError>) {
        match locate() {
            None => (GameConfig::default(), None),
            Some(path) => match Self::from_path(&path) {
                Ok(cfg) => (cfg, None),
                Err(e) => (GameConfig::default(), Some(e)),
            },
        }
    }

    /// Resolve session parameters. An unset seed is drawn here, once.
    /// Speed must be finite and non-negative, the flood timer finite and
    /// positive; anything else falls back to the default with a warning.
    pub fn sim_settings(&self) -> SimSettings {
        let seed = self.session.seed.unwrap_or_else(rand::random);
        let speed = self.character.speed;
        let character_speed = if speed.is_finite() && speed >= 0.0 {
            speed
        } else {
            warn!(speed, fallback = default_speed(), "character.speed rejected");
            default_speed()
        };
        let flood = self.session.flood_seconds;
        let flood_seconds = if flood.is_finite() && flood > 0.0 {
            flood
        } else {
            warn!(flood_seconds = flood, fallback = default_flood_seconds(), "session.flood_seconds rejected");
            default_flood_seconds()
        };
        SimSettings { seed, flood_seconds, character_speed }
    }
}

/// Path of the config file that `load` would read, if any.
pub fn locate() -> Option<PathBuf> {
    candidate_dirs()
        .into_iter()
        .map(|d| d.join(CONFIG_FILE))
        .find(|p| p.exists())
}

/// Candidate directories to search: exe dir + CWD + XDG data home (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        // Follow symlinks so an installed link still finds data beside the real binary.
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.contains(&cwd) {
            dirs.push(cwd);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(home).join(".local/share/bridge_keeper");
        if xdg.is_dir() && !dirs.contains(&xdg) {
            dirs.push(xdg);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}
