/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory, the CWD, or
/// `~/.local/share/arcade-portfolio`. Falls back to defaults if the file
/// is missing, unreadable or malformed; every key is optional.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "arcade-portfolio";

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub audio: AudioConfig,
    pub gamepad: GamepadConfig,
}

#[derive(Clone, Debug)]
pub struct GeneralConfig {
    pub tick_rate_ms: u64,
    pub log_level: log::LevelFilter,
    /// `None` disables logging (the terminal itself is not usable for it).
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AudioConfig {
    pub enabled: bool,
    /// Master gain applied by every audio context, 0.0..=1.0.
    pub volume: f32,
    pub loop_step_ms: u64,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
    pub toggle_loop: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    audio: TomlAudio,
    #[serde(default)]
    gamepad: TomlGamepad,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default = "default_log_file")]
    log_file: String,
}

#[derive(Deserialize, Debug)]
struct TomlAudio {
    #[serde(default = "default_audio_enabled")]
    enabled: bool,
    #[serde(default = "default_volume")]
    volume: f32,
    #[serde(default = "default_loop_step")]
    loop_step_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_confirm")]
    confirm: Vec<String>,
    #[serde(default = "default_cancel")]
    cancel: Vec<String>,
    #[serde(default = "default_toggle_loop")]
    toggle_loop: Vec<String>,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 50 }
fn default_log_level() -> String { "warn".into() }
fn default_log_file() -> String { "arcade-portfolio.log".into() }
fn default_audio_enabled() -> bool { true }
fn default_volume() -> f32 { 1.0 }
fn default_loop_step() -> u64 { 220 }

fn default_confirm() -> Vec<String> { vec!["A".into(), "Start".into()] }
fn default_cancel() -> Vec<String> { vec!["B".into(), "Select".into()] }
fn default_toggle_loop() -> Vec<String> { vec!["Y".into()] }

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            tick_rate_ms: default_tick_rate(),
            log_level: default_log_level(),
            log_file: default_log_file(),
        }
    }
}

impl Default for TomlAudio {
    fn default() -> Self {
        TomlAudio {
            enabled: default_audio_enabled(),
            volume: default_volume(),
            loop_step_ms: default_loop_step(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            confirm: default_confirm(),
            cancel: default_cancel(),
            toggle_loop: default_toggle_loop(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig::from_toml(TomlConfig::default(), &mut Vec::new())
    }
}

fn parse_level(s: &str) -> Result<log::LevelFilter, ConfigError> {
    s.parse::<log::LevelFilter>()
        .map_err(|_| ConfigError::LogLevel(s.to_string()))
}

// ── Loading ──

impl AppConfig {
    /// Load config from `config.toml`.
    ///
    /// Returns the config plus any problems met on the way; those are
    /// reported by the caller once logging is up.
    pub fn load() -> (Self, Vec<ConfigError>) {
        let mut problems = Vec::new();
        let toml_cfg = match find_config(&candidate_dirs()) {
            Some(path) => read_toml(&path).unwrap_or_else(|e| {
                problems.push(e);
                TomlConfig::default()
            }),
            None => TomlConfig::default(),
        };
        let cfg = AppConfig::from_toml(toml_cfg, &mut problems);
        (cfg, problems)
    }

    /// Parse config text directly (no file search).
    #[allow(dead_code)]
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let toml_cfg = parse_toml(text, Path::new(CONFIG_FILE))?;
        let mut problems = Vec::new();
        let cfg = AppConfig::from_toml(toml_cfg, &mut problems);
        match problems.pop() {
            Some(e) => Err(e),
            None => Ok(cfg),
        }
    }

    fn from_toml(t: TomlConfig, problems: &mut Vec<ConfigError>) -> Self {
        let log_level = parse_level(&t.general.log_level).unwrap_or_else(|e| {
            problems.push(e);
            log::LevelFilter::Warn
        });
        let log_file = if t.general.log_file.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(t.general.log_file))
        };

        AppConfig {
            general: GeneralConfig {
                tick_rate_ms: t.general.tick_rate_ms.max(1),
                log_level,
                log_file,
            },
            audio: AudioConfig {
                enabled: t.audio.enabled,
                volume: t.audio.volume.clamp(0.0, 1.0),
                loop_step_ms: t.audio.loop_step_ms.max(1),
            },
            gamepad: GamepadConfig {
                confirm: t.gamepad.confirm,
                cancel: t.gamepad.cancel,
                toggle_loop: t.gamepad.toggle_loop,
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD + XDG data dir (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share").join(APP_DIR);
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

fn find_config(search_dirs: &[PathBuf]) -> Option<PathBuf> {
    search_dirs
        .iter()
        .map(|d| d.join(CONFIG_FILE))
        .find(|p| p.exists())
}

fn read_toml(path: &Path) -> Result<TomlConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_toml(&text, path)
}

fn parse_toml(text: &str, path: &Path) -> Result<TomlConfig, ConfigError> {
    toml::from_str::<TomlConfig>(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
