use crate::seekbar::{
    ArcModel, Color, DEFAULT_END_ANGLE, DEFAULT_LOCK_ENABLED, DEFAULT_MAX,
    DEFAULT_MOVE_OUTSIDE_CIRCLE, DEFAULT_START_ANGLE, GangOverflow, InteractionEngine,
    PointerStyle, RingGeometry, SeekBarStyle,
};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct PointerConfig {
    /// Pointers without a progress are spread evenly over the range.
    pub progress: Option<i32>,
    pub color: Option<Color>,
    pub pointer_color: Option<Color>,
    pub progress_color: Option<Color>,
}

impl PointerConfig {
    fn style(&self, shared: &SeekBarStyle) -> Option<PointerStyle> {
        if self.color.is_none() && self.pointer_color.is_none() && self.progress_color.is_none() {
            return None;
        }
        let mut style = self
            .color
            .map(PointerStyle::uniform)
            .unwrap_or_else(|| shared.shared_pointer_style());
        if let Some(c) = self.pointer_color {
            style.pointer_color = c;
            style.halo_color = c;
        }
        if let Some(c) = self.progress_color {
            style.progress_color = c;
        }
        Some(style)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub start_angle: f64,
    pub end_angle: f64,
    pub max: i32,
    pub lock_enabled: bool,
    pub move_outside_circle: bool,
    pub touch_enabled: bool,
    pub gang_overflow: GangOverflow,
    pub geometry: RingGeometry,
    pub style: SeekBarStyle,
    pub pointers: Vec<PointerConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_angle: DEFAULT_START_ANGLE,
            end_angle: DEFAULT_END_ANGLE,
            max: DEFAULT_MAX,
            lock_enabled: DEFAULT_LOCK_ENABLED,
            move_outside_circle: DEFAULT_MOVE_OUTSIDE_CIRCLE,
            touch_enabled: true,
            gang_overflow: GangOverflow::default(),
            geometry: RingGeometry::default(),
            style: SeekBarStyle::default(),
            pointers: Vec::new(),
        }
    }
}

impl Config {
    pub fn build_engine(&self) -> InteractionEngine {
        let max = if self.max > 0 {
            self.max
        } else {
            log::warn!(
                "Configured max {} is not positive, using {}",
                self.max,
                DEFAULT_MAX
            );
            DEFAULT_MAX
        };

        let mut engine = InteractionEngine::new(
            ArcModel::new(self.start_angle, self.end_angle, max),
            self.geometry,
        );
        engine.set_style(self.style);
        engine.set_lock_enabled(self.lock_enabled);
        engine.set_move_outside_circle(self.move_outside_circle);
        engine.set_touch_enabled(self.touch_enabled);
        engine.set_gang_overflow(self.gang_overflow);

        for pointer in &self.pointers {
            engine.add_styled_pointer(pointer.progress, pointer.style(&self.style));
        }
        // setup is not a change anyone listens for
        engine.drain_events();
        engine
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "arcseek", "arcseek").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Reads `path`, or the default location when `None`, layered under `ARCSEEK__*` variables.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_path()?,
    };

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(path.is_some()))
        .add_source(config::Environment::with_prefix("ARCSEEK").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default(path: Option<&Path>) -> Config {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
