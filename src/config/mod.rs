use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::geometry::{CanvasSize, Color};
use crate::paint::{DispatchLimits, PenState, TextFontFamily, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "scrawl";
const APP_CONFIG_FILE: &str = "config.json";
const DEFAULT_CANVAS_WIDTH: u32 = 600;
const DEFAULT_CANVAS_HEIGHT: u32 = 400;
const DEFAULT_TEXT_SIZE: u16 = 16;
const DEFAULT_MAX_CANVAS_DIMENSION: u32 = 8192;

/// Raw `config.json` contents; every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawAppConfig {
    #[serde(default)]
    canvas_width: Option<u32>,
    #[serde(default)]
    canvas_height: Option<u32>,
    #[serde(default)]
    background: Option<String>,
    #[serde(default)]
    pen_color: Option<String>,
    #[serde(default)]
    text_family: Option<String>,
    #[serde(default)]
    text_size: Option<u16>,
    #[serde(default)]
    prompt_save_before_text: Option<bool>,
    #[serde(default)]
    max_canvas_dimension: Option<u32>,
}

/// Resolved application settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub canvas_size: CanvasSize,
    pub background: Color,
    pub pen_color: Color,
    pub text_style: TextStyle,
    pub prompt_save_before_text: bool,
    pub max_canvas_dimension: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_size: CanvasSize::default(),
            background: Color::WHITE,
            pen_color: Color::BLACK,
            text_style: TextStyle {
                family: TextFontFamily::Sans,
                size: DEFAULT_TEXT_SIZE,
            },
            prompt_save_before_text: true,
            max_canvas_dimension: DEFAULT_MAX_CANVAS_DIMENSION,
        }
    }
}

impl AppConfig {
    pub fn pen_state(&self) -> PenState {
        PenState::new(self.pen_color)
    }

    pub fn dispatch_limits(&self) -> DispatchLimits {
        DispatchLimits {
            max_canvas_dimension: self.max_canvas_dimension,
        }
    }
}

impl From<RawAppConfig> for AppConfig {
    fn from(raw: RawAppConfig) -> Self {
        let defaults = Self::default();
        let max_canvas_dimension = raw
            .max_canvas_dimension
            .filter(|value| *value > 0)
            .unwrap_or(defaults.max_canvas_dimension);
        let canvas_size = CanvasSize::new(
            raw.canvas_width.unwrap_or(DEFAULT_CANVAS_WIDTH),
            raw.canvas_height.unwrap_or(DEFAULT_CANVAS_HEIGHT),
        )
        .filter(|size| size.width <= max_canvas_dimension && size.height <= max_canvas_dimension)
        .unwrap_or_else(|| {
            tracing::warn!(
                width = ?raw.canvas_width,
                height = ?raw.canvas_height,
                "invalid canvas size in config.json; using default"
            );
            defaults.canvas_size
        });

        Self {
            canvas_size,
            background: parse_color_setting("background", raw.background, defaults.background),
            pen_color: parse_color_setting("pen_color", raw.pen_color, defaults.pen_color),
            text_style: TextStyle {
                family: raw
                    .text_family
                    .as_deref()
                    .and_then(|name| {
                        let family = TextFontFamily::from_name(name);
                        if family.is_none() {
                            tracing::warn!(name, "unknown text_family in config.json; using Sans");
                        }
                        family
                    })
                    .unwrap_or(defaults.text_style.family),
                size: raw
                    .text_size
                    .filter(|size| *size > 0)
                    .unwrap_or(defaults.text_style.size),
            },
            prompt_save_before_text: raw
                .prompt_save_before_text
                .unwrap_or(defaults.prompt_save_before_text),
            max_canvas_dimension,
        }
    }
}

fn parse_color_setting(key: &str, value: Option<String>, fallback: Color) -> Color {
    let Some(value) = value else {
        return fallback;
    };
    Color::from_hex(&value).unwrap_or_else(|| {
        tracing::warn!(key, value = %value, "invalid color in config.json; using default");
        fallback
    })
}

pub fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => parse_app_config(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

fn parse_app_config(contents: &str) -> serde_json::Result<AppConfig> {
    serde_json::from_str::<RawAppConfig>(contents).map(AppConfig::from)
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
