//! Runtime settings loaded from an optional JSON file.

use std::path::Path;
use std::time::Duration;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// An RGB triple, written as `[r, g, b]` in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Linear blend towards `other`; `t` is clamped to `0.0..=1.0`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    pub x: Rgb,
    pub o: Rgb,
    pub grid: Rgb,
    pub highlight: Rgb,
    pub background_top: Rgb,
    pub background_bottom: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            x: Rgb(0, 191, 255),
            o: Rgb(255, 105, 180),
            grid: Rgb(255, 255, 255),
            highlight: Rgb(255, 215, 0),
            background_top: Rgb(255, 204, 229),
            background_bottom: Rgb(204, 255, 229),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Frame/tick interval in milliseconds.
    pub tick_ms: u64,
    /// Ring the terminal bell on game events.
    pub sound: bool,
    /// Show the welcome screen before the board.
    pub welcome: bool,
    /// How long a freshly placed mark glows.
    pub glow_ms: u32,
    /// Particles spawned on a win.
    pub confetti: usize,
    /// Fade-in length when entering the board.
    pub transition_ms: u32,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            sound: true,
            welcome: true,
            glow_ms: 600,
            confetti: 60,
            transition_ms: 400,
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Reads `path` if given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn partial_theme_keeps_other_colors() {
        let cfg = Config::from_json(r#"{"sound": false, "theme": {"x": [1, 2, 3]}}"#).unwrap();
        assert!(!cfg.sound);
        assert_eq!(cfg.theme.x, Rgb(1, 2, 3));
        assert_eq!(cfg.theme.o, Theme::default().o);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_json(r#"{"board_size": 4}"#).is_err());
    }

    #[test]
    fn zero_tick_is_clamped() {
        let cfg = Config {
            tick_ms: 0,
            ..Config::default()
        };
        assert_eq!(cfg.tick_rate(), Duration::from_millis(1));
    }

    #[test]
    fn lerp_endpoints() {
        let a = Rgb(0, 0, 0);
        let b = Rgb(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb(100, 50, 25));
        assert_eq!(a.lerp(b, 7.0), b);
    }
}
