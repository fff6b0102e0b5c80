use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    #[default]
    Sequential,
    Shuffled,
}

impl PlaybackMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sequential => "Sequential",
            Self::Shuffled => "Shuffled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub path: Option<PathBuf>,
}

impl Track {
    pub fn new(title: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self {
            title: title.into(),
            path,
        }
    }

    pub fn playable_path(&self) -> Option<&Path> {
        self.path.as_deref().filter(|path| path.exists())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_playlist_name")]
    pub playlist_name: String,
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default = "default_demo_tones")]
    pub demo_tones: bool,
    #[serde(default = "default_demo_tone_seconds")]
    pub demo_tone_seconds: u16,
    #[serde(default)]
    pub audio_disabled: bool,
}

fn default_playlist_name() -> String {
    String::from("My Favorites")
}

fn default_volume() -> f32 {
    0.7
}

fn default_demo_tones() -> bool {
    true
}

fn default_demo_tone_seconds() -> u16 {
    2
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playlist_name: default_playlist_name(),
            volume: default_volume(),
            demo_tones: default_demo_tones(),
            demo_tone_seconds: default_demo_tone_seconds(),
            audio_disabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"volume": 0.25}"#).expect("parse");
        assert_eq!(settings.volume, 0.25);
        assert_eq!(settings.playlist_name, "My Favorites");
        assert!(settings.demo_tones);
        assert_eq!(settings.demo_tone_seconds, 2);
    }

    #[test]
    fn track_without_path_is_not_playable() {
        assert!(Track::new("ghost", None).playable_path().is_none());
        let missing = Track::new("missing", Some(PathBuf::from("definitely-missing.wav")));
        assert!(missing.playable_path().is_none());
    }
}
