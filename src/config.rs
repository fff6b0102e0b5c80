use crate::model::Settings;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "mixtape";
const SETTINGS_FILE: &str = "settings.json";
const TONES_DIR: &str = "tones";

pub fn config_root() -> Result<PathBuf> {
    if let Ok(override_dir) = env::var("MIXTAPE_CONFIG_DIR") {
        return Ok(PathBuf::from(override_dir));
    }

    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .context("neither HOME nor USERPROFILE is set")?;
    Ok(PathBuf::from(home).join(".config").join(APP_DIR))
}

pub fn settings_path() -> Result<PathBuf> {
    Ok(config_root()?.join(SETTINGS_FILE))
}

pub fn tones_dir() -> Result<PathBuf> {
    Ok(config_root()?.join(TONES_DIR))
}

pub fn load_settings() -> Result<Settings> {
    let path = settings_path()?;
    if !path.exists() {
        return Ok(Settings::default());
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse settings file {}", path.display()))?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_settings_from_override_dir() {
        let dir = tempdir().expect("tempdir");
        unsafe {
            env::set_var("MIXTAPE_CONFIG_DIR", dir.path().to_string_lossy().as_ref());
        }

        assert_eq!(load_settings().expect("defaults"), Settings::default());

        fs::write(
            settings_path().expect("path"),
            r#"{ "playlist_name": "Road Trip", "volume": 0.4 }"#,
        )
        .expect("write settings");
        let loaded = load_settings().expect("load");
        assert_eq!(
            loaded,
            Settings {
                playlist_name: String::from("Road Trip"),
                volume: 0.4,
                ..Settings::default()
            }
        );
        assert_eq!(tones_dir().expect("tones"), dir.path().join("tones"));

        fs::write(settings_path().expect("path"), "{ not json").expect("corrupt");
        let err = load_settings().expect_err("corrupt settings");
        assert!(format!("{err:#}").contains("failed to parse settings file"));
    }
}
