/// Persisted application settings
///
/// Generation and UI selections are saved as JSON in the user's config
/// directory so they survive restarts. A missing or corrupt file falls
/// back to defaults; saving failures are reported but never fatal.

use crate::error::CaptionError;
use crate::prompt::EXTRA_OPTIONS;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Display name of the selected caption type
    pub caption_type: String,
    /// Display form of the length selector ("any", "long", "30", ...)
    pub caption_length: String,
    /// One toggle per extra option, in declaration order
    pub extra_options: Vec<bool>,
    pub name: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_new_tokens: u32,
    pub log_prompt: bool,
    pub dark_mode: bool,
    /// Unix timestamp of the last save
    #[serde(default)]
    pub updated_at: i64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            caption_type: "Descriptive".to_string(),
            caption_length: "long".to_string(),
            extra_options: vec![false; EXTRA_OPTIONS.len()],
            name: String::new(),
            temperature: 0.6,
            top_p: 0.9,
            max_new_tokens: 512,
            log_prompt: true,
            dark_mode: false,
            updated_at: 0,
        }
    }
}

impl AppSettings {
    /// Settings file location:
    /// - Linux: ~/.config/caption-studio/settings.json
    /// - macOS: ~/Library/Application Support/caption-studio/settings.json
    /// - Windows: %APPDATA%\caption-studio\settings.json
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("caption-studio");
        path.push("settings.json");
        Some(path)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: AppSettings = serde_json::from_str(json)?;
        // Older files may carry a different option count
        settings.extra_options.resize(EXTRA_OPTIONS.len(), false);
        Ok(settings)
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("⚠️  Ignoring corrupt settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save to the default location, stamping `updated_at`
    pub fn save(&mut self) -> Result<(), CaptionError> {
        let Some(path) = Self::default_path() else {
            return Ok(());
        };
        self.updated_at = Utc::now().timestamp();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CaptionError::io(parent, e))?;
        }
        let json = self
            .to_json()
            .map_err(|e| CaptionError::io(&path, std::io::Error::other(e)))?;
        fs::write(&path, json).map_err(|e| CaptionError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_ui_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.caption_type, "Descriptive");
        assert_eq!(settings.caption_length, "long");
        assert_eq!(settings.extra_options.len(), EXTRA_OPTIONS.len());
        assert!(settings.extra_options.iter().all(|&on| !on));
        assert_eq!(settings.max_new_tokens, 512);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = AppSettings::default();
        settings.caption_type = "Art Critic".to_string();
        settings.caption_length = "30".to_string();
        settings.extra_options[2] = true;
        settings.temperature = 0.0;
        settings.dark_mode = true;

        let json = settings.to_json().unwrap();
        let restored = AppSettings::from_json(&json).unwrap();
        assert_eq!(settings, restored);
    }

    #[test]
    fn test_corrupt_json_is_rejected() {
        assert!(AppSettings::from_json("{not json").is_err());
    }

    #[test]
    fn test_short_toggle_vector_is_normalized() {
        let json = r#"{
            "caption_type": "Descriptive",
            "caption_length": "any",
            "extra_options": [true, true],
            "name": "",
            "temperature": 0.6,
            "top_p": 0.9,
            "max_new_tokens": 512,
            "log_prompt": true,
            "dark_mode": false
        }"#;
        let settings = AppSettings::from_json(json).unwrap();
        assert_eq!(settings.extra_options.len(), EXTRA_OPTIONS.len());
        assert!(settings.extra_options[0]);
        assert!(settings.extra_options[1]);
        assert!(!settings.extra_options[2]);
    }
}
