use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{AnimationMapping, Rgb};
use crate::pipeline::quantize::{DEFAULT_ALPHA_THRESHOLD, TransparencyKey};

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub header_extension: String,
    pub key_color: Rgb,
    pub alpha_threshold: u8,
    /// Abort the batch after this many writes in a row fail. 0 never aborts.
    pub max_consecutive_write_failures: usize,
    pub animation_mapping: AnimationMapping,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("separated_sprites_input"),
            output_dir: PathBuf::from("assets"),
            header_extension: "h".to_string(),
            key_color: Rgb::MAGENTA,
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            max_consecutive_write_failures: 3,
            animation_mapping: AnimationMapping::default(),
        }
    }
}

impl Config {
    pub fn transparency_key(&self) -> TransparencyKey {
        TransparencyKey::new(self.key_color, self.alpha_threshold)
    }

    pub fn validate(&self) -> Result<()> {
        let ext = &self.header_extension;
        if ext.is_empty() || ext.starts_with('.') || ext.contains(['/', '\\']) {
            bail!("Invalid header_extension '{}'", ext);
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if given. Otherwise falls back to the per-user config file, and
    /// to the built-in defaults when that does not exist either.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load_from_file(path),
            _ => Ok(Self::default()),
        }
    }
}

/// `~/.config/sprite2h/config.toml` or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sprite2h").join(CONFIG_FILE_NAME))
}
