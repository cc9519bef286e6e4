//! Configuration types for notecraft projects.
//!
//! Defines `NoteConfig` which is loaded from `.notecraft/config.yml` under
//! the project root. All fields use snake_case to match YAML conventions,
//! and every section falls back to its defaults when omitted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::CoreError;
use crate::wrap::DEFAULT_MAX_WIDTH;

/// Directory holding project-level notecraft files.
pub const CONFIG_DIR: &str = ".notecraft";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yml";

/// Top-level notecraft configuration loaded from `.notecraft/config.yml`.
///
/// # Examples
///
/// ```
/// use notecraft_core::NoteConfig;
///
/// let config = NoteConfig::default();
/// assert_eq!(config.version, 1);
/// assert_eq!(config.format.max_width, 75);
///
/// let yaml = serde_yaml::to_string(&config).unwrap();
/// let loaded: NoteConfig = serde_yaml::from_str(&yaml).unwrap();
/// assert_eq!(loaded.format.max_width, config.format.max_width);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteConfig {
    /// Configuration schema version.
    pub version: u32,

    /// Line wrapping and section layout.
    pub format: FormatConfig,

    /// Where phrases come from.
    pub phrases: PhrasesConfig,
}

/// Line wrapping configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Maximum columns per note line, indent included.
    pub max_width: usize,

    /// Spaces before every content line of a section.
    pub section_indent: usize,
}

/// Phrase source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhrasesConfig {
    /// Whether the built-in phrases are loaded.
    pub include_builtin: bool,

    /// Directories of `.phrase` files, relative to the project root.
    /// Later directories override earlier ones and the built-ins.
    pub extra_dirs: Vec<String>,
}

impl Default for NoteConfig {
    fn default() -> Self {
        Self {
            version: 1,
            format: FormatConfig::default(),
            phrases: PhrasesConfig::default(),
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            section_indent: 0,
        }
    }
}

impl Default for PhrasesConfig {
    fn default() -> Self {
        Self {
            include_builtin: true,
            extra_dirs: vec![format!("{CONFIG_DIR}/phrases")],
        }
    }
}

impl NoteConfig {
    /// Loads `.notecraft/config.yml` from `project_root`, or the defaults
    /// if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ConfigError` if the file cannot be read, is not
    /// valid YAML, or fails [`validate`](Self::validate).
    pub fn load(project_root: &Path) -> Result<Self, CoreError> {
        let config_path = project_root.join(CONFIG_DIR).join(CONFIG_FILE);
        if !config_path.exists() {
            info!("No {CONFIG_DIR}/{CONFIG_FILE} found, using default configuration");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            CoreError::ConfigError(format!(
                "Cannot read config file at {}: {e}",
                config_path.display()
            ))
        })?;
        let config = serde_yaml::from_str::<Self>(&content).map_err(|e| {
            CoreError::ConfigError(format!(
                "Invalid YAML in config file at {}: {e}",
                config_path.display()
            ))
        })?;
        config.validate()?;
        info!(path = %config_path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Checks values that would make formatting impossible.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ConfigError` for a zero `max_width` or a
    /// `section_indent` that leaves no room on the line.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.format.max_width == 0 {
            return Err(CoreError::ConfigError(
                "format.max_width must be at least 1".into(),
            ));
        }
        if self.format.section_indent >= self.format.max_width {
            return Err(CoreError::ConfigError(format!(
                "format.section_indent ({}) must be smaller than format.max_width ({})",
                self.format.section_indent, self.format.max_width
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_default_config() {
        let config = NoteConfig::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.format.max_width, DEFAULT_MAX_WIDTH);
        assert_eq!(config.format.section_indent, 0);
        assert!(config.phrases.include_builtin);
        assert_eq!(config.phrases.extra_dirs, vec![".notecraft/phrases"]);
    }

    #[test]
    fn test_should_deserialize_custom_config() {
        let yaml = r#"
version: 2
format:
  max_width: 79
  section_indent: 2
phrases:
  include_builtin: false
  extra_dirs:
    - "phrases/cardio"
    - "phrases/pneumo"
"#;

        let config: NoteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.version, 2);
        assert_eq!(config.format.max_width, 79);
        assert_eq!(config.format.section_indent, 2);
        assert!(!config.phrases.include_builtin);
        assert_eq!(config.phrases.extra_dirs.len(), 2);
    }

    #[test]
    fn test_should_fill_missing_sections_with_defaults() {
        let config: NoteConfig = serde_yaml::from_str("format:\n  max_width: 60\n").unwrap();
        assert_eq!(config.format.max_width, 60);
        assert_eq!(config.format.section_indent, 0);
        assert_eq!(config.phrases, PhrasesConfig::default());
    }

    #[test]
    fn test_should_use_defaults_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = NoteConfig::load(dir.path()).unwrap();
        assert_eq!(config, NoteConfig::default());
    }

    #[test]
    fn test_should_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(CONFIG_FILE), "format:\n  max_width: 72\n").unwrap();

        let config = NoteConfig::load(dir.path()).unwrap();
        assert_eq!(config.format.max_width, 72);
    }

    #[test]
    fn test_should_reject_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(CONFIG_FILE), "format: [unclosed").unwrap();

        let err = NoteConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, CoreError::ConfigError(msg) if msg.contains("Invalid YAML")));
    }

    #[test]
    fn test_should_reject_zero_width() {
        let mut config = NoteConfig::default();
        config.format.max_width = 0;
        assert!(matches!(config.validate(), Err(CoreError::ConfigError(_))));
    }

    #[test]
    fn test_should_reject_indent_as_wide_as_line() {
        let mut config = NoteConfig::default();
        config.format.max_width = 10;
        config.format.section_indent = 10;
        assert!(config.validate().is_err());
    }
}
