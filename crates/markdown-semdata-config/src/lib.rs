use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid delimiters `{0}`: expected START|END")]
    InvalidDelimiters(String),
}

/// Settings for the semantic data extension, as stored on disk.
///
/// Every field is optional in the file; missing ones take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Namespace for occurrences that don't name one.
    pub default_namespace: String,
    pub start_delimiter: String,
    pub end_delimiter: String,
    /// Older combined form, `START|END`. Overrides the two fields above.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiters: Option<String>,
    /// Match the delimiters literally rather than as regex fragments.
    pub literal_delimiters: bool,
    /// Element tag for every occurrence.
    pub tag: String,
    /// Per-property tag overrides, keyed by qualified property (`dc:title`).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_namespace: "aa".to_string(),
            start_delimiter: "%%".to_string(),
            end_delimiter: "%%".to_string(),
            delimiters: None,
            literal_delimiters: false,
            tag: "span".to_string(),
            tags: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Surface a malformed legacy delimiter string at load time
        config.delimiter_pair()?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-semdata");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// The effective start/end delimiters.
    ///
    /// The legacy `delimiters` string is split on its first `|`.
    pub fn delimiter_pair(&self) -> Result<(String, String), ConfigError> {
        match &self.delimiters {
            Some(combined) => combined
                .split_once('|')
                .filter(|(start, end)| !start.is_empty() && !end.is_empty())
                .map(|(start, end)| (start.to_string(), end.to_string()))
                .ok_or_else(|| ConfigError::InvalidDelimiters(combined.clone())),
            None => Ok((self.start_delimiter.clone(), self.end_delimiter.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markdown-semdata/config.toml"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_namespace, "aa");
        assert_eq!(
            config.delimiter_pair().unwrap(),
            ("%%".to_string(), "%%".to_string())
        );
        assert_eq!(config.tag, "span");
        assert!(!config.literal_delimiters);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let config_content = r#"
default_namespace = "dc"
start_delimiter = "{{"
end_delimiter = "}}"
literal_delimiters = true

[tags]
"dc:title" = "cite"
"#;

        let config: Config = toml::from_str(config_content).unwrap();
        assert_eq!(config.default_namespace, "dc");
        assert_eq!(
            config.delimiter_pair().unwrap(),
            ("{{".to_string(), "}}".to_string())
        );
        assert!(config.literal_delimiters);
        assert_eq!(config.tag, "span");
        assert_eq!(config.tags.get("dc:title").map(String::as_str), Some("cite"));
    }

    #[test]
    fn test_legacy_delimiters_override() {
        let config: Config = toml::from_str(
            r#"
start_delimiter = "ignored"
delimiters = "<<|>>"
"#,
        )
        .unwrap();
        assert_eq!(
            config.delimiter_pair().unwrap(),
            ("<<".to_string(), ">>".to_string())
        );
    }

    #[test]
    fn test_legacy_delimiters_without_bar() {
        let config = Config {
            delimiters: Some("%%".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            config.delimiter_pair(),
            Err(ConfigError::InvalidDelimiters(_))
        ));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut original = Config::default();
        original.default_namespace = "schema".to_string();
        original.tags.insert("dc:title".to_string(), "cite".to_string());

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "default_namespace = [").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_load_rejects_bad_legacy_delimiters() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "delimiters = \"|%%\"\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDelimiters(_)));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let mut test_config = Config::default();
        test_config.default_namespace = "dc".to_string();
        test_config.tag = "data".to_string();

        test_config.save_to_path(&config_file).unwrap();

        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
