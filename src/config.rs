use crate::error::ConfigError;
use crate::search::SearchAlgorithm;
use crate::sort::SortAlgorithm;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Record manager configuration, persisted as rowsort.toml.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    #[serde(default)]
    pub sort: SortConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl ManagerConfig {
    /// `rowsort.toml` inside `dir`.
    pub fn path(dir: &Path) -> PathBuf {
        dir.join("rowsort.toml")
    }

    /// Reads the config at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Writes the config as pretty TOML, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Problems that would make the manager misbehave. Empty when the config is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.sort.key.trim().is_empty() {
            errors.push("sort.key must not be empty".to_string());
        }

        if self.search.fields.is_empty() {
            errors.push("search.fields must name at least one field".to_string());
        }

        if self.search.fields.iter().any(|f| f.trim().is_empty()) {
            errors.push("search.fields must not contain empty names".to_string());
        }

        if self.search.identity_field.trim().is_empty() {
            errors.push("search.identity_field must not be empty".to_string());
        }

        errors
    }
}

/// Defaults for sort requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SortConfig {
    #[serde(default)]
    pub algorithm: SortAlgorithm,
    #[serde(default = "default_identity_field")]
    pub key: String,
    #[serde(default = "default_true")]
    pub ascending: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            algorithm: SortAlgorithm::default(),
            key: default_identity_field(),
            ascending: true,
        }
    }
}

/// Defaults for search requests and the free-text search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub algorithm: SearchAlgorithm,
    /// Fields the free-text search looks in, in order.
    #[serde(default = "default_search_fields")]
    pub fields: Vec<String>,
    /// Field that uniquely identifies a record when merging free-text matches.
    #[serde(default = "default_identity_field")]
    pub identity_field: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: SearchAlgorithm::default(),
            fields: default_search_fields(),
            identity_field: default_identity_field(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_identity_field() -> String {
    "student_number".to_string()
}

fn default_search_fields() -> Vec<String> {
    vec!["name".to_string(), "student_number".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = ManagerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ManagerConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let config = ManagerConfig::from_toml_str(
            r#"
            [sort]
            algorithm = "shell"
            ascending = false
            "#,
        )
        .unwrap();
        assert_eq!(config.sort.algorithm, SortAlgorithm::Shell);
        assert!(!config.sort.ascending);
        assert_eq!(config.sort.key, "student_number");
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn test_unknown_algorithm_is_parse_error() {
        let result = ManagerConfig::from_toml_str("[sort]\nalgorithm = \"quick\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_reports_problems() {
        let mut config = ManagerConfig::default();
        config.sort.key = " ".to_string();
        config.search.fields.clear();
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ManagerConfig::load(&ManagerConfig::path(dir.path())).unwrap();
        assert_eq!(config, ManagerConfig::default());
    }
}
