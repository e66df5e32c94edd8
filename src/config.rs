//! Configuration
//!
//! Every option has a default, so an empty YAML document is a valid
//! configuration:
//!
//! ```yaml
//! pool_limit: 50
//! display_limit: 3
//! counter_start: 1
//! always_show_thanks: false
//! content_namespaces: [0]
//! exclude_subpages: true
//! search_policy: early_stop
//! ```

use crate::item::MAIN_NAMESPACE;
use crate::recommend::{DisplayThrottle, EngineConfig, SearchPolicy};
use crate::titles::TitlePolicy;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Maximum number of candidates to choose from
    pub pool_limit: usize,
    /// Maximum number of articles shown
    pub display_limit: usize,
    /// Show the suggestion once every this many edits
    pub counter_start: u32,
    /// Thank registered users even when there is nothing to suggest
    pub always_show_thanks: bool,
    /// Namespaces whose pages count as articles
    pub content_namespaces: Vec<i32>,
    pub exclude_subpages: bool,
    pub search_policy: SearchPolicy,
}

impl Default for Config {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            pool_limit: engine.pool_limit,
            display_limit: engine.display_limit,
            counter_start: 1,
            always_show_thanks: false,
            content_namespaces: vec![MAIN_NAMESPACE],
            exclude_subpages: true,
            search_policy: engine.search_policy,
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yaml reads an empty document as null rather than an empty map
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_limit == 0 {
            return Err(ConfigError::Invalid("pool_limit must be at least 1".into()));
        }
        if self.display_limit == 0 {
            return Err(ConfigError::Invalid("display_limit must be at least 1".into()));
        }
        if self.counter_start == 0 {
            return Err(ConfigError::Invalid("counter_start must be at least 1".into()));
        }
        Ok(())
    }

    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            pool_limit: self.pool_limit,
            display_limit: self.display_limit,
            search_policy: self.search_policy,
        }
    }

    pub fn throttle(&self) -> DisplayThrottle {
        DisplayThrottle::new(self.counter_start)
    }

    pub fn title_policy(&self) -> TitlePolicy {
        TitlePolicy {
            content_namespaces: self.content_namespaces.clone(),
            exclude_subpages: self.exclude_subpages,
        }
    }

    pub fn is_content_namespace(&self, namespace: i32) -> bool {
        self.content_namespaces.contains(&namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.pool_limit, 50);
        assert_eq!(config.display_limit, 3);
        assert_eq!(config.counter_start, 1);
        assert!(!config.always_show_thanks);
        assert_eq!(config.content_namespaces, vec![0]);
        assert_eq!(config.search_policy, SearchPolicy::EarlyStop);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Config::from_yaml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = Config::from_yaml_str("display_limit: 5\nsearch_policy: exhaustive\n").unwrap();
        assert_eq!(config.display_limit, 5);
        assert_eq!(config.search_policy, SearchPolicy::Exhaustive);
        assert_eq!(config.pool_limit, 50);
    }

    #[test]
    fn test_zero_limits_rejected() {
        assert!(matches!(
            Config::from_yaml_str("display_limit: 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_yaml_str("pool_limit: 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_yaml_str("counter_start: 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            Config::from_yaml_str("max_results: 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "counter_start: 4\nalways_show_thanks: true\ncontent_namespaces: [0, 100]").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.throttle().start(), 4);
        assert!(config.always_show_thanks);
        assert!(config.is_content_namespace(100));
        assert!(!config.is_content_namespace(4));
    }

    #[test]
    fn test_engine_slice() {
        let config = Config::from_yaml_str("pool_limit: 10\ndisplay_limit: 2").unwrap();
        let engine = config.engine();
        assert_eq!(engine.pool_limit, 10);
        assert_eq!(engine.display_limit, 2);
    }
}
