//! Configuration management for projpack.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for projpack.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one sub-directory per project profile.
    pub profiles_dir: PathBuf,

    /// Where the last-used scan settings are persisted.
    pub settings_path: PathBuf,

    /// Project profiles declared inline.
    pub projects: Vec<ProjectProfile>,

    /// Performance settings.
    pub performance: PerformanceConfig,
}

/// A named set of include/exclude patterns declared in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectProfile {
    pub name: String,
    pub only_include: Vec<String>,
    pub also_exclude: Vec<String>,
}

/// Performance-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Number of threads used to read file contents.
    pub reader_threads: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            reader_threads: num_cpus::get(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profiles_dir: crate::paths::default_profiles_dir(),
            settings_path: crate::paths::default_settings_path(),
            projects: Vec::new(),
            performance: PerformanceConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let mut config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;

        // Expand tilde (~) in paths
        config.profiles_dir = Self::expand_tilde(&config.profiles_dir);
        config.settings_path = Self::expand_tilde(&config.settings_path);

        Ok(config)
    }

    /// Load from `path` when it exists, falling back to defaults otherwise.
    pub fn load_or_default(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Expand tilde in a single path.
    fn expand_tilde(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        PathBuf::from(shellexpand::tilde(&path_str).into_owned())
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_projects_and_performance() {
        let config = Config::from_toml(
            r#"
profiles_dir = "/srv/profiles"
settings_path = "/srv/settings.json"

[performance]
reader_threads = 3

[[projects]]
name = "Web"
only_include = ["*.cs", "*.json"]
also_exclude = ["bin", "obj"]
"#,
        )
        .unwrap();

        assert_eq!(config.profiles_dir, PathBuf::from("/srv/profiles"));
        assert_eq!(config.performance.reader_threads, 3);
        assert_eq!(config.projects.len(), 1);
        assert_eq!(config.projects[0].only_include, vec!["*.cs", "*.json"]);
        assert_eq!(config.projects[0].also_exclude, vec!["bin", "obj"]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = Config::from_toml("").unwrap();
        assert!(config.projects.is_empty());
        assert!(config.performance.reader_threads >= 1);
    }

    #[test]
    fn test_tilde_is_expanded() {
        let _lock = crate::paths::test_env_lock();
        let home = std::env::var("HOME").unwrap_or_default();
        let config = Config::from_toml(r#"profiles_dir = "~/profiles""#).unwrap();
        if !home.is_empty() {
            assert_eq!(config.profiles_dir, PathBuf::from(&home).join("profiles"));
        }
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml("profiles_dir = [").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            profiles_dir: dir.path().join("profiles"),
            projects: vec![ProjectProfile {
                name: "Api".to_string(),
                only_include: vec!["*.rs".to_string()],
                also_exclude: vec![],
            }],
            ..Default::default()
        };

        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.profiles_dir, config.profiles_dir);
        assert_eq!(loaded.projects, config.projects);
    }
}
