//! Configuration handling for guess-packager
//!
//! Configuration is stored in `~/.config/guess-packager/config.toml` (or the
//! platform equivalent). Every key is optional and the precedence order of
//! the sources is not configurable.
//!
//! ```toml
//! [sources]
//! env_var = "RPM_PACKAGER"
//! macro_name = "packager"
//! rpm_command = "rpm"
//! git_command = "git"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sources::{DEFAULT_ENV_VAR, DEFAULT_MACRO};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),
}

/// Names and commands used to reach each source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    /// Environment variable holding an explicit packager
    pub env_var: String,

    /// rpm macro holding the packager, without the leading `%`
    pub macro_name: String,

    /// Command used for `--eval`
    pub rpm_command: String,

    /// Command used for `config --get`
    pub git_command: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            env_var: DEFAULT_ENV_VAR.to_string(),
            macro_name: DEFAULT_MACRO.to_string(),
            rpm_command: "rpm".to_string(),
            git_command: "git".to_string(),
        }
    }
}

impl SourcesConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("env_var", &self.env_var),
            ("macro_name", &self.macro_name),
            ("rpm_command", &self.rpm_command),
            ("git_command", &self.git_command),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("sources.{} must not be empty", key)));
            }
        }

        if self.env_var.contains(['=', '\0']) {
            return Err(ConfigError::Invalid(format!(
                "sources.env_var is not a valid variable name: {}",
                self.env_var
            )));
        }

        let bad_macro_char = |c: char| c == '%' || c == '{' || c == '}' || c.is_whitespace();
        if self.macro_name.contains(bad_macro_char) {
            return Err(ConfigError::Invalid(format!(
                "sources.macro_name must be a bare macro name (no '%' or braces): {}",
                self.macro_name
            )));
        }

        Ok(())
    }
}

/// Resolver configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    pub sources: SourcesConfig,

    /// Directory the version-control query runs in (defaults to the cwd)
    #[serde(skip)]
    pub vcs_dir: Option<PathBuf>,
}

impl ResolverConfig {
    /// Loads configuration from the default location
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads configuration from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Parses and validates a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.sources.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Returns the global config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "guess-packager", "guess-packager")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Sets the directory the version-control query runs in
    pub fn with_vcs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.vcs_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = ResolverConfig::default();

        assert_eq!(config.sources.env_var, "RPM_PACKAGER");
        assert_eq!(config.sources.macro_name, "packager");
        assert_eq!(config.sources.rpm_command, "rpm");
        assert_eq!(config.sources.git_command, "git");
        assert_eq!(config.vcs_dir, None);
    }

    #[test]
    fn empty_document_is_default() {
        let config = ResolverConfig::from_toml("").unwrap();
        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[sources]
macro_name = "vendor_packager"
git_command = "/usr/local/bin/git"
"#;

        let config = ResolverConfig::from_toml(toml).unwrap();
        assert_eq!(config.sources.macro_name, "vendor_packager");
        assert_eq!(config.sources.git_command, "/usr/local/bin/git");
        assert_eq!(config.sources.env_var, "RPM_PACKAGER");
    }

    #[test]
    fn unknown_source_key_is_rejected() {
        let toml = r#"
[sources]
order = ["account", "env"]
"#;

        let err = ResolverConfig::from_toml(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_table_is_rejected() {
        let toml = r#"
[source]
env_var = "PACKAGER"
"#;

        let err = ResolverConfig::from_toml(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn env_var_with_nul_is_rejected() {
        let toml = r#"
[sources]
env_var = "RPM\u0000PACKAGER"
"#;

        let err = ResolverConfig::from_toml(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("sources.env_var"));
    }

    #[test]
    fn env_var_with_equals_is_rejected() {
        let toml = r#"
[sources]
env_var = "RPM=PACKAGER"
"#;

        let err = ResolverConfig::from_toml(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn macro_name_with_percent_is_rejected() {
        let toml = r#"
[sources]
macro_name = "%packager"
"#;

        let err = ResolverConfig::from_toml(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn empty_command_is_rejected() {
        let toml = r#"
[sources]
git_command = "  "
"#;

        let err = ResolverConfig::from_toml(toml).unwrap_err();
        assert!(err.to_string().contains("sources.git_command"));
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[sources]\nenv_var = \"PACKAGER\"\n").unwrap();

        let config = ResolverConfig::load_from(&path).unwrap();
        assert_eq!(config.sources.env_var, "PACKAGER");
    }

    #[test]
    fn load_from_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = ResolverConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn vcs_dir_is_not_serialized() {
        let config = ResolverConfig::default().with_vcs_dir("/srv/build");
        let toml = config.to_toml().unwrap();

        assert!(toml.contains("[sources]"));
        assert!(!toml.contains("/srv/build"));

        let parsed = ResolverConfig::from_toml(&toml).unwrap();
        assert_eq!(parsed.sources, config.sources);
    }
}
