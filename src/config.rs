use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::providers::jenkins::{DEFAULT_MAX_BRANCHES, DEFAULT_MAX_DEPTH};

/// Configuration file structure for jobscope.
///
/// Holds the Jenkins connection and the search limits so they do not have
/// to be repeated on every invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Jenkins connection and limits
    #[serde(default)]
    pub jenkins: JenkinsConfig,

    /// Output format preferences
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct JenkinsConfig {
    /// Jenkins base URL
    pub url: Option<String>,

    /// Jenkins user name
    pub user: Option<String>,

    /// API token of the Jenkins user
    pub api_token: Option<String>,

    /// Nested folder levels requested when searching jobs
    /// Values below 1 are treated as 1
    #[serde(default = "default_max_depth")]
    pub max_depth: i64,

    /// Maximum number of branches shown for a job
    #[serde(default = "default_max_branches")]
    pub max_branches: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Summary,
    Json,
}

impl Default for JenkinsConfig {
    fn default() -> Self {
        Self {
            url: None,
            user: None,
            api_token: None,
            max_depth: default_max_depth(),
            max_branches: default_max_branches(),
        }
    }
}

fn default_max_depth() -> i64 {
    i64::from(DEFAULT_MAX_DEPTH)
}

fn default_max_branches() -> usize {
    DEFAULT_MAX_BRANCHES
}

impl JenkinsConfig {
    /// Search depth with `max-depth` clamped to the valid range.
    pub fn search_depth(&self) -> u32 {
        u32::try_from(self.max_depth.max(1)).unwrap_or(u32::MAX)
    }
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path
    /// 2. ./jobscope.toml
    /// 3. ./jobscope.json
    /// 4. ./jobscope.yaml
    /// 5. ./jobscope.yml
    /// 6. `<user config dir>/jobscope/config.toml`
    ///
    /// Returns default configuration if no file is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        let candidates = ["jobscope.toml", "jobscope.json", "jobscope.yaml", "jobscope.yml"]
            .into_iter()
            .map(PathBuf::from)
            .chain(user_config_path());

        for candidate in candidates {
            if candidate.exists() {
                return Self::load_from_path(&candidate);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file path.
    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display())),
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            _ => {
                // Try TOML first, then JSON, then YAML
                toml::from_str(&contents)
                    .or_else(|_| serde_json::from_str(&contents))
                    .or_else(|_| serde_yaml::from_str(&contents))
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))
            }
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("yaml" | "yml") => serde_yaml::to_string(self)?,
            _ => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("jobscope").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.jenkins.url, None);
        assert_eq!(config.jenkins.max_depth, 5);
        assert_eq!(config.jenkins.max_branches, 10);
        assert_eq!(config.output.format, OutputFormat::Summary);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_load_toml_config() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        let toml_content = r#"
[jenkins]
url = "https://jenkins.example.com"
user = "admin"
api-token = "secret"
max-branches = 3

[output]
format = "json"
pretty = true
"#;
        write!(temp_file, "{toml_content}").unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(
            config.jenkins.url.as_deref(),
            Some("https://jenkins.example.com")
        );
        assert_eq!(config.jenkins.user.as_deref(), Some("admin"));
        assert_eq!(config.jenkins.api_token.as_deref(), Some("secret"));
        assert_eq!(config.jenkins.max_depth, 5);
        assert_eq!(config.jenkins.max_branches, 3);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_load_json_config() {
        let mut temp_file = NamedTempFile::with_suffix(".json").unwrap();
        let json_content = r#"{
  "jenkins": {
    "url": "https://jenkins.json.com",
    "max-depth": 2
  }
}"#;
        write!(temp_file, "{json_content}").unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.jenkins.url.as_deref(), Some("https://jenkins.json.com"));
        assert_eq!(config.jenkins.max_depth, 2);
        assert_eq!(config.output.format, OutputFormat::Summary);
    }

    #[test]
    fn test_load_yaml_without_extension() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "jenkins:\n  url: https://jenkins.yaml.com\n").unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.jenkins.url.as_deref(), Some("https://jenkins.yaml.com"));
    }

    #[test]
    fn test_negative_max_depth_is_clamped() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        write!(temp_file, "[jenkins]\nmax-depth = -1\n").unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.jenkins.max_depth, -1);
        assert_eq!(config.jenkins.search_depth(), 1);
    }

    #[test]
    fn test_search_depth_keeps_valid_values() {
        let mut jenkins = JenkinsConfig::default();
        assert_eq!(jenkins.search_depth(), 5);
        jenkins.max_depth = 0;
        assert_eq!(jenkins.search_depth(), 1);
        jenkins.max_depth = 3;
        assert_eq!(jenkins.search_depth(), 3);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let result = Config::load(Some(Path::new("nonexistent-jobscope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_config_fails() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        write!(temp_file, "[jenkins\nurl = ").unwrap();
        assert!(Config::load_from_path(temp_file.path()).is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config {
            jenkins: JenkinsConfig {
                url: Some("https://jenkins.example.com".to_string()),
                max_branches: 7,
                ..JenkinsConfig::default()
            },
            output: OutputConfig {
                format: OutputFormat::Json,
                pretty: true,
            },
        };

        for name in ["jobscope.toml", "jobscope.json", "jobscope.yaml"] {
            let path = temp_dir.path().join(name);
            config.save(&path).unwrap();

            let reloaded = Config::load(Some(&path)).unwrap();
            assert_eq!(reloaded.jenkins.url, config.jenkins.url);
            assert_eq!(reloaded.jenkins.max_branches, 7);
            assert_eq!(reloaded.output.format, OutputFormat::Json);
        }
    }
}
