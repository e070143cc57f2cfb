use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

/// Project configuration loaded from `.osg.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OsgConfig {
    pub input: String,
    /// Result file; stdout when absent.
    pub output: Option<String>,
    /// Target identifiers such as `shell_curl` or `python`.
    pub languages: Vec<String>,
    pub format: OutputFormat,
    /// Turn `%7B`/`%7D` back into `{`/`}` in rendered code.
    pub normalize_paths: bool,
}

impl Default for OsgConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: None,
            languages: vec!["javascript".to_string()],
            format: OutputFormat::Json,
            normalize_paths: true,
        }
    }
}

/// Serialization of command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn render<T: serde::Serialize>(self, value: &T) -> Result<String> {
        Ok(match self {
            OutputFormat::Json => serde_json::to_string_pretty(value)? + "\n",
            OutputFormat::Yaml => serde_yaml_ng::to_string(value)?,
        })
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".osg.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OsgConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: OsgConfig = serde_yaml_ng::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    log::debug!("loaded config from {}", path.display());
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# osg configuration
input: openapi.yaml
# output: snippets.json   # omit to print to stdout
languages:                # language or language_library, e.g. shell_curl, node_fetch
  - javascript
format: json              # json | yaml
normalize_paths: true     # render {id} instead of %7Bid%7D
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OsgConfig::default();
        assert_eq!(config.input, "openapi.yaml");
        assert_eq!(config.output, None);
        assert_eq!(config.languages, vec!["javascript"]);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.normalize_paths);
    }

    #[test]
    fn test_default_content_matches_defaults() {
        let config: OsgConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        let defaults = OsgConfig::default();
        assert_eq!(config.input, defaults.input);
        assert_eq!(config.output, defaults.output);
        assert_eq!(config.languages, defaults.languages);
        assert_eq!(config.format, defaults.format);
        assert_eq!(config.normalize_paths, defaults.normalize_paths);
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "input: api.json\noutput: out.yaml\nlanguages: [shell_curl, python]\nformat: yaml\nnormalize_paths: false\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.input, "api.json");
        assert_eq!(config.output.as_deref(), Some("out.yaml"));
        assert_eq!(config.languages, vec!["shell_curl", "python"]);
        assert_eq!(config.format, OutputFormat::Yaml);
        assert!(!config.normalize_paths);
    }

    #[test]
    fn test_load_minimal_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "input: api.yaml\n").unwrap();

        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.input, "api.yaml");
        // Defaults applied
        assert_eq!(config.languages, vec!["javascript"]);
        assert!(config.normalize_paths);
    }

    #[test]
    fn test_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap().is_none());
    }

    #[test]
    fn test_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "format: toml\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn test_render_formats() {
        let value = serde_json::json!({ "a": 1 });
        assert_eq!(OutputFormat::Json.render(&value).unwrap(), "{\n  \"a\": 1\n}\n");
        assert_eq!(OutputFormat::Yaml.render(&value).unwrap(), "a: 1\n");
    }
}
