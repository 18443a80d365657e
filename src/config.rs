//! Optional YAML configuration file.
//!
//! ```yaml
//! functions: [list_iterate, loop_range]
//! output_dir: data
//! log_level: info
//! lesson: 2
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::logging::LogLevel;

/// Every field is optional; command-line flags take precedence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Examples to run, in order. Unknown names are skipped with a warning.
    pub functions: Option<Vec<String>>,
    pub output_dir: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
    pub lesson: Option<u32>,
}

impl Config {
    pub fn from_yaml_str(text: &str) -> Result<Config> {
        // an empty document is a valid, empty config
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml_ng::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Config::from_yaml_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_fields() -> Result<()> {
        let config = Config::from_yaml_str(
            r#"
functions:
  - list_iterate
  - loop_range
output_dir: out/data
log_level: debug
lesson: 2
"#,
        )?;
        assert_eq!(
            config.functions,
            Some(vec!["list_iterate".to_string(), "loop_range".to_string()])
        );
        assert_eq!(config.output_dir, Some(PathBuf::from("out/data")));
        assert_eq!(config.log_level, Some(LogLevel::Debug));
        assert_eq!(config.lesson, Some(2));
        Ok(())
    }

    #[test]
    fn empty_document_is_default() -> Result<()> {
        assert_eq!(Config::from_yaml_str("\n")?, Config::default());
        Ok(())
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Config::from_yaml_str("funtions: [list_iterate]\n").is_err());
    }

    #[test]
    fn load_reports_the_path() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let missing = dir.path().join("missing.yaml");
        let err = Config::load(&missing).unwrap_err();
        assert!(format!("{err}").contains("missing.yaml"));

        let present = dir.path().join("quickref.yaml");
        fs::write(&present, "functions: [loop_range]\n")?;
        let config = Config::load(&present)?;
        assert_eq!(config.functions, Some(vec!["loop_range".to_string()]));
        Ok(())
    }
}
