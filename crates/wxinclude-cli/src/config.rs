//! `default.cfg` support.
//!
//! The file holds one option per line using the long option names:
//!
//! ```text
//! # comment
//! const
//! appendtype
//! wxheader = wx/wxprec.h
//! input-type = .png
//! input-type = .bmp
//! ```

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Options read from a configuration file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileConfig {
    pub input_files: Vec<PathBuf>,
    pub input_types: Vec<String>,
    pub output_file: Option<PathBuf>,
    pub wxheader: Option<String>,
    pub noheader: bool,
    pub constant: bool,
    pub respectcase: bool,
    pub wxnone: bool,
    pub appendtype: bool,
    pub quiet: bool,
}

impl FileConfig {
    /// Loads a config file, returning defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                Self::parse(&text).with_context(|| format!("Invalid config file: {}", path.display()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("Failed to read config file: {}", path.display())),
        }
    }

    /// Parses config file text
    pub fn parse(text: &str) -> Result<Self> {
        let mut config = Self::default();

        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = match line.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (line, None),
            };

            let require = |value: Option<&str>| -> Result<String> {
                match value {
                    Some(v) if !v.is_empty() => Ok(v.to_string()),
                    _ => bail!("line {}: option '{}' requires a value", number + 1, key),
                }
            };

            match key {
                "input-file" => config.input_files.push(PathBuf::from(require(value)?)),
                "input-type" => config.input_types.push(require(value)?),
                "output-file" => config.output_file = Some(PathBuf::from(require(value)?)),
                "wxheader" => config.wxheader = Some(require(value)?),
                "noheader" => config.noheader = parse_flag(key, value, number)?,
                "const" => config.constant = parse_flag(key, value, number)?,
                "respectcase" => config.respectcase = parse_flag(key, value, number)?,
                "wxnone" => config.wxnone = parse_flag(key, value, number)?,
                "appendtype" => config.appendtype = parse_flag(key, value, number)?,
                "quiet" => config.quiet = parse_flag(key, value, number)?,
                _ => bail!("line {}: unknown option '{}'", number + 1, key),
            }
        }

        Ok(config)
    }
}

fn parse_flag(key: &str, value: Option<&str>, number: usize) -> Result<bool> {
    match value.map(str::to_ascii_lowercase).as_deref() {
        None | Some("") | Some("1") | Some("true") | Some("yes") | Some("on") => Ok(true),
        Some("0") | Some("false") | Some("no") | Some("off") => Ok(false),
        Some(other) => bail!(
            "line {}: invalid value '{}' for flag '{}'",
            number + 1,
            other,
            key
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let text = "\
# resources
const
appendtype = yes
respectcase = 0
wxheader = wx/wxprec.h
input-type = .png
input-type = .bmp
input-file = logo.png
output-file = res.h
";
        let config = FileConfig::parse(text).unwrap();

        assert_eq!(
            config,
            FileConfig {
                input_files: vec![PathBuf::from("logo.png")],
                input_types: vec![".png".to_string(), ".bmp".to_string()],
                output_file: Some(PathBuf::from("res.h")),
                wxheader: Some("wx/wxprec.h".to_string()),
                constant: true,
                appendtype: true,
                ..FileConfig::default()
            }
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = FileConfig::parse("colour = blue\n").unwrap_err();
        assert!(err.to_string().contains("unknown option 'colour'"));
    }

    #[test]
    fn test_missing_value_rejected() {
        assert!(FileConfig::parse("output-file\n").is_err());
        assert!(FileConfig::parse("const = maybe\n").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = FileConfig::load(&dir.path().join("default.cfg")).unwrap();
        assert_eq!(config, FileConfig::default());
    }
}
