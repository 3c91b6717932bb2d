use crate::error::{Result, TermAuditError};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.txt";

pub const KEY_DIRECTORY: &str = "DIRECTORY";
pub const KEY_SEARCH_TERMS: &str = "SEARCH_TERMS";
pub const KEY_BASE_URL: &str = "BASE_URL";
pub const KEY_OUTPUT_FILE: &str = "OUTPUT_FILE";

/// Settings read from a `KEY=VALUE` configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    pub directory: PathBuf,
    pub search_terms: Vec<String>,
    /// Empty when reported paths should not be linked.
    pub base_url: String,
    pub output_file: PathBuf,
}

impl AuditConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(TermAuditError::ConfigNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Parses configuration text; `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let mut directory = None;
        let mut search_terms = None;
        let mut base_url = None;
        let mut output_file = None;

        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                debug!("Ignoring config line without '=': {line}");
                continue;
            };
            let value = value.trim();

            match key.trim() {
                KEY_DIRECTORY => directory = Some(PathBuf::from(value)),
                KEY_SEARCH_TERMS => search_terms = Some(parse_terms(value)),
                KEY_BASE_URL => base_url = Some(value.to_string()),
                KEY_OUTPUT_FILE => output_file = Some(PathBuf::from(value)),
                other => debug!("Ignoring unknown config key: {other}"),
            }
        }

        let missing: Vec<String> = [
            (KEY_DIRECTORY, directory.is_none()),
            (KEY_SEARCH_TERMS, search_terms.is_none()),
            (KEY_BASE_URL, base_url.is_none()),
            (KEY_OUTPUT_FILE, output_file.is_none()),
        ]
        .into_iter()
        .filter(|(_, absent)| *absent)
        .map(|(key, _)| key.to_string())
        .collect();

        match (directory, search_terms, base_url, output_file) {
            (Some(directory), Some(search_terms), Some(base_url), Some(output_file)) => Ok(Self {
                directory,
                search_terms,
                base_url,
                output_file,
            }),
            _ => Err(TermAuditError::MissingSettings {
                path: path.to_path_buf(),
                keys: missing,
            }),
        }
    }

    /// Checks that the configured directory can be scanned.
    pub fn validate(&self) -> Result<()> {
        if !self.directory.is_dir() {
            return Err(TermAuditError::InvalidDirectory(self.directory.clone()));
        }
        Ok(())
    }
}

/// Comma-separated terms, trimmed, with empty entries removed.
fn parse_terms(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
