use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Key-value configuration file with DIRECTORY, SEARCH_TERMS, BASE_URL and OUTPUT_FILE
    #[clap(short, long, value_parser, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[clap(long, value_parser, default_value_t = ReportFormat::Html)]
    pub format: ReportFormat,

    /// Scan file contents on all cores
    #[clap(long, value_parser, default_value_t = false)]
    pub parallel: bool,

    #[clap(long, value_parser, default_value_t = false)]
    pub verbose: bool,

    #[clap(long, value_parser)]
    pub log: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Html,
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Html => write!(f, "html"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["termaudit"]);
        assert_eq!(cli.config, PathBuf::from("config.txt"));
        assert_eq!(cli.format, ReportFormat::Html);
        assert!(!cli.parallel);
    }

    #[test]
    fn explicit_flags() {
        let cli = Cli::parse_from([
            "termaudit",
            "--config",
            "audit.txt",
            "--format",
            "json",
            "--parallel",
        ]);
        assert_eq!(cli.config, PathBuf::from("audit.txt"));
        assert_eq!(cli.format, ReportFormat::Json);
        assert!(cli.parallel);
    }
}
