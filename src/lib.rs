pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod extensions;
pub mod matcher;
pub mod output;
mod progress;
pub mod report;
pub mod walker;

pub use clap::Parser;
pub use cli::{Cli, ReportFormat};
pub use config::AuditConfig;
pub use error::{Result, TermAuditError};
pub use extensions::{TEXT_EXTENSIONS, extension_of, is_searchable, is_text_extension};
pub use matcher::{
    ContentMatchLine, FileEntry, FileMatchRecord, ScanOptions, ScanOutcome, Scanner, TermMatcher,
    search_directory,
};
pub use report::{render_html, render_json};
pub use walker::walk_files;
