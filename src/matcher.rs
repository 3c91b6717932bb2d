//! Directory scan: filename and content matching aggregated per file.
//!
//! Filenames are matched by case-insensitive substring, contents by
//! case-insensitive whole word. The scan is an arena pass: every file is
//! discovered first, then each entry is resolved into an optional
//! [`FileMatchRecord`] so the result keeps discovery order whether or not
//! entries are resolved in parallel.

use crate::error::{Result, TermAuditError};
use crate::extensions::{extension_of, is_text_extension};
use crate::report::escape_html;
use crate::walker::walk_files;
use anyhow::Context;
use log::{debug, warn};
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// One file under the scan root.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    /// `/`-separated path relative to the scan root.
    pub relative_path: String,
    pub file_name: String,
    pub extension: String,
}

impl FileEntry {
    pub fn new(root: &Path, path: &Path) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(path);
        let relative_path = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/");
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = extension_of(&file_name);

        Self {
            path: path.to_path_buf(),
            relative_path,
            file_name,
            extension,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentMatchLine {
    pub line_number: usize,
    /// Trimmed, HTML-escaped line text.
    pub content: String,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMatchRecord {
    pub relative_path: String,
    pub filename_terms: Vec<String>,
    pub content_matches: Vec<ContentMatchLine>,
}

impl FileMatchRecord {
    pub fn has_matches(&self) -> bool {
        !self.filename_terms.is_empty() || !self.content_matches.is_empty()
    }

    /// Filename terms followed by content terms in discovery order, without duplicates.
    pub fn matched_terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = Vec::new();
        let content_terms = self.content_matches.iter().flat_map(|m| m.terms.iter());
        for term in self.filename_terms.iter().chain(content_terms) {
            if !terms.contains(term) {
                terms.push(term.clone());
            }
        }
        terms
    }
}

/// Compiled search terms.
#[derive(Debug)]
pub struct TermMatcher {
    terms: Vec<String>,
    lowered: Vec<String>,
    patterns: Vec<Regex>,
}

impl TermMatcher {
    /// Blank terms are discarded and repeated terms collapse to their first occurrence.
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Result<Self> {
        let mut unique: Vec<String> = Vec::new();
        for term in terms {
            let term: &str = term.as_ref();
            if term.trim().is_empty() || unique.iter().any(|t| t == term) {
                continue;
            }
            unique.push(term.to_string());
        }

        let patterns = unique
            .iter()
            .map(|term| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let lowered = unique.iter().map(|t| t.to_lowercase()).collect();

        Ok(Self {
            terms: unique,
            lowered,
            patterns,
        })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms occurring anywhere in `file_name`, ignoring case.
    pub fn filename_matches(&self, file_name: &str) -> Vec<String> {
        let name = file_name.to_lowercase();
        self.terms
            .iter()
            .zip(&self.lowered)
            .filter(|(_, lowered)| name.contains(lowered.as_str()))
            .map(|(term, _)| term.clone())
            .collect()
    }

    /// Terms occurring as whole words in `line`, ignoring case.
    pub fn line_matches(&self, line: &str) -> Vec<String> {
        self.terms
            .iter()
            .zip(&self.patterns)
            .filter(|(_, pattern)| pattern.is_match(line))
            .map(|(term, _)| term.clone())
            .collect()
    }
}

/// Decodes UTF-8, dropping invalid byte sequences instead of replacing them.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Splits on `\n`, `\r\n` and bare `\r`. A trailing terminator does not start a new line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(idx) => {
                lines.push(&rest[..idx]);
                let terminator = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + terminator..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Resolve files on the rayon pool instead of the calling thread.
    pub parallel: bool,
}

#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub records: Vec<FileMatchRecord>,
    pub files_visited: usize,
    pub files_content_scanned: usize,
    pub read_errors: Vec<TermAuditError>,
}

struct ResolvedFile {
    record: FileMatchRecord,
    content_scanned: bool,
    error: Option<TermAuditError>,
}

pub struct Scanner {
    matcher: TermMatcher,
    options: ScanOptions,
}

impl Scanner {
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Result<Self> {
        Self::with_options(terms, ScanOptions::default())
    }

    pub fn with_options<S: AsRef<str>>(terms: &[S], options: ScanOptions) -> Result<Self> {
        Ok(Self {
            matcher: TermMatcher::new(terms)?,
            options,
        })
    }

    pub fn scan(&self, root: &Path) -> Result<ScanOutcome> {
        if !root.is_dir() {
            return Err(TermAuditError::InvalidDirectory(root.to_path_buf()));
        }

        let entries: Vec<FileEntry> = walk_files(root)
            .map(|entry| FileEntry::new(root, entry.path()))
            .collect();
        debug!("Discovered {} files under {}", entries.len(), root.display());

        let resolved: Vec<ResolvedFile> = if self.options.parallel {
            entries.par_iter().map(|entry| self.resolve(entry)).collect()
        } else {
            entries.iter().map(|entry| self.resolve(entry)).collect()
        };

        let mut outcome = ScanOutcome {
            files_visited: entries.len(),
            ..ScanOutcome::default()
        };
        for file in resolved {
            if file.content_scanned {
                outcome.files_content_scanned += 1;
            }
            if let Some(error) = file.error {
                outcome.read_errors.push(error);
            }
            if file.record.has_matches() {
                outcome.records.push(file.record);
            }
        }

        Ok(outcome)
    }

    fn resolve(&self, entry: &FileEntry) -> ResolvedFile {
        let mut resolved = ResolvedFile {
            record: FileMatchRecord {
                relative_path: entry.relative_path.clone(),
                filename_terms: Vec::new(),
                content_matches: Vec::new(),
            },
            content_scanned: false,
            error: None,
        };
        if self.matcher.is_empty() {
            return resolved;
        }

        resolved.record.filename_terms = self.matcher.filename_matches(&entry.file_name);
        for term in &resolved.record.filename_terms {
            debug!("Match found: {} contains {}", entry.file_name, term);
        }

        if !is_text_extension(&entry.extension) {
            return resolved;
        }

        resolved.content_scanned = true;
        match self.scan_content(entry) {
            Ok(lines) => {
                if !lines.is_empty() {
                    debug!(
                        "Content match: {} ({} lines)",
                        entry.relative_path,
                        lines.len()
                    );
                }
                resolved.record.content_matches = lines;
            }
            Err(e) => {
                warn!("Error reading {}: {:#}", entry.path.display(), e);
                resolved.error = Some(TermAuditError::FileProcessing {
                    path: entry.path.clone(),
                    source: e.into(),
                });
            }
        }
        resolved
    }

    fn scan_content(&self, entry: &FileEntry) -> anyhow::Result<Vec<ContentMatchLine>> {
        let bytes = fs::read(&entry.path)
            .with_context(|| format!("Failed to read {}", entry.path.display()))?;
        let text = decode_lossy(&bytes);

        Ok(split_lines(&text)
            .into_iter()
            .enumerate()
            .filter_map(|(i, line)| {
                let terms = self.matcher.line_matches(line);
                (!terms.is_empty()).then(|| ContentMatchLine {
                    line_number: i + 1,
                    content: escape_html(line.trim()),
                    terms,
                })
            })
            .collect())
    }
}

/// Scans `root` sequentially and returns the records with at least one match.
pub fn search_directory<S: AsRef<str>>(root: &Path, terms: &[S]) -> Result<Vec<FileMatchRecord>> {
    Ok(Scanner::new(terms)?.scan(root)?.records)
}
