//! HTML and JSON rendering of scan records.

use crate::error::Result;
use crate::extensions::TEXT_EXTENSIONS;
use crate::matcher::{ContentMatchLine, FileMatchRecord};
use regex::RegexBuilder;
use serde_json::json;

/// Excerpts longer than this many characters are cut back to the last space.
pub const EXCERPT_LIMIT: usize = 200;
const EXTENSIONS_PER_COLUMN: usize = 6;
const HIGHLIGHT_OPEN: &str = "<strong class=\"text-decoration-underline\">";
const HIGHLIGHT_CLOSE: &str = "</strong>";

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Search Results</title>
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css" rel="stylesheet">
    <style>
        .match-details {
            margin-bottom: 10px;
        }
        .match-line {
            margin-left: 20px;
            margin-bottom: 5px;
            font-family: monospace;
            white-space: pre-wrap;
            word-break: break-all;
        }
        .match-terms {
            color: #d63384;
            font-weight: bold;
        }
        .file-path {
            font-weight: bold;
        }
    </style>
</head>
"#;

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Joins a base URL and a relative path with exactly one `/` between them.
pub fn join_url(base_url: &str, relative_path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        relative_path.trim_start_matches('/')
    )
}

/// Wraps every case-insensitive occurrence of `terms` in emphasis markup.
pub fn highlight(text: &str, terms: &[String]) -> String {
    let alternatives: Vec<String> = terms
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| regex::escape(t))
        .collect();
    if alternatives.is_empty() {
        return text.to_string();
    }

    match RegexBuilder::new(&format!("({})", alternatives.join("|")))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern
            .replace_all(text, format!("{HIGHLIGHT_OPEN}${{1}}{HIGHLIGHT_CLOSE}").as_str())
            .into_owned(),
        Err(e) => {
            log::warn!("Highlighting skipped: {e}");
            text.to_string()
        }
    }
}

/// Cuts `text` to [`EXCERPT_LIMIT`] characters, backing up to the last space,
/// and appends `...`.
///
/// Operates on the already highlighted string, so markup at the cut point can
/// be left unclosed.
pub fn truncate_excerpt(text: &str) -> String {
    let Some((cut, _)) = text.char_indices().nth(EXCERPT_LIMIT) else {
        return text.to_string();
    };

    let mut truncated = &text[..cut];
    if let Some(last_space) = truncated.rfind(' ') {
        if last_space > 0 {
            truncated = &truncated[..last_space];
        }
    }
    format!("{truncated}...")
}

fn render_line(line: &ContentMatchLine) -> String {
    let excerpt = truncate_excerpt(&highlight(&line.content, &line.terms));
    format!(
        "<div class='match-line'>Line {}: <span class='match-terms'>[{}]</span> {}</div>",
        line.line_number,
        escape_html(&line.terms.join(", ")),
        excerpt
    )
}

/// The match-details cell: filename terms, then one line per content match.
pub fn match_details(record: &FileMatchRecord) -> String {
    let mut details = Vec::new();

    if !record.filename_terms.is_empty() {
        details.push(format!(
            "<strong>Found in filename:</strong> {}",
            escape_html(&record.filename_terms.join(", "))
        ));
    }

    if !record.content_matches.is_empty() {
        details.push("<strong>Content matches:</strong>".to_string());
        details.extend(record.content_matches.iter().map(render_line));
    }

    format!(
        "<div class='match-details'>{}</div>",
        details.join("</div><div class='match-details'>")
    )
}

fn unique_terms(terms: &[String]) -> Vec<&str> {
    let mut unique: Vec<&str> = Vec::new();
    for term in terms {
        if !unique.contains(&term.as_str()) {
            unique.push(term);
        }
    }
    unique
}

fn render_parameters(output: &mut String, root: &str, terms: &[String], base_url: &str) {
    output.push_str("<h2>Search Information</h2>\n");
    output.push_str("<div class=\"card mb-4\">\n<div class=\"card-body\">\n");
    output.push_str("<h5 class=\"card-title\">Search Parameters</h5>\n");
    output.push_str(&format!(
        "<p><strong>Directory searched:</strong> {}</p>\n",
        escape_html(root)
    ));
    let escaped = escape_html(base_url);
    output.push_str(&format!(
        "<p><strong>Website searched:</strong> <a href='{escaped}'>{escaped}</a></p>\n"
    ));
    output.push_str(&format!(
        "<p><strong>Search terms:</strong> {}</p>\n",
        escape_html(&unique_terms(terms).join(", "))
    ));

    output.push_str("<div>\n<p><strong>File extensions searched:</strong></p>\n");
    output.push_str("<div class=\"row\">\n");
    for chunk in TEXT_EXTENSIONS.chunks(EXTENSIONS_PER_COLUMN) {
        output.push_str("<div class=\"col-md-2\"><ul class=\"list-unstyled\">");
        for ext in chunk {
            output.push_str(&format!("<li><code>.{}</code></li>", escape_html(ext)));
        }
        output.push_str("</ul></div>\n");
    }
    output.push_str("</div>\n</div>\n</div>\n</div>\n");
}

fn render_row(output: &mut String, record: &FileMatchRecord, base_url: &str) {
    let path = escape_html(&record.relative_path);
    let path_cell = if base_url.is_empty() {
        format!("<span class=\"file-path\">{path}</span>")
    } else {
        format!(
            "<a href=\"{}\" target=\"_blank\" class=\"file-path\">{path}</a>",
            escape_html(&join_url(base_url, &record.relative_path))
        )
    };

    output.push_str("<tr>\n");
    output.push_str(&format!("    <td>{path_cell}</td>\n"));
    output.push_str(&format!(
        "    <td>{}</td>\n",
        escape_html(&record.matched_terms().join(", "))
    ));
    output.push_str(&format!("    <td>{}</td>\n", match_details(record)));
    output.push_str("</tr>\n");
}

/// Renders the full self-contained report.
pub fn render_html(
    records: &[FileMatchRecord],
    root: &str,
    terms: &[String],
    base_url: &str,
) -> String {
    let mut output = String::from(HEAD);
    output.push_str("<body class=\"container mt-4\">\n");

    render_parameters(&mut output, root, terms, base_url);

    output.push_str("<h2>Search Results</h2>\n");
    output.push_str(&format!(
        "<p>Found matches in <strong>{}</strong> files.</p>\n",
        records.len()
    ));
    output.push_str("<table class=\"table table-bordered table-striped\">\n");
    output.push_str("<thead class=\"table-dark\">\n<tr>\n");
    output.push_str("    <th width=\"25%\">File Path</th>\n");
    output.push_str("    <th width=\"15%\">Matched Terms</th>\n");
    output.push_str("    <th width=\"60%\">Match Details</th>\n");
    output.push_str("</tr>\n</thead>\n<tbody>\n");

    for record in records {
        render_row(&mut output, record, base_url);
    }

    output.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    output
}

/// Renders the records as a pretty-printed JSON document.
pub fn render_json(
    records: &[FileMatchRecord],
    root: &str,
    terms: &[String],
    base_url: &str,
) -> Result<String> {
    let document = json!({
        "directory": root,
        "base_url": base_url,
        "terms": unique_terms(terms),
        "extensions": TEXT_EXTENSIONS,
        "total_files": records.len(),
        "files": records.iter().map(|r| json!({
            "path": r.relative_path,
            "url": (!base_url.is_empty()).then(|| join_url(base_url, &r.relative_path)),
            "matched_terms": r.matched_terms(),
            "filename_terms": r.filename_terms,
            "content_matches": r.content_matches,
        })).collect::<Vec<_>>(),
    });

    Ok(serde_json::to_string_pretty(&document)?)
}
