//! The fixed allow-list of text-like extensions whose contents are scanned.
//!
//! Every visited file is checked for filename matches, but only files whose
//! extension appears here are ever opened.

/// Scannable extensions, lowercase and kept in sorted order.
pub const TEXT_EXTENSIONS: &[&str] = &[
    "bat", "c", "conf", "cpp", "css", "csv", "h", "htm", "html", "ini", "java", "js", "json",
    "log", "md", "php", "pl", "py", "sh", "shtml", "sql", "tt", "txt", "xml", "yaml", "yml",
];

/// Lowercased segment after the last `.` in a bare file name, empty when there is none.
///
/// Unlike [`std::path::Path::extension`], a leading-dot name such as `.txt`
/// yields `txt`.
pub fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// `ext` must already be lowercased, as returned by [`extension_of`].
pub fn is_text_extension(ext: &str) -> bool {
    !ext.is_empty() && TEXT_EXTENSIONS.binary_search(&ext).is_ok()
}

pub fn is_searchable(file_name: &str) -> bool {
    is_text_extension(&extension_of(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_is_sorted_and_unique() {
        let mut sorted = TEXT_EXTENSIONS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted, TEXT_EXTENSIONS);
    }

    #[test]
    fn extension_is_lowercased_final_segment() {
        assert_eq!(extension_of("Report.TXT"), "txt");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of(".txt"), "txt");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of("trailing."), "");
    }

    #[test]
    fn searchable_files() {
        assert!(is_searchable("index.HTML"));
        assert!(is_searchable("notes.md"));
        assert!(is_searchable("template.tt"));
        assert!(!is_searchable("image.png"));
        assert!(!is_searchable("README"));
        assert!(!is_searchable("main.rs"));
    }
}
