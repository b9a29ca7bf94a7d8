//! Word-list loading and layout classification.
//!
//! A dictionary file comes in one of two layouts, decided by the shape of
//! its first line. Bare lists are treated as a pure vocabulary: empty lines
//! dropped, duplicates collapsed, words sorted. Annotated lists
//! (`word;meta1;meta2;...`) carry curated external metadata and are kept
//! exactly in source order, with no deduplication.

use crate::error::ZembuError;
use crate::types::WordEntry;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// The two recognized word-list layouts.
///
/// Classification happens once, up front, on the first line. Everything
/// downstream branches on the resulting variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLayout {
    /// One bare word per line
    Bare,

    /// `word;annotation1;annotation2;...` per line
    Annotated,
}

impl ListLayout {
    /// Decide the layout from the file's first line.
    pub fn classify(first_line: &str) -> Self {
        if first_line.contains(';') {
            ListLayout::Annotated
        } else {
            ListLayout::Bare
        }
    }
}

/// Load a word list from a dictionary file.
///
/// Every line is trimmed and lowercased before layout-specific handling.
///
/// # Errors
///
/// Returns `ZembuError::FileError` if the file cannot be read and
/// `ZembuError::EmptyWordList` if it contains no non-whitespace lines.
pub fn load_word_list<P: AsRef<Path>>(path: P) -> Result<Vec<WordEntry>, ZembuError> {
    let path = path.as_ref();

    let content = fs::read_to_string(path)
        .map_err(|e| ZembuError::file_error(path.to_string_lossy(), e.to_string()))?;

    let lines: Vec<String> = content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .collect();

    if lines.iter().all(|line| line.is_empty()) {
        return Err(ZembuError::empty_word_list(path.to_string_lossy()));
    }

    let layout = ListLayout::classify(&lines[0]);
    let entries = match layout {
        ListLayout::Bare => parse_bare(&lines),
        ListLayout::Annotated => parse_annotated(&lines),
    };

    tracing::debug!(
        "loaded {} words from {} ({:?} layout)",
        entries.len(),
        path.display(),
        layout
    );

    Ok(entries)
}

/// Bare mode: drop empties, deduplicate, sort lexicographically ascending.
fn parse_bare(lines: &[String]) -> Vec<WordEntry> {
    let words: BTreeSet<&str> = lines
        .iter()
        .map(String::as_str)
        .filter(|line| !line.is_empty())
        .collect();

    words.into_iter().map(WordEntry::bare).collect()
}

/// Annotated mode: split on semicolons, keep source order, no dedup/sort.
///
/// Annotated lists are assumed curated, so reordering or collapsing them
/// would discard meaning carried by the external metadata.
fn parse_annotated(lines: &[String]) -> Vec<WordEntry> {
    lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut fields = line.split(';').map(str::trim);
            let word = fields.next().unwrap_or_default().to_string();
            let annotations = fields.map(str::to_string).collect();
            WordEntry::annotated(word, annotations)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_word_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("failed to write temp file");
        file
    }

    #[test]
    fn test_classify_layout() {
        assert_eq!(ListLayout::classify("zephyr"), ListLayout::Bare);
        assert_eq!(ListLayout::classify("zephyr;high;12"), ListLayout::Annotated);
        assert_eq!(ListLayout::classify(""), ListLayout::Bare);
    }

    #[test]
    fn test_bare_list_deduplicated_sorted_no_empties() {
        let file = write_word_file("delta\n\nalpha\nDelta\ncharlie\nalpha\n   \n");
        let entries = load_word_list(file.path()).unwrap();

        let words: Vec<&str> = entries.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["alpha", "charlie", "delta"]);
        assert!(entries.iter().all(|e| e.annotations.is_empty()));
    }

    #[test]
    fn test_bare_list_lowercased_and_trimmed() {
        let file = write_word_file("  Zephyr  \nAURORA\n");
        let entries = load_word_list(file.path()).unwrap();

        let words: Vec<&str> = entries.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["aurora", "zephyr"]);
    }

    #[test]
    fn test_annotated_list_preserves_order_and_fields() {
        let file = write_word_file("zulu;high;9000\nalpha;low\nzulu;high;9000\n");
        let entries = load_word_list(file.path()).unwrap();

        // Order and count preserved exactly, including the duplicate
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].word, "zulu");
        assert_eq!(entries[0].annotations, vec!["high", "9000"]);
        assert_eq!(entries[1].word, "alpha");
        assert_eq!(entries[1].annotations, vec!["low"]);
        assert_eq!(entries[2], entries[0]);
    }

    #[test]
    fn test_annotated_word_with_no_annotations() {
        let file = write_word_file("zulu;high\nplain;\n");
        let entries = load_word_list(file.path()).unwrap();

        assert_eq!(entries[1].word, "plain");
        assert_eq!(entries[1].annotations, vec![""]);
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let file = write_word_file("");
        let err = load_word_list(file.path()).unwrap_err();
        assert!(matches!(err, ZembuError::EmptyWordList { .. }));
    }

    #[test]
    fn test_whitespace_only_file_is_an_error() {
        let file = write_word_file("\n   \n\t\n");
        let err = load_word_list(file.path()).unwrap_err();
        assert!(matches!(err, ZembuError::EmptyWordList { .. }));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_word_list("/nonexistent/words.txt").unwrap_err();
        assert!(matches!(err, ZembuError::FileError { .. }));
    }
}
