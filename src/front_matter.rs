//! Front-matter extraction.
//!
//! A document may open with a flat `key: value` block between two `---`
//! lines:
//!
//! ```text
//! ---
//! title: "入学案内"
//! category: admissions
//! ---
//! # 出願について
//! ...
//! ```
//!
//! Anything that does not match this shape (no opening line, no closing
//! line) is treated as plain body text. Missing or malformed front matter is
//! never an error.

use std::collections::BTreeMap;

/// Document metadata taken from the front matter.
pub type Metadata = BTreeMap<String, String>;

const DELIMITER: &str = "---";

/// Split a document into its front-matter metadata and the remaining body.
///
/// The body is returned verbatim, starting right after the closing
/// delimiter line. Without a complete block the metadata is empty and the
/// body is the whole input.
///
/// # Examples
///
/// ```rust
/// use danraku::extract_front_matter;
///
/// let (meta, body) = extract_front_matter("---\ntitle: \"T\"\n---\nbody text");
/// assert_eq!(meta["title"], "T");
/// assert_eq!(body, "body text");
///
/// let (meta, body) = extract_front_matter("no block here");
/// assert!(meta.is_empty());
/// assert_eq!(body, "no block here");
/// ```
#[must_use]
pub fn extract_front_matter(text: &str) -> (Metadata, &str) {
    let Some(rest) = text
        .split_once('\n')
        .filter(|(first, _)| is_delimiter(first))
        .map(|(_, rest)| rest)
    else {
        return (Metadata::new(), text);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if is_delimiter(line) {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (parse_block(block), body);
        }
        offset += line.len();
    }

    (Metadata::new(), text)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == DELIMITER
}

/// Parse `key: value` lines. Blank lines and lines without a colon are
/// skipped; surrounding quotes are stripped from keys and values.
fn parse_block(block: &str) -> Metadata {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (unquote(key), unquote(value)))
        .collect()
}

/// Strip one matching pair of surrounding `"` or `'`.
fn unquote(s: &str) -> String {
    let s = s.trim();
    ['"', '\'']
        .into_iter()
        .find_map(|quote| s.strip_prefix(quote)?.strip_suffix(quote))
        .unwrap_or(s)
        .to_string()
}
