//! Ticket and issue reference extraction

use regex::Regex;
use std::sync::LazyLock;

use crate::types::References;

/// Regex for `#123` issue and pull request references. Digits are ASCII only.
static ISSUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([0-9]+)").expect("Invalid regex"));

/// Regex for a trailing ` (#123)` or ` #123` decoration on a commit title
static TRAILING_ISSUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(?#[0-9]+\)?\s*$").expect("Invalid regex"));

/// Extracts ticket keys for one project and issue numbers from free text
#[derive(Debug, Clone)]
pub struct ReferenceExtractor {
    project_key: String,
    ticket_regex: Regex,
}

impl ReferenceExtractor {
    /// Create an extractor for tickets filed under `project_key`.
    ///
    /// Word boundaries and digits follow ASCII rules, so `éABC-1` still
    /// matches and `ABC-١` does not.
    pub fn new(project_key: &str) -> Self {
        let pattern = format!(
            r"(?i)(?-u:\b){}-[0-9]+(?-u:\b)",
            regex::escape(project_key)
        );
        Self {
            project_key: project_key.to_uppercase(),
            ticket_regex: Regex::new(&pattern).expect("escaped project key is a valid pattern"),
        }
    }

    /// Project key this extractor looks for
    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    /// Find all references in `text`, in order of first appearance
    pub fn extract(&self, text: &str) -> References {
        let mut refs = References::default();

        for m in self.ticket_regex.find_iter(text) {
            push_unique(&mut refs.ticket_keys, m.as_str().to_uppercase());
        }

        for caps in ISSUE_REGEX.captures_iter(text) {
            push_unique(&mut refs.issue_keys, caps[1].to_string());
        }

        refs
    }
}

fn push_unique(keys: &mut Vec<String>, key: String) {
    if !keys.contains(&key) {
        keys.push(key);
    }
}

/// Find all ticket keys for `project_key` and all issue numbers in `text`
pub fn extract_references(text: &str, project_key: &str) -> References {
    ReferenceExtractor::new(project_key).extract(text)
}

/// Strip one trailing issue decoration from a commit title
pub fn clean_title(title: &str) -> String {
    TRAILING_ISSUE_REGEX.replace(title, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_case_insensitive_in_order() {
        let refs = extract_references("fixed abc-12 and ABC-5, see #9", "ABC");
        assert_eq!(refs.ticket_keys, vec!["ABC-12", "ABC-5"]);
        assert_eq!(refs.issue_keys, vec!["9"]);
    }

    #[test]
    fn test_extract_collapses_duplicates() {
        let refs = extract_references("ABC-1 abc-1 ABC-2 ABC-1 #3 #3 #4", "ABC");
        assert_eq!(refs.ticket_keys, vec!["ABC-1", "ABC-2"]);
        assert_eq!(refs.issue_keys, vec!["3", "4"]);
    }

    #[test]
    fn test_extract_respects_word_boundaries() {
        let refs = extract_references("XABC-1 ABC-2x ABC-3", "ABC");
        assert_eq!(refs.ticket_keys, vec!["ABC-3"]);
    }

    #[test]
    fn test_extract_ascii_digits_only() {
        let refs = extract_references("see #٣٤ and éABC-1 and ABC-١ and #7", "ABC");
        assert_eq!(refs.ticket_keys, vec!["ABC-1"]);
        assert_eq!(refs.issue_keys, vec!["7"]);
    }

    #[test]
    fn test_clean_title_ignores_non_ascii_digits() {
        assert_eq!(clean_title("Fix login (#٤٢)"), "Fix login (#٤٢)");
    }

    #[test]
    fn test_extract_other_projects_ignored() {
        let refs = extract_references("DEF-1 fixes it", "ABC");
        assert!(refs.ticket_keys.is_empty());
    }

    #[test]
    fn test_extract_empty() {
        let refs = extract_references("", "ABC");
        assert!(refs.is_empty());
    }

    #[test]
    fn test_extract_escapes_project_key() {
        let refs = extract_references("A+B-1 AAB-2", "A+B");
        assert_eq!(refs.ticket_keys, vec!["A+B-1"]);
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("Fix login (#42)"), "Fix login");
        assert_eq!(clean_title("Fix login #42"), "Fix login");
        assert_eq!(clean_title("Fix login (#42)   "), "Fix login");
        assert_eq!(clean_title("Fix #1 then (#2)"), "Fix #1 then");
        assert_eq!(clean_title("Fix login"), "Fix login");
    }
}
