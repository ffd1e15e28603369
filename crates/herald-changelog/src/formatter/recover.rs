//! Recovering announcement lines from previously rendered text.
//!
//! This is lossy: commit ids and authors are not part of the rendered text
//! and come back empty.

use regex::Regex;
use std::sync::LazyLock;

use super::mrkdwn::{unescape, BULLET};
use crate::types::Change;

/// `• <url|summary>` optionally followed by ` <url|(#123)>`
static TICKET_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<(?P<url>[^|>]+)\|(?P<summary>[^>]*)>(?: <(?P<surl>[^|>]+)\|\(#(?P<skey>[0-9]+)\)>)?$")
        .expect("Invalid regex")
});

/// `• summary <url|(#123)>`; the escaped summary never holds `<` and may be empty
static ISSUE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<summary>[^<]*) <(?P<url>[^|>]+)\|\(#(?P<key>[0-9]+)\)>$")
        .expect("Invalid regex")
});

/// Parse every bulleted line of `text`, in order of appearance
pub fn parse_announcement(text: &str) -> Vec<Change> {
    text.lines().filter_map(parse_line).collect()
}

/// Parse one rendered line, or `None` if it is not a bulleted line
pub fn parse_line(line: &str) -> Option<Change> {
    let rest = line.trim().strip_prefix(BULLET)?;
    // Only the single separator space belongs to the bullet.
    let body = rest.strip_prefix(' ').unwrap_or(rest);

    if let Some(caps) = TICKET_LINE.captures(body) {
        let url = &caps["url"];
        let key = url.rsplit('/').next().unwrap_or_default();
        let mut change = Change::ticket(key, unescape(&caps["summary"]), url);
        if let (Some(skey), Some(surl)) = (caps.name("skey"), caps.name("surl")) {
            change = change.with_secondary(skey.as_str(), surl.as_str());
        }
        return Some(change);
    }

    if let Some(caps) = ISSUE_LINE.captures(body) {
        return Some(Change::issue(
            &caps["key"],
            unescape(&caps["summary"]),
            &caps["url"],
        ));
    }

    Some(Change::plain("", unescape(body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{render, AnnouncementFormatter, MrkdwnFormatter};
    use crate::types::ChangeKind;

    #[test]
    fn test_parse_ticket_line() {
        let change = parse_line(
            "• <https://t.example/browse/ABC-100|Fix login> <https://g.example/pull/42|(#42)>",
        )
        .unwrap();
        assert_eq!(change.kind, ChangeKind::Ticket);
        assert_eq!(change.primary_key, "ABC-100");
        assert_eq!(change.summary, "Fix login");
        assert_eq!(change.secondary_key.as_deref(), Some("42"));
        assert_eq!(change.secondary_url.as_deref(), Some("https://g.example/pull/42"));
    }

    #[test]
    fn test_parse_issue_line() {
        let change = parse_line("• Bump parser <https://g.example/pull/17|(#17)>").unwrap();
        assert_eq!(change.kind, ChangeKind::Issue);
        assert_eq!(change.primary_key, "17");
        assert_eq!(change.summary, "Bump parser");
    }

    #[test]
    fn test_parse_plain_line() {
        let change = parse_line("• Use &lt;T&gt; here").unwrap();
        assert_eq!(change.kind, ChangeKind::Plain);
        assert_eq!(change.summary, "Use <T> here");
        assert!(change.commit_id.is_empty());
    }

    #[test]
    fn test_issue_with_empty_summary_stays_issue() {
        let changes = vec![Change::issue("42", "", "https://g.example/pull/42")];
        let text = render(&changes, "3", None);

        let recovered = parse_announcement(&text);
        assert_eq!(recovered.len(), 1);
        assert_eq!(recovered[0].kind, ChangeKind::Issue);
        assert_eq!(recovered[0].primary_key, "42");
        assert_eq!(recovered[0].summary, "");
        assert_eq!(recovered[0].url.as_deref(), Some("https://g.example/pull/42"));
    }

    #[test]
    fn test_non_bullet_lines_skipped() {
        assert!(parse_line(":rocket: *Release notes*").is_none());
        assert!(parse_line("").is_none());
    }

    #[test]
    fn test_rendered_lines_survive_recovery() {
        let changes = vec![
            Change::ticket("ABC-1", "One & two", "https://t.example/browse/ABC-1")
                .with_secondary("5", "https://g.example/pull/5"),
            Change::issue("9", "Nine", "https://g.example/pull/9"),
            Change::plain("", "Plain <thing>"),
        ];

        let text = render(&changes, "12", None);
        let recovered = parse_announcement(&text);
        assert_eq!(recovered.len(), 3);

        let formatter = MrkdwnFormatter::new();
        for (original, back) in changes.iter().zip(&recovered) {
            assert_eq!(formatter.format_line(original), formatter.format_line(back));
        }
    }
}
