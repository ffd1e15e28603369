//! Splitting long announcements for platforms with message size limits

/// Marker appended to a line cut short by [`truncate_line`]
pub const ELLIPSIS: &str = "...";

/// Split `text` into pieces of at most `max_length` characters.
///
/// Lines are packed greedily and never split across pieces. A single line
/// longer than `max_length` is cut to `max_length - 3` characters plus
/// [`ELLIPSIS`] and emitted on its own. Pieces are trimmed and never empty.
pub fn chunk(text: &str, max_length: usize) -> Vec<String> {
    if text.chars().count() <= max_length {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split('\n') {
        let line_len = line.chars().count();

        if line_len > max_length {
            flush(&mut chunks, &mut current);
            current_len = 0;
            push_trimmed(&mut chunks, &truncate_line(line, max_length));
            continue;
        }

        if current.is_empty() {
            current.push_str(line);
            current_len = line_len;
        } else if current_len + 1 + line_len <= max_length {
            current.push('\n');
            current.push_str(line);
            current_len += 1 + line_len;
        } else {
            flush(&mut chunks, &mut current);
            current.push_str(line);
            current_len = line_len;
        }
    }
    flush(&mut chunks, &mut current);

    chunks
}

/// Cut a line to `max_length - 3` characters followed by [`ELLIPSIS`].
///
/// Limits too small to hold the ellipsis cut the line to `max_length`
/// characters without one.
pub fn truncate_line(line: &str, max_length: usize) -> String {
    if max_length < ELLIPSIS.len() {
        return line.chars().take(max_length).collect();
    }
    let keep = max_length.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = line.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

fn flush(chunks: &mut Vec<String>, current: &mut String) {
    push_trimmed(chunks, current);
    current.clear();
}

fn push_trimmed(chunks: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(chunk("one\ntwo", 100), vec!["one\ntwo"]);
        assert_eq!(chunk("exactly", 7), vec!["exactly"]);
    }

    #[test]
    fn test_greedy_packing() {
        let text = "aaaa\nbbbb\ncccc\ndddd";
        let chunks = chunk(text, 9);
        assert_eq!(chunks, vec!["aaaa\nbbbb", "cccc\ndddd"]);
    }

    #[test]
    fn test_never_splits_a_line() {
        let text = "aaaa\nbbbbbb\ncc";
        let chunks = chunk(text, 8);
        assert_eq!(chunks, vec!["aaaa", "bbbbbb", "cc"]);
    }

    #[test]
    fn test_overlong_line_truncated_alone() {
        let text = "short\nthis line is far too long\nend";
        let chunks = chunk(text, 10);
        assert_eq!(chunks, vec!["short", "this li...", "end"]);
    }

    #[test]
    fn test_chunks_respect_bound_and_reconstruct() {
        let lines: Vec<String> = (0..50).map(|i| format!("• line number {}", i)).collect();
        let text = lines.join("\n");

        for max in [20, 33, 64, 200] {
            let chunks = chunk(&text, max);
            assert!(chunks.iter().all(|c| c.chars().count() <= max));
            assert!(chunks.iter().all(|c| !c.is_empty()));
            assert_eq!(chunks.join("\n"), text);
        }
    }

    #[test]
    fn test_blank_lines_do_not_produce_empty_chunks() {
        let text = "aaaa\n\n\n\nbbbb";
        let chunks = chunk(text, 5);
        assert_eq!(chunks, vec!["aaaa", "bbbb"]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "•••••\n•••••";
        assert_eq!(chunk(text, 11), vec![text.to_string()]);
        assert_eq!(chunk(text, 5), vec!["•••••", "•••••"]);
    }

    #[test]
    fn test_truncate_line() {
        assert_eq!(truncate_line("abcdefghij", 6), "abc...");
        assert_eq!(truncate_line("abcdefghij", 6).chars().count(), 6);
    }

    #[test]
    fn test_tiny_limit_still_bounded() {
        assert_eq!(truncate_line("abcdef", 2), "ab");
        assert_eq!(chunk("abcdef\nxyz", 2), vec!["ab", "xy"]);
        assert_eq!(chunk("abcdef", 3), vec!["..."]);
    }
}
