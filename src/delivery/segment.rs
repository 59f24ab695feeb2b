//! Natural-boundary text segmentation.

/// Characters a chunk may end on: the ideographic full stop and newline.
pub const BREAK_MARKERS: &[char] = &['。', '\n'];

/// Split `text` into chunks of at most `max_len` characters.
///
/// Text that already fits is returned trimmed as a single chunk. Longer text
/// is consumed window by window: each chunk ends just after the last break
/// marker inside the next `max_len` characters, or exactly at `max_len` when
/// the window has no marker. Chunks are trimmed; whitespace-only pieces
/// between markers are dropped. Empty input yields no chunks.
pub fn segment(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    let mut parts = Vec::new();

    if text.is_empty() {
        return parts;
    }
    if text.chars().count() <= max_len {
        parts.push(text.trim().to_string());
        return parts;
    }

    let mut rest = text;
    while !rest.is_empty() {
        // Byte offset one past the window, or None if the rest fits
        let window_end = match rest.char_indices().nth(max_len) {
            Some((idx, _)) => idx,
            None => {
                push_trimmed(&mut parts, rest);
                break;
            }
        };

        let window = &rest[..window_end];
        let cut = window
            .char_indices()
            .filter(|(_, c)| BREAK_MARKERS.contains(c))
            .last()
            .map(|(idx, c)| idx + c.len_utf8())
            .unwrap_or(window_end);

        push_trimmed(&mut parts, &rest[..cut]);
        rest = &rest[cut..];
    }

    parts
}

fn push_trimmed(parts: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_len(s: &str) -> usize {
        s.chars().count()
    }

    /// Strip all whitespace so trimmed chunks can be compared to the input.
    fn squash(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(segment("", 10).is_empty());
    }

    #[test]
    fn test_short_input_is_single_trimmed_chunk() {
        assert_eq!(segment("  hello world \n", 100), vec!["hello world"]);
        assert_eq!(segment("exactly10!", 10), vec!["exactly10!"]);
    }

    #[test]
    fn test_cuts_after_last_marker_in_window() {
        let text = "一文目。二文目。三文目の続きがとても長い";
        let parts = segment(text, 10);
        assert_eq!(parts[0], "一文目。二文目。");
        assert!(parts.iter().all(|p| char_len(p) <= 10));
        assert_eq!(parts.concat(), text);
    }

    #[test]
    fn test_newline_is_a_break() {
        let text = "first line\nsecond line that is long";
        let parts = segment(text, 15);
        assert_eq!(parts[0], "first line");
        assert_eq!(squash(&parts.concat()), squash(text));
    }

    #[test]
    fn test_hard_cut_without_markers() {
        let text = "a".repeat(25);
        let parts = segment(&text, 10);
        assert_eq!(parts, vec!["a".repeat(10), "a".repeat(10), "a".repeat(5)]);
    }

    #[test]
    fn test_marker_at_window_start_still_progresses() {
        let text = format!("。{}", "b".repeat(12));
        let parts = segment(&text, 5);
        assert_eq!(parts[0], "。");
        assert_eq!(parts.concat(), text);
        assert!(parts.iter().all(|p| char_len(p) <= 5));
    }

    #[test]
    fn test_multibyte_text_respects_char_limit() {
        let text = "要約".repeat(3000);
        let parts = segment(&text, 1900);
        assert_eq!(parts.len(), 4);
        assert!(parts.iter().all(|p| char_len(p) <= 1900));
        assert_eq!(parts.concat(), text);
    }

    #[test]
    fn test_whitespace_between_markers_is_dropped() {
        let text = format!("{}\n\n\n\n{}", "x".repeat(8), "y".repeat(8));
        let parts = segment(&text, 9);
        assert_eq!(parts, vec!["x".repeat(8), "y".repeat(8)]);
    }

    #[test]
    fn test_zero_limit_is_treated_as_one() {
        assert_eq!(segment("abc", 0), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_chunks_bounded_and_reconstruct_input() {
        let sentence = "The lecture covers cohort analysis。Then it moves on.\n";
        let text = sentence.repeat(200);
        for limit in [1, 7, 50, 333, 1900] {
            let parts = segment(&text, limit);
            assert!(parts.iter().all(|p| char_len(p) <= limit), "limit {limit}");
            assert_eq!(squash(&parts.concat()), squash(&text), "limit {limit}");
            assert!(parts.len() <= text.chars().count().div_ceil(limit) * 2 + 1);
        }
    }
}
