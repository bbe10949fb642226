use unicode_width::UnicodeWidthChar;

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// A visual line of hard-wrapped text: its content plus the char range
/// `[start, end)` it covers in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLine {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Breaks text at explicit newlines and wherever the display width would
/// exceed `max_width`. Unlike word wrapping, every character keeps a fixed
/// position, which is what the editor cursor needs.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<WrappedLine> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0;
    let mut start = 0;

    for (idx, ch) in text.chars().enumerate() {
        if ch == '\n' {
            lines.push(WrappedLine {
                text: std::mem::take(&mut current),
                start,
                end: idx,
            });
            width = 0;
            start = idx + 1;
            continue;
        }

        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width && width > 0 {
            lines.push(WrappedLine {
                text: std::mem::take(&mut current),
                start,
                end: idx,
            });
            width = 0;
            start = idx;
        }
        current.push(ch);
        width += ch_width;
    }

    lines.push(WrappedLine {
        text: current,
        start,
        end: text.chars().count(),
    });
    lines
}

/// Visual (line, column) of a char-indexed cursor in hard-wrapped text.
pub fn cursor_position(text: &str, cursor: usize, max_width: usize) -> (usize, usize) {
    let lines = wrap_text(text, max_width);
    let last = lines.len() - 1;

    for (i, line) in lines.iter().enumerate() {
        // A cursor sitting exactly on a wrap boundary belongs to the next
        // line, unless the break came from a newline or this is the end.
        let next_starts_here = lines.get(i + 1).is_some_and(|next| next.start == cursor);
        if cursor >= line.start && cursor <= line.end && (!next_starts_here || i == last) {
            let col: usize = line
                .text
                .chars()
                .take(cursor - line.start)
                .map(|c| c.width().unwrap_or(0))
                .sum();
            return (i, col);
        }
    }

    let width: usize = lines[last].text.chars().map(|c| c.width().unwrap_or(0)).sum();
    (last, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_no_truncation() {
        assert_eq!(truncate_string("Short string", 20), "Short string");
    }

    #[test]
    fn test_truncate_string_with_truncation() {
        let result = truncate_string("This is a very long string that should be truncated", 20);
        assert_eq!(result, "This is a very lo...");
        assert_eq!(result.chars().count(), 20);
    }

    #[test]
    fn test_truncate_string_multibyte() {
        assert_eq!(truncate_string("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_wrap_empty_text_has_one_line() {
        let lines = wrap_text("", 10);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "");
    }

    #[test]
    fn test_wrap_at_width() {
        let lines = wrap_text("0123456789AB", 5);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["01234", "56789", "AB"]);
        assert_eq!(lines[1].start, 5);
        assert_eq!(lines[2].end, 12);
    }

    #[test]
    fn test_wrap_explicit_newlines() {
        let lines = wrap_text("Line 1\nLine 2\n", 20);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Line 1", "Line 2", ""]);
    }

    #[test]
    fn test_cursor_at_start_and_inside() {
        assert_eq!(cursor_position("Hello", 0, 10), (0, 0));
        assert_eq!(cursor_position("Hello", 3, 10), (0, 3));
        assert_eq!(cursor_position("Hello", 5, 10), (0, 5));
    }

    #[test]
    fn test_cursor_after_wrap() {
        assert_eq!(cursor_position("0123456789AB", 7, 5), (1, 2));
        // On the boundary the cursor moves to the start of the next line.
        assert_eq!(cursor_position("0123456789AB", 5, 5), (1, 0));
    }

    #[test]
    fn test_cursor_at_end_of_full_line() {
        assert_eq!(cursor_position("01234", 5, 5), (0, 5));
    }

    #[test]
    fn test_cursor_after_newline() {
        assert_eq!(cursor_position("Line 1\nLine 2", 8, 20), (1, 1));
        assert_eq!(cursor_position("abc\n", 4, 20), (1, 0));
        assert_eq!(cursor_position("abc\n", 3, 20), (0, 3));
    }

    #[test]
    fn test_cursor_beyond_text_clamps() {
        assert_eq!(cursor_position("Hi", 10, 10), (0, 2));
    }
}
