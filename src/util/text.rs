//! Width-aware text helpers for rendering into fixed-width cells.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate to at most `width` columns, appending '…' when cut.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for g in s.graphemes(true) {
        let w = UnicodeWidthStr::width(g);
        if used + w > width.saturating_sub(1) {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push('…');
    out
}

/// Word-wrap into lines at most `width` columns wide, at most `max_lines`
/// lines; the last line is truncated if the text does not fit. A long single
/// word is broken mid-word.
pub fn wrap_to_lines(s: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in s.split_word_bounds() {
        let word_width = display_width(word);
        if word.trim().is_empty() {
            // collapse leading whitespace on a fresh line
            if current_width > 0 && current_width + word_width <= width {
                current.push_str(word);
                current_width += word_width;
            }
            continue;
        }
        if current_width + word_width <= width {
            current.push_str(word);
            current_width += word_width;
            continue;
        }
        if current_width > 0 {
            lines.push(current.trim_end().to_string());
            current = String::new();
            current_width = 0;
            if lines.len() == max_lines {
                break;
            }
        }
        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
        } else {
            // break an overlong word across lines
            for g in word.graphemes(true) {
                let w = UnicodeWidthStr::width(g);
                if current_width + w > width {
                    lines.push(current.clone());
                    current = String::new();
                    current_width = 0;
                    if lines.len() == max_lines {
                        break;
                    }
                }
                current.push_str(g);
                current_width += w;
            }
        }
    }
    if lines.len() < max_lines && !current.trim().is_empty() {
        lines.push(current.trim_end().to_string());
    }
    if lines.len() > max_lines {
        lines.truncate(max_lines);
    }
    // mark an overflowing last line
    if lines.len() == max_lines
        && display_width(s) > width * max_lines
        && let Some(last) = lines.last_mut()
    {
        *last = truncate_to_width(last, width);
    }
    lines
}
