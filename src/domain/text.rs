use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string to a display width, appending an ellipsis when cut.
///
/// Width is measured in terminal cells, so double-width characters count as
/// two. A width of zero yields an empty string.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if s.width() <= width {
        return s.to_string();
    }

    let budget = width.saturating_sub(1); // room for the ellipsis
    let mut used = 0;
    let mut result = String::new();
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if used + char_width > budget {
            break;
        }
        used += char_width;
        result.push(c);
    }
    result.push('…');
    result
}
