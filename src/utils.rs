/// Utility functions for formatting log and display output
use time::{format_description, OffsetDateTime};

/// Format a timestamp for human-readable logging
///
/// Converts an OffsetDateTime to DD.MM.YYYY - HH:MM:SS format.
/// Falls back to the default string representation if formatting fails.
pub fn format_datetime(dt: &OffsetDateTime) -> String {
    format_description::parse("[day].[month].[year] - [hour]:[minute]:[second]")
        .ok()
        .and_then(|format| dt.format(&format).ok())
        .unwrap_or_else(|| dt.to_string())
}

/// Greedy word wrap to at most `width` characters per row
///
/// Words longer than `width` are split across rows. A width of 0 disables
/// wrapping.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_len = 0;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();

        // Break words that cannot fit on any row
        while chars.len() > width {
            if row_len > 0 {
                rows.push(std::mem::take(&mut row));
                row_len = 0;
            }
            rows.push(chars.drain(..width).collect());
        }

        let word_len = chars.len();
        if word_len == 0 {
            continue;
        }
        if row_len > 0 && row_len + 1 + word_len > width {
            rows.push(std::mem::take(&mut row));
            row_len = 0;
        }
        if row_len > 0 {
            row.push(' ');
            row_len += 1;
        }
        row.extend(chars);
        row_len += word_len;
    }

    if row_len > 0 || rows.is_empty() {
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_day_first() {
        let dt = OffsetDateTime::from_unix_timestamp(1_709_622_489).unwrap();
        assert_eq!(format_datetime(&dt), "05.03.2024 - 07:08:09");
    }

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap_text("Found 12 devices that passed the filter.", 16),
            vec!["Found 12 devices", "that passed the", "filter."]
        );
    }

    #[test]
    fn splits_overlong_words() {
        assert_eq!(
            wrap_text("00:0D:97:00:00:01: 40", 8),
            vec!["00:0D:97", ":00:00:0", "1: 40"]
        );
    }

    #[test]
    fn short_and_empty_text() {
        assert_eq!(wrap_text("fits", 21), vec!["fits"]);
        assert_eq!(wrap_text("", 21), vec![""]);
        assert_eq!(wrap_text("no wrap at all", 0), vec!["no wrap at all"]);
    }
}
