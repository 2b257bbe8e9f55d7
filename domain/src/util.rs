//! Shared utility functions.

/// Truncate a string to at most `max_bytes` without splitting a UTF-8
/// character.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Single-line preview of user or model text for log records.
///
/// Whitespace runs (including newlines) collapse to one space and the
/// result is cut to `max_bytes`, with `...` appended when cut.
pub fn log_preview(s: &str, max_bytes: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    let cut = truncate_str(&collapsed, max_bytes);
    if cut.len() < collapsed.len() {
        format!("{cut}...")
    } else {
        collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_no_op_when_short() {
        assert_eq!(truncate_str("torque", 10), "torque");
    }

    #[test]
    fn truncate_multibyte_boundary() {
        // 'ü' is 2 bytes; cutting inside it backs up one byte
        let s = "Grüße";
        assert_eq!(truncate_str(s, 3), "Gr");
        assert_eq!(truncate_str(s, 4), "Grü");
    }

    #[test]
    fn preview_collapses_newlines() {
        assert_eq!(
            log_preview("Engine torque\n\nis   450Nm", 100),
            "Engine torque is 450Nm"
        );
    }

    #[test]
    fn preview_marks_truncation() {
        assert_eq!(log_preview("hydraulic pressure", 9), "hydraulic...");
        assert_eq!(log_preview("", 5), "");
    }
}
