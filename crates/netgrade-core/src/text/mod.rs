//! Text cleanup applied to every config before parsing

/// Markers that turn a whole line into a comment
const LINE_COMMENT_MARKERS: [char; 2] = ['!', '#'];

/// Marker that starts an inline comment
const INLINE_COMMENT_MARKER: char = '!';

/// Strip comments and blank lines from raw config text.
///
/// Each line is trimmed; empty lines and lines starting with `!` or `#` are
/// dropped, and anything after an inline `!` is cut off.
pub fn sanitize(raw: &str) -> String {
    raw.lines()
        .filter_map(sanitize_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn sanitize_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(LINE_COMMENT_MARKERS) {
        return None;
    }

    let kept = match trimmed.split_once(INLINE_COMMENT_MARKER) {
        Some((before, _)) => before.trim_end(),
        None => trimmed,
    };
    Some(kept)
}

/// Split a line into whitespace-separated tokens
pub fn tokens(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}
