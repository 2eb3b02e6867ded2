//! File and folder name cleanup.

/// Linux NAME_MAX, in bytes.
const NAME_MAX: usize = 255;

fn is_forbidden(c: char) -> bool {
    c.is_control() || matches!(c, '/' | '\\' | '<' | '>' | ':' | '"' | '|' | '?' | '*')
}

/// Makes a title or episode name usable as a single path component.
///
/// Forbidden characters become `_`, runs of `_` collapse to one, edge
/// spaces and dots are trimmed and the result is cut to `NAME_MAX` bytes on
/// a char boundary.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars().map(|c| if is_forbidden(c) { '_' } else { c }) {
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    let trimmed = out.trim_matches(|c: char| c == ' ' || c == '.');
    truncate_on_boundary(trimmed, NAME_MAX).to_string()
}

fn truncate_on_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let end = (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0);
    &s[..end]
}
