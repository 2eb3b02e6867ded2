//! Tokenize a raw selection string.

/// A selection expression before it is checked against the item count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawSelection {
    /// `*`
    All,
    /// `N`
    Single(usize),
    /// `N-M` (inclusive, not yet checked for order).
    Range { start: usize, end: usize },
    /// `N-*`
    From(usize),
    /// Anything else; keeps the trimmed input for the error message.
    Invalid(String),
}

impl RawSelection {
    pub fn is_all(&self) -> bool {
        matches!(self, RawSelection::All)
    }
}

/// Parses user input into a `RawSelection`.
///
/// `count` is accepted so callers read like the validators; it is only
/// consulted by `validate_*`.
pub fn manage_selection(raw_input: &str, _count: usize) -> RawSelection {
    let input = raw_input.trim();
    if input == "*" {
        return RawSelection::All;
    }

    if let Some((a, b)) = input.split_once('-') {
        let start = match parse_index(a) {
            Some(n) => n,
            None => return RawSelection::Invalid(input.to_string()),
        };
        let b = b.trim();
        if b == "*" {
            return RawSelection::From(start);
        }
        return match parse_index(b) {
            Some(end) => RawSelection::Range { start, end },
            None => RawSelection::Invalid(input.to_string()),
        };
    }

    match parse_index(input) {
        Some(n) => RawSelection::Single(n),
        None => RawSelection::Invalid(input.to_string()),
    }
}

/// Digits only; rejects signs so `-3` or `+3` never parse as an index.
fn parse_index(s: &str) -> Option<usize> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<usize>().ok()
}
