//! Check a parsed selection against the number of addressable items.

use std::fmt;

use super::parse::RawSelection;

/// Which list the user is selecting from; only affects error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTarget {
    Season,
    Episode,
    Title,
}

impl fmt::Display for SelectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionTarget::Season => write!(f, "season"),
            SelectionTarget::Episode => write!(f, "episode"),
            SelectionTarget::Title => write!(f, "title"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("invalid {target} selection '{input}': use N, N-M, N-* or *")]
    Malformed {
        target: SelectionTarget,
        input: String,
    },
    #[error("{target} {index} is out of range, valid {target}s are 1-{count}")]
    OutOfRange {
        target: SelectionTarget,
        index: usize,
        count: usize,
    },
    #[error("invalid {target} range {start}-{end}: start is after end")]
    Reversed {
        target: SelectionTarget,
        start: usize,
        end: usize,
    },
    #[error("no {target}s to select from")]
    Empty { target: SelectionTarget },
}

/// Ordered set of unique, 1-based indices, each within the validated count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRange {
    indices: Vec<usize>,
}

impl SelectionRange {
    fn contiguous(start: usize, end: usize) -> Self {
        Self {
            indices: (start..=end).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }
}

impl IntoIterator for SelectionRange {
    type Item = usize;
    type IntoIter = std::vec::IntoIter<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.into_iter()
    }
}

/// Validates a season selection.
pub fn validate_selection(
    selection: &RawSelection,
    count: usize,
) -> Result<SelectionRange, SelectionError> {
    validate(selection, count, SelectionTarget::Season)
}

/// Validates an episode selection. Same rules as seasons.
pub fn validate_episode_selection(
    selection: &RawSelection,
    count: usize,
) -> Result<SelectionRange, SelectionError> {
    validate(selection, count, SelectionTarget::Episode)
}

/// Validates a selection from a title search result list.
pub fn validate_title_selection(
    selection: &RawSelection,
    count: usize,
) -> Result<SelectionRange, SelectionError> {
    validate(selection, count, SelectionTarget::Title)
}

fn validate(
    selection: &RawSelection,
    count: usize,
    target: SelectionTarget,
) -> Result<SelectionRange, SelectionError> {
    if count == 0 && !matches!(selection, RawSelection::Invalid(_)) {
        return Err(SelectionError::Empty { target });
    }

    let in_range = |index: usize| {
        if (1..=count).contains(&index) {
            Ok(index)
        } else {
            Err(SelectionError::OutOfRange {
                target,
                index,
                count,
            })
        }
    };

    match *selection {
        RawSelection::All => Ok(SelectionRange::contiguous(1, count)),
        RawSelection::Single(n) => {
            let n = in_range(n)?;
            Ok(SelectionRange::contiguous(n, n))
        }
        RawSelection::Range { start, end } => {
            if start > end {
                return Err(SelectionError::Reversed { target, start, end });
            }
            in_range(start)?;
            in_range(end)?;
            Ok(SelectionRange::contiguous(start, end))
        }
        RawSelection::From(start) => {
            in_range(start)?;
            Ok(SelectionRange::contiguous(start, count))
        }
        RawSelection::Invalid(ref input) => Err(SelectionError::Malformed {
            target,
            input: input.clone(),
        }),
    }
}
