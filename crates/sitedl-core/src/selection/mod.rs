//! Selection expressions: `*`, `N`, `N-M`, `N-*`.
//!
//! Parsing (`manage_selection`) is domain-neutral and never fails; malformed
//! input is kept as `RawSelection::Invalid` so the validator for the step in
//! progress (season, episode, title) can report it in its own terms.

mod parse;
mod validate;

pub use parse::{manage_selection, RawSelection};
pub use validate::{
    validate_episode_selection, validate_selection, validate_title_selection, SelectionError,
    SelectionRange, SelectionTarget,
};
