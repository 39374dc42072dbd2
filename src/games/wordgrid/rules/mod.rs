//! Move legality rules applied by the authoritative side.

mod placement;
mod words;

pub use placement::{PlacementError, validate_placement};
pub use words::{FormedWord, formed_words};
