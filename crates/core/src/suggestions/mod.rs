//! Smart packing suggestions.
//!
//! The generator looks at a trip and its current items and proposes adds,
//! quantity updates and removals, each with a reason a traveler can read.
//! Applying a selection is idempotent: suggestion ids are deterministic and
//! applied ids are recorded on the trip, so a reload never inserts an item
//! twice.

mod apply;
mod engine;
mod rules;
mod types;

pub use apply::{apply_suggestions, apply_to_items, dismiss_suggestion};
pub use engine::{generate_suggestions, pending_suggestions, SuggestionEngine, CARRY_ON_REASON};
pub use types::*;
