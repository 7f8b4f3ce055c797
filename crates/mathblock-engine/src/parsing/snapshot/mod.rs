//! # Snapshot Testing Support
//!
//! - **`normalize`**: flattens a parsed tree into a comparable `Snap`
//! - **`invariants`**: runtime checks for parser correctness (spans in bounds,
//!   non-inverted spans, siblings in source order)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{BlockSnap, Snap, normalize};
