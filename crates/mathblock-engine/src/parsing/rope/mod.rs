pub mod lines;
pub mod slice;
pub mod span;

pub use lines::{LineRef, lines_with_spans, terminator_len};
pub use slice::{slice_to_string, truncate_text};
pub use span::Span;
