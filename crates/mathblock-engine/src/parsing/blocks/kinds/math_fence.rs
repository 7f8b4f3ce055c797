use crate::parsing::{
    reader::LineReader,
    rope::{Span, terminator_len},
};

/// `$$` block delimiter syntax.
///
/// All knowledge of the delimiter text lives here; the recognizer only asks
/// questions of it.
pub struct MathFence;

impl MathFence {
    pub const DELIMITER: &'static str = "$$";
    pub const TRIGGERS: &'static [u8] = b"$";

    /// True if `line` has the delimiter starting exactly at byte `offset`.
    pub fn opens_at(line: &str, offset: usize) -> bool {
        line.get(offset..)
            .is_some_and(|rest| rest.starts_with(Self::DELIMITER))
    }

    /// Text following the delimiter on a closing line, if the trimmed line
    /// starts with the delimiter at all.
    ///
    /// `Some("")` means a bare closer.
    pub fn closing_rest(line: &str) -> Option<&str> {
        line.trim().strip_prefix(Self::DELIMITER)
    }

    /// Span of the text after the closing delimiter, measured on the raw line.
    ///
    /// `line` is the untrimmed remainder the reader returned for `segment`.
    /// The line terminator is not part of the result.
    pub fn trailing_span(line: &str, segment: Span) -> Span {
        let lead = line.len() - line.trim_start().len();
        let body_end = line.len() - terminator_len(line);
        Span::new(
            segment.start + lead + Self::DELIMITER.len(),
            segment.start + body_end,
        )
    }

    /// Strips a leading delimiter from the first span and a trailing one from
    /// the last.
    ///
    /// The suffix check runs on the raw span, terminator included, so only an
    /// unterminated last line can lose a trailing delimiter. Each strip only
    /// happens if the delimiter is actually there, so calling this on
    /// already-trimmed spans changes nothing.
    pub fn trim_lines(lines: &mut [Span], reader: &LineReader<'_>) {
        if let Some(first) = lines.first_mut() {
            if reader.value(*first).starts_with(Self::DELIMITER) {
                *first = first.skip_start(Self::DELIMITER.len());
            }
        }
        if let Some(last) = lines.last_mut() {
            if reader.value(*last).ends_with(Self::DELIMITER) {
                last.end -= Self::DELIMITER.len();
            }
        }
    }
}
