/// Which character a code fence is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

/// Fenced code block syntax.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";
    pub const TRIGGERS: &'static [u8] = b"`~";

    /// Returns the fence kind if `remainder` opens or closes a fence.
    pub fn sig(remainder: &str) -> Option<FenceKind> {
        let t = remainder.trim_end_matches(['\r', '\n']);
        if t.starts_with(Self::BACKTICKS) {
            Some(FenceKind::Backticks)
        } else if t.starts_with(Self::TILDES) {
            Some(FenceKind::Tildes)
        } else {
            None
        }
    }

    /// A fence only closes on a line of the same kind.
    pub fn closes(kind: FenceKind, line: &str) -> bool {
        Self::sig(line.trim_start()) == Some(kind)
    }
}
