//! Per-session scratch state shared between the host and block parsers.

use std::collections::HashMap;

use super::blocks::kinds::FenceKind;

/// Key identifying one recognizer's private slot in a [`ParseContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextKey(&'static str);

impl ContextKey {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(self) -> &'static str {
        self.0
    }
}

/// Marker left by the math block recognizer while a block is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathBlockData {
    /// Column the opening `$$` was found at.
    pub indent: usize,
    pub is_inline: bool,
}

/// Marker left by the fenced code recognizer while a fence is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceData {
    pub kind: FenceKind,
    pub indent: usize,
}

/// Values a recognizer may park in its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextValue {
    MathBlock(MathBlockData),
    Fence(FenceData),
}

/// State scoped to a single parse.
///
/// A fresh context is created for every parse, so independent parses never
/// share slots.
#[derive(Debug, Default)]
pub struct ParseContext {
    slots: HashMap<ContextKey, ContextValue>,
    block_offset: Option<usize>,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: ContextKey) -> Option<&ContextValue> {
        self.slots.get(&key)
    }

    /// Stores `value` under `key`, replacing any previous marker.
    pub fn set(&mut self, key: ContextKey, value: ContextValue) {
        self.slots.insert(key, value);
    }

    pub fn clear(&mut self, key: ContextKey) {
        self.slots.remove(&key);
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Column at which block content starts on the current line, `None` when
    /// the line has no content to anchor on.
    pub fn block_offset(&self) -> Option<usize> {
        self.block_offset
    }

    pub fn set_block_offset(&mut self, offset: Option<usize>) {
        self.block_offset = offset;
    }
}

/// Byte offset of the first non-whitespace character, `None` for blank lines.
pub fn block_offset_of(line: &str) -> Option<usize> {
    line.find(|c: char| !c.is_whitespace())
}
