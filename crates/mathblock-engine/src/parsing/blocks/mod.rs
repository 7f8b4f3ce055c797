//! # Block Parsing
//!
//! Line-at-a-time block recognition driven by [`crate::parsing::Parser`].
//!
//! ## Protocol
//!
//! Every recognizer implements [`BlockParser`]:
//!
//! 1. **Open**: offered a line whose byte at the block offset matches one of
//!    the recognizer's trigger bytes. Returns a new node or declines.
//! 2. **Continue**: offered every following line while its node is open.
//!    Either absorbs the line or reports [`BlockState::Close`].
//! 3. **Close**: runs once per node, after an explicit close or when the
//!    document ends with the node still open.
//!
//! Recognizers keep in-progress state in their own [`ParseContext`] slot, not
//! in `self`, so one recognizer value serves any number of parses.
//!
//! ## Modules
//!
//! - **`kinds`**: delimiter syntax (`MathFence`, `CodeFence`)
//! - **`math_block`**: `MathBlockParser` for `$$` blocks
//! - **`code_fence`**: `FencedCodeParser` for ```` ``` ```` / `~~~` blocks

pub mod code_fence;
pub mod kinds;
pub mod math_block;

use super::{context::ParseContext, reader::LineReader, tree::Document, tree::NodeId};

pub use code_fence::FencedCodeParser;
pub use math_block::MathBlockParser;

/// Whether an open node lets the host parse nested block structure inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildPolicy {
    HasChildren,
    NoChildren,
}

/// Answer of [`BlockParser::continue_block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    Continue(ChildPolicy),
    Close,
}

/// A block recognizer the host can register and drive.
pub trait BlockParser {
    /// Bytes that may start this block; lines starting with anything else are
    /// never offered to [`BlockParser::open`].
    fn trigger(&self) -> &[u8];

    /// Tries to start a block on the current line.
    fn open(
        &self,
        doc: &mut Document,
        reader: &mut LineReader<'_>,
        pc: &mut ParseContext,
    ) -> Option<(NodeId, ChildPolicy)>;

    /// Offers the current line to the open `node`.
    ///
    /// Returning `Close` without advancing the reader hands the line back to
    /// the host for reinterpretation.
    fn continue_block(
        &self,
        doc: &mut Document,
        node: NodeId,
        reader: &mut LineReader<'_>,
        pc: &mut ParseContext,
    ) -> BlockState;

    /// Finalizes `node`.
    fn close(
        &self,
        doc: &mut Document,
        node: NodeId,
        reader: &LineReader<'_>,
        pc: &mut ParseContext,
    );

    fn can_interrupt_paragraph(&self) -> bool;

    fn can_accept_indented_line(&self) -> bool;
}
