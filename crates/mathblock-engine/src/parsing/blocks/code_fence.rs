//! Recognizer for ```` ``` ```` and `~~~` fenced code blocks.

use log::trace;

use super::{
    BlockParser, BlockState, ChildPolicy,
    kinds::{CodeFence, FenceKind},
};
use crate::parsing::{
    context::{ContextKey, ContextValue, FenceData, ParseContext},
    reader::LineReader,
    tree::{Document, NodeId, NodeKind},
};

pub const FENCE_INFO: ContextKey = ContextKey::new("fence-info");

/// Fenced code is a raw zone: every line up to the matching fence is kept
/// verbatim, including `$$` lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct FencedCodeParser;

impl BlockParser for FencedCodeParser {
    fn trigger(&self) -> &[u8] {
        CodeFence::TRIGGERS
    }

    fn open(
        &self,
        doc: &mut Document,
        reader: &mut LineReader<'_>,
        pc: &mut ParseContext,
    ) -> Option<(NodeId, ChildPolicy)> {
        let (line, _) = reader.peek_line()?;
        let pos = pc.block_offset()?;
        let kind = CodeFence::sig(line.get(pos..)?)?;

        pc.set(FENCE_INFO, ContextValue::Fence(FenceData { kind, indent: pos }));
        let node = doc.create(NodeKind::FencedCode { kind });
        trace!("{kind:?} fence opened at line {}", reader.line_number());
        Some((node, ChildPolicy::NoChildren))
    }

    fn continue_block(
        &self,
        doc: &mut Document,
        node: NodeId,
        reader: &mut LineReader<'_>,
        pc: &mut ParseContext,
    ) -> BlockState {
        let Some((line, segment)) = reader.peek_line() else {
            return BlockState::Close;
        };
        let kind: FenceKind = match pc.get(FENCE_INFO) {
            Some(ContextValue::Fence(data)) => data.kind,
            _ => return BlockState::Close,
        };

        if CodeFence::closes(kind, line) {
            reader.advance(segment.len());
            return BlockState::Close;
        }

        doc.lines_mut(node).push(segment);
        BlockState::Continue(ChildPolicy::NoChildren)
    }

    fn close(
        &self,
        _doc: &mut Document,
        _node: NodeId,
        _reader: &LineReader<'_>,
        pc: &mut ParseContext,
    ) {
        pc.clear(FENCE_INFO);
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }

    fn can_accept_indented_line(&self) -> bool {
        false
    }
}
