//! Recognizer for `$$`-delimited display math blocks.

use log::{debug, trace, warn};

use super::{BlockParser, BlockState, ChildPolicy, kinds::MathFence};
use crate::parsing::{
    context::{ContextKey, ContextValue, MathBlockData, ParseContext},
    reader::LineReader,
    tree::{Document, MathBlock, NodeId, NodeKind},
};

/// Slot the recognizer uses to mark a block as open.
pub const MATH_BLOCK_INFO: ContextKey = ContextKey::new("math-block-info");

/// Recognizes blocks opened and closed by a `$$` line.
///
/// Lines between the delimiters are captured verbatim as spans. Text that
/// follows the closing `$$` on the same line becomes a paragraph placed right
/// after the block.
#[derive(Debug, Default, Clone, Copy)]
pub struct MathBlockParser;

impl MathBlockParser {
    pub fn new() -> Self {
        Self
    }
}

impl BlockParser for MathBlockParser {
    fn trigger(&self) -> &[u8] {
        MathFence::TRIGGERS
    }

    fn open(
        &self,
        doc: &mut Document,
        reader: &mut LineReader<'_>,
        pc: &mut ParseContext,
    ) -> Option<(NodeId, ChildPolicy)> {
        let (line, _) = reader.peek_line()?;
        let pos = pc.block_offset()?;
        if !MathFence::opens_at(line, pos) {
            return None;
        }

        pc.set(
            MATH_BLOCK_INFO,
            ContextValue::MathBlock(MathBlockData {
                indent: pos,
                is_inline: false,
            }),
        );
        let node = doc.create(NodeKind::MathBlock(MathBlock { is_inline: false }));
        trace!("math block opened at line {} col {pos}", reader.line_number());
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
        match pc.get(MATH_BLOCK_INFO) {
            Some(ContextValue::MathBlock(_)) => {}
            other => {
                debug!("{} slot holds {other:?}, closing block", MATH_BLOCK_INFO.name());
                return BlockState::Close;
            }
        }

        if let Some(rest) = MathFence::closing_rest(line) {
            if !rest.is_empty() {
                let para = doc.create(NodeKind::Paragraph);
                doc.lines_mut(para)
                    .push(MathFence::trailing_span(line, segment));
                if !doc.insert_after(node, para) {
                    warn!("math block is detached, appending trailing text to the document");
                    let root = doc.root();
                    doc.append_child(root, para);
                }
            }
            reader.advance(segment.len());
            return BlockState::Close;
        }

        doc.lines_mut(node).push(segment);
        BlockState::Continue(ChildPolicy::NoChildren)
    }

    fn close(
        &self,
        doc: &mut Document,
        node: NodeId,
        reader: &LineReader<'_>,
        pc: &mut ParseContext,
    ) {
        if matches!(doc.kind(node), NodeKind::MathBlock(_)) {
            MathFence::trim_lines(doc.lines_mut(node), reader);
            trace!("math block closed with {} line(s)", doc.lines(node).len());
        }
        pc.clear(MATH_BLOCK_INFO);
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }

    fn can_accept_indented_line(&self) -> bool {
        true
    }
}
