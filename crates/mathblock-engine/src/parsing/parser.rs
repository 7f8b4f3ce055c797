//! Host pipeline that drives registered block recognizers over a document.

use std::collections::HashMap;

use log::{debug, trace};
use xi_rope::Rope;

use super::{
    ParsedDoc,
    blocks::{BlockParser, BlockState, FencedCodeParser, MathBlockParser},
    context::{ParseContext, block_offset_of},
    reader::LineReader,
    tree::{Document, NodeId, NodeKind},
};

/// Block offset at which a line counts as indented.
const INDENTED_LINE: usize = 4;

/// Which recognizers a [`Parser`] registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    pub math_blocks: bool,
    pub fenced_code: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            math_blocks: true,
            fenced_code: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenBlock {
    parser: usize,
    node: NodeId,
}

/// Line-oriented block parser.
///
/// Lines that no recognizer claims become paragraphs; blank lines end them.
/// The parser itself is immutable during a parse, so one value can be shared
/// between threads.
pub struct Parser {
    parsers: Vec<Box<dyn BlockParser + Send + Sync>>,
    triggers: HashMap<u8, Vec<usize>>,
}

impl Parser {
    pub fn new(options: ParserOptions) -> Self {
        let mut parser = Self {
            parsers: vec![],
            triggers: HashMap::new(),
        };
        if options.math_blocks {
            parser.register(Box::new(MathBlockParser::new()));
        }
        if options.fenced_code {
            parser.register(Box::new(FencedCodeParser));
        }
        parser
    }

    /// Adds a recognizer. Earlier registrations win when triggers overlap.
    pub fn register(&mut self, block_parser: Box<dyn BlockParser + Send + Sync>) {
        let idx = self.parsers.len();
        for &b in block_parser.trigger() {
            self.triggers.entry(b).or_default().push(idx);
        }
        self.parsers.push(block_parser);
    }

    pub fn parse(&self, rope: &Rope) -> ParsedDoc {
        self.parse_with_context(rope, &mut ParseContext::new())
    }

    /// Parses with a caller-supplied session context.
    ///
    /// The context must not be shared with a parse that is still running.
    pub fn parse_with_context(&self, rope: &Rope, pc: &mut ParseContext) -> ParsedDoc {
        let mut doc = Document::new();
        let mut reader = LineReader::new(rope);
        let root = doc.root();
        let mut active: Option<OpenBlock> = None;
        let mut paragraph: Option<NodeId> = None;

        while let Some((line, _)) = reader.peek_line() {
            pc.set_block_offset(block_offset_of(line));

            if let Some(open) = active {
                let before = reader.position();
                let p = &self.parsers[open.parser];
                match p.continue_block(&mut doc, open.node, &mut reader, pc) {
                    BlockState::Continue(_) => {
                        reader.advance_line();
                        continue;
                    }
                    BlockState::Close => {
                        p.close(&mut doc, open.node, &reader, pc);
                        active = None;
                        if reader.position() != before {
                            continue;
                        }
                        trace!("line {} handed back after close", reader.line_number());
                    }
                }
            }

            let Some(offset) = pc.block_offset() else {
                paragraph = None;
                reader.advance_line();
                continue;
            };

            if let Some((idx, node)) =
                self.try_open(&mut doc, &mut reader, pc, offset, paragraph.is_some())
            {
                doc.append_child(root, node);
                paragraph = None;
                active = Some(OpenBlock { parser: idx, node });
                reader.advance_line();
                continue;
            }

            let Some((_, segment)) = reader.peek_line() else {
                break;
            };
            let para = match paragraph {
                Some(para) => para,
                None => {
                    let para = doc.create(NodeKind::Paragraph);
                    doc.append_child(root, para);
                    para
                }
            };
            doc.lines_mut(para).push(segment);
            paragraph = Some(para);
            reader.advance_line();
        }

        if let Some(open) = active {
            debug!("closing {} left open at end of input", doc.kind(open.node).name());
            self.parsers[open.parser].close(&mut doc, open.node, &reader, pc);
        }

        ParsedDoc { tree: doc }
    }

    fn try_open(
        &self,
        doc: &mut Document,
        reader: &mut LineReader<'_>,
        pc: &mut ParseContext,
        offset: usize,
        in_paragraph: bool,
    ) -> Option<(usize, NodeId)> {
        let (line, _) = reader.peek_line()?;
        let trigger = *line.as_bytes().get(offset)?;
        let candidates = self.triggers.get(&trigger)?;

        for &idx in candidates {
            let p = &self.parsers[idx];
            if in_paragraph && !p.can_interrupt_paragraph() {
                continue;
            }
            if offset >= INDENTED_LINE && !p.can_accept_indented_line() {
                continue;
            }
            if let Some((node, _)) = p.open(doc, reader, pc) {
                return Some((idx, node));
            }
        }
        None
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}
