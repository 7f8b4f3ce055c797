//! End-to-end tests for block parsing: whole documents through [`Parser`],
//! checked against the invariants and the flattened [`Snap`] view.

use pretty_assertions::assert_eq;
use rstest::rstest;
use xi_rope::Rope;

use crate::parsing::{
    ParsedDoc, Parser, ParserOptions, parse_document,
    blocks::{
        BlockParser, BlockState, ChildPolicy, MathBlockParser, kinds::FenceKind,
        math_block::MATH_BLOCK_INFO,
    },
    context::{ContextValue, FenceData, ParseContext, block_offset_of},
    reader::LineReader,
    snapshot::{self, BlockSnap, Snap},
    tree::{Document, NodeId, NodeKind},
};

fn parse_checked(md: &str) -> (Rope, ParsedDoc) {
    let rope = Rope::from(md);
    let doc = parse_document(&rope);
    snapshot::invariants(&rope, &doc.tree);
    (rope, doc)
}

fn kinds_and_texts(rope: &Rope, doc: &ParsedDoc) -> Vec<(String, String)> {
    snapshot::normalize(rope, &doc.tree)
        .blocks
        .into_iter()
        .map(|b| (b.kind, b.text))
        .collect()
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(k, t)| (k.to_string(), t.to_string()))
        .collect()
}

#[test]
fn well_formed_block_excludes_delimiter_lines() {
    let (rope, doc) = parse_checked("$$\nA\nB\n$$");
    assert_eq!(
        snapshot::normalize(&rope, &doc.tree),
        Snap {
            blocks: vec![BlockSnap::new("MathBlock", &[(3, 5), (5, 7)], "A\nB")],
        }
    );
}

#[test]
fn trailing_text_on_closer_becomes_next_sibling_paragraph() {
    let (rope, doc) = parse_checked("$$\nA\n$$trailing text");
    assert_eq!(
        snapshot::normalize(&rope, &doc.tree),
        Snap {
            blocks: vec![
                BlockSnap::new("MathBlock", &[(3, 5)], "A"),
                BlockSnap::new("Paragraph", &[(7, 20)], "trailing text"),
            ],
        }
    );

    let (math, _) = doc.math_blocks(&rope)[0].clone();
    let next = doc.tree.next_sibling(math).unwrap();
    assert_eq!(doc.tree.kind(next), &NodeKind::Paragraph);
}

#[test]
fn trailing_text_keeps_original_spacing() {
    let (rope, doc) = parse_checked("$$\nA\n$$   spaced out  \nnext\n");
    assert_eq!(
        kinds_and_texts(&rope, &doc),
        pairs(&[
            ("MathBlock", "A"),
            ("Paragraph", "   spaced out  "),
            ("Paragraph", "next"),
        ])
    );
}

#[test]
fn unterminated_block_closes_at_end_of_document() {
    let rope = Rope::from("$$\nA");
    let mut pc = ParseContext::new();
    let doc = Parser::default().parse_with_context(&rope, &mut pc);

    let blocks = doc.math_blocks(&rope);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].1, "A");
    assert!(pc.is_empty());
}

#[test]
fn lone_opener_yields_empty_block() {
    let (rope, doc) = parse_checked("$$");
    assert_eq!(kinds_and_texts(&rope, &doc), pairs(&[("MathBlock", "")]));
}

#[test]
fn padded_closer_produces_no_sibling() {
    let (rope, doc) = parse_checked("$$\nA\n  $$  \n");
    assert_eq!(kinds_and_texts(&rope, &doc), pairs(&[("MathBlock", "A")]));
}

#[test]
fn block_interrupts_paragraph() {
    let (rope, doc) = parse_checked("intro\n$$\nx\n$$\noutro\n");
    assert_eq!(
        kinds_and_texts(&rope, &doc),
        pairs(&[
            ("Paragraph", "intro"),
            ("MathBlock", "x"),
            ("Paragraph", "outro"),
        ])
    );
}

#[test]
fn text_after_opening_delimiter_is_not_content() {
    let (rope, doc) = parse_checked("$$ x^2\ny\n$$\n");
    assert_eq!(kinds_and_texts(&rope, &doc), pairs(&[("MathBlock", "y")]));
}

#[test]
fn delimiter_ending_a_terminated_content_line_is_kept() {
    let (rope, doc) = parse_checked("$$\na\nb$$\n$$\n");
    assert_eq!(kinds_and_texts(&rope, &doc), pairs(&[("MathBlock", "a\nb$$")]));
}

#[test]
fn crlf_terminators_are_stripped() {
    let (rope, doc) = parse_checked("$$\r\nA\r\n$$\r\n");
    assert_eq!(
        snapshot::normalize(&rope, &doc.tree),
        Snap {
            blocks: vec![BlockSnap::new("MathBlock", &[(4, 7)], "A")],
        }
    );
}

#[test]
fn blank_lines_inside_block_are_kept() {
    let (rope, doc) = parse_checked("$$\na\n\nb\n$$\n");
    assert_eq!(kinds_and_texts(&rope, &doc), pairs(&[("MathBlock", "a\n\nb")]));
}

#[test]
fn dollar_lines_inside_code_fence_stay_raw() {
    let (rope, doc) = parse_checked("```\n$$\nx\n$$\n```\n");
    assert_eq!(
        kinds_and_texts(&rope, &doc),
        pairs(&[("FencedCode(Backticks)", "$$\nx\n$$")])
    );
    assert!(doc.math_blocks(&rope).is_empty());
}

#[test]
fn fence_markers_inside_math_block_stay_raw() {
    let (rope, doc) = parse_checked("$$\n~~~\n$$\n");
    assert_eq!(kinds_and_texts(&rope, &doc), pairs(&[("MathBlock", "~~~")]));
}

#[rstest]
#[case("$x$\n")]
#[case("a $$ b\n")]
#[case("\\$$\n")]
#[case("$ $\n")]
fn lines_without_leading_delimiter_open_nothing(#[case] md: &str) {
    let rope = Rope::from(md);
    let mut reader = LineReader::new(&rope);
    let mut doc = Document::new();
    let mut pc = ParseContext::new();
    let foreign = ContextValue::Fence(FenceData {
        kind: FenceKind::Backticks,
        indent: 1,
    });
    pc.set(MATH_BLOCK_INFO, foreign);
    pc.set_block_offset(reader.peek_line().and_then(|(l, _)| block_offset_of(l)));

    assert!(MathBlockParser.open(&mut doc, &mut reader, &mut pc).is_none());
    assert_eq!(pc.get(MATH_BLOCK_INFO), Some(&foreign));
    assert_eq!(reader.position(), 0);
}

/// Delegates to [`MathBlockParser`] but checks the slot is free on every open.
struct SlotAuditor;

impl BlockParser for SlotAuditor {
    fn trigger(&self) -> &[u8] {
        MathBlockParser.trigger()
    }

    fn open(
        &self,
        doc: &mut Document,
        reader: &mut LineReader<'_>,
        pc: &mut ParseContext,
    ) -> Option<(NodeId, ChildPolicy)> {
        assert!(
            pc.get(MATH_BLOCK_INFO).is_none(),
            "stale math block marker at line {}",
            reader.line_number()
        );
        MathBlockParser.open(doc, reader, pc)
    }

    fn continue_block(
        &self,
        doc: &mut Document,
        node: NodeId,
        reader: &mut LineReader<'_>,
        pc: &mut ParseContext,
    ) -> BlockState {
        MathBlockParser.continue_block(doc, node, reader, pc)
    }

    fn close(
        &self,
        doc: &mut Document,
        node: NodeId,
        reader: &LineReader<'_>,
        pc: &mut ParseContext,
    ) {
        MathBlockParser.close(doc, node, reader, pc);
    }

    fn can_interrupt_paragraph(&self) -> bool {
        MathBlockParser.can_interrupt_paragraph()
    }

    fn can_accept_indented_line(&self) -> bool {
        MathBlockParser.can_accept_indented_line()
    }
}

#[test]
fn sequential_blocks_do_not_share_state() {
    let mut parser = Parser::new(ParserOptions {
        math_blocks: false,
        fenced_code: true,
    });
    parser.register(Box::new(SlotAuditor));

    let rope = Rope::from("$$\na\n$$ then\n$$\nb\n$$\n$$\nc");
    let mut pc = ParseContext::new();
    let doc = parser.parse_with_context(&rope, &mut pc);
    snapshot::invariants(&rope, &doc.tree);

    let texts: Vec<String> = doc.math_blocks(&rope).into_iter().map(|(_, t)| t).collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
    assert!(pc.is_empty());
}

#[test]
fn independent_parses_run_concurrently() {
    let parser = Parser::default();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let parser = &parser;
                s.spawn(move || {
                    let rope = Rope::from(format!("$$\n{i}\n$$\n").as_str());
                    parser.parse(&rope).math_blocks(&rope)[0].1.clone()
                })
            })
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            assert_eq!(h.join().unwrap(), i.to_string());
        }
    });
}

#[test]
fn outline_of_mixed_document() {
    let (rope, doc) = parse_checked(
        "Intro line\n$$\n\\int_0^1 x\\,dx\n$$ = 1/2\n```\n$$ not math\n```\n",
    );
    insta::assert_snapshot!(doc.tree.outline(&rope).trim_end(), @r#"
    Document
      Paragraph "Intro line"
      MathBlock "\\int_0^1 x\\,dx"
      Paragraph " = 1/2"
      FencedCode(Backticks) "$$ not math"
    "#);
}

#[test]
fn empty_document() {
    let (_, doc) = parse_checked("");
    assert!(doc.tree.children(doc.tree.root()).is_empty());
}

#[test]
fn blank_lines_only() {
    let (_, doc) = parse_checked("\n\n\n");
    assert!(doc.tree.children(doc.tree.root()).is_empty());
}
