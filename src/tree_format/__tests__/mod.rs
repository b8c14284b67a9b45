use super::{BlankPiece, ChildrenSlot, ConstantPiece, RulePiece, SymbolPiece};
use crate::examples::expr;
use crate::{SymbolBuilder, SymbolFormat, Tree, TreeFormat, TreeKind};
use std::rc::Rc;

#[test]
fn rule_names_resolve_and_fall_back_to_numbers() {
    let named = TreeFormat::simple(Some(expr::recognizer()));
    let tree = Tree::rule(expr::EXPR, vec![Tree::terminal(SymbolBuilder::new(expr::INT, "7").build())]);
    assert_eq!(named.format(&tree).unwrap(), "(expr (INT '7'))");

    // Without a recognizer both rules and token types render as bare numbers; such trees
    // are readable but ambiguous, so only the named notation is expected to parse back.
    let numeric = TreeFormat::simple(None);
    assert_eq!(numeric.format(&tree).unwrap(), "(2 (2 '7'))");
}

#[test]
fn a_rule_without_children_round_trips() {
    let format = TreeFormat::simple(Some(expr::recognizer()));

    let lone = Tree::rule(expr::EXPR, Vec::new());
    let rendered = format.format(&lone).unwrap();
    assert_eq!(rendered, "(expr)");
    assert_eq!(format.parse(&rendered).unwrap(), lone);
    assert_eq!(format.parse("(expr )").unwrap(), lone);
}

#[test]
fn error_nodes_wear_the_error_wrapper() {
    let format = TreeFormat::simple(Some(expr::recognizer()));

    let recovered = Tree::rule(
        expr::STAT,
        vec![Tree::Error(SymbolBuilder::new(expr::ID, "x").build())],
    );
    let rendered = format.format(&recovered).unwrap();
    assert_eq!(rendered, "(stat (<error> (ID 'x')))");
    assert_eq!(format.parse(&rendered).unwrap(), recovered);
}

#[test]
fn the_antlr_style_renders_terminals_as_bare_text() {
    let format = TreeFormat::antlr(Some(expr::recognizer()));

    let tree = Tree::rule(
        expr::STAT,
        vec![
            Tree::terminal(SymbolBuilder::new(expr::ID, "x").build()),
            Tree::terminal(SymbolBuilder::new(expr::ASSIGN, "=").build()),
            Tree::rule(
                expr::EXPR,
                vec![Tree::terminal(SymbolBuilder::new(expr::INT, "5").build())],
            ),
        ],
    );

    let rendered = format.format(&tree).unwrap();
    assert_eq!(rendered, "(stat x = (expr 5))");

    let parsed = format.parse(&rendered).unwrap();
    assert_eq!(parsed.rule_id(), Some(expr::STAT));
    assert_eq!(parsed.children().len(), 3);
    assert_eq!(parsed.children()[0].symbol().unwrap().text, "x");
    assert_eq!(parsed.children()[2].children()[0].symbol().unwrap().text, "5");
}

#[test]
fn whitespace_between_nodes_is_free_on_parse() {
    let format = TreeFormat::simple(Some(expr::recognizer()));

    let spread = format
        .parse("  (expr\n\t(INT '5')   )  ")
        .unwrap();
    let tight = format.parse("(expr (INT '5'))").unwrap();
    assert_eq!(spread, tight);
}

#[test]
fn entry_validation_rejects_malformed_sequences() {
    let symbol_format = Rc::new(SymbolFormat::simple(Some(expr::vocabulary())));

    // A rule sequence needs its children placeholder.
    let mut builder = TreeFormat::builder(symbol_format.clone());
    assert!(builder
        .entry(
            TreeKind::Rule,
            vec![
                Rc::new(ConstantPiece::new("(")),
                Rc::new(RulePiece::new(Some(expr::recognizer()))),
                Rc::new(ConstantPiece::new(")")),
            ],
        )
        .is_err());

    // A terminal sequence may not carry one.
    let mut builder = TreeFormat::builder(symbol_format.clone());
    assert!(builder
        .entry(
            TreeKind::Terminal,
            vec![Rc::new(SymbolPiece::new(symbol_format.clone())), Rc::new(ChildrenSlot)],
        )
        .is_err());

    // A terminal sequence without a symbol piece could never build its node.
    let mut builder = TreeFormat::builder(symbol_format.clone());
    assert!(builder
        .entry(TreeKind::Terminal, vec![Rc::new(BlankPiece::new(" "))])
        .is_err());

    // Registering a variant twice is an error.
    let mut builder = TreeFormat::builder(symbol_format.clone());
    builder
        .entry(
            TreeKind::Terminal,
            vec![Rc::new(SymbolPiece::new(symbol_format.clone()))],
        )
        .unwrap();
    assert!(builder
        .entry(
            TreeKind::Terminal,
            vec![Rc::new(SymbolPiece::new(symbol_format.clone()))],
        )
        .is_err());

    // An empty format is an error.
    assert!(TreeFormat::builder(symbol_format).build().is_err());
}

#[test]
fn formatting_an_unregistered_variant_fails() {
    let format = TreeFormat::antlr(Some(expr::recognizer()));

    let template = Tree::Pattern(crate::Pattern::new(Some(expr::STAT), Vec::new()));
    assert!(format.format(&template).is_err());
}

#[test]
fn nested_rules_format_with_increasing_indentation() {
    let format = TreeFormat::indented("    ", Some(expr::recognizer()));

    let tree = Tree::rule(
        expr::EXPR,
        vec![Tree::terminal(SymbolBuilder::new(expr::INT, "5").build())],
    );
    assert_eq!(format.format(&tree).unwrap(), "(expr\n    (INT '5'))");
}
