use crate::examples::expr;
use crate::{PatternFormat, SymbolFormat, Tree, TreeFormat, TreeMatcher};
use std::rc::Rc;

const STAT_LIST_TREE: &str =
    "(prog (stat (ID 'a') '=' (expr (INT '5')) (NEWLINE '\\n')) (stat (ID 'b') '=' (expr (INT '10')) (NEWLINE '\\n')) EOF)";

#[test]
fn symbol_list_for_an_assignment() {
    let format = SymbolFormat::simple(Some(expr::vocabulary()));

    let symbols = format.parse_list("(ID 'x') '=' (INT '5') EOF").unwrap();

    assert_eq!(
        symbols.iter().map(|s| s.token_type).collect::<Vec<_>>(),
        vec![expr::ID, expr::ASSIGN, expr::INT, -1]
    );
    assert_eq!(
        symbols.iter().map(|s| s.text.as_str()).collect::<Vec<_>>(),
        vec!["x", "=", "5", "<EOF>"]
    );
    assert_eq!(
        symbols.iter().map(|s| s.index).collect::<Vec<_>>(),
        vec![0, 1, 2, 3]
    );
}

#[test]
fn antlr_symbol_notation_round_trip() {
    let format = SymbolFormat::antlr(Some(expr::vocabulary()));

    let symbol = format.parse("[@0,0:5='testId',<ID>,1:0]").unwrap();
    assert_eq!(symbol.token_type, expr::ID);
    assert_eq!(symbol.text, "testId");
    assert_eq!((symbol.index, symbol.start, symbol.stop), (0, 0, 5));
    assert_eq!((symbol.line, symbol.position, symbol.channel), (1, 0, 0));

    let hidden = format.parse("[@0,0:5='testId',<ID>,channel=1,1:0]").unwrap();
    assert_eq!(hidden.channel, 1);

    assert_eq!(
        format.format(&symbol).unwrap(),
        "[@0,0:5='testId',<ID>,1:0]"
    );
}

#[test]
fn simple_tree_round_trip() {
    let format = TreeFormat::simple(Some(expr::recognizer()));
    let rendered = "(prog (stat (ID 'x') '=' (expr (INT '5')) (NEWLINE '\\n')) EOF)";

    let tree = format.parse(rendered).unwrap();

    assert_eq!(tree.rule_id(), Some(expr::PROG));
    assert_eq!(tree.children().len(), 2);
    let stat = &tree.children()[0];
    assert_eq!(stat.rule_id(), Some(expr::STAT));
    assert_eq!(stat.children().len(), 4);
    assert_eq!(stat.children()[0].symbol().unwrap().text, "x");
    assert_eq!(stat.children()[3].symbol().unwrap().text, "\n");

    assert_eq!(format.format(&tree).unwrap(), rendered);
    assert_eq!(format.parse(rendered).unwrap(), tree);
}

#[test]
fn indented_tree_format_places_children_one_per_line() {
    let simple = TreeFormat::simple(Some(expr::recognizer()));
    let indented = TreeFormat::indented("  ", Some(expr::recognizer()));

    let tree = simple
        .parse("(prog (stat (ID 'x') '=' (expr (INT '5')) (NEWLINE '\\n')) EOF)")
        .unwrap();

    let rendered = indented.format(&tree).unwrap();
    assert_eq!(
        rendered,
        "(prog\n  (stat\n    (ID 'x')\n    '='\n    (expr\n      (INT '5'))\n    (NEWLINE '\\n'))\n  EOF)"
    );

    assert_eq!(indented.parse(&rendered).unwrap(), tree);
}

#[test]
fn pattern_match_binds_the_labeled_holes() {
    let tree_format = TreeFormat::simple(Some(expr::recognizer()));
    let symbol_format = tree_format.symbol_format().clone();
    let pattern_format = PatternFormat::new(symbol_format.clone(), Some(expr::recognizer()));

    let tree = tree_format
        .parse("(prog (stat (ID 'a') '=' (expr (INT '5')) (NEWLINE '\\n')) EOF)")
        .unwrap();
    let stat = &tree.children()[0];

    let pattern = pattern_format
        .parse("<lhs:ID> '=' <rhs:INT> (NEWLINE '\\n')")
        .unwrap();
    let matcher = TreeMatcher::new(pattern, &symbol_format);

    let found = matcher.match_tree(stat);
    assert!(found.succeeded);
    assert_eq!(found.matched, Some(stat));

    match found.get("lhs").unwrap() {
        Tree::Terminal(symbol) => {
            assert_eq!(symbol.token_type, expr::ID);
            assert_eq!(symbol.text, "a");
        }
        other => panic!("lhs should be the ID terminal, got {}", other),
    }

    let rhs = found.get("rhs").unwrap();
    assert_eq!(rhs.rule_id(), Some(expr::EXPR));
    assert_eq!(rhs.children()[0].symbol().unwrap().text, "5");
}

#[test]
fn find_all_reports_every_statement() {
    let tree_format = TreeFormat::simple(Some(expr::recognizer()));
    let symbol_format = tree_format.symbol_format().clone();
    let pattern_format = PatternFormat::new(symbol_format.clone(), Some(expr::recognizer()));

    let tree = tree_format.parse(STAT_LIST_TREE).unwrap();
    let pattern = pattern_format
        .parse("<ID> '=' <INT> (NEWLINE '\\n')")
        .unwrap();
    let matcher = TreeMatcher::new(pattern, &symbol_format);

    let found = matcher.find_all(&tree);
    assert_eq!(found.len(), 2);
    assert!(found
        .iter()
        .all(|node| node.rule_id() == Some(expr::STAT)));
}

#[test]
fn pattern_node_template_matches_through_the_tree_format() {
    let tree_format = TreeFormat::simple(Some(expr::recognizer()));
    let symbol_format = tree_format.symbol_format().clone();

    let template = tree_format
        .parse("(<stat> (<lhs:ID> '=' <rhs:INT> (NEWLINE '\\n')))")
        .unwrap();
    assert!(matches!(template, Tree::Pattern(_)));

    let tree = tree_format.parse(STAT_LIST_TREE).unwrap();
    let matcher = TreeMatcher::template(template, &symbol_format);

    let found = matcher.find_all(&tree);
    assert_eq!(found.len(), 2);
}

#[test]
fn unclosed_tree_reports_the_failure_point() {
    let format = TreeFormat::simple(Some(expr::recognizer()));

    let err = format
        .parse("(prog (stat (ID 'x')")
        .expect_err("the statement is never closed");
    assert_eq!(err.pointer, 20);
    assert!(err.message.contains("(prog (stat (ID 'x')>>"), "{}", err.message);
}
