use crate::examples::expr;
use crate::{
    Pattern, PatternElement, PatternFormat, SymbolBuilder, SymbolFormat, Tree, TreeMatcher,
};
use std::rc::Rc;

fn simple_format() -> Rc<SymbolFormat> {
    Rc::new(SymbolFormat::simple(Some(expr::vocabulary())))
}

fn pattern_format() -> PatternFormat {
    PatternFormat::new(simple_format(), Some(expr::recognizer()))
}

fn statement(name: &str, value: &str) -> Tree {
    Tree::rule(
        expr::STAT,
        vec![
            Tree::terminal(SymbolBuilder::new(expr::ID, name).build()),
            Tree::terminal(SymbolBuilder::new(expr::ASSIGN, "=").build()),
            Tree::rule(
                expr::EXPR,
                vec![Tree::terminal(SymbolBuilder::new(expr::INT, value).build())],
            ),
            Tree::terminal(SymbolBuilder::new(expr::NEWLINE, "\n").build()),
        ],
    )
}

#[test]
fn holes_resolve_rule_and_token_names() {
    let pattern = pattern_format().parse("<expr> <label:ID> <8/> <5>").unwrap();

    assert_eq!(
        pattern.elements,
        vec![
            PatternElement::RuleHole {
                rule: expr::EXPR,
                label: None
            },
            PatternElement::TokenHole {
                token_type: expr::ID,
                label: Some("label".to_string())
            },
            PatternElement::RuleHole {
                rule: 8,
                label: None
            },
            PatternElement::TokenHole {
                token_type: 5,
                label: None
            },
        ]
    );
}

#[test]
fn patterns_format_back_to_their_notation() {
    let format = pattern_format();

    let notation = "<lhs:ID> '=' <rhs:INT> (NEWLINE '\\n')";
    let pattern = format.parse(notation).unwrap();
    assert_eq!(format.format(&pattern).unwrap(), notation);
}

#[test]
fn numeric_holes_format_without_a_recognizer() {
    let format = PatternFormat::new(simple_format(), None);

    let pattern = Pattern::new(
        None,
        vec![
            PatternElement::RuleHole {
                rule: 8,
                label: None,
            },
            PatternElement::TokenHole {
                token_type: expr::ID,
                label: Some("name".to_string()),
            },
        ],
    );
    // The symbol format still carries the vocabulary, so the token hole keeps its name while
    // the rule hole degrades to the slashed number.
    assert_eq!(format.format(&pattern).unwrap(), "<8/> <name:ID>");
    assert_eq!(format.parse("<8/> <name:ID>").unwrap(), pattern);
}

#[test]
fn an_unknown_hole_name_is_a_parse_error() {
    let err = pattern_format()
        .parse("<nonsense>")
        .expect_err("nonsense names nothing");
    assert!(err.message.contains("nonsense"), "{}", err.message);
}

#[test]
fn a_matched_statement_reports_its_bindings() {
    let format = pattern_format();
    let pattern = format.parse("<lhs:ID> '=' <rhs:INT> (NEWLINE '\\n')").unwrap();
    let matcher = TreeMatcher::new(pattern, &simple_format());

    let tree = statement("a", "5");
    let found = matcher.match_tree(&tree);

    assert!(found.succeeded);
    assert_eq!(found.matched, Some(&tree));
    assert_eq!(found.get("lhs").unwrap().symbol().unwrap().text, "a");
    assert_eq!(found.get("rhs").unwrap().rule_id(), Some(expr::EXPR));
}

#[test]
fn arity_rule_and_element_mismatches_fail_structurally() {
    let format = pattern_format();
    let matcher = TreeMatcher::new(
        format.parse("<ID> '=' <INT> (NEWLINE '\\n')").unwrap(),
        &simple_format(),
    );

    // Wrong arity.
    let short = Tree::rule(
        expr::STAT,
        vec![Tree::terminal(SymbolBuilder::new(expr::ID, "a").build())],
    );
    assert!(!matcher.match_tree(&short).succeeded);

    // A terminal is no statement.
    let leaf = Tree::terminal(SymbolBuilder::new(expr::ID, "a").build());
    assert!(!matcher.match_tree(&leaf).succeeded);

    // The concrete '=' element rejects a different text.
    let mut skewed = statement("a", "5");
    if let Tree::Rule { children, .. } = &mut skewed {
        children[1] = Tree::terminal(SymbolBuilder::new(expr::ASSIGN, "!=").build());
    }
    assert!(!matcher.match_tree(&skewed).succeeded);
}

#[test]
fn a_pinned_rule_restricts_the_match() {
    let format = pattern_format();
    let mut pattern = format.parse("<ID> '=' <INT> (NEWLINE '\\n')").unwrap();
    pattern.rule = Some(expr::EXPR);
    let matcher = TreeMatcher::new(pattern, &simple_format());

    assert!(!matcher.match_tree(&statement("a", "5")).succeeded);
}

#[test]
fn repeated_labels_collect_every_binding() {
    let format = pattern_format();
    let pattern = format.parse("<x:ID> '=' <x:INT> (NEWLINE '\\n')").unwrap();
    let matcher = TreeMatcher::new(pattern, &simple_format());

    let tree = statement("a", "5");
    let found = matcher.match_tree(&tree);

    assert!(found.succeeded);
    assert_eq!(found.all("x").len(), 2);
}

#[test]
fn error_nodes_match_like_terminals() {
    let format = pattern_format();
    let pattern = format.parse("<lhs:ID> '=' <rhs:INT> (NEWLINE '\\n')").unwrap();
    let matcher = TreeMatcher::new(pattern, &simple_format());

    let mut tree = statement("a", "5");
    if let Tree::Rule { children, .. } = &mut tree {
        children[0] = Tree::Error(SymbolBuilder::new(expr::ID, "a").build());
    }
    assert!(matcher.match_tree(&tree).succeeded);
}

#[test]
fn matching_ignores_position_noise() {
    let format = pattern_format();
    let pattern = format.parse("<ID> '=' <INT> (NEWLINE '\\n')").unwrap();
    let matcher = TreeMatcher::new(pattern, &simple_format());

    let mut tree = statement("a", "5");
    if let Tree::Rule { children, .. } = &mut tree {
        children[1] = Tree::terminal(
            SymbolBuilder::new(expr::ASSIGN, "=")
                .index(42)
                .range(17, 17)
                .at(9, 3)
                .build(),
        );
    }
    assert!(matcher.match_tree(&tree).succeeded);
}

#[test]
fn find_all_descends_into_matched_subtrees() {
    let format = pattern_format();
    // Any expr node with a single INT child, nested or not.
    let pattern = format.parse("<INT>").unwrap();
    let matcher = TreeMatcher::new(pattern, &simple_format());

    let nested = Tree::rule(
        expr::EXPR,
        vec![Tree::rule(
            expr::EXPR,
            vec![Tree::terminal(SymbolBuilder::new(expr::INT, "5").build())],
        )],
    );

    // The outer expr matches through the single-child chain and so does the inner one.
    let found = matcher.find_all(&nested);
    assert_eq!(found.len(), 2);
}
