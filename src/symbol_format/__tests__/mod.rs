use crate::{SymbolBuilder, SymbolField, SymbolFormat, TextOption, Vocabulary};
use std::rc::Rc;

fn expr_vocabulary() -> Rc<Vocabulary> {
    Rc::new(Vocabulary::new(
        vec![None, None, None, None, Some("'='".to_string())],
        vec![
            None,
            Some("ID".to_string()),
            Some("INT".to_string()),
            Some("NEWLINE".to_string()),
            None,
        ],
    ))
}

#[test]
fn antlr_format_and_parse_round_trip() {
    let format = SymbolFormat::antlr(Some(expr_vocabulary()));

    let symbol = SymbolBuilder::new(1, "testId")
        .index(0)
        .range(0, 5)
        .at(1, 0)
        .build();

    let rendered = format.format(&symbol).unwrap();
    assert_eq!(rendered, "[@0,0:5='testId',<ID>,1:0]");

    let parsed = format.parse(&rendered).unwrap();
    assert_eq!(parsed, symbol);
}

#[test]
fn antlr_channel_clause_is_omitted_for_the_default_channel() {
    let format = SymbolFormat::antlr(Some(expr_vocabulary()));

    let hidden = SymbolBuilder::new(1, "a")
        .index(4)
        .range(9, 9)
        .channel(1)
        .at(2, 0)
        .build();

    let rendered = format.format(&hidden).unwrap();
    assert_eq!(rendered, "[@4,9:9='a',<ID>,channel=1,2:0]");
    assert_eq!(format.parse(&rendered).unwrap().channel, 1);

    let parsed = format.parse("[@0,0:5='testId',<ID>,1:0]").unwrap();
    assert_eq!(parsed.channel, 0);
}

#[test]
fn antlr_type_falls_back_to_literal_and_decimal_names() {
    let format = SymbolFormat::antlr(Some(expr_vocabulary()));

    let assign = SymbolBuilder::new(4, "=").index(1).range(2, 2).at(1, 2).build();
    assert_eq!(format.format(&assign).unwrap(), "[@1,2:2='=',<'='>,1:2]");

    let unknown = SymbolBuilder::new(9, "?").index(2).range(4, 4).at(1, 4).build();
    assert_eq!(format.format(&unknown).unwrap(), "[@2,4:4='?',<9>,1:4]");
    assert_eq!(format.parse("[@2,4:4='?',<9>,1:4]").unwrap().token_type, 9);
}

#[test]
fn simple_list_parse_assigns_sequential_indices() {
    let format = SymbolFormat::simple(Some(expr_vocabulary()));

    let symbols = format.parse_list("(ID 'x') '=' (INT '5') EOF").unwrap();

    assert_eq!(symbols.len(), 4);
    assert_eq!(
        symbols.iter().map(|s| s.token_type).collect::<Vec<_>>(),
        vec![1, 4, 2, -1]
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
fn simple_round_trips_the_channel_suffix() {
    let format = SymbolFormat::simple(Some(expr_vocabulary()));

    let hidden = SymbolBuilder::new(1, "ws").channel(2).build();
    let rendered = format.format(&hidden).unwrap();
    assert_eq!(rendered, "(ID:2 'ws')");

    let parsed = format.parse(&rendered).unwrap();
    assert_eq!(parsed.channel, 2);
    assert_eq!(parsed.text, "ws");
}

#[test]
fn escaped_text_round_trips_control_characters() {
    let format = SymbolFormat::simple(Some(expr_vocabulary()));

    let newline = SymbolBuilder::new(3, "\n").build();
    let rendered = format.format(&newline).unwrap();
    assert_eq!(rendered, "(NEWLINE '\\n')");
    assert_eq!(format.parse(&rendered).unwrap().text, "\n");

    let quoted = SymbolBuilder::new(1, "it's").build();
    let rendered = format.format(&quoted).unwrap();
    assert_eq!(rendered, "(ID 'it\\'s')");
    assert_eq!(format.parse(&rendered).unwrap().text, "it's");
}

#[test]
fn eof_symbol_uses_the_first_alternative() {
    let format = SymbolFormat::simple(Some(expr_vocabulary()));

    let eof = format.parse("EOF").unwrap();
    assert_eq!(eof.token_type, -1);
    assert_eq!(eof.text, "<EOF>");
    assert_eq!(format.format(&eof).unwrap(), "EOF");
}

#[test]
fn missing_closing_parenthesis_reports_the_furthest_position() {
    let format = SymbolFormat::simple(Some(expr_vocabulary()));

    let err = format.parse("(ID 'x'").expect_err("the quote is never closed");
    assert_eq!(err.pointer, 7);
    assert!(err.message.contains("expected \"')\""), "{}", err.message);
    assert!(err.message.contains("(ID 'x'>>"), "{}", err.message);
}

#[test]
fn trailing_input_is_marked() {
    let format = SymbolFormat::simple(Some(expr_vocabulary()));

    let err = format.parse("EOF EOF").expect_err("only one symbol is allowed");
    assert_eq!(err.pointer, 3);
    assert!(err.message.contains("EOF>> EOF"), "{}", err.message);
}

#[test]
fn malformed_patterns_are_rejected_at_build_time() {
    assert!(
        SymbolFormat::builder().append_pattern("'unclosed").is_err(),
        "the quoted block is never closed"
    );
    assert!(
        SymbolFormat::builder().append_pattern("[a[b]]").is_err(),
        "optional groups may not nest"
    );
    assert!(
        SymbolFormat::builder().append_pattern("a]").is_err(),
        "there is no group to close"
    );
    assert!(
        SymbolFormat::builder().append_pattern("oops\\").is_err(),
        "the escape is dangling"
    );

    let mut builder = SymbolFormat::builder();
    builder.append_pattern("[I").unwrap();
    assert!(builder.build().is_err(), "the group is still open");
}

#[test]
fn coverage_reflects_the_compiled_fields() {
    let format = SymbolFormat::simple(Some(expr_vocabulary()));
    assert_eq!(
        format.coverage(),
        &[SymbolField::Type, SymbolField::Text, SymbolField::Channel]
    );

    let full = SymbolFormat::antlr(Some(expr_vocabulary()));
    assert_eq!(full.coverage().len(), 8);
}

#[test]
fn equate_ignores_uncovered_fields() {
    let format = SymbolFormat::simple(Some(expr_vocabulary()));

    let here = SymbolBuilder::new(1, "x").index(0).at(1, 0).build();
    let there = SymbolBuilder::new(1, "x").index(7).at(3, 4).build();
    assert!(format.equate(&here, &there));

    let other = SymbolBuilder::new(1, "y").index(0).at(1, 0).build();
    assert!(!format.equate(&here, &other));
}

#[test]
fn raw_text_keeps_escape_characters() {
    let mut builder = SymbolFormat::builder();
    builder.append_pattern("I:x").unwrap();
    let format = builder.build().unwrap();

    let symbol = format.parse("7:a\\b").unwrap();
    assert_eq!(symbol.token_type, 7);
    assert_eq!(symbol.text, "a\\b");
}

#[test]
fn empty_text_placeholder_round_trips() {
    let mut builder = SymbolFormat::builder();
    builder
        .number(SymbolField::Type, false)
        .constant(":")
        .unwrap()
        .text(TextOption::escaped().with_placeholder("<empty>"));
    let format = builder.build().unwrap();

    let silent = SymbolBuilder::new(5, "").build();
    assert_eq!(format.format(&silent).unwrap(), "5:<empty>");
    assert_eq!(format.parse("5:<empty>").unwrap().text, "");
}

#[test]
fn simple_fixture_table() {
    let format = SymbolFormat::simple(Some(expr_vocabulary()));
    let fixtures: serde_json::Value = serde_json::from_str(
        r#"[
            { "input": "(ID 'x')", "type": 1, "text": "x" },
            { "input": "(INT '42')", "type": 2, "text": "42" },
            { "input": "'='", "type": 4, "text": "=" },
            { "input": "EOF", "type": -1, "text": "<EOF>" }
        ]"#,
    )
    .unwrap();

    for fixture in fixtures.as_array().unwrap() {
        let input = fixture["input"].as_str().unwrap();
        let symbol = format.parse(input).unwrap();
        assert_eq!(i64::from(symbol.token_type), fixture["type"].as_i64().unwrap());
        assert_eq!(symbol.text, fixture["text"].as_str().unwrap());
    }
}
