use crate::{SymbolBuilder, SymbolField, SymbolFormat};

#[test]
fn a_failing_optional_group_equals_its_absence() {
    let mut with_group = SymbolFormat::builder();
    with_group.append_pattern("I[:c]").unwrap();
    let with_group = with_group.build().unwrap();

    let mut without = SymbolFormat::builder();
    without.append_pattern("I").unwrap();
    let without = without.build().unwrap();

    // The strict channel fragment never applies to the default channel, so the group drops
    // out of the format entirely.
    let plain = SymbolBuilder::new(5, "").build();
    assert_eq!(
        with_group.format(&plain).unwrap(),
        without.format(&plain).unwrap()
    );
    assert_eq!(with_group.parse("5").unwrap(), without.parse("5").unwrap());
}

#[test]
fn a_skipped_group_leaves_no_bindings_behind() {
    let mut builder = SymbolFormat::builder();
    builder.append_pattern("I[:c!]").unwrap();
    let format = builder.build().unwrap();

    // ":2" is consumed inside the group before the "!" fails, so the whole group must rewind
    // and the channel keeps its default.
    let err = format.parse("5:2").expect_err("the group fails and :2 remains");
    assert_eq!(err.pointer, 1);

    let mut builder = SymbolFormat::builder();
    builder.append_pattern("I[:c!]x").unwrap();
    let format = builder.build().unwrap();
    let symbol = format.parse("5:2").unwrap();
    assert_eq!(symbol.channel, 0);
    assert_eq!(symbol.text, ":2");
}

#[test]
fn the_first_matching_alternative_wins() {
    let mut builder = SymbolFormat::builder();
    builder.text(crate::TextOption::raw());
    builder.alternative();
    builder.number(SymbolField::Type, false);
    let format = builder.build().unwrap();

    // "5" satisfies both alternatives; the text variant is first and takes it.
    let symbol = format.parse("5").unwrap();
    assert_eq!(symbol.text, "5");
    assert_eq!(symbol.token_type, 0);
}

#[test]
fn errors_report_the_furthest_progressing_alternative() {
    let mut builder = SymbolFormat::builder();
    builder.append_pattern("a!I").unwrap();
    builder.alternative();
    builder.append_pattern("b!I").unwrap();
    let format = builder.build().unwrap();

    // The first alternative passes "a!" and dies on the missing number; the second dies
    // immediately. Only the deeper diagnostic survives.
    let err = format.parse("a!x").expect_err("no digits follow");
    assert_eq!(err.pointer, 2);
    assert!(err.message.contains("decimal type"), "{}", err.message);
    assert!(!err.message.contains("expected \"b!\""), "{}", err.message);
}

#[test]
fn competing_diagnostics_at_one_position_are_both_kept() {
    let mut builder = SymbolFormat::builder();
    builder.append_pattern("=I").unwrap();
    builder.alternative();
    builder.append_pattern("=x'!'").unwrap();
    let format = builder.build().unwrap();

    let err = format.parse("=").expect_err("both alternatives die at index 1");
    assert_eq!(err.pointer, 1);
    assert!(err.message.contains("decimal type"), "{}", err.message);
    assert!(err.message.contains("expected \"!\""), "{}", err.message);
}
