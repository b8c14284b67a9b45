use super::{NumberField, SymbolDraft};
use crate::{Followers, IDraft, IFragment, ScanResult, Symbol, SymbolField};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Display;

static INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+").expect("the integer expression is well formed"));

impl NumberField {
    /// Create a fragment for one integer symbol field.
    /// ### Arguments
    /// * `field` - Any field except the text.
    /// * `strict` - A strict fragment refuses to format the field's default value.
    pub fn new(field: SymbolField, strict: bool) -> Self {
        debug_assert!(
            field != SymbolField::Text,
            "The text field is handled by TextField."
        );
        Self { field, strict }
    }

    fn scan(&self, text: &str, pointer: usize) -> Option<(i32, usize)> {
        let found = INTEGER.find(&text[pointer..])?;
        let value: i32 = found.as_str().parse().ok()?;
        Some((value, pointer + found.end()))
    }
}

impl Display for NumberField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.field)
    }
}

impl IFragment<Symbol, SymbolDraft> for NumberField {
    fn format(&self, subject: &Symbol, buffer: &mut String) -> bool {
        let value = self.field.number_of(subject);
        if self.strict && value == self.field.default_number() {
            return false;
        }
        buffer.push_str(&value.to_string());
        true
    }

    fn parse(
        &self,
        draft: &mut SymbolDraft,
        text: &str,
        pointer: usize,
        _: &Followers<Symbol, SymbolDraft>,
    ) -> ScanResult {
        match self.scan(text, pointer) {
            Some((value, end)) => {
                draft.record_number(self.field, value);
                Ok(end)
            }
            None => {
                draft
                    .fault_mut()
                    .report(pointer, format!("expected a decimal {} value", self.field));
                Err(pointer)
            }
        }
    }

    fn peek(
        &self,
        _: &SymbolDraft,
        text: &str,
        pointer: usize,
        _: &Followers<Symbol, SymbolDraft>,
    ) -> ScanResult {
        match self.scan(text, pointer) {
            Some((_, end)) => Ok(end),
            None => Err(pointer),
        }
    }
}
