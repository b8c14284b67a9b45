use super::{BoundaryField, ConstantField, SymbolDraft, WhitespaceField};
use crate::{Followers, IDraft, IFragment, ScanResult, Symbol};
use std::fmt::Display;

impl ConstantField {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Display for ConstantField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.value)
    }
}

impl IFragment<Symbol, SymbolDraft> for ConstantField {
    fn format(&self, _: &Symbol, buffer: &mut String) -> bool {
        buffer.push_str(&self.value);
        true
    }

    fn parse(
        &self,
        draft: &mut SymbolDraft,
        text: &str,
        pointer: usize,
        _: &Followers<Symbol, SymbolDraft>,
    ) -> ScanResult {
        if text[pointer..].starts_with(&self.value) {
            Ok(pointer + self.value.len())
        } else {
            draft
                .fault_mut()
                .report(pointer, format!("expected {:?}", self.value));
            Err(pointer)
        }
    }

    fn peek(
        &self,
        _: &SymbolDraft,
        text: &str,
        pointer: usize,
        _: &Followers<Symbol, SymbolDraft>,
    ) -> ScanResult {
        if text[pointer..].starts_with(&self.value) {
            Ok(pointer + self.value.len())
        } else {
            Err(pointer)
        }
    }
}

/// Consume a run of whitespace starting at `pointer`, possibly empty.
pub(crate) fn skip_blank(text: &str, pointer: usize) -> usize {
    let mut end = pointer;
    while let Some(c) = text[end..].chars().next() {
        if !c.is_whitespace() {
            break;
        }
        end += c.len_utf8();
    }
    end
}

impl WhitespaceField {
    /// Create a whitespace fragment emitting `value`.
    /// ### Arguments
    /// * `value` - The formatted rendering; every character must be whitespace.
    pub fn new(value: &str) -> Result<Self, String> {
        if value.chars().all(|c| c.is_whitespace()) {
            Ok(Self {
                value: value.to_string(),
            })
        } else {
            Err(format!(
                "Whitespace fragment value {:?} contains non-whitespace characters.",
                value
            ))
        }
    }
}

impl Display for WhitespaceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, " ")
    }
}

impl IFragment<Symbol, SymbolDraft> for WhitespaceField {
    fn format(&self, _: &Symbol, buffer: &mut String) -> bool {
        buffer.push_str(&self.value);
        true
    }

    fn parse(
        &self,
        _: &mut SymbolDraft,
        text: &str,
        pointer: usize,
        _: &Followers<Symbol, SymbolDraft>,
    ) -> ScanResult {
        Ok(skip_blank(text, pointer))
    }

    fn peek(
        &self,
        _: &SymbolDraft,
        text: &str,
        pointer: usize,
        _: &Followers<Symbol, SymbolDraft>,
    ) -> ScanResult {
        Ok(skip_blank(text, pointer))
    }
}

impl BoundaryField {
    pub fn new(values: Vec<&str>, whitespace: bool) -> Self {
        Self {
            values: values.into_iter().map(|v| v.to_string()).collect(),
            whitespace,
        }
    }

    fn probe(&self, text: &str, pointer: usize) -> ScanResult {
        if self.whitespace {
            if let Some(c) = text[pointer..].chars().next() {
                if c.is_whitespace() {
                    return Ok(pointer + c.len_utf8());
                }
            }
        }
        for value in &self.values {
            if text[pointer..].starts_with(value) {
                return Ok(pointer + value.len());
            }
        }
        Err(pointer)
    }
}

impl Display for BoundaryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<boundary>")
    }
}

impl IFragment<Symbol, SymbolDraft> for BoundaryField {
    fn format(&self, _: &Symbol, _: &mut String) -> bool {
        true
    }

    fn parse(
        &self,
        _: &mut SymbolDraft,
        text: &str,
        pointer: usize,
        _: &Followers<Symbol, SymbolDraft>,
    ) -> ScanResult {
        self.probe(text, pointer)
    }

    fn peek(
        &self,
        _: &SymbolDraft,
        text: &str,
        pointer: usize,
        _: &Followers<Symbol, SymbolDraft>,
    ) -> ScanResult {
        self.probe(text, pointer)
    }
}
