use super::{EOFField, LiteralField, NumberField, SymbolDraft, SymbolicField, TypeField, TypeFormat};
use crate::{Followers, IDraft, IFragment, IVocabulary, ScanResult, Symbol, SymbolField};
use once_cell::unsync::OnceCell;
use std::fmt::Display;
use std::rc::Rc;

/// Collect every name of a vocabulary column, longest first, so a prefix scan prefers the
/// longest matching name.
fn sorted_names<F: Fn(i32) -> Option<String>>(max_token_type: i32, name: F) -> Vec<(String, i32)> {
    let mut names: Vec<(String, i32)> = (0..=max_token_type)
        .filter_map(|token_type| name(token_type).map(|n| (n, token_type)))
        .collect();
    names.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    names
}

fn scan_names(names: &[(String, i32)], text: &str, pointer: usize) -> Option<(i32, usize)> {
    names
        .iter()
        .find(|(name, _)| text[pointer..].starts_with(name.as_str()))
        .map(|(name, token_type)| (*token_type, pointer + name.len()))
}

impl SymbolicField {
    pub fn new(vocabulary: Rc<dyn IVocabulary>) -> Self {
        Self {
            vocabulary,
            names: OnceCell::new(),
        }
    }

    fn names(&self) -> &Vec<(String, i32)> {
        self.names.get_or_init(|| {
            sorted_names(self.vocabulary.max_token_type(), |token_type| {
                self.vocabulary
                    .symbolic_name(token_type)
                    .map(|name| name.to_string())
            })
        })
    }
}

impl Display for SymbolicField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<symbolic>")
    }
}

impl IFragment<Symbol, SymbolDraft> for SymbolicField {
    fn format(&self, subject: &Symbol, buffer: &mut String) -> bool {
        match self.vocabulary.symbolic_name(subject.token_type) {
            Some(name) => {
                buffer.push_str(name);
                true
            }
            None => false,
        }
    }

    fn parse(
        &self,
        draft: &mut SymbolDraft,
        text: &str,
        pointer: usize,
        _: &Followers<Symbol, SymbolDraft>,
    ) -> ScanResult {
        match scan_names(self.names(), text, pointer) {
            Some((token_type, end)) => {
                draft.record_number(SymbolField::Type, token_type);
                Ok(end)
            }
            None => {
                draft
                    .fault_mut()
                    .report(pointer, "expected a symbolic token name".to_string());
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
        match scan_names(self.names(), text, pointer) {
            Some((_, end)) => Ok(end),
            None => Err(pointer),
        }
    }
}

impl LiteralField {
    pub fn new(vocabulary: Rc<dyn IVocabulary>) -> Self {
        Self {
            vocabulary,
            names: OnceCell::new(),
        }
    }

    fn names(&self) -> &Vec<(String, i32)> {
        self.names.get_or_init(|| {
            sorted_names(self.vocabulary.max_token_type(), |token_type| {
                self.vocabulary
                    .literal_name(token_type)
                    .map(|name| name.to_string())
            })
        })
    }

    fn unquoted(name: &str) -> &str {
        name.strip_prefix('\'')
            .and_then(|n| n.strip_suffix('\''))
            .unwrap_or(name)
    }
}

impl Display for LiteralField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<literal>")
    }
}

impl IFragment<Symbol, SymbolDraft> for LiteralField {
    fn format(&self, subject: &Symbol, buffer: &mut String) -> bool {
        match self.vocabulary.literal_name(subject.token_type) {
            Some(name) => {
                buffer.push_str(name);
                true
            }
            None => false,
        }
    }

    fn parse(
        &self,
        draft: &mut SymbolDraft,
        text: &str,
        pointer: usize,
        _: &Followers<Symbol, SymbolDraft>,
    ) -> ScanResult {
        match scan_names(self.names(), text, pointer) {
            Some((token_type, end)) => {
                draft.record_number(SymbolField::Type, token_type);
                draft.text = Some(Self::unquoted(&text[pointer..end]).to_string());
                Ok(end)
            }
            None => {
                draft
                    .fault_mut()
                    .report(pointer, "expected a literal token name".to_string());
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
        match scan_names(self.names(), text, pointer) {
            Some((_, end)) => Ok(end),
            None => Err(pointer),
        }
    }
}

impl TypeFormat {
    fn steps(&self) -> &'static [TypeFormat] {
        match self {
            TypeFormat::Number => &[TypeFormat::Number],
            TypeFormat::Symbolic => &[TypeFormat::Symbolic],
            TypeFormat::Literal => &[TypeFormat::Literal],
            TypeFormat::SymbolicFirst => {
                &[TypeFormat::Symbolic, TypeFormat::Literal, TypeFormat::Number]
            }
            TypeFormat::LiteralFirst => {
                &[TypeFormat::Literal, TypeFormat::Symbolic, TypeFormat::Number]
            }
        }
    }
}

impl TypeField {
    pub fn new(order: TypeFormat, vocabulary: Option<Rc<dyn IVocabulary>>) -> Self {
        Self {
            order,
            symbolic: vocabulary.clone().map(SymbolicField::new),
            literal: vocabulary.map(LiteralField::new),
        }
    }

    fn number() -> NumberField {
        NumberField::new(SymbolField::Type, false)
    }
}

impl Display for TypeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<type>")
    }
}

impl IFragment<Symbol, SymbolDraft> for TypeField {
    fn format(&self, subject: &Symbol, buffer: &mut String) -> bool {
        for step in self.order.steps() {
            let applied = match step {
                TypeFormat::Symbolic => self
                    .symbolic
                    .as_ref()
                    .map_or(false, |field| field.format(subject, buffer)),
                TypeFormat::Literal => self
                    .literal
                    .as_ref()
                    .map_or(false, |field| field.format(subject, buffer)),
                _ => Self::number().format(subject, buffer),
            };
            if applied {
                return true;
            }
        }
        false
    }

    fn parse(
        &self,
        draft: &mut SymbolDraft,
        text: &str,
        pointer: usize,
        followers: &Followers<Symbol, SymbolDraft>,
    ) -> ScanResult {
        for step in self.order.steps() {
            let attempt = match step {
                TypeFormat::Symbolic => self
                    .symbolic
                    .as_ref()
                    .map(|field| field.parse(draft, text, pointer, followers)),
                TypeFormat::Literal => self
                    .literal
                    .as_ref()
                    .map(|field| field.parse(draft, text, pointer, followers)),
                _ => Some(Self::number().parse(draft, text, pointer, followers)),
            };
            if let Some(Ok(end)) = attempt {
                return Ok(end);
            }
        }
        Err(pointer)
    }

    fn peek(
        &self,
        draft: &SymbolDraft,
        text: &str,
        pointer: usize,
        followers: &Followers<Symbol, SymbolDraft>,
    ) -> ScanResult {
        for step in self.order.steps() {
            let attempt = match step {
                TypeFormat::Symbolic => self
                    .symbolic
                    .as_ref()
                    .map(|field| field.peek(draft, text, pointer, followers)),
                TypeFormat::Literal => self
                    .literal
                    .as_ref()
                    .map(|field| field.peek(draft, text, pointer, followers)),
                _ => Some(Self::number().peek(draft, text, pointer, followers)),
            };
            if let Some(Ok(end)) = attempt {
                return Ok(end);
            }
        }
        Err(pointer)
    }
}

impl EOFField {
    const NOTATION: &'static str = "EOF";
}

impl Display for EOFField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EOF")
    }
}

impl IFragment<Symbol, SymbolDraft> for EOFField {
    fn format(&self, subject: &Symbol, buffer: &mut String) -> bool {
        if subject.is_eof() {
            buffer.push_str(Self::NOTATION);
            true
        } else {
            false
        }
    }

    fn parse(
        &self,
        draft: &mut SymbolDraft,
        text: &str,
        pointer: usize,
        _: &Followers<Symbol, SymbolDraft>,
    ) -> ScanResult {
        if text[pointer..].starts_with(Self::NOTATION) {
            draft.record_number(SymbolField::Type, -1);
            draft.text = Some("<EOF>".to_string());
            Ok(pointer + Self::NOTATION.len())
        } else {
            draft
                .fault_mut()
                .report(pointer, format!("expected {:?}", Self::NOTATION));
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
        if text[pointer..].starts_with(Self::NOTATION) {
            Ok(pointer + Self::NOTATION.len())
        } else {
            Err(pointer)
        }
    }
}
