//! Fragments and builders for the [SymbolFormat](crate::SymbolFormat) notation.
//!
//! Each fragment maps one [Symbol](crate::Symbol) field (or one piece of fixed notation) in
//! both directions. A format is assembled either fragment by fragment through the
//! [SymbolFormatBuilder] methods or from the compact pattern language accepted by
//! [append_pattern](SymbolFormatBuilder::append_pattern):
//!
//! | letter(s) | meaning |
//! |---|---|
//! | `I` | token type as a decimal integer |
//! | `s`/`S` | symbolic type name / symbolic-first composite type |
//! | `l`/`L` | literal type name / literal-first composite type |
//! | `x`/`X` | text: raw / escaped |
//! | `N`/`n`, `B`/`b`, `E`/`e`, `C`/`c`, `P`/`p`, `R`/`r` | integer field {index, start, stop, channel, position, line}; uppercase lenient, lowercase strict |
//! | `[` … `]` | optional group |
//! | `'` … `'` | quoted literal block |
//! | `\x` | escaped literal character |
//! | whitespace | flexible whitespace fragment |
//! | other characters | literal |

mod builder;
mod constant;
mod draft;
mod fields;
mod format;
mod text;
mod types;

pub(crate) use constant::skip_blank;

#[cfg(test)]
mod __tests__;

use crate::{Fault, IFragment, IVocabulary, Symbol, SymbolField};
use once_cell::unsync::OnceCell;
use std::rc::Rc;

/// A shared printer/parser fragment over symbols.
pub type SymbolFragment = Rc<dyn IFragment<Symbol, SymbolDraft>>;

/// The parse-side accumulator for one symbol: every field starts unset and is bound by the
/// fragments as they consume input; [finish](SymbolDraft::finish) fills the remaining fields
/// with their defaults.
#[derive(Debug, Clone)]
pub struct SymbolDraft {
    pub token_type: Option<i32>,
    pub text: Option<String>,
    pub index: Option<i32>,
    pub start: Option<i32>,
    pub stop: Option<i32>,
    pub channel: Option<i32>,
    pub line: Option<i32>,
    pub position: Option<i32>,
    fault: Fault,
}

/// A fragment printing and parsing one integer symbol field in decimal.
///
/// The strict variant refuses to format a field holding its default value; combined with an
/// optional group this is what omits empty clauses such as `,channel=0`.
pub struct NumberField {
    field: SymbolField,
    strict: bool,
}

/// The escape policy of a [TextField].
#[derive(Debug, Clone)]
pub struct TextOption {
    escape: Option<char>,
    escapes: Vec<(char, char)>,
    placeholder: Option<String>,
}

/// A fragment printing and parsing the symbol text.
///
/// Formatting applies the escape encoding of its [TextOption]. Parsing is non-greedy: it
/// consumes up to the earliest position at which a successor fragment would start a non-empty
/// match, unescaping as it goes; a valid escape sequence is never treated as a delimiter.
pub struct TextField {
    option: TextOption,
}

/// A fragment for a fixed piece of notation.
pub struct ConstantField {
    value: String,
}

/// A fragment printing a fixed whitespace string and parsing any run of whitespace.
pub struct WhitespaceField {
    value: String,
}

/// A follower-only fragment marking where an embedding notation may resume; used by the tree
/// formatter to delimit symbol text it embeds. Never part of a format sequence itself.
pub(crate) struct BoundaryField {
    values: Vec<String>,
    whitespace: bool,
}

/// A fragment mapping the token type through the vocabulary's symbolic names.
///
/// Parsing scans all symbolic names and accepts the longest one matching a prefix of the
/// input.
pub struct SymbolicField {
    vocabulary: Rc<dyn IVocabulary>,
    names: OnceCell<Vec<(String, i32)>>,
}

/// A fragment mapping the token type through the vocabulary's literal names.
///
/// Literal names conventionally include their quote characters; parsing one also binds the
/// symbol text to the unquoted content.
pub struct LiteralField {
    vocabulary: Rc<dyn IVocabulary>,
    names: OnceCell<Vec<(String, i32)>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The attempt order of a composite [TypeField].
pub enum TypeFormat {
    Number,
    Symbolic,
    Literal,
    SymbolicFirst,
    LiteralFirst,
}

/// A composite type fragment trying the name spaces of its [TypeFormat] in order; the first
/// variant that applies wins, in both directions.
pub struct TypeField {
    order: TypeFormat,
    symbolic: Option<SymbolicField>,
    literal: Option<LiteralField>,
}

/// A fragment printing and parsing the literal `EOF` for the end-of-file symbol.
pub struct EOFField;

/// A builder assembling the alternative fragment sequences of a
/// [SymbolFormat](crate::SymbolFormat).
pub struct SymbolFormatBuilder {
    vocabulary: Option<Rc<dyn IVocabulary>>,
    variants: Vec<Vec<SymbolFragment>>,
    current: Vec<SymbolFragment>,
    optional: Option<Vec<SymbolFragment>>,
    coverage: Vec<SymbolField>,
    after_whitespace: bool,
}
