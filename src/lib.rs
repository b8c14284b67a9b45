//! Language formatting tool (lang_ft) is a library of reversible formatters to test language
//! parsers: compact literal notations for token lists, parse trees and tree patterns which can
//! be both printed and parsed, together with a structural tree pattern matcher.
//!
//! # Overview
//! Testing a parser usually means comparing the tokens and the parse tree it produces against
//! the shapes the test author expects. Writing those expectations as plain data structures is
//! verbose and unreadable. This library lets expectations be written in a compact text notation
//! instead: a [SymbolFormat] maps between [Symbol] records and strings such as
//! `[@0,0:5='testId',<ID>,1:0]`, a [TreeFormat] maps between [Tree] values and LISP-style
//! strings such as `(expr (INT '5'))`, and a [PatternFormat] reads tree patterns mixing
//! concrete tokens with typed holes such as `<lhs:ID> '=' <rhs:INT>`. A [TreeMatcher] then
//! decides whether a concrete tree satisfies a pattern and extracts the holes' bindings.
//!
//! # Design
//! Every notation is assembled from small printer/parser fragments implementing [IFragment]:
//! a fragment can append characters to a buffer given a value to print, or consume characters
//! from an input and record field bindings into a draft. Fragments are composed with the
//! [Concat](crate::fragment::Concat) and [Optional](crate::fragment::Optional) utilities, and
//! a format may carry several alternative fragment sequences which are tried in order. Because
//! one fragment list drives both directions, a format can never print a string its own parser
//! would reject.
//!
//! Parse failures are collected in a [Fault] record which keeps only the diagnostics of the
//! furthest-progressing attempt, so an error message always points at the deepest position any
//! alternative reached.
//!
//! # Example
//!
//! ```
//! use lang_ft::{SymbolFormat, Vocabulary};
//! use std::rc::Rc;
//!
//! // Token 1 carries the symbolic name ID, token 2 the literal name '='.
//! let vocabulary = Rc::new(Vocabulary::new(
//!     vec![None, None, Some("'='".to_string())],
//!     vec![None, Some("ID".to_string()), None],
//! ));
//!
//! let format = SymbolFormat::simple(Some(vocabulary));
//!
//! let symbols = format.parse_list("(ID 'x') '=' EOF").unwrap();
//! assert_eq!(symbols.len(), 3);
//! assert_eq!(symbols[0].token_type, 1);
//! assert_eq!(symbols[0].text, "x");
//! assert_eq!(symbols[1].text, "=");
//! assert_eq!(symbols[2].token_type, -1);
//! assert_eq!(symbols[1].index, 1);
//!
//! assert_eq!(format.format(&symbols[0]).unwrap(), "(ID 'x')");
//! ```
//!
//! # License
//! [lang_ft](crate) is provided under the MIT license.

mod error;
pub mod examples;
mod fault;
pub mod fragment;
pub mod pattern;
mod symbol;
pub mod symbol_format;
mod tree;
pub mod tree_format;
mod util;
mod vocabulary;

use once_cell::unsync::OnceCell;
use std::fmt::Display;
use std::rc::Rc;

pub use pattern::{MatchResult, Pattern, PatternElement};
pub use symbol_format::{SymbolDraft, SymbolFormatBuilder, TextOption, TypeFormat};
pub use tree_format::{NodeDraft, TreeFormatBuilder};

/// A read-only map from integer token type to the token's optional literal and symbolic names.
///
/// The literal name is the canonical source form of a fixed token and conventionally includes
/// the surrounding quote characters (e.g. `'='`); the symbolic name is the identifier-like
/// grammar name (e.g. `ID`). A vocabulary embedded in a formatter must not be mutated while
/// the formatter is alive.
pub trait IVocabulary {
    fn literal_name(&self, token_type: i32) -> Option<&str>;
    fn symbolic_name(&self, token_type: i32) -> Option<&str>;
    fn max_token_type(&self) -> i32;
}

/// A collaborator bundling a [vocabulary](IVocabulary) with the grammar's rule name table.
///
/// This is the only view of the grammar runtime the formatters consume; anything else the
/// runtime provides is irrelevant here.
pub trait IRecognizer {
    fn vocabulary(&self) -> Rc<dyn IVocabulary>;
    fn rule_names(&self) -> &[String];
}

/// A vector-backed [IVocabulary] implementation indexed by token type.
pub struct Vocabulary {
    literal_names: Vec<Option<String>>,
    symbolic_names: Vec<Option<String>>,
}

/// A vector-backed [IRecognizer] implementation for a fixed vocabulary and rule name table.
pub struct Recognizer {
    vocabulary: Rc<dyn IVocabulary>,
    rule_names: Vec<String>,
}

/// A lexical token record.
///
/// A symbol is produced by lexing source text, by parsing a symbol format string, or directly
/// through a [SymbolBuilder]. It has no owning relationship to any token stream and is freely
/// copyable. Fields a format does not mention keep their defaults on parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    /// Token type; `0` is invalid and `-1` denotes end of file.
    pub token_type: i32,
    /// Matched text; the escape policy is format-controlled.
    pub text: String,
    /// Position in the emitted token stream, `-1` when unknown.
    pub index: i32,
    /// Inclusive starting character offset in the source, `-1` when unknown.
    pub start: i32,
    /// Inclusive ending character offset in the source, `-1` when unknown.
    pub stop: i32,
    /// Token channel; `0` is the default channel, non-zero marks hidden tokens.
    pub channel: i32,
    /// 1-based line number, `-1` when unknown.
    pub line: i32,
    /// 0-based column within the line, `-1` when unknown.
    pub position: i32,
}

/// A builder to construct a [Symbol] field by field.
pub struct SymbolBuilder {
    symbol: Symbol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// The fields of a [Symbol], used for format coverage tracking and field-wise comparison.
pub enum SymbolField {
    Type,
    Text,
    Index,
    Start,
    Stop,
    Channel,
    Line,
    Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// The four variants of a parse tree node.
pub enum TreeKind {
    Rule,
    Terminal,
    Error,
    Pattern,
}

/// A parse tree.
///
/// Only [Rule](Tree::Rule) nodes own children. [Pattern](Tree::Pattern) nodes never appear in
/// a tree parsed from a concrete tree string; they occur only inside the templates consumed by
/// the [TreeMatcher].
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    /// An interior node produced by a grammar rule, owning an ordered list of children.
    Rule { rule: i32, children: Vec<Tree> },
    /// A leaf holding one lexical token.
    Terminal(Symbol),
    /// A leaf holding a token inserted or consumed during error recovery.
    Error(Symbol),
    /// A placeholder standing for any rule subtree whose children satisfy the stored pattern.
    Pattern(Pattern),
}

/// A scan outcome of a printer/parser fragment: `Ok` carries the position after the consumed
/// input, `Err` the position at which matching failed.
pub type ScanResult = Result<usize, usize>;

/// A furthest-progress failure record.
///
/// Every parse call owns one fault. Fragments report failures into it; only diagnostics at the
/// deepest position reached by any attempted path are kept, competing diagnostics at that same
/// position are concatenated and everything earlier is discarded.
#[derive(Debug, Clone)]
pub struct Fault {
    pointer: usize,
    expectations: Vec<String>,
}

/// A parse draft: the mutable state a fragment records field bindings and failures into.
///
/// Drafts are short-lived, scoped to a single parse call. The
/// [Optional](crate::fragment::Optional) utility and alternative formats clone a draft to try
/// a sub-parse and commit the clone only on success, which is what makes backtracking
/// side-effect free.
pub trait IDraft: Clone {
    fn fault(&self) -> &Fault;
    fn fault_mut(&mut self) -> &mut Fault;
}

/// The printer/parser fragment contract every format is assembled from.
///
/// A fragment is one reversible unit of notation: [format](IFragment::format) appends its
/// rendering of the subject to a buffer, [parse](IFragment::parse) consumes its notation from
/// an input and records field bindings into the draft, and [peek](IFragment::peek) answers
/// whether (and how far) the fragment would match without recording anything. `peek` exists so
/// that non-greedy fragments can discover where a successor would start matching.
pub trait IFragment<TSubject, TDraft: IDraft>: Display {
    /// Append the rendering of `subject` to `buffer`; `false` signals the fragment is not
    /// applicable to this subject, in which case nothing it wrote may be kept.
    fn format(&self, subject: &TSubject, buffer: &mut String) -> bool;

    /// Consume this fragment's notation from `text` at `pointer`. On success the field
    /// bindings are recorded into `draft`; on failure a diagnostic is reported to the draft's
    /// [Fault].
    fn parse(
        &self,
        draft: &mut TDraft,
        text: &str,
        pointer: usize,
        followers: &Followers<TSubject, TDraft>,
    ) -> ScanResult;

    /// Same matching as [parse](IFragment::parse) but must not mutate the draft.
    fn peek(
        &self,
        draft: &TDraft,
        text: &str,
        pointer: usize,
        followers: &Followers<TSubject, TDraft>,
    ) -> ScanResult;
}

/// The fragments that would run after the current one, threaded explicitly through every parse
/// call so a non-greedy fragment can ask where its successors would start matching.
///
/// A followers value chains the remaining fragments of the current sequence with the followers
/// of the enclosing sequence.
pub struct Followers<'s, TSubject, TDraft: IDraft> {
    list: &'s [Rc<dyn IFragment<TSubject, TDraft>>],
    rest: Option<&'s Followers<'s, TSubject, TDraft>>,
}

#[derive(Debug)]
/// An error returned when a format description is malformed, e.g. an unclosed quote or a
/// nested optional group in a symbol format pattern. Thrown from builders; the formatter is
/// unusable.
pub struct BuildError {
    what: String,
    message: String,
}

#[derive(Debug)]
/// An error returned when no fragment sequence of a format could render the given value, e.g.
/// a strict field held its default or a required vocabulary name was absent.
pub struct FormatError {
    what: String,
    message: String,
}

#[derive(Debug)]
/// An error returned when an input string does not satisfy a format.
///
/// `pointer` is the furthest byte position any attempted parse path reached; `message` holds
/// every competing diagnostic at that position together with the input annotated by a `>>`
/// marker at the failure point.
pub struct ParseError {
    pub pointer: usize,
    pub message: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// A enum structure to assign multiple level debugging to formats and fragments.
pub enum Log<T> {
    None,
    Default(T),
    Success(T),
    Result(T),
    Verbose(T),
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
/// The line and column information at a text position.
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A reversible notation for [Symbol] records.
///
/// A symbol format owns one or more alternative fragment sequences. Formatting tries each
/// alternative in order and keeps the first rendering that succeeds; parsing tries each
/// alternative and returns the first successful parse, reporting the furthest-progress error
/// when all fail. Formats are immutable once built; construct them through
/// [SymbolFormat::builder] or the [antlr](SymbolFormat::antlr)/[simple](SymbolFormat::simple)
/// presets.
pub struct SymbolFormat {
    variants: Vec<Rc<fragment::Concat<Symbol, SymbolDraft>>>,
    vocabulary: Option<Rc<dyn IVocabulary>>,
    coverage: Vec<SymbolField>,
    debugger: OnceCell<Log<&'static str>>,
}

/// A reversible notation for [Tree] values.
///
/// A tree format registers one fragment sequence per node variant. The format drives both
/// directions itself: when it encounters the children placeholder of a rule sequence it
/// recurses over the node's children, interposing the configured separator. Construct through
/// [TreeFormat::builder] or the [antlr](TreeFormat::antlr)/[simple](TreeFormat::simple)/
/// [indented](TreeFormat::indented) presets.
pub struct TreeFormat {
    entries: Vec<(TreeKind, Vec<Rc<dyn tree_format::INodePiece>>)>,
    separator: Vec<Rc<dyn tree_format::INodePiece>>,
    symbol_format: Rc<SymbolFormat>,
    debugger: OnceCell<Log<&'static str>>,
}

/// A reversible notation for tree [Pattern]s: concrete symbols mixed with `<rule>`,
/// `<TOKEN>`, `<label:rule>` and `<label:TOKEN>` holes.
pub struct PatternFormat {
    symbol_format: Rc<SymbolFormat>,
    recognizer: Option<Rc<dyn IRecognizer>>,
}

/// A structural matcher deciding whether a concrete [Tree] satisfies a template and collecting
/// the subtrees bound by the template's labeled holes.
pub struct TreeMatcher {
    template: Tree,
    coverage: Vec<SymbolField>,
}
