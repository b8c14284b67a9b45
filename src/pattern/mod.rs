//! Tree patterns and their matcher.
//!
//! A [Pattern] is a flat list of elements matched pairwise against the children of a rule
//! node: concrete symbols, and typed holes which match any node of the right rule or token
//! type and optionally bind it to a label. Patterns are written in the
//! [PatternFormat](crate::PatternFormat) notation (`<expr>`, `<ID>`, `<lhs:ID>`, `<8/>`,
//! concrete symbols in the ambient symbol notation) and may be embedded as pattern nodes
//! inside a larger tree template.

mod format;
mod matcher;

#[cfg(test)]
mod __tests__;

use crate::{Symbol, Tree};
use std::collections::HashMap;

/// A tree pattern, optionally pinned to one rule.
///
/// A pattern with `rule: None` matches a rule node of any index whose children satisfy the
/// elements; with a rule it matches that rule's nodes only.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub rule: Option<i32>,
    pub elements: Vec<PatternElement>,
}

/// One element of a [Pattern], matched against one child.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternElement {
    /// A concrete terminal, compared by the symbol-field equalizer of the ambient symbol
    /// format.
    Symbol(Symbol),
    /// A hole matching any rule node with this rule identifier.
    RuleHole { rule: i32, label: Option<String> },
    /// A hole matching any terminal with this token type.
    TokenHole { token_type: i32, label: Option<String> },
}

/// The outcome of matching a pattern against a tree: whether it succeeded, the matched
/// subtree, and every labeled binding. A label bound more than once collects its nodes in
/// match order.
#[derive(Debug)]
pub struct MatchResult<'t> {
    pub succeeded: bool,
    pub matched: Option<&'t Tree>,
    pub labels: HashMap<String, Vec<&'t Tree>>,
}

impl Pattern {
    pub fn new(rule: Option<i32>, elements: Vec<PatternElement>) -> Self {
        Self { rule, elements }
    }
}
