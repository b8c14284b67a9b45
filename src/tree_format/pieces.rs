use super::{
    Binding, BlankPiece, ChildrenSlot, ConstantPiece, INodePiece, NodeDraft, PadPiece,
    PatternPiece, RulePiece, SymbolPiece,
};
use crate::symbol_format::{skip_blank, BoundaryField};
use crate::{
    Fault, Followers, IDraft, IRecognizer, PatternFormat, ScanResult, SymbolFormat, Tree,
};
use once_cell::sync::Lazy;
use once_cell::unsync::OnceCell;
use regex::Regex;
use std::fmt::Display;
use std::rc::Rc;

static RULE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+").expect("the rule number expression is well formed"));

impl ConstantPiece {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

impl Display for ConstantPiece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.value)
    }
}

impl INodePiece for ConstantPiece {
    fn format(&self, _: &Tree, _: usize, buffer: &mut String) -> bool {
        buffer.push_str(&self.value);
        true
    }

    fn parse(&self, draft: &mut NodeDraft, text: &str, pointer: usize) -> ScanResult {
        if text[pointer..].starts_with(&self.value) {
            Ok(pointer + self.value.len())
        } else {
            draft
                .fault_mut()
                .report(pointer, format!("expected {:?}", self.value));
            Err(pointer)
        }
    }

    fn peek(&self, _: &NodeDraft, text: &str, pointer: usize) -> ScanResult {
        if text[pointer..].starts_with(&self.value) {
            Ok(pointer + self.value.len())
        } else {
            Err(pointer)
        }
    }
}

impl BlankPiece {
    pub fn new(value: &str) -> Self {
        debug_assert!(
            value.chars().all(|c| c.is_whitespace()),
            "A blank piece renders whitespace only."
        );
        Self {
            value: value.to_string(),
        }
    }
}

impl Display for BlankPiece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, " ")
    }
}

impl INodePiece for BlankPiece {
    fn format(&self, _: &Tree, _: usize, buffer: &mut String) -> bool {
        buffer.push_str(&self.value);
        true
    }

    fn parse(&self, _: &mut NodeDraft, text: &str, pointer: usize) -> ScanResult {
        Ok(skip_blank(text, pointer))
    }

    fn peek(&self, _: &NodeDraft, text: &str, pointer: usize) -> ScanResult {
        Ok(skip_blank(text, pointer))
    }
}

impl PadPiece {
    /// Create a padding piece computing its string from the node depth.
    pub fn with<F: Fn(usize) -> String + 'static>(pad: F) -> Self {
        Self { pad: Box::new(pad) }
    }

    /// The common padding: `unit` repeated depth times.
    pub fn repeat(unit: &str) -> Self {
        let unit = unit.to_string();
        Self::with(move |depth| unit.repeat(depth))
    }
}

impl Display for PadPiece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<padding>")
    }
}

impl INodePiece for PadPiece {
    fn format(&self, _: &Tree, depth: usize, buffer: &mut String) -> bool {
        buffer.push_str(&(self.pad)(depth));
        true
    }

    fn parse(&self, draft: &mut NodeDraft, text: &str, pointer: usize) -> ScanResult {
        let expected = (self.pad)(draft.depth);
        if text[pointer..].starts_with(&expected) {
            Ok(pointer + expected.len())
        } else {
            draft
                .fault_mut()
                .report(pointer, format!("expected the padding {:?}", expected));
            Err(pointer)
        }
    }

    fn peek(&self, draft: &NodeDraft, text: &str, pointer: usize) -> ScanResult {
        let expected = (self.pad)(draft.depth);
        if text[pointer..].starts_with(&expected) {
            Ok(pointer + expected.len())
        } else {
            Err(pointer)
        }
    }
}

impl RulePiece {
    pub fn new(recognizer: Option<Rc<dyn IRecognizer>>) -> Self {
        Self {
            recognizer,
            names: OnceCell::new(),
        }
    }

    fn names(&self) -> &Vec<(String, i32)> {
        self.names.get_or_init(|| {
            let mut names: Vec<(String, i32)> = self
                .recognizer
                .iter()
                .flat_map(|recognizer| {
                    recognizer
                        .rule_names()
                        .iter()
                        .enumerate()
                        .map(|(rule, name)| (name.clone(), rule as i32))
                })
                .collect();
            names.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
            names
        })
    }

    fn scan(&self, text: &str, pointer: usize) -> Option<(i32, usize)> {
        let named = self
            .names()
            .iter()
            .find(|(name, _)| text[pointer..].starts_with(name.as_str()))
            .map(|(name, rule)| (*rule, pointer + name.len()));
        named.or_else(|| {
            RULE_NUMBER
                .find(&text[pointer..])
                .and_then(|found| found.as_str().parse().ok().map(|rule| (rule, pointer + found.end())))
        })
    }
}

impl Display for RulePiece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<rule>")
    }
}

impl INodePiece for RulePiece {
    fn format(&self, node: &Tree, _: usize, buffer: &mut String) -> bool {
        let rule = match node.rule_id() {
            Some(rule) => rule,
            None => return false,
        };
        let name = self
            .recognizer
            .as_ref()
            .and_then(|recognizer| recognizer.rule_names().get(rule as usize).cloned());
        match name {
            Some(name) => buffer.push_str(&name),
            None => buffer.push_str(&rule.to_string()),
        }
        true
    }

    fn parse(&self, draft: &mut NodeDraft, text: &str, pointer: usize) -> ScanResult {
        match self.scan(text, pointer) {
            Some((rule, end)) => {
                draft.rule = Some(rule);
                Ok(end)
            }
            None => {
                draft
                    .fault_mut()
                    .report(pointer, "expected a rule name".to_string());
                Err(pointer)
            }
        }
    }

    fn peek(&self, _: &NodeDraft, text: &str, pointer: usize) -> ScanResult {
        match self.scan(text, pointer) {
            Some((_, end)) => Ok(end),
            None => Err(pointer),
        }
    }

    fn binding(&self) -> Option<Binding> {
        Some(Binding::Rule)
    }
}

impl SymbolPiece {
    pub fn new(format: Rc<SymbolFormat>) -> Self {
        Self {
            format,
            bound: Vec::new(),
        }
    }

    /// A symbol piece whose text is additionally delimited by the embedding notation: any of
    /// `stops`, or whitespace when `at_whitespace` is set. Needed when the symbol format has
    /// no closing notation of its own (the ANTLR tree style renders terminals as bare text).
    pub fn bounded(format: Rc<SymbolFormat>, stops: Vec<&str>, at_whitespace: bool) -> Self {
        Self {
            format,
            bound: vec![Rc::new(BoundaryField::new(stops, at_whitespace))],
        }
    }
}

impl Display for SymbolPiece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<symbol>")
    }
}

impl INodePiece for SymbolPiece {
    fn format(&self, node: &Tree, _: usize, buffer: &mut String) -> bool {
        match node.symbol() {
            Some(symbol) => self.format.write_symbol(symbol, buffer),
            None => true,
        }
    }

    fn parse(&self, draft: &mut NodeDraft, text: &str, pointer: usize) -> ScanResult {
        let none = Followers::none();
        let followers = Followers::chain(&self.bound, &none);
        let mut fault = Fault::new();
        match self.format.advance_symbol(text, pointer, &mut fault, &followers) {
            Ok((symbol, end)) => {
                draft.symbol = Some(symbol);
                Ok(end)
            }
            Err(at) => {
                draft.fault_mut().merge(&fault);
                Err(at)
            }
        }
    }

    fn peek(&self, _: &NodeDraft, text: &str, pointer: usize) -> ScanResult {
        let none = Followers::none();
        let followers = Followers::chain(&self.bound, &none);
        self.format.peek_symbol(text, pointer, &followers)
    }

    fn binding(&self) -> Option<Binding> {
        Some(Binding::Symbol)
    }
}

impl Display for ChildrenSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<children>")
    }
}

impl INodePiece for ChildrenSlot {
    fn format(&self, _: &Tree, _: usize, _: &mut String) -> bool {
        panic!("The children placeholder is driven by the tree format, never formatted itself.")
    }

    fn parse(&self, _: &mut NodeDraft, _: &str, _: usize) -> ScanResult {
        panic!("The children placeholder is driven by the tree format, never parsed itself.")
    }

    fn peek(&self, _: &NodeDraft, _: &str, _: usize) -> ScanResult {
        panic!("The children placeholder is driven by the tree format, never peeked itself.")
    }

    fn is_children_slot(&self) -> bool {
        true
    }
}

impl PatternPiece {
    pub fn new(format: Rc<PatternFormat>) -> Self {
        Self { format }
    }
}

impl Display for PatternPiece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<pattern>")
    }
}

impl INodePiece for PatternPiece {
    fn format(&self, node: &Tree, _: usize, buffer: &mut String) -> bool {
        match node {
            Tree::Pattern(pattern) => self.format.write_pattern(pattern, buffer),
            _ => false,
        }
    }

    fn parse(&self, draft: &mut NodeDraft, text: &str, pointer: usize) -> ScanResult {
        let mut fault = Fault::new();
        match self.format.advance_pattern(text, pointer, &mut fault) {
            Ok((pattern, end)) => {
                draft.pattern = Some(pattern);
                Ok(end)
            }
            Err(at) => {
                draft.fault_mut().merge(&fault);
                Err(at)
            }
        }
    }

    fn peek(&self, _: &NodeDraft, text: &str, pointer: usize) -> ScanResult {
        let mut fault = Fault::new();
        match self.format.advance_pattern(text, pointer, &mut fault) {
            Ok((_, end)) => Ok(end),
            Err(at) => Err(at),
        }
    }

    fn binding(&self) -> Option<Binding> {
        Some(Binding::Pattern)
    }
}
