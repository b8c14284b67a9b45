use super::{Pattern, PatternElement};
use crate::symbol_format::skip_blank;
use crate::{
    Fault, Followers, FormatError, IRecognizer, IVocabulary, ParseError, PatternFormat,
    SymbolFormat,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;
use std::rc::Rc;

static HOLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<(?:([A-Za-z_][A-Za-z0-9_]*):)?([A-Za-z_][A-Za-z0-9_]*|[0-9]+/?)>")
        .expect("the hole expression is well formed")
});

impl PatternFormat {
    pub fn new(symbol_format: Rc<SymbolFormat>, recognizer: Option<Rc<dyn IRecognizer>>) -> Self {
        Self {
            symbol_format,
            recognizer,
        }
    }

    fn vocabulary(&self) -> Option<Rc<dyn IVocabulary>> {
        match &self.recognizer {
            Some(recognizer) => Some(recognizer.vocabulary()),
            None => self.symbol_format.vocabulary().cloned(),
        }
    }

    fn rule_by_name(&self, name: &str) -> Option<i32> {
        self.recognizer.as_ref().and_then(|recognizer| {
            recognizer
                .rule_names()
                .iter()
                .position(|rule_name| rule_name == name)
                .map(|rule| rule as i32)
        })
    }

    fn token_by_name(&self, name: &str) -> Option<i32> {
        let vocabulary = self.vocabulary()?;
        (0..=vocabulary.max_token_type())
            .find(|token_type| vocabulary.symbolic_name(*token_type) == Some(name))
    }

    /// Resolve a hole's name part: `8/` is a numeric rule hole, a number is a token type, an
    /// identifier is first tried as a rule name and then as a symbolic token name.
    fn resolve_hole(&self, label: Option<String>, name: &str) -> Result<PatternElement, String> {
        if let Some(digits) = name.strip_suffix('/') {
            return digits
                .parse()
                .map(|rule| PatternElement::RuleHole { rule, label })
                .map_err(|_| format!("The rule hole {:?} is not numeric.", name));
        }
        if name.chars().all(|c| c.is_ascii_digit()) {
            return name
                .parse()
                .map(|token_type| PatternElement::TokenHole { token_type, label })
                .map_err(|_| format!("The token hole {:?} is out of range.", name));
        }
        if let Some(rule) = self.rule_by_name(name) {
            return Ok(PatternElement::RuleHole { rule, label });
        }
        if let Some(token_type) = self.token_by_name(name) {
            return Ok(PatternElement::TokenHole { token_type, label });
        }
        Err(format!("{:?} names neither a rule nor a token.", name))
    }

    /// Parse a standalone pattern from the whole of `text`.
    pub fn parse(&self, text: &str) -> Result<Pattern, ParseError> {
        let mut fault = Fault::new();
        match self.advance_pattern(text, 0, &mut fault) {
            Ok((pattern, end)) => {
                let end = skip_blank(text, end);
                if end == text.len() {
                    Ok(pattern)
                } else {
                    let mut trailing = Fault::new();
                    trailing.report(end, "Unexpected trailing input.".to_string());
                    Err(ParseError::failure(text, &trailing))
                }
            }
            Err(_) => Err(ParseError::failure(text, &fault)),
        }
    }

    /// Render a pattern body, elements separated by single spaces.
    pub fn format(&self, pattern: &Pattern) -> Result<String, FormatError> {
        let mut buffer = String::new();
        if self.write_pattern(pattern, &mut buffer) {
            Ok(buffer)
        } else {
            Err(FormatError::new(
                "UnformattablePattern".to_string(),
                format!("No symbol alternative applies within {:?}.", pattern),
            ))
        }
    }

    /// Parse pattern elements from `pointer` until neither a hole nor a symbol opens.
    pub(crate) fn advance_pattern(
        &self,
        text: &str,
        pointer: usize,
        fault: &mut Fault,
    ) -> Result<(Pattern, usize), usize> {
        let mut elements = Vec::new();
        let mut moved = pointer;
        loop {
            let at = skip_blank(text, moved);
            if let Some(found) = HOLE.captures(&text[at..]) {
                let label = found.get(1).map(|l| l.as_str().to_string());
                let name = match found.get(2) {
                    Some(name) => name.as_str(),
                    None => break,
                };
                match self.resolve_hole(label, name) {
                    Ok(element) => {
                        elements.push(element);
                        moved = at + found.get(0).map_or(0, |whole| whole.end());
                        continue;
                    }
                    Err(message) => {
                        fault.report(at, message);
                        return Err(at);
                    }
                }
            }
            match self.symbol_format.peek_symbol(text, at, &Followers::none()) {
                Ok(end) if end > at => {
                    let (symbol, end) =
                        self.symbol_format
                            .advance_symbol(text, at, fault, &Followers::none())?;
                    elements.push(PatternElement::Symbol(symbol));
                    moved = end;
                }
                _ => {
                    moved = at;
                    break;
                }
            }
        }
        Ok((Pattern::new(None, elements), moved))
    }

    pub(crate) fn write_pattern(&self, pattern: &Pattern, buffer: &mut String) -> bool {
        for (index, element) in pattern.elements.iter().enumerate() {
            if index != 0 {
                buffer.push(' ');
            }
            match element {
                PatternElement::Symbol(symbol) => {
                    if !self.symbol_format.write_symbol(symbol, buffer) {
                        return false;
                    }
                }
                PatternElement::RuleHole { rule, label } => {
                    buffer.push('<');
                    if let Some(label) = label {
                        let _ = write!(buffer, "{}:", label);
                    }
                    let name = self.recognizer.as_ref().and_then(|recognizer| {
                        recognizer.rule_names().get(*rule as usize).cloned()
                    });
                    match name {
                        Some(name) => buffer.push_str(&name),
                        None => {
                            let _ = write!(buffer, "{}/", rule);
                        }
                    }
                    buffer.push('>');
                }
                PatternElement::TokenHole { token_type, label } => {
                    buffer.push('<');
                    if let Some(label) = label {
                        let _ = write!(buffer, "{}:", label);
                    }
                    let name = self
                        .vocabulary()
                        .and_then(|v| v.symbolic_name(*token_type).map(|n| n.to_string()));
                    match name {
                        Some(name) => buffer.push_str(&name),
                        None => {
                            let _ = write!(buffer, "{}", token_type);
                        }
                    }
                    buffer.push('>');
                }
            }
        }
        true
    }
}
