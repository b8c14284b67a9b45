use super::{SymbolDraft, TextField, TextOption};
use crate::{Followers, IFragment, ScanResult, Symbol};
use std::fmt::Display;

impl TextOption {
    /// Text copied verbatim in both directions.
    pub fn raw() -> Self {
        Self {
            escape: None,
            escapes: Vec::new(),
            placeholder: None,
        }
    }

    /// The backslash escape policy: `\n`, `\r`, `\t`, `\\` and `\'`.
    pub fn escaped() -> Self {
        Self {
            escape: Some('\\'),
            escapes: vec![
                ('\n', 'n'),
                ('\r', 'r'),
                ('\t', 't'),
                ('\\', '\\'),
                ('\'', '\''),
            ],
            placeholder: None,
        }
    }

    /// Emit `placeholder` for an empty text and map it back to an empty text on parse.
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    fn encoded(&self, raw: char) -> Option<char> {
        self.escapes
            .iter()
            .find(|(from, _)| *from == raw)
            .map(|(_, to)| *to)
    }

    fn decoded(&self, encoded: char) -> char {
        self.escapes
            .iter()
            .find(|(_, to)| *to == encoded)
            .map_or(encoded, |(from, _)| *from)
    }
}

impl TextField {
    pub fn new(option: TextOption) -> Self {
        Self { option }
    }

    /// Find where the text ends: the earliest position at which a follower would start a
    /// non-empty match. A valid escape sequence is consumed whole and never delimits.
    fn scan(
        &self,
        draft: &SymbolDraft,
        text: &str,
        pointer: usize,
        followers: &Followers<Symbol, SymbolDraft>,
    ) -> usize {
        let mut end = pointer;
        while end < text.len() {
            if let Some(escape) = self.option.escape {
                if text[end..].starts_with(escape) {
                    let after = end + escape.len_utf8();
                    if let Some(c) = text[after..].chars().next() {
                        end = after + c.len_utf8();
                        continue;
                    }
                }
            }
            if followers.opens_at(draft, text, end) {
                break;
            }
            match text[end..].chars().next() {
                Some(c) => end += c.len_utf8(),
                None => break,
            }
        }
        end
    }

    fn decode(&self, segment: &str) -> String {
        if let Some(placeholder) = &self.option.placeholder {
            if segment == placeholder {
                return String::new();
            }
        }
        let mut raw = String::with_capacity(segment.len());
        let mut chars = segment.chars();
        while let Some(c) = chars.next() {
            if Some(c) == self.option.escape {
                match chars.next() {
                    Some(encoded) => raw.push(self.option.decoded(encoded)),
                    None => raw.push(c),
                }
            } else {
                raw.push(c);
            }
        }
        raw
    }
}

impl Display for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<text>")
    }
}

impl IFragment<Symbol, SymbolDraft> for TextField {
    fn format(&self, subject: &Symbol, buffer: &mut String) -> bool {
        if subject.text.is_empty() {
            if let Some(placeholder) = &self.option.placeholder {
                buffer.push_str(placeholder);
                return true;
            }
        }
        for c in subject.text.chars() {
            match (self.option.escape, self.option.encoded(c)) {
                (Some(escape), Some(encoded)) => {
                    buffer.push(escape);
                    buffer.push(encoded);
                }
                _ => buffer.push(c),
            }
        }
        true
    }

    fn parse(
        &self,
        draft: &mut SymbolDraft,
        text: &str,
        pointer: usize,
        followers: &Followers<Symbol, SymbolDraft>,
    ) -> ScanResult {
        let end = self.scan(draft, text, pointer, followers);
        draft.text = Some(self.decode(&text[pointer..end]));
        Ok(end)
    }

    fn peek(
        &self,
        draft: &SymbolDraft,
        text: &str,
        pointer: usize,
        followers: &Followers<Symbol, SymbolDraft>,
    ) -> ScanResult {
        Ok(self.scan(draft, text, pointer, followers))
    }
}
