use crate::{Symbol, SymbolBuilder, SymbolField};
use std::fmt::{Display, Formatter};

impl Symbol {
    /// Create a symbol carrying only a type and a text; every other field keeps its default.
    pub fn new<T: Into<String>>(token_type: i32, text: T) -> Self {
        Self {
            token_type,
            text: text.into(),
            ..Symbol::default()
        }
    }

    /// The end-of-file symbol: type `-1`, text `<EOF>`.
    pub fn eof() -> Self {
        Symbol::new(-1, "<EOF>")
    }

    pub fn is_eof(&self) -> bool {
        self.token_type == -1
    }

    /// Compare two symbols on the given fields only.
    pub fn equals_on(&self, other: &Symbol, fields: &[SymbolField]) -> bool {
        fields.iter().all(|field| match field {
            SymbolField::Text => self.text == other.text,
            _ => field.number_of(self) == field.number_of(other),
        })
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self {
            token_type: 0,
            text: String::new(),
            index: -1,
            start: -1,
            stop: -1,
            channel: 0,
            line: -1,
            position: -1,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[@{},{}:{}={:?},<{}>,{}:{}]",
            self.index, self.start, self.stop, self.text, self.token_type, self.line, self.position
        )
    }
}

impl SymbolField {
    /// The value an integer field defaults to when a format does not mention it.
    pub fn default_number(self) -> i32 {
        match self {
            SymbolField::Type | SymbolField::Channel => 0,
            SymbolField::Text => 0,
            SymbolField::Index
            | SymbolField::Start
            | SymbolField::Stop
            | SymbolField::Line
            | SymbolField::Position => -1,
        }
    }

    /// Read this field's numeric value from a symbol. The text field reports its length.
    pub fn number_of(self, symbol: &Symbol) -> i32 {
        match self {
            SymbolField::Type => symbol.token_type,
            SymbolField::Text => symbol.text.len() as i32,
            SymbolField::Index => symbol.index,
            SymbolField::Start => symbol.start,
            SymbolField::Stop => symbol.stop,
            SymbolField::Channel => symbol.channel,
            SymbolField::Line => symbol.line,
            SymbolField::Position => symbol.position,
        }
    }
}

impl Display for SymbolField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SymbolField::Type => "type",
            SymbolField::Text => "text",
            SymbolField::Index => "index",
            SymbolField::Start => "start",
            SymbolField::Stop => "stop",
            SymbolField::Channel => "channel",
            SymbolField::Line => "line",
            SymbolField::Position => "position",
        };
        write!(f, "{}", name)
    }
}

impl SymbolBuilder {
    pub fn new(token_type: i32, text: &str) -> Self {
        Self {
            symbol: Symbol::new(token_type, text),
        }
    }

    pub fn index(mut self, index: i32) -> Self {
        self.symbol.index = index;
        self
    }

    pub fn range(mut self, start: i32, stop: i32) -> Self {
        self.symbol.start = start;
        self.symbol.stop = stop;
        self
    }

    pub fn channel(mut self, channel: i32) -> Self {
        self.symbol.channel = channel;
        self
    }

    pub fn at(mut self, line: i32, position: i32) -> Self {
        self.symbol.line = line;
        self.symbol.position = position;
        self
    }

    pub fn build(self) -> Symbol {
        self.symbol
    }
}
