use super::constant::skip_blank;
use super::{SymbolDraft, SymbolFormatBuilder};
use crate::fragment::FragmentLogger;
use crate::{
    Fault, Followers, FormatError, IDraft, IFragment, IVocabulary, Log, ParseError, ScanResult,
    Symbol, SymbolField, SymbolFormat,
};
use std::fmt::Display;
use std::rc::Rc;

impl SymbolFormat {
    pub fn builder() -> SymbolFormatBuilder {
        SymbolFormatBuilder::new()
    }

    /// The ANTLR-style notation
    /// `[@<index>,<start>:<stop>='<text>',<type>[,channel=<channel>],<line>:<position>]`.
    ///
    /// The type renders as the symbolic name when the vocabulary has one, falling back to the
    /// literal name and then to the decimal type. The channel clause is omitted for the
    /// default channel.
    pub fn antlr(vocabulary: Option<Rc<dyn IVocabulary>>) -> Self {
        let mut builder = SymbolFormat::builder();
        if let Some(vocabulary) = vocabulary {
            builder.vocabulary(vocabulary);
        }
        builder
            .append_pattern(r"\[@N,B:E=\'X\',<S>[',channel='c],R:P\]")
            .expect("the ANTLR symbol pattern is well formed");
        builder
            .build()
            .expect("the ANTLR symbol format always builds")
    }

    /// The SIMPLE notation: three alternatives tried in order, `EOF`, `'<literal>'[:<channel>]`
    /// and `(<symbolic>[:<channel>] '<text>')`.
    ///
    /// Without a vocabulary the name alternatives degrade to one decimal alternative
    /// `(<type>[:<channel>] '<text>')`.
    pub fn simple(vocabulary: Option<Rc<dyn IVocabulary>>) -> Self {
        let mut builder = SymbolFormat::builder();
        builder.eof().alternative();
        match vocabulary {
            Some(vocabulary) => {
                builder.vocabulary(vocabulary);
                builder
                    .append_pattern(r"l[:c]")
                    .expect("the SIMPLE literal pattern is well formed");
                builder.alternative();
                builder
                    .append_pattern(r"(s[:c] \'X\')")
                    .expect("the SIMPLE symbolic pattern is well formed");
            }
            None => {
                builder
                    .append_pattern(r"(I[:c] \'X\')")
                    .expect("the SIMPLE symbol pattern is well formed");
            }
        }
        builder
            .build()
            .expect("the SIMPLE symbol format always builds")
    }

    /// The fields this format can print; symbols compared under this format are compared on
    /// these fields only.
    pub fn coverage(&self) -> &[SymbolField] {
        &self.coverage
    }

    /// Compare two symbols on the fields this format covers.
    pub fn equate(&self, left: &Symbol, right: &Symbol) -> bool {
        left.equals_on(right, &self.coverage)
    }

    pub fn vocabulary(&self) -> Option<&Rc<dyn IVocabulary>> {
        self.vocabulary.as_ref()
    }

    /// Set a log label to debug the format based on the level of [Log].
    pub fn set_log(&self, debugger: Log<&'static str>) -> Result<(), String> {
        self.debugger
            .set(debugger)
            .map_err(|err| format!("Log label {} is already assigned.", err))
    }

    /// Render one symbol.
    pub fn format(&self, symbol: &Symbol) -> Result<String, FormatError> {
        let mut buffer = String::new();
        if self.write_symbol(symbol, &mut buffer) {
            Ok(buffer)
        } else {
            Err(FormatError::new(
                "UnformattableSymbol".to_string(),
                format!("No alternative of the format applies to {}.", symbol),
            ))
        }
    }

    /// Render a list of symbols separated by single spaces.
    pub fn format_list(&self, symbols: &[Symbol]) -> Result<String, FormatError> {
        let mut buffer = String::new();
        for (index, symbol) in symbols.iter().enumerate() {
            if index != 0 {
                buffer.push(' ');
            }
            let mark = buffer.len();
            if !self.write_symbol(symbol, &mut buffer) {
                buffer.truncate(mark);
                return Err(FormatError::new(
                    "UnformattableSymbol".to_string(),
                    format!("No alternative of the format applies to {}.", symbol),
                ));
            }
        }
        Ok(buffer)
    }

    /// Parse exactly one symbol; trailing input is an error.
    pub fn parse(&self, text: &str) -> Result<Symbol, ParseError> {
        let mut fault = Fault::new();
        match self.advance_symbol(text, 0, &mut fault, &Followers::none()) {
            Ok((symbol, end)) => {
                if end == text.len() {
                    Ok(symbol)
                } else {
                    let mut trailing = Fault::new();
                    trailing.report(end, "Unexpected trailing input.".to_string());
                    Err(ParseError::failure(text, &trailing))
                }
            }
            Err(_) => Err(ParseError::failure(text, &fault)),
        }
    }

    /// Parse zero or more whitespace-separated symbols.
    ///
    /// Symbols whose format did not bind an index are numbered by their position in the list.
    pub fn parse_list(&self, text: &str) -> Result<Vec<Symbol>, ParseError> {
        let mut symbols: Vec<Symbol> = Vec::new();
        let mut pointer = 0;
        loop {
            pointer = skip_blank(text, pointer);
            if pointer >= text.len() {
                break;
            }
            let mut fault = Fault::new();
            match self.advance_symbol(text, pointer, &mut fault, &Followers::none()) {
                Ok((mut symbol, end)) => {
                    if end == pointer {
                        let mut empty = Fault::new();
                        empty.report(end, "The symbol format matched no input.".to_string());
                        return Err(ParseError::failure(text, &empty));
                    }
                    if symbol.index < 0 {
                        symbol.index = symbols.len() as i32;
                    }
                    symbols.push(symbol);
                    pointer = end;
                }
                Err(_) => return Err(ParseError::failure(text, &fault)),
            }
        }
        Ok(symbols)
    }

    /// A readable rendering of the compiled alternatives.
    pub fn outline(&self) -> String {
        self.variants
            .iter()
            .map(|variant| variant.to_string())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Render one symbol into `buffer` with the first alternative that applies.
    pub(crate) fn write_symbol(&self, symbol: &Symbol, buffer: &mut String) -> bool {
        for variant in &self.variants {
            let mark = buffer.len();
            if variant.format(symbol, buffer) {
                #[cfg(debug_assertions)]
                self.log_format_result(true);
                return true;
            }
            buffer.truncate(mark);
        }
        #[cfg(debug_assertions)]
        self.log_format_result(false);
        false
    }

    /// Parse one symbol mid-text. Each alternative runs on a fresh draft; the first success
    /// wins and failures are folded into `fault` by furthest progress.
    pub(crate) fn advance_symbol(
        &self,
        text: &str,
        pointer: usize,
        fault: &mut Fault,
        followers: &Followers<Symbol, SymbolDraft>,
    ) -> Result<(Symbol, usize), usize> {
        #[cfg(debug_assertions)]
        self.log_entry();

        for variant in &self.variants {
            let mut draft = SymbolDraft::new();
            match variant.parse(&mut draft, text, pointer, followers) {
                Ok(end) => {
                    #[cfg(debug_assertions)]
                    self.log_scan_result(text, &Ok(end));
                    return Ok((draft.finish(), end));
                }
                Err(_) => fault.merge(draft.fault()),
            }
        }

        #[cfg(debug_assertions)]
        self.log_scan_result(text, &Err(fault.pointer()));

        Err(fault.pointer())
    }

    /// Whether (and how far) any alternative would match at `pointer`, without recording.
    pub(crate) fn peek_symbol(
        &self,
        text: &str,
        pointer: usize,
        followers: &Followers<Symbol, SymbolDraft>,
    ) -> ScanResult {
        let draft = SymbolDraft::new();
        let mut deepest = pointer;
        for variant in &self.variants {
            match variant.peek(&draft, text, pointer, followers) {
                Ok(end) => return Ok(end),
                Err(at) => deepest = deepest.max(at),
            }
        }
        Err(deepest)
    }
}

impl FragmentLogger for SymbolFormat {
    fn debug_label(&self) -> Option<&Log<&'static str>> {
        self.debugger.get()
    }
}

impl Display for SymbolFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.outline())
    }
}
