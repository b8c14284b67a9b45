use super::{
    ConstantField, EOFField, LiteralField, NumberField, SymbolFormatBuilder, SymbolFragment,
    SymbolicField, TextField, TextOption, TypeField, TypeFormat, WhitespaceField,
};
use crate::fragment::Optional;
use crate::{BuildError, IVocabulary, SymbolField, SymbolFormat};
use once_cell::unsync::OnceCell;
use std::rc::Rc;

impl SymbolFormatBuilder {
    pub fn new() -> Self {
        Self {
            vocabulary: None,
            variants: Vec::new(),
            current: Vec::new(),
            optional: None,
            coverage: Vec::new(),
            after_whitespace: false,
        }
    }

    /// Set the vocabulary resolved by the name fragments (`s`, `S`, `l`, `L`).
    pub fn vocabulary(&mut self, vocabulary: Rc<dyn IVocabulary>) -> &mut Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    fn push(&mut self, fragment: SymbolFragment) {
        self.after_whitespace = false;
        match &mut self.optional {
            Some(group) => group.push(fragment),
            None => self.current.push(fragment),
        }
    }

    fn cover(&mut self, field: SymbolField) {
        if !self.coverage.contains(&field) {
            self.coverage.push(field);
        }
    }

    fn require_vocabulary(&self, what: &str) -> Result<Rc<dyn IVocabulary>, BuildError> {
        self.vocabulary.clone().ok_or_else(|| {
            BuildError::new(
                "MissingVocabulary".to_string(),
                format!("A {} fragment needs a vocabulary.", what),
            )
        })
    }

    /// Append a decimal fragment for an integer symbol field.
    pub fn number(&mut self, field: SymbolField, strict: bool) -> &mut Self {
        self.cover(field);
        self.push(Rc::new(NumberField::new(field, strict)));
        self
    }

    /// Append a text fragment with the given escape policy.
    pub fn text(&mut self, option: TextOption) -> &mut Self {
        self.cover(SymbolField::Text);
        self.push(Rc::new(TextField::new(option)));
        self
    }

    /// Append a symbolic type name fragment.
    pub fn symbolic(&mut self) -> Result<&mut Self, BuildError> {
        let vocabulary = self.require_vocabulary("symbolic type")?;
        self.cover(SymbolField::Type);
        self.push(Rc::new(SymbolicField::new(vocabulary)));
        Ok(self)
    }

    /// Append a literal type name fragment.
    pub fn literal(&mut self) -> Result<&mut Self, BuildError> {
        let vocabulary = self.require_vocabulary("literal type")?;
        self.cover(SymbolField::Type);
        self.push(Rc::new(LiteralField::new(vocabulary)));
        Ok(self)
    }

    /// Append a composite type fragment trying the name spaces of `order` in turn.
    pub fn typed(&mut self, order: TypeFormat) -> &mut Self {
        self.cover(SymbolField::Type);
        let vocabulary = self.vocabulary.clone();
        self.push(Rc::new(TypeField::new(order, vocabulary)));
        self
    }

    /// Append the `EOF` fragment.
    pub fn eof(&mut self) -> &mut Self {
        self.cover(SymbolField::Type);
        self.cover(SymbolField::Text);
        self.push(Rc::new(EOFField));
        self
    }

    /// Append a fixed piece of notation.
    pub fn constant(&mut self, value: &str) -> Result<&mut Self, BuildError> {
        if self.after_whitespace && value.chars().next().map_or(false, |c| c.is_whitespace()) {
            return Err(BuildError::new(
                "AmbiguousWhitespace".to_string(),
                format!(
                    "Literal {:?} may not start with whitespace directly after a whitespace fragment.",
                    value
                ),
            ));
        }
        self.push(Rc::new(ConstantField::new(value)));
        Ok(self)
    }

    /// Append a flexible whitespace fragment rendered as `value`.
    pub fn whitespace(&mut self, value: &str) -> Result<&mut Self, BuildError> {
        let field = WhitespaceField::new(value)
            .map_err(|message| BuildError::new("InvalidWhitespace".to_string(), message))?;
        self.push(Rc::new(field));
        self.after_whitespace = true;
        Ok(self)
    }

    /// Open an optional group; the fragments appended until
    /// [end_optional](SymbolFormatBuilder::end_optional) are skipped as a whole when they do
    /// not apply. Groups may not nest.
    pub fn begin_optional(&mut self) -> Result<&mut Self, BuildError> {
        if self.optional.is_some() {
            return Err(BuildError::new(
                "NestedOptional".to_string(),
                "Optional groups may not nest.".to_string(),
            ));
        }
        self.optional = Some(Vec::new());
        Ok(self)
    }

    /// Close the open optional group.
    pub fn end_optional(&mut self) -> Result<&mut Self, BuildError> {
        match self.optional.take() {
            Some(group) => {
                self.push(Rc::new(Optional::new(group)));
                Ok(self)
            }
            None => Err(BuildError::new(
                "UnmatchedOptional".to_string(),
                "There is no optional group to close.".to_string(),
            )),
        }
    }

    /// Close the variant under construction and start the next alternative.
    pub fn alternative(&mut self) -> &mut Self {
        let variant = std::mem::take(&mut self.current);
        self.variants.push(variant);
        self
    }

    /// Compile a compact pattern string (see the [module docs](crate::symbol_format)) into
    /// fragments of the variant under construction.
    pub fn append_pattern(&mut self, pattern: &str) -> Result<&mut Self, BuildError> {
        let mut literal = String::new();
        let mut blank = String::new();
        let mut chars = pattern.chars();

        macro_rules! flush {
            () => {
                if !literal.is_empty() {
                    let run = std::mem::take(&mut literal);
                    self.constant(&run)?;
                }
                if !blank.is_empty() {
                    let run = std::mem::take(&mut blank);
                    self.whitespace(&run)?;
                }
            };
        }

        while let Some(c) = chars.next() {
            match c {
                'I' => {
                    flush!();
                    self.number(SymbolField::Type, false);
                }
                's' => {
                    flush!();
                    self.symbolic()?;
                }
                'S' => {
                    flush!();
                    self.typed(TypeFormat::SymbolicFirst);
                }
                'l' => {
                    flush!();
                    self.literal()?;
                }
                'L' => {
                    flush!();
                    self.typed(TypeFormat::LiteralFirst);
                }
                'x' => {
                    flush!();
                    self.text(TextOption::raw());
                }
                'X' => {
                    flush!();
                    self.text(TextOption::escaped());
                }
                'N' | 'n' => {
                    flush!();
                    self.number(SymbolField::Index, c.is_lowercase());
                }
                'B' | 'b' => {
                    flush!();
                    self.number(SymbolField::Start, c.is_lowercase());
                }
                'E' | 'e' => {
                    flush!();
                    self.number(SymbolField::Stop, c.is_lowercase());
                }
                'C' | 'c' => {
                    flush!();
                    self.number(SymbolField::Channel, c.is_lowercase());
                }
                'P' | 'p' => {
                    flush!();
                    self.number(SymbolField::Position, c.is_lowercase());
                }
                'R' | 'r' => {
                    flush!();
                    self.number(SymbolField::Line, c.is_lowercase());
                }
                '[' => {
                    flush!();
                    self.begin_optional()?;
                }
                ']' => {
                    flush!();
                    self.end_optional()?;
                }
                '\'' => {
                    if !blank.is_empty() {
                        flush!();
                    }
                    let mut closed = false;
                    for q in chars.by_ref() {
                        if q == '\'' {
                            closed = true;
                            break;
                        }
                        literal.push(q);
                    }
                    if !closed {
                        return Err(BuildError::new(
                            "UnclosedQuote".to_string(),
                            format!("Quoted literal block is not closed in {:?}.", pattern),
                        ));
                    }
                }
                '\\' => match chars.next() {
                    Some(escaped) => {
                        if !blank.is_empty() {
                            flush!();
                        }
                        literal.push(escaped);
                    }
                    None => {
                        return Err(BuildError::new(
                            "DanglingEscape".to_string(),
                            format!("Escape at the end of {:?}.", pattern),
                        ));
                    }
                },
                blank_char if blank_char.is_whitespace() => {
                    if !literal.is_empty() {
                        flush!();
                    }
                    blank.push(blank_char);
                }
                other => {
                    if !blank.is_empty() {
                        flush!();
                    }
                    literal.push(other);
                }
            }
        }
        flush!();
        Ok(self)
    }

    /// Finish the format.
    pub fn build(&mut self) -> Result<SymbolFormat, BuildError> {
        if self.optional.is_some() {
            return Err(BuildError::new(
                "UnclosedOptional".to_string(),
                "An optional group is still open.".to_string(),
            ));
        }
        self.alternative();
        let variants: Vec<_> = std::mem::take(&mut self.variants)
            .into_iter()
            .filter(|variant| !variant.is_empty())
            .map(|variant| Rc::new(crate::fragment::Concat::new(variant)))
            .collect();
        if variants.is_empty() {
            return Err(BuildError::new(
                "EmptyFormat".to_string(),
                "The format holds no fragments.".to_string(),
            ));
        }
        let mut coverage = std::mem::take(&mut self.coverage);
        coverage.sort();
        Ok(SymbolFormat {
            variants,
            vocabulary: self.vocabulary.clone(),
            coverage,
            debugger: OnceCell::new(),
        })
    }
}

impl Default for SymbolFormatBuilder {
    fn default() -> Self {
        SymbolFormatBuilder::new()
    }
}
