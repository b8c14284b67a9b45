use crate::{BuildError, Fault, FormatError, ParseError};
use std::fmt::{Display, Formatter, Write};

impl BuildError {
    pub fn new(what: String, message: String) -> Self {
        Self { message, what }
    }
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "BuildError: {}-{}", self.what, self.message)
    }
}

impl FormatError {
    pub fn new(what: String, message: String) -> Self {
        Self { message, what }
    }
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "FormatError: {}-{}", self.what, self.message)
    }
}

impl ParseError {
    pub fn new(pointer: usize, message: String) -> Self {
        Self { pointer, message }
    }

    /// Render the public failure report for a parse of `text` whose attempts are summarized in
    /// `fault`: every diagnostic recorded at the furthest-progress position, followed by the
    /// input with a `>>` marker inserted at that position.
    pub fn failure(text: &str, fault: &Fault) -> Self {
        let pointer = fault.pointer();
        let mut message = format!("Parse failed at index {}:\n", pointer);
        if fault.is_clear() {
            writeln!(message, "Input does not satisfy the format.").unwrap();
        } else {
            for expectation in fault.expectations() {
                writeln!(message, "{}", expectation).unwrap();
            }
        }
        writeln!(message).unwrap();
        message.push_str(&Self::marked(text, pointer));
        ParseError::new(pointer, message)
    }

    /// Insert the `>>` failure marker into `text` at `pointer`.
    pub fn marked(text: &str, pointer: usize) -> String {
        let cut = pointer.min(text.len());
        format!("{}>>{}", &text[..cut], &text[cut..])
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.message)
    }
}
