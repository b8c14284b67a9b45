use super::SymbolDraft;
use crate::{Fault, IDraft, Symbol, SymbolField};

impl SymbolDraft {
    pub fn new() -> Self {
        Self {
            token_type: None,
            text: None,
            index: None,
            start: None,
            stop: None,
            channel: None,
            line: None,
            position: None,
            fault: Fault::new(),
        }
    }

    /// Bind an integer field. Bindings are recorded in source order; a later fragment for the
    /// same field overwrites the earlier one.
    pub fn record_number(&mut self, field: SymbolField, value: i32) {
        match field {
            SymbolField::Type => self.token_type = Some(value),
            SymbolField::Index => self.index = Some(value),
            SymbolField::Start => self.start = Some(value),
            SymbolField::Stop => self.stop = Some(value),
            SymbolField::Channel => self.channel = Some(value),
            SymbolField::Line => self.line = Some(value),
            SymbolField::Position => self.position = Some(value),
            SymbolField::Text => {}
        }
    }

    /// Build the symbol, defaulting every field the format did not bind.
    pub fn finish(self) -> Symbol {
        let defaults = Symbol::default();
        Symbol {
            token_type: self.token_type.unwrap_or(defaults.token_type),
            text: self.text.unwrap_or(defaults.text),
            index: self.index.unwrap_or(defaults.index),
            start: self.start.unwrap_or(defaults.start),
            stop: self.stop.unwrap_or(defaults.stop),
            channel: self.channel.unwrap_or(defaults.channel),
            line: self.line.unwrap_or(defaults.line),
            position: self.position.unwrap_or(defaults.position),
        }
    }
}

impl Default for SymbolDraft {
    fn default() -> Self {
        SymbolDraft::new()
    }
}

impl IDraft for SymbolDraft {
    fn fault(&self) -> &Fault {
        &self.fault
    }

    fn fault_mut(&mut self) -> &mut Fault {
        &mut self.fault
    }
}
