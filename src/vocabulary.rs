use crate::{IRecognizer, IVocabulary, Recognizer, Vocabulary};
use std::rc::Rc;

impl Vocabulary {
    /// Create a vocabulary from the per-type name tables, both indexed by token type.
    /// ### Arguments
    /// * `literal_names` - Canonical source forms including their quote characters, e.g. `'='`.
    /// * `symbolic_names` - Identifier-like grammar names, e.g. `ID`.
    pub fn new(literal_names: Vec<Option<String>>, symbolic_names: Vec<Option<String>>) -> Self {
        Self {
            literal_names,
            symbolic_names,
        }
    }

    /// Create a vocabulary holding symbolic names only.
    pub fn symbolic(symbolic_names: Vec<&str>) -> Self {
        Self {
            literal_names: Vec::new(),
            symbolic_names: symbolic_names
                .into_iter()
                .map(|name| Some(name.to_string()))
                .collect(),
        }
    }
}

impl IVocabulary for Vocabulary {
    fn literal_name(&self, token_type: i32) -> Option<&str> {
        if token_type < 0 {
            return None;
        }
        self.literal_names
            .get(token_type as usize)
            .and_then(|name| name.as_deref())
    }

    fn symbolic_name(&self, token_type: i32) -> Option<&str> {
        if token_type < 0 {
            return None;
        }
        self.symbolic_names
            .get(token_type as usize)
            .and_then(|name| name.as_deref())
    }

    fn max_token_type(&self) -> i32 {
        self.literal_names.len().max(self.symbolic_names.len()) as i32 - 1
    }
}

impl Recognizer {
    /// Create a recognizer from a vocabulary and the grammar's ordered rule name table.
    pub fn new(vocabulary: Rc<dyn IVocabulary>, rule_names: Vec<&str>) -> Self {
        Self {
            vocabulary,
            rule_names: rule_names.into_iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl IRecognizer for Recognizer {
    fn vocabulary(&self) -> Rc<dyn IVocabulary> {
        self.vocabulary.clone()
    }

    fn rule_names(&self) -> &[String] {
        &self.rule_names
    }
}
