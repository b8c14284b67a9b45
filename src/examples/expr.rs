//! The assignment-expression grammar the documentation examples are written against:
//!
//! ```text
//! prog : stat* EOF ;
//! stat : ID '=' expr NEWLINE ;
//! expr : INT | ID ;
//! ```

use crate::{Recognizer, Vocabulary};
use std::rc::Rc;

pub const ID: i32 = 1;
pub const INT: i32 = 2;
pub const NEWLINE: i32 = 3;
pub const ASSIGN: i32 = 4;

pub const PROG: i32 = 0;
pub const STAT: i32 = 1;
pub const EXPR: i32 = 2;

pub fn vocabulary() -> Rc<Vocabulary> {
    Rc::new(Vocabulary::new(
        vec![None, None, None, None, Some("'='".to_string())],
        vec![
            None,
            Some("ID".to_string()),
            Some("INT".to_string()),
            Some("NEWLINE".to_string()),
            None,
        ],
    ))
}

pub fn recognizer() -> Rc<Recognizer> {
    Rc::new(Recognizer::new(vocabulary(), vec!["prog", "stat", "expr"]))
}
