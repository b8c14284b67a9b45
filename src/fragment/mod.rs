//! The printer/parser kernel: the composition utilities every format is assembled from.
//!
//! A format is a sequence of [fragments](crate::IFragment) run by a [Concat]. Fragment failure
//! is an ordinary value ([ScanResult](crate::ScanResult)), propagated up the sequence and
//! absorbed by an enclosing [Optional] or by an alternative sequence of the owning format.

mod concat;
mod followers;
mod optional;

#[cfg(test)]
mod __tests__;

use crate::{IDraft, IFragment, Log, Position, ScanResult};
use once_cell::unsync::OnceCell;
use std::rc::Rc;

/// A sequence of printer/parser fragments run in order.
///
/// Formatting appends each fragment's rendering; the first inapplicable fragment rewinds the
/// buffer and fails the sequence. Parsing consumes each fragment's notation in turn, handing
/// every fragment the remainder of the sequence as its followers.
pub struct Concat<TSubject, TDraft: IDraft> {
    fragments: Vec<Rc<dyn IFragment<TSubject, TDraft>>>,
    debugger: OnceCell<Log<&'static str>>,
}

/// A fragment group whose failure is silently skipped.
///
/// On format, an inapplicable body rewinds the buffer to the group's entry state and reports
/// success; on parse, a failing body restores the entry position and matches empty. Optional
/// groups may not nest.
pub struct Optional<TSubject, TDraft: IDraft> {
    body: Concat<TSubject, TDraft>,
}

pub(crate) trait FragmentLogger {
    fn debug_label(&self) -> Option<&Log<&'static str>>;

    fn log_entry(&self) {
        #[cfg(debug_assertions)]
        if let Some(label) = self.debug_label() {
            if label.covers(&Log::Verbose(())) {
                println!("[{}] trying", label);
            }
        }
    }

    fn log_scan_result(&self, _text: &str, _result: &ScanResult) {
        #[cfg(debug_assertions)]
        if let Some(label) = self.debug_label() {
            match _result {
                Ok(end) if label.covers(&Log::Success(())) => {
                    println!("[{}] parsed through {}", label, Position::locate(_text, *end));
                }
                Err(at) if label.covers(&Log::Result(())) => {
                    println!("[{}] failed at {}", label, Position::locate(_text, *at));
                }
                _ => {}
            }
        }
    }

    fn log_format_result(&self, _applied: bool) {
        #[cfg(debug_assertions)]
        if let Some(label) = self.debug_label() {
            if label.covers(&Log::Success(())) {
                println!(
                    "[{}] {}",
                    label,
                    if _applied { "formatted" } else { "format skipped" }
                );
            }
        }
    }
}
