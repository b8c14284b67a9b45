use super::{Concat, Optional};
use crate::{Followers, IDraft, IFragment, ScanResult};
use std::fmt::Display;
use std::rc::Rc;

impl<TSubject, TDraft: IDraft> Optional<TSubject, TDraft> {
    pub fn new(fragments: Vec<Rc<dyn IFragment<TSubject, TDraft>>>) -> Self {
        Self {
            body: Concat::new(fragments),
        }
    }
}

impl<TSubject, TDraft: IDraft> Display for Optional<TSubject, TDraft> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.body)
    }
}

impl<TSubject, TDraft: IDraft> IFragment<TSubject, TDraft> for Optional<TSubject, TDraft> {
    fn format(&self, subject: &TSubject, buffer: &mut String) -> bool {
        let mark = buffer.len();
        if !self.body.format(subject, buffer) {
            buffer.truncate(mark);
        }
        true
    }

    fn parse(
        &self,
        draft: &mut TDraft,
        text: &str,
        pointer: usize,
        followers: &Followers<TSubject, TDraft>,
    ) -> ScanResult {
        // The body runs on a clone so a half-recorded group leaves the draft untouched; its
        // failure diagnostics still feed the furthest-progress record.
        let mut trial = draft.clone();
        trial.fault_mut().reset();
        match self.body.parse(&mut trial, text, pointer, followers) {
            Ok(end) => {
                let mut fault = draft.fault().clone();
                fault.merge(trial.fault());
                *trial.fault_mut() = fault;
                *draft = trial;
                Ok(end)
            }
            Err(_) => {
                draft.fault_mut().merge(trial.fault());
                Ok(pointer)
            }
        }
    }

    fn peek(
        &self,
        draft: &TDraft,
        text: &str,
        pointer: usize,
        followers: &Followers<TSubject, TDraft>,
    ) -> ScanResult {
        match self.body.peek(draft, text, pointer, followers) {
            Ok(end) => Ok(end),
            Err(_) => Ok(pointer),
        }
    }
}
