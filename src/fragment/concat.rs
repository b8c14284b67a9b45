use super::{Concat, FragmentLogger};
use crate::{Followers, IDraft, IFragment, Log, ScanResult};
use once_cell::unsync::OnceCell;
use std::fmt::Display;
use std::rc::Rc;

impl<TSubject, TDraft: IDraft> Concat<TSubject, TDraft> {
    pub fn new(fragments: Vec<Rc<dyn IFragment<TSubject, TDraft>>>) -> Self {
        Self {
            fragments,
            debugger: OnceCell::new(),
        }
    }

    pub fn fragments(&self) -> &[Rc<dyn IFragment<TSubject, TDraft>>] {
        &self.fragments
    }

    /// Set a log label to debug the sequence based on the level of [Log].
    pub fn set_log(&self, debugger: Log<&'static str>) -> Result<(), String> {
        self.debugger
            .set(debugger)
            .map_err(|err| format!("Log label {} is already assigned.", err))
    }
}

impl<TSubject, TDraft: IDraft> FragmentLogger for Concat<TSubject, TDraft> {
    fn debug_label(&self) -> Option<&Log<&'static str>> {
        self.debugger.get()
    }
}

impl<TSubject, TDraft: IDraft> Display for Concat<TSubject, TDraft> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for fragment in &self.fragments {
            write!(f, "{}", fragment)?;
        }
        Ok(())
    }
}

impl<TSubject, TDraft: IDraft> IFragment<TSubject, TDraft> for Concat<TSubject, TDraft> {
    fn format(&self, subject: &TSubject, buffer: &mut String) -> bool {
        for fragment in &self.fragments {
            let mark = buffer.len();
            if !fragment.format(subject, buffer) {
                buffer.truncate(mark);
                return false;
            }
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
        #[cfg(debug_assertions)]
        self.log_entry();

        let mut moved = pointer;
        for (index, fragment) in self.fragments.iter().enumerate() {
            let tail = Followers::chain(&self.fragments[index + 1..], followers);
            match fragment.parse(draft, text, moved, &tail) {
                Ok(end) => moved = end,
                Err(at) => {
                    #[cfg(debug_assertions)]
                    self.log_scan_result(text, &Err(at));
                    return Err(at);
                }
            }
        }

        #[cfg(debug_assertions)]
        self.log_scan_result(text, &Ok(moved));

        Ok(moved)
    }

    fn peek(
        &self,
        draft: &TDraft,
        text: &str,
        pointer: usize,
        followers: &Followers<TSubject, TDraft>,
    ) -> ScanResult {
        let mut moved = pointer;
        for (index, fragment) in self.fragments.iter().enumerate() {
            let tail = Followers::chain(&self.fragments[index + 1..], followers);
            moved = fragment.peek(draft, text, moved, &tail)?;
        }
        Ok(moved)
    }
}
