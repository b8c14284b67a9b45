use crate::{Followers, IDraft, IFragment};
use std::rc::Rc;

impl<'s, TSubject, TDraft: IDraft> Followers<'s, TSubject, TDraft> {
    /// No followers: a fragment parsing with this value is the last of its format.
    pub fn none() -> Self {
        Self {
            list: &[],
            rest: None,
        }
    }

    /// Chain `list` in front of the enclosing followers.
    pub fn chain(
        list: &'s [Rc<dyn IFragment<TSubject, TDraft>>],
        rest: &'s Followers<'s, TSubject, TDraft>,
    ) -> Self {
        Self {
            list,
            rest: Some(rest),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty() && self.rest.map_or(true, |rest| rest.is_empty())
    }

    /// Whether a follower would start a non-empty match at `pointer`.
    ///
    /// Followers are consulted in order; one that would match empty (a whitespace run, a
    /// skipped optional group) does not delimit anything and defers to the follower behind it.
    /// A follower that cannot match at all means `pointer` is not a boundary.
    pub fn opens_at(&self, draft: &TDraft, text: &str, pointer: usize) -> bool {
        for (index, fragment) in self.list.iter().enumerate() {
            let tail = Followers {
                list: &self.list[index + 1..],
                rest: self.rest,
            };
            match fragment.peek(draft, text, pointer, &tail) {
                Ok(end) if end > pointer => return true,
                Ok(_) => continue,
                Err(_) => return false,
            }
        }
        match self.rest {
            Some(rest) => rest.opens_at(draft, text, pointer),
            None => false,
        }
    }
}
