use crate::Log;
use std::fmt::{Display, Formatter};

impl<T> Log<T> {
    /// The label carried by the level, absent for [Log::None].
    pub fn label(&self) -> Option<&T> {
        match self {
            Log::None => None,
            Log::Default(label)
            | Log::Success(label)
            | Log::Result(label)
            | Log::Verbose(label) => Some(label),
        }
    }

    /// How much the level reports; each level also reports everything the levels below it do.
    pub fn verbosity(&self) -> u8 {
        match self {
            Log::None => 0,
            Log::Default(_) => 1,
            Log::Success(_) => 2,
            Log::Result(_) => 3,
            Log::Verbose(_) => 4,
        }
    }

    /// Whether this level reports at least as much as `level`.
    pub fn covers<U>(&self, level: &Log<U>) -> bool {
        self.verbosity() >= level.verbosity()
    }
}

impl<T: Display> Display for Log<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{}", label),
            None => Ok(()),
        }
    }
}
