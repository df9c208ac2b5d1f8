//! Fault-injecting sources shared by the unit tests.

use std::collections::VecDeque;

use crate::source::Source;

/// Replays a fixed script of outcomes, then fails forever.
#[derive(Debug, Default)]
pub(crate) struct Scripted {
    outcomes: VecDeque<Option<u64>>,
    pub(crate) attempts: u32,
}

impl Scripted {
    pub(crate) fn new(outcomes: impl IntoIterator<Item = Option<u64>>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
            attempts: 0,
        }
    }

    /// Succeeds with each word in turn.
    pub(crate) fn words(words: impl IntoIterator<Item = u64>) -> Self {
        Self::new(words.into_iter().map(Some))
    }

    pub(crate) fn always_failing() -> Self {
        Self::default()
    }
}

impl Source for Scripted {
    fn try_u32(&mut self) -> Option<u32> {
        self.try_u64().map(|v| v as u32)
    }

    fn try_u64(&mut self) -> Option<u64> {
        self.attempts += 1;
        self.outcomes.pop_front().flatten()
    }
}

/// A source that behaves like a CPU without the instruction.
#[derive(Debug, Default)]
pub(crate) struct Absent {
    pub(crate) attempts: u32,
}

impl Source for Absent {
    fn try_u32(&mut self) -> Option<u32> {
        self.attempts += 1;
        None
    }

    fn try_u64(&mut self) -> Option<u64> {
        self.attempts += 1;
        None
    }

    fn is_available(&self) -> bool {
        false
    }
}
