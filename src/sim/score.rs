//! Current/best score bookkeeping

use serde::Serialize;

/// Score for the current run and the best ever seen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreTracker {
    pub current: u32,
    pub best: u32,
}

impl ScoreTracker {
    pub fn new(best: u32) -> Self {
        Self { current: 0, best }
    }

    /// Start of a run
    pub fn reset_current(&mut self) {
        self.current = 0;
    }

    /// One obstacle passed; returns the new current score
    pub fn record_pass(&mut self) -> u32 {
        self.current += 1;
        self.current
    }

    /// End of a run: raise the best score if beaten. Returns true on a new best.
    pub fn finalize(&mut self) -> bool {
        if self.current > self.best {
            self.best = self.current;
            true
        } else {
            false
        }
    }
}
