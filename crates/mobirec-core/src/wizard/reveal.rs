//! Incremental text reveal ("typewriter") with generation-checked ticks.
//!
//! Starting a new reveal bumps the generation. A tick carrying an older
//! ticket is reported as `Stale` and changes nothing.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay between two revealed characters.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(35);

/// Handle for one reveal run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealTicket(u64);

/// Outcome of one `advance` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealStep {
    /// One more character is visible.
    Frame(String),
    /// The whole text is visible.
    Finished,
    /// The ticket was superseded by a newer reveal.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct TextReveal {
    generation: u64,
    target: Vec<char>,
    shown: usize,
    finished: bool,
}

impl TextReveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin revealing `text` from the first character, superseding any
    /// reveal in progress.
    pub fn start(&mut self, text: &str) -> RevealTicket {
        self.generation += 1;
        self.target = text.chars().collect();
        self.shown = 0;
        self.finished = false;
        RevealTicket(self.generation)
    }

    pub fn ticket(&self) -> RevealTicket {
        RevealTicket(self.generation)
    }

    pub fn advance(&mut self, ticket: RevealTicket) -> RevealStep {
        if ticket.0 != self.generation {
            return RevealStep::Stale;
        }
        if self.shown < self.target.len() {
            self.shown += 1;
            return RevealStep::Frame(self.displayed());
        }
        self.finished = true;
        RevealStep::Finished
    }

    /// Show the full text at once.
    pub fn finish(&mut self) {
        self.shown = self.target.len();
        self.finished = true;
    }

    pub fn displayed(&self) -> String {
        self.target[..self.shown].iter().collect()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
