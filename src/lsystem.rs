//! The grammar rewrite engine.
//!
//! [`LSystem`] owns the current derived string and rewrites it with a
//! [`RuleTable`]. Every round is simultaneous and context-free: each symbol of
//! the previous round is replaced by its production (or by itself when it has
//! none), and the next round scans the result.
//!
//! Derivation is not bounded. A production longer than one symbol grows the
//! string geometrically with the step count, and choosing the step count is
//! the caller's responsibility. Each round allocates exactly the bytes its
//! output needs.

use crate::grammar::{Alphabet, RuleTable};
use log::{debug, trace};

/// A deterministic, context-free L-System.
#[derive(Clone, Debug)]
pub struct LSystem {
    state: String,
    alphabet: Alphabet,
    rules: RuleTable,
}

impl LSystem {
    /// Creates an engine whose state is the axiom `initial`.
    ///
    /// The alphabet is stored for reference only and is not validated against
    /// the rule table.
    pub fn new(initial: impl Into<String>, alphabet: Alphabet, rules: RuleTable) -> Self {
        Self {
            state: initial.into(),
            alphabet,
            rules,
        }
    }

    /// The current derived string.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Replaces the current state, returning the previous one.
    pub fn set_state(&mut self, state: impl Into<String>) -> String {
        std::mem::replace(&mut self.state, state.into())
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Runs `steps` derivation rounds. `run(0)` leaves the state untouched.
    pub fn run(&mut self, steps: usize) {
        if steps == 0 {
            return;
        }

        let mut current = std::mem::take(&mut self.state);
        for round in 0..steps {
            current = self.derive(&current);
            trace!("round {}: {} bytes", round + 1, current.len());
        }

        debug!(
            "derived {} rounds, final state has {} symbols",
            steps,
            current.chars().count()
        );
        self.state = current;
    }

    /// One derivation round over `current`.
    fn derive(&self, current: &str) -> String {
        let len = current
            .chars()
            .map(|symbol| match self.rules.get(symbol) {
                Some(production) => production.len(),
                None => symbol.len_utf8(),
            })
            .sum();
        let mut next = String::with_capacity(len);

        for symbol in current.chars() {
            match self.rules.get(symbol) {
                Some(production) => next.push_str(production),
                None => next.push(symbol),
            }
        }

        next
    }
}
