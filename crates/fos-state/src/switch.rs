//! State Switch
//!
//! A value gated on state expressions: the first case whose expression
//! holds wins, otherwise the fallback.

use crate::{Expression, FlagId, FlagLookup};

/// Ordered `(expression, value)` cases plus a fallback
#[derive(Debug, Clone, PartialEq)]
pub struct StateSwitch<T> {
    cases: Vec<(Expression, T)>,
    fallback: T,
}

impl<T> StateSwitch<T> {
    pub fn new(fallback: T) -> Self {
        Self { cases: Vec::new(), fallback }
    }

    /// Append a case; earlier cases take precedence
    pub fn case(mut self, when: Expression, value: T) -> Self {
        self.push(when, value);
        self
    }

    pub fn push(&mut self, when: Expression, value: T) {
        self.cases.push((when, value));
    }

    pub fn cases(&self) -> &[(Expression, T)] {
        &self.cases
    }

    pub fn fallback(&self) -> &T {
        &self.fallback
    }

    /// Value for the current flags
    pub fn select<L: FlagLookup + ?Sized>(&self, flags: &L) -> &T {
        self.cases
            .iter()
            .find(|(when, _)| when.evaluate(flags))
            .map_or(&self.fallback, |(_, value)| value)
    }

    /// Distinct flags any case reads; a change to one of them may change
    /// the selected value
    pub fn flags(&self) -> Vec<FlagId> {
        let mut flags = Vec::new();
        for flag in self.cases.iter().flat_map(|(when, _)| when.flags()) {
            if !flags.contains(&flag) {
                flags.push(flag);
            }
        }
        flags
    }
}
