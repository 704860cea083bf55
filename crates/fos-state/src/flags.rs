//! Flag Set
//!
//! Caller-owned runtime flag values. Flags never set read `false`.

use std::collections::BTreeSet;

use crate::FlagId;

/// Flags currently on, ordered by [`FlagId`]
///
/// Storage grows with the number of flags on, not with the largest id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    on: BTreeSet<FlagId>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, flag: FlagId) -> bool {
        self.on.contains(&flag)
    }

    pub fn set(&mut self, flag: FlagId, value: bool) {
        if value {
            self.on.insert(flag);
        } else {
            self.on.remove(&flag);
        }
    }

    /// Flip a flag, returning its new value
    pub fn toggle(&mut self, flag: FlagId) -> bool {
        let value = !self.get(flag);
        self.set(flag, value);
        value
    }

    /// Reset every flag to `false`
    pub fn clear(&mut self) {
        self.on.clear();
    }

    /// Flags currently set, in id order
    pub fn active(&self) -> impl Iterator<Item = FlagId> + '_ {
        self.on.iter().copied()
    }
}

impl FromIterator<FlagId> for FlagSet {
    /// Set with exactly the given flags on
    fn from_iter<I: IntoIterator<Item = FlagId>>(iter: I) -> Self {
        let mut set = Self::new();
        for flag in iter {
            set.set(flag, true);
        }
        set
    }
}
