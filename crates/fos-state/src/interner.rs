//! Flag Registry - Intern flag names into stable handles
//!
//! Every occurrence of a flag name, in any expression, maps to the same
//! [`FlagId`]. The table only grows; handles stay valid for its lifetime.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use crate::{Expression, ExpressionParser, StateError};

/// Interned flag handle - just 4 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct FlagId(pub u32);

impl FlagId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FlagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "flag#{}", self.0)
    }
}

/// Append-only name → handle table
#[derive(Debug, Clone, Default)]
pub struct FlagRegistry {
    /// Names by handle
    names: Vec<Box<str>>,
    /// Map from name to handle
    ids: HashMap<Box<str>, FlagId>,
}

impl FlagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with `names` pre-interned in order
    pub fn with_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut registry = Self::new();
        for name in names {
            registry.intern(name);
        }
        registry
    }

    /// Intern a flag name, returning its handle
    /// If the name is already interned, returns the existing handle
    pub fn intern(&mut self, name: &str) -> FlagId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }

        let id = FlagId(self.names.len() as u32);
        self.names.push(name.into());
        self.ids.insert(name.into(), id);
        tracing::trace!("Interned flag `{}` as {}", name, id);
        id
    }

    /// Handle for an already interned name
    pub fn lookup(&self, name: &str) -> Option<FlagId> {
        self.ids.get(name).copied()
    }

    /// Name behind a handle
    pub fn name(&self, id: FlagId) -> Option<&str> {
        self.names.get(id.index()).map(|name| &**name)
    }

    /// Number of interned flags
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All (handle, name) pairs in interning order
    pub fn iter(&self) -> impl Iterator<Item = (FlagId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(idx, name)| (FlagId(idx as u32), &**name))
    }
}

/// Registry shared between threads
///
/// Interning takes the write lock only for names not seen before, so at most
/// one handle is ever handed out per name.
#[derive(Debug, Default)]
pub struct SharedFlagRegistry {
    inner: RwLock<FlagRegistry>,
}

impl SharedFlagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, name: &str) -> FlagId {
        // Fast path: already interned
        if let Some(id) = self.lookup(name) {
            return id;
        }
        // `intern` re-checks under the write lock
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .intern(name)
    }

    pub fn lookup(&self, name: &str) -> Option<FlagId> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .lookup(name)
    }

    pub fn name(&self, id: FlagId) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .name(id)
            .map(str::to_string)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse while holding the write lock for the whole expression
    pub fn parse(
        &self,
        parser: &ExpressionParser,
        text: &str,
        negate_all: bool,
    ) -> Result<Expression, StateError> {
        let mut registry = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        parser.parse(text, negate_all, &mut registry)
    }

    /// Copy of the current table
    pub fn snapshot(&self) -> FlagRegistry {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn into_inner(self) -> FlagRegistry {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<FlagRegistry> for SharedFlagRegistry {
    fn from(registry: FlagRegistry) -> Self {
        Self { inner: RwLock::new(registry) }
    }
}
