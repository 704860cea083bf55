//! Selector Model & Matching
//!
//! Simple selectors, combinator chains, specificity, and right-to-left
//! matching of a chain against an ancestor path of node identities.

use std::fmt;

/// Style identity of one node: element name, optional class, optional id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub element: String,
    pub class: Option<String>,
    pub id: Option<String>,
}

impl NodeKey {
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            class: None,
            id: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.element)?;
        if let Some(class) = &self.class {
            write!(f, ".{class}")?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        Ok(())
    }
}

/// Selector specificity (a, b, c) where:
/// a = id selectors
/// b = class selectors
/// c = element-name selectors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    pub fn new(ids: u32, classes: u32, types: u32) -> Self {
        Self(ids, classes, types)
    }

    /// Add another specificity to this one
    pub fn add(&mut self, other: Specificity) {
        self.0 += other.0;
        self.1 += other.1;
        self.2 += other.2;
    }
}

/// Compound selector: element name (or `*`), optional class, optional id
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SimpleSelector {
    /// `None` is the wildcard
    pub element: Option<String>,
    pub class: Option<String>,
    pub id: Option<String>,
}

impl SimpleSelector {
    /// `*`
    pub fn any() -> Self {
        Self::default()
    }

    pub fn element(name: impl Into<String>) -> Self {
        Self {
            element: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Every present field must match exactly
    pub fn matches(&self, node: &NodeKey) -> bool {
        if let Some(element) = &self.element {
            if *element != node.element {
                return false;
            }
        }
        if let Some(class) = &self.class {
            if node.class.as_deref() != Some(class.as_str()) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        true
    }

    pub fn specificity(&self) -> Specificity {
        Specificity(
            self.id.is_some() as u32,
            self.class.is_some() as u32,
            self.element.is_some() as u32,
        )
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.element {
            Some(name) => f.write_str(name)?,
            None => f.write_str("*")?,
        }
        if let Some(class) = &self.class {
            write!(f, ".{class}")?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        Ok(())
    }
}

/// Selector combinators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Descendant (whitespace)
    Descendant,
    /// Direct child (>)
    Child,
}

/// One selector in a chain plus its relation to the selector on its left
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectorLink {
    /// Ignored on the first link of a chain
    pub combinator: Combinator,
    pub selector: SimpleSelector,
}

/// Non-empty chain of simple selectors, rightmost anchored to the queried node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectorChain {
    links: Vec<SelectorLink>,
    specificity: Specificity,
}

impl SelectorChain {
    /// Chain consisting of a single selector
    pub fn single(selector: SimpleSelector) -> Self {
        let specificity = selector.specificity();
        Self {
            links: vec![SelectorLink {
                combinator: Combinator::Descendant,
                selector,
            }],
            specificity,
        }
    }

    /// Append `selector`, related to the current rightmost selector by `combinator`
    pub fn push(&mut self, combinator: Combinator, selector: SimpleSelector) {
        self.specificity.add(selector.specificity());
        self.links.push(SelectorLink { combinator, selector });
    }

    /// Builder form of [`SelectorChain::push`]
    pub fn then(mut self, combinator: Combinator, selector: SimpleSelector) -> Self {
        self.push(combinator, selector);
        self
    }

    pub fn links(&self) -> &[SelectorLink] {
        &self.links
    }

    /// The selector matched against the queried node
    pub fn subject(&self) -> &SimpleSelector {
        // Chains are built from a first selector and only ever grow
        &self.links[self.links.len() - 1].selector
    }

    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    /// Does this chain match the leaf of `path` (ordered root to leaf)?
    pub fn matches(&self, path: &[NodeKey]) -> bool {
        let Some(leaf) = path.last() else {
            return false;
        };
        if self.links.len() == 1 {
            return self.subject().matches(leaf);
        }
        ChainMatcher::new(&self.links, path).matches(self.links.len(), path.len() - 1)
    }
}

impl fmt::Display for SelectorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, link) in self.links.iter().enumerate() {
            if i > 0 {
                match link.combinator {
                    Combinator::Descendant => f.write_str(" ")?,
                    Combinator::Child => f.write_str(" > ")?,
                }
            }
            link.selector.fmt(f)?;
        }
        Ok(())
    }
}

/// Right-to-left chain matcher
///
/// Each (link prefix, path position) pair is decided at most once, which
/// keeps descendant backtracking at O(links * depth^2).
struct ChainMatcher<'a> {
    links: &'a [SelectorLink],
    path: &'a [NodeKey],
    memo: Vec<Option<bool>>,
}

impl<'a> ChainMatcher<'a> {
    fn new(links: &'a [SelectorLink], path: &'a [NodeKey]) -> Self {
        Self {
            links,
            path,
            memo: vec![None; links.len() * path.len()],
        }
    }

    /// Do the first `count` links match with the last of them at `path[pos]`?
    fn matches(&mut self, count: usize, pos: usize) -> bool {
        let slot = (count - 1) * self.path.len() + pos;
        if let Some(known) = self.memo[slot] {
            return known;
        }

        let link = &self.links[count - 1];
        let matched = link.selector.matches(&self.path[pos])
            && (count == 1
                || match link.combinator {
                    Combinator::Child => pos > 0 && self.matches(count - 1, pos - 1),
                    // Nearest ancestor first, further up on failure
                    Combinator::Descendant => {
                        (0..pos).rev().any(|ancestor| self.matches(count - 1, ancestor))
                    }
                });

        self.memo[slot] = Some(matched);
        matched
    }
}
