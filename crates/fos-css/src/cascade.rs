//! Style Cascade & Resolver
//!
//! Picks the winning declaration for an attribute on a node by:
//! 1. Matching every candidate rule's selector chains against the path
//! 2. Keeping the highest specificity among the matches
//! 3. Breaking ties by declaration order (later wins), across stylesheets

use crate::{AttributeDescriptor, AttributeId, NodeKey, Rule, Specificity, StyleValue, Stylesheet, Value};

/// Style resolver over an ordered set of stylesheets
#[derive(Debug)]
pub struct StyleResolver {
    sheets: Vec<Stylesheet>,
    use_index: bool,
}

impl StyleResolver {
    pub fn new() -> Self {
        Self {
            sheets: Vec::new(),
            use_index: true,
        }
    }

    /// Visit only indexed candidate rules (default) or scan every rule
    pub fn with_index(mut self, use_index: bool) -> Self {
        self.use_index = use_index;
        self
    }

    /// Add a stylesheet; its rules come after every rule already added
    pub fn add_stylesheet(&mut self, stylesheet: Stylesheet) {
        self.sheets.push(stylesheet);
    }

    pub fn stylesheets(&self) -> &[Stylesheet] {
        &self.sheets
    }

    /// Resolve `attribute` for the leaf of `path`, falling back to its default
    pub fn resolve<T: StyleValue>(&self, attribute: &AttributeDescriptor<T>, path: &[NodeKey]) -> T {
        resolve_in(&self.sheets, self.use_index, attribute, path)
    }

    /// Winning declared value for `attribute`, if any rule matches
    pub fn winning_value(&self, attribute: AttributeId, path: &[NodeKey]) -> Option<&Value> {
        winner(&self.sheets, self.use_index, attribute, path)
    }
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Best match seen so far
struct Candidate<'a> {
    /// (specificity, sheet, rule order); larger wins
    key: (Specificity, usize, usize),
    value: &'a Value,
}

pub(crate) fn resolve_in<T: StyleValue>(
    sheets: &[Stylesheet],
    use_index: bool,
    attribute: &AttributeDescriptor<T>,
    path: &[NodeKey],
) -> T {
    winner(sheets, use_index, attribute.id(), path)
        .and_then(|value| attribute.typed(value))
        .unwrap_or_else(|| attribute.default_value())
}

fn winner<'a>(
    sheets: &'a [Stylesheet],
    use_index: bool,
    attribute: AttributeId,
    path: &[NodeKey],
) -> Option<&'a Value> {
    let mut best: Option<Candidate<'a>> = None;

    for (sheet_idx, sheet) in sheets.iter().enumerate() {
        if use_index {
            for rule_idx in sheet.candidates(path) {
                consider(&mut best, sheet_idx, &sheet.rules()[rule_idx], attribute, path);
            }
        } else {
            for rule in sheet.rules() {
                consider(&mut best, sheet_idx, rule, attribute, path);
            }
        }
    }

    if let Some(candidate) = &best {
        tracing::trace!(
            "{} resolved to {} (specificity {:?}, sheet {}, rule {})",
            attribute,
            candidate.value,
            candidate.key.0,
            candidate.key.1,
            candidate.key.2
        );
    }
    best.map(|candidate| candidate.value)
}

fn consider<'a>(
    best: &mut Option<Candidate<'a>>,
    sheet_idx: usize,
    rule: &'a Rule,
    attribute: AttributeId,
    path: &[NodeKey],
) {
    let Some(value) = rule.declaration(attribute) else {
        return;
    };
    let Some(specificity) = rule.matching_specificity(path) else {
        return;
    };

    let key = (specificity, sheet_idx, rule.order);
    if best.as_ref().is_none_or(|current| key > current.key) {
        *best = Some(Candidate { key, value });
    }
}
