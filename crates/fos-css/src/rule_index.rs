//! Rule Index
//!
//! Buckets rules by the most selective part of each chain's subject
//! selector so a query only visits rules that could match its leaf node.

use std::collections::HashMap;

use crate::{NodeKey, Rule};

#[derive(Debug, Default, Clone)]
pub(crate) struct RuleIndex {
    /// Index by id of the subject selector
    by_id: HashMap<String, Vec<usize>>,
    /// Index by class
    by_class: HashMap<String, Vec<usize>>,
    /// Index by element name
    by_element: HashMap<String, Vec<usize>>,
    /// Subject is a bare `*`
    universal: Vec<usize>,
}

impl RuleIndex {
    pub fn build(rules: &[Rule]) -> Self {
        let mut index = Self::default();
        for (idx, rule) in rules.iter().enumerate() {
            for chain in &rule.selectors {
                let subject = chain.subject();
                let bucket = if let Some(id) = &subject.id {
                    index.by_id.entry(id.clone()).or_default()
                } else if let Some(class) = &subject.class {
                    index.by_class.entry(class.clone()).or_default()
                } else if let Some(element) = &subject.element {
                    index.by_element.entry(element.clone()).or_default()
                } else {
                    &mut index.universal
                };
                // Several chains of one rule may share a bucket
                if bucket.last() != Some(&idx) {
                    bucket.push(idx);
                }
            }
        }
        index
    }

    /// Sorted, deduplicated indices of rules that could match `leaf`
    pub fn candidates(&self, leaf: &NodeKey) -> Vec<usize> {
        let mut candidates = self.universal.clone();

        if let Some(indices) = self.by_element.get(&leaf.element) {
            candidates.extend_from_slice(indices);
        }
        if let Some(indices) = leaf.class.as_ref().and_then(|class| self.by_class.get(class)) {
            candidates.extend_from_slice(indices);
        }
        if let Some(indices) = leaf.id.as_ref().and_then(|id| self.by_id.get(id)) {
            candidates.extend_from_slice(indices);
        }

        candidates.sort_unstable();
        candidates.dedup();
        candidates
    }
}
