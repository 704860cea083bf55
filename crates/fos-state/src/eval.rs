//! Expression Evaluator
//!
//! Pure evaluation of an [`Expression`] against a flag lookup. Holds no
//! lock; the caller keeps the flag values stable for the duration of a call.

use crate::{Expression, FlagId, FlagSet};

/// Source of flag values
pub trait FlagLookup {
    /// Current value of `flag`; flags never set read `false`
    fn get(&self, flag: FlagId) -> bool;
}

impl FlagLookup for FlagSet {
    #[inline]
    fn get(&self, flag: FlagId) -> bool {
        FlagSet::get(self, flag)
    }
}

impl<F: Fn(FlagId) -> bool> FlagLookup for F {
    #[inline]
    fn get(&self, flag: FlagId) -> bool {
        self(flag)
    }
}

/// Evaluate `expr` against `flags`
pub fn evaluate<L: FlagLookup + ?Sized>(expr: &Expression, flags: &L) -> bool {
    match expr {
        Expression::Leaf { flag, negated } => flags.get(*flag) ^ *negated,
        Expression::And(children) => children.iter().all(|child| evaluate(child, flags)),
        Expression::Or(children) => children.iter().any(|child| evaluate(child, flags)),
        Expression::Xor(children) => {
            children.iter().filter(|child| evaluate(child, flags)).count() % 2 == 1
        }
        Expression::Not(inner) => !evaluate(inner, flags),
    }
}

impl Expression {
    /// Evaluate against `flags`
    pub fn evaluate<L: FlagLookup + ?Sized>(&self, flags: &L) -> bool {
        evaluate(self, flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_expression, FlagRegistry};

    #[test]
    fn test_unset_flags_read_false() {
        let mut registry = FlagRegistry::new();
        let expr = parse_expression("hover", false, &mut registry).unwrap();
        assert!(!expr.evaluate(&FlagSet::new()));

        let expr = parse_expression("!hover", false, &mut registry).unwrap();
        assert!(expr.evaluate(&FlagSet::new()));
    }

    #[test]
    fn test_and_or() {
        let mut registry = FlagRegistry::new();
        let and = parse_expression("a + !b", false, &mut registry).unwrap();
        let or = parse_expression("a | b", false, &mut registry).unwrap();
        let a = registry.intern("a");
        let b = registry.intern("b");

        let mut flags = FlagSet::new();
        assert!(!and.evaluate(&flags));
        assert!(!or.evaluate(&flags));

        flags.set(a, true);
        assert!(and.evaluate(&flags));
        assert!(or.evaluate(&flags));

        flags.set(b, true);
        assert!(!and.evaluate(&flags));
        assert!(or.evaluate(&flags));
    }

    #[test]
    fn test_closure_lookup() {
        let mut registry = FlagRegistry::new();
        let expr = parse_expression("x ^ y", false, &mut registry).unwrap();
        let x = registry.intern("x");

        assert!(expr.evaluate(&|flag: FlagId| flag == x));
        assert!(!evaluate(&expr, &|_: FlagId| true));
    }
}
