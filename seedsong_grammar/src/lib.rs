// seedsong_grammar: L-system axioms, rule sets, and parallel rewriting.
//
// The shared symbolic layer of seedsong. Downstream crates consume the
// expanded path this crate produces: `seedsong_turtle` walks it into drawing
// ops, `seedsong_music` walks it into note events. Neither re-parses or
// mutates it.
//
// Module overview:
// - `symbol.rs`: the reserved drawing alphabet + `SourceSpan` positions.
// - `rules.rs`:  `RuleSet`, the validated symbol → replacement mapping.
// - `expand.rs`: the parallel rewrite engine.
// - `lib.rs` (this file): `Grammar`, axiom + rules + iteration count, the
//   unit the configuration surface stores and presets construct.
//
// **Critical constraint: determinism.** Expansion is a pure function of
// (axiom, rules, iterations). No randomness, no clock reads, no observable
// iteration over unordered collections.

pub mod expand;
pub mod rules;
pub mod symbol;

pub use expand::expand;
pub use rules::{RuleSet, RuleSetError};
pub use symbol::{SourceSpan, is_step};

use serde::{Deserialize, Serialize};

/// A complete L-system grammar: the axiom, the rewrite rules, and how many
/// parallel rounds to apply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    /// Initial symbol sequence before any rewriting.
    pub axiom: String,
    /// Symbol → replacement rules; absent symbols rewrite to themselves.
    pub rules: RuleSet,
    /// Number of parallel rewrite rounds.
    pub iterations: u32,
}

impl Grammar {
    pub fn new(axiom: impl Into<String>, rules: RuleSet, iterations: u32) -> Self {
        Self {
            axiom: axiom.into(),
            rules,
            iterations,
        }
    }

    /// Expand the axiom through `iterations` parallel rewrite rounds.
    pub fn expand(&self) -> String {
        expand::expand(&self.axiom, &self.rules, self.iterations)
    }

    /// Upper bound on the expanded symbol count: axiom length times the
    /// longest replacement raised to the iteration count. Callers use this
    /// to warn before huge expansions; expansion itself never refuses.
    pub fn estimated_len(&self) -> u128 {
        let growth = self.rules.max_replacement_len().max(1) as u128;
        let mut bound = self.axiom.chars().count() as u128;
        for _ in 0..self.iterations {
            bound = bound.saturating_mul(growth);
        }
        bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprig() -> Grammar {
        let mut rules = RuleSet::new();
        rules.insert('F', "F[+F]");
        Grammar::new("F", rules, 3)
    }

    #[test]
    fn grammar_expand_matches_free_function() {
        let grammar = sprig();
        assert_eq!(
            grammar.expand(),
            expand::expand(&grammar.axiom, &grammar.rules, grammar.iterations)
        );
    }

    #[test]
    fn estimated_len_bounds_the_real_expansion() {
        let grammar = sprig();
        let real = grammar.expand().chars().count() as u128;
        assert!(grammar.estimated_len() >= real);
        // Doubling rule: the bound is exact in symbol count terms.
        let mut rules = RuleSet::new();
        rules.insert('F', "FF");
        let doubling = Grammar::new("F", rules, 10);
        assert_eq!(doubling.estimated_len(), 1 << 10);
        assert_eq!(doubling.expand().chars().count(), 1 << 10);
    }

    #[test]
    fn estimated_len_saturates_instead_of_overflowing() {
        let mut rules = RuleSet::new();
        rules.insert('F', "FFFFFFFF");
        let absurd = Grammar::new("F", rules, u32::MAX);
        assert_eq!(absurd.estimated_len(), u128::MAX);
    }

    #[test]
    fn grammar_serialization_roundtrip() {
        let grammar = sprig();
        let json = serde_json::to_string(&grammar).unwrap();
        let restored: Grammar = serde_json::from_str(&json).unwrap();
        assert_eq!(grammar, restored);
        // The rules field keeps the accepted textual form.
        assert!(json.contains(r#""rules":{"F":"F[+F]"}"#));
    }
}
