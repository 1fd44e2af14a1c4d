// Parallel rewriting: the L-system expansion engine.
//
// One expansion round replaces every symbol of the current sequence
// simultaneously: each symbol sees only the pre-round sequence, which is
// what makes this a Lindenmayer system rather than leftmost-first term
// rewriting. `iterations` rounds starting from the axiom produce the
// expanded path both interpreter walks consume.
//
// Growth is geometric and deliberately unguarded: seven rounds of a
// branching rule already reach millions of symbols, and that is an accepted
// cost, not an error. Callers wanting a ceiling impose it on `iterations`
// before calling; `Grammar::estimated_len` (lib.rs) gives them a bound to
// decide with.

use crate::rules::RuleSet;
use rustc_hash::FxHashMap;

/// Expand `axiom` through `iterations` parallel rewrite rounds.
///
/// Symbols without a rule rewrite to themselves, so an empty rule set or
/// zero iterations returns the axiom unchanged.
pub fn expand(axiom: &str, rules: &RuleSet, iterations: u32) -> String {
    if iterations == 0 || rules.is_empty() {
        return axiom.to_string();
    }

    // Lookup only; iteration order of the table is never observed.
    let table: FxHashMap<char, &str> = rules.iter().collect();
    let growth = rules.max_replacement_len().max(1);

    let mut current = axiom.to_string();
    for _ in 0..iterations {
        let mut next = String::with_capacity(current.len().saturating_mul(growth));
        for symbol in current.chars() {
            match table.get(&symbol) {
                Some(replacement) => next.push_str(replacement),
                None => next.push(symbol),
            }
        }
        current = next;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(entries: &[(char, &str)]) -> RuleSet {
        let mut rules = RuleSet::new();
        for &(symbol, replacement) in entries {
            rules.insert(symbol, replacement);
        }
        rules
    }

    #[test]
    fn no_rules_is_identity_for_any_iteration_count() {
        let empty = RuleSet::new();
        for n in [0, 1, 5, 20] {
            assert_eq!(expand("F+[G]$", &empty, n), "F+[G]$");
        }
    }

    #[test]
    fn zero_iterations_returns_axiom() {
        let rules = rules(&[('F', "FF")]);
        assert_eq!(expand("F+F", &rules, 0), "F+F");
    }

    #[test]
    fn doubling_rule_grows_as_two_to_the_n() {
        let rules = rules(&[('F', "FF")]);
        for n in 0..12u32 {
            let path = expand("F", &rules, n);
            assert_eq!(path.chars().count(), 1 << n, "iteration {n}");
        }
    }

    #[test]
    fn rounds_compose() {
        // expand(s, rules, 2) == expand(expand(s, rules, 1), rules, 1)
        let rules = rules(&[('F', "F[+F]F[-F]"), ('G', "GF")]);
        let axiom = "F-G-F";
        let two_at_once = expand(axiom, &rules, 2);
        let one_then_one = expand(&expand(axiom, &rules, 1), &rules, 1);
        assert_eq!(two_at_once, one_then_one);
    }

    #[test]
    fn every_symbol_sees_the_pre_round_sequence() {
        // With leftmost-first rewriting, the F produced by the G rule would
        // be rewritten again within the same round. Parallel rewriting must
        // leave it alone until the next round.
        let rules = rules(&[('G', "F"), ('F', "GG")]);
        assert_eq!(expand("GF", &rules, 1), "FGG");
    }

    #[test]
    fn unknown_symbols_pass_through() {
        let rules = rules(&[('F', "F+F")]);
        assert_eq!(expand("XFX", &rules, 1), "XF+FX");
        assert_eq!(expand("XFX", &rules, 2), "XF+F+F+FX");
    }

    #[test]
    fn two_symbol_dragon_rules() {
        // Heighway dragon: F → F+G, G → F-G.
        let rules = rules(&[('F', "F+G"), ('G', "F-G")]);
        assert_eq!(expand("F", &rules, 1), "F+G");
        assert_eq!(expand("F", &rules, 2), "F+G+F-G");
        assert_eq!(expand("F", &rules, 3), "F+G+F-G+F+G-F-G");
    }

    #[test]
    fn sprig_rule_matches_hand_expansion() {
        // The sprig default: F → F[+F].
        let rules = rules(&[('F', "F[+F]")]);
        assert_eq!(expand("F", &rules, 1), "F[+F]");
        assert_eq!(expand("F", &rules, 2), "F[+F][+F[+F]]");
    }

    #[test]
    fn open_alphabet_accepts_non_ascii_symbols() {
        let rules = rules(&[('♪', "F♪F")]);
        assert_eq!(expand("♪", &rules, 2), "FF♪FF");
    }

    #[test]
    fn replacement_may_be_empty() {
        // An empty replacement erases the symbol. Classic grammars prune
        // scaffold symbols this way after they have steered a few rounds.
        let rules = rules(&[('X', "")]);
        assert_eq!(expand("FXF", &rules, 1), "FF");
    }
}
