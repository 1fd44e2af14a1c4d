// Validated symbol → replacement mappings.
//
// A `RuleSet` is the rewrite table of an L-system: each single-character
// symbol maps to the string it becomes in one expansion round. Symbols
// without an entry rewrite to themselves, so the empty rule set is the
// identity grammar.
//
// `from_json_str` is the validation boundary for user-edited rule text of
// the form `{"F": "F[+F]"}`. Everything downstream of it (`expand.rs`)
// assumes a well-formed mapping and has no error paths of its own, so
// malformed input must be rejected here with a user-visible error. The
// caller keeps its previous valid rule set on failure, never a partial one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Rewrite table mapping single-character symbols to replacement strings.
///
/// Serializes as a plain JSON object (`{"F": "F[+F]"}`), the same textual
/// shape the configuration surface accepts. Entries iterate in symbol order,
/// so serialized rule sets are stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: BTreeMap<char, String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the rule for `symbol`.
    pub fn insert(&mut self, symbol: char, replacement: impl Into<String>) {
        self.rules.insert(symbol, replacement.into());
    }

    /// The replacement for `symbol`, if one is defined.
    pub fn get(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Entries in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.rules.iter().map(|(&symbol, repl)| (symbol, repl.as_str()))
    }

    /// Symbol count of the longest replacement (0 for an empty rule set).
    /// Used as a per-round growth factor for capacity hints and for
    /// `Grammar::estimated_len`.
    pub fn max_replacement_len(&self) -> usize {
        self.rules
            .values()
            .map(|repl| repl.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Parse and validate user-edited rule text.
    ///
    /// The accepted form is a JSON object whose keys are single symbols and
    /// whose values are replacement strings. Anything else (a non-object
    /// root, a key that is not exactly one symbol, a non-string value) is
    /// rejected before it can reach the expander.
    pub fn from_json_str(text: &str) -> Result<Self, RuleSetError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let serde_json::Value::Object(entries) = value else {
            return Err(RuleSetError::NotAnObject);
        };

        let mut rules = BTreeMap::new();
        for (key, value) in entries {
            let mut symbols = key.chars();
            let symbol = match (symbols.next(), symbols.next()) {
                (Some(symbol), None) => symbol,
                _ => return Err(RuleSetError::BadSymbol { key }),
            };
            let serde_json::Value::String(replacement) = value else {
                return Err(RuleSetError::NonStringReplacement { symbol });
            };
            rules.insert(symbol, replacement);
        }
        Ok(Self { rules })
    }
}

/// Why a rule-text parse was rejected.
///
/// These are user-visible: the configuration surface shows the message and
/// keeps the previously valid rule set active.
#[derive(Debug)]
pub enum RuleSetError {
    /// The text was not valid JSON at all.
    Json(serde_json::Error),
    /// The top-level JSON value was not an object.
    NotAnObject,
    /// An object key was empty or longer than one symbol.
    BadSymbol { key: String },
    /// The replacement for `symbol` was not a string.
    NonStringReplacement { symbol: char },
}

impl fmt::Display for RuleSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSetError::Json(e) => write!(f, "rule text is not valid JSON: {e}"),
            RuleSetError::NotAnObject => {
                write!(f, "rule text must be a JSON object like {{\"F\": \"F[+F]\"}}")
            }
            RuleSetError::BadSymbol { key } => {
                write!(f, "rule key {key:?} must be exactly one symbol")
            }
            RuleSetError::NonStringReplacement { symbol } => {
                write!(f, "replacement for {symbol:?} must be a string")
            }
        }
    }
}

impl std::error::Error for RuleSetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuleSetError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RuleSetError {
    fn from(e: serde_json::Error) -> Self {
        RuleSetError::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wellformed_rule_text() {
        let rules = RuleSet::from_json_str(r#"{"F": "F[+F]", "G": "GG"}"#).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.get('F'), Some("F[+F]"));
        assert_eq!(rules.get('G'), Some("GG"));
        assert_eq!(rules.get('X'), None);
    }

    #[test]
    fn empty_object_is_identity_rule_set() {
        let rules = RuleSet::from_json_str("{}").unwrap();
        assert!(rules.is_empty());
        assert_eq!(rules.max_replacement_len(), 0);
    }

    #[test]
    fn rejects_invalid_json() {
        let err = RuleSet::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, RuleSetError::Json(_)));
    }

    #[test]
    fn rejects_non_object_roots() {
        for text in [r#"["F"]"#, "42", r#""F""#, "null", "true"] {
            let err = RuleSet::from_json_str(text).unwrap_err();
            assert!(matches!(err, RuleSetError::NotAnObject), "text: {text}");
        }
    }

    #[test]
    fn rejects_multi_symbol_keys() {
        let err = RuleSet::from_json_str(r#"{"FG": "F"}"#).unwrap_err();
        assert!(matches!(err, RuleSetError::BadSymbol { .. }));
    }

    #[test]
    fn rejects_empty_keys() {
        let err = RuleSet::from_json_str(r#"{"": "F"}"#).unwrap_err();
        assert!(matches!(err, RuleSetError::BadSymbol { .. }));
    }

    #[test]
    fn rejects_non_string_replacements() {
        for text in [r#"{"F": 3}"#, r#"{"F": ["F"]}"#, r#"{"F": null}"#] {
            let err = RuleSet::from_json_str(text).unwrap_err();
            assert!(
                matches!(err, RuleSetError::NonStringReplacement { symbol: 'F' }),
                "text: {text}"
            );
        }
    }

    #[test]
    fn error_messages_name_the_offender() {
        let err = RuleSet::from_json_str(r#"{"FG": "F"}"#).unwrap_err();
        assert!(err.to_string().contains("FG"));
        let err = RuleSet::from_json_str(r#"{"F": 3}"#).unwrap_err();
        assert!(err.to_string().contains('F'));
    }

    #[test]
    fn max_replacement_len_counts_symbols() {
        let mut rules = RuleSet::new();
        rules.insert('F', "F[+F]F[-F]");
        rules.insert('G', "GG");
        assert_eq!(rules.max_replacement_len(), 10);
    }

    #[test]
    fn serialization_is_the_accepted_textual_form() {
        let mut rules = RuleSet::new();
        rules.insert('F', "F[+F]");
        let json = serde_json::to_string(&rules).unwrap();
        assert_eq!(json, r#"{"F":"F[+F]"}"#);
        let restored = RuleSet::from_json_str(&json).unwrap();
        assert_eq!(restored, rules);
    }

    #[test]
    fn iteration_is_symbol_ordered() {
        let mut rules = RuleSet::new();
        rules.insert('G', "G");
        rules.insert('+', "+");
        rules.insert('F', "F");
        let symbols: Vec<char> = rules.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec!['+', 'F', 'G']);
    }
}
