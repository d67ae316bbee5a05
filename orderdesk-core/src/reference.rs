//! Reference tables used to validate and rewrite uploaded orders.
//!
//! Both tables compare case-insensitively: keys are trimmed and upper-cased
//! on the way in, and callers look up upper-cased values.

use std::collections::{BTreeMap, HashMap, HashSet};

/// Upper-case and trim a reference key.
pub fn fold_key(s: &str) -> String {
    s.trim().to_uppercase()
}

/// Broker code to broker short name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrokerReference {
    by_code: HashMap<String, String>,
}

impl BrokerReference {
    /// Build from (code, short name) pairs. The first occurrence of a code
    /// wins; blank codes are skipped.
    pub fn from_pairs<C, S>(pairs: impl IntoIterator<Item = (C, S)>) -> Self
    where
        C: AsRef<str>,
        S: Into<String>,
    {
        let mut by_code = HashMap::new();
        for (code, short) in pairs {
            let code = fold_key(code.as_ref());
            if code.is_empty() {
                continue;
            }
            by_code.entry(code).or_insert_with(|| short.into());
        }
        Self { by_code }
    }

    pub fn short_name(&self, code: &str) -> Option<&str> {
        self.by_code.get(&fold_key(code)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// Valid scheme short names, with the full scheme name kept for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemeAllowList {
    short_names: HashSet<String>,
    full_names: BTreeMap<String, String>,
}

impl SchemeAllowList {
    /// Build from (short name, full name) pairs. Blank short names are skipped.
    pub fn from_pairs<S, N>(pairs: impl IntoIterator<Item = (S, N)>) -> Self
    where
        S: AsRef<str>,
        N: Into<String>,
    {
        let mut list = Self::default();
        for (short, full) in pairs {
            let key = fold_key(short.as_ref());
            if key.is_empty() {
                continue;
            }
            if list.short_names.insert(key.clone()) {
                list.full_names.insert(key, full.into());
            }
        }
        list
    }

    /// Membership test on a scheme short name, ignoring case and padding.
    pub fn contains(&self, short_name: &str) -> bool {
        let key = fold_key(short_name);
        !key.is_empty() && self.short_names.contains(&key)
    }

    pub fn full_name(&self, short_name: &str) -> Option<&str> {
        self.full_names.get(&fold_key(short_name)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.short_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.short_names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broker_lookup_is_case_insensitive() {
        let brokers = BrokerReference::from_pairs([("abc", "ABCBRK"), ("XYZ ", "XYZSEC")]);
        assert_eq!(brokers.short_name("ABC"), Some("ABCBRK"));
        assert_eq!(brokers.short_name("xyz"), Some("XYZSEC"));
        assert_eq!(brokers.short_name("nope"), None);
    }

    #[test]
    fn test_first_broker_code_wins() {
        let brokers = BrokerReference::from_pairs([("ABC", "FIRST"), ("abc", "SECOND"), ("", "BLANK")]);
        assert_eq!(brokers.len(), 1);
        assert_eq!(brokers.short_name("abc"), Some("FIRST"));
    }

    #[test]
    fn test_scheme_membership() {
        let schemes = SchemeAllowList::from_pairs([("Growth Fund", "The Growth Fund Inc."), ("  ", "blank")]);
        assert_eq!(schemes.len(), 1);
        assert!(schemes.contains("GROWTH FUND"));
        assert!(schemes.contains(" growth fund "));
        assert!(!schemes.contains(""));
        assert_eq!(schemes.full_name("growth fund"), Some("The Growth Fund Inc."));
    }
}
