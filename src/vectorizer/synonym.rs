//! Financial domain synonym table

/// Canonical concept and the terms treated as synonyms of it.
/// A concept's own name is listed among its synonyms.
pub const FINANCIAL_SYNONYMS: &[(&str, &[&str])] = &[
    ("account", &["account", "banking", "wallet", "portfolio", "profile"]),
    ("savings", &["savings", "deposit", "money", "funds", "balance", "reserve"]),
    ("expense", &["expense", "spending", "cost", "payment", "transaction", "outflow"]),
    ("investment", &["investment", "invest", "fund", "portfolio", "stocks", "shares"]),
    ("security", &["security", "safe", "secure", "protection", "privacy", "encryption"]),
    ("fee", &["fee", "charge", "cost", "rate", "commission", "levy"]),
    ("transfer", &["transfer", "send", "receive", "move", "exchange", "wire"]),
    ("budget", &["budget", "planning", "tracking", "management", "allocation"]),
    ("interest", &["interest", "return", "yield", "earnings", "profit"]),
    ("loan", &["loan", "credit", "borrowing", "advance", "mortgage"]),
];

/// SynonymTable
/// Static mapping from a concept to its synonym terms, never mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct SynonymTable {
    groups: Vec<(Box<str>, Vec<Box<str>>)>,
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::financial()
    }
}

impl SynonymTable {
    /// Build a table from (concept, synonyms) pairs
    pub fn new<C, S>(groups: impl IntoIterator<Item = (C, S)>) -> Self
    where
        C: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let groups = groups
            .into_iter()
            .map(|(concept, syns)| {
                (
                    concept.as_ref().into(),
                    syns.into_iter().map(|s| s.as_ref().into()).collect(),
                )
            })
            .collect();
        Self { groups }
    }

    /// The built-in financial table
    pub fn financial() -> Self {
        Self::new(FINANCIAL_SYNONYMS.iter().map(|(c, s)| (*c, s.iter().copied())))
    }

    /// Synonyms of a concept, if the concept exists
    pub fn get(&self, concept: &str) -> Option<&[Box<str>]> {
        self.groups
            .iter()
            .find(|(c, _)| c.as_ref() == concept)
            .map(|(_, syns)| syns.as_slice())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Expand terms with synonyms.
    ///
    /// The input terms come first, unchanged. Then, for every concept whose
    /// synonym list shares at least one term with the input, all of that
    /// concept's synonyms are appended. Duplicates are kept.
    pub fn expand<T>(&self, terms: &[T]) -> Vec<String>
    where
        T: AsRef<str>,
    {
        let mut expanded: Vec<String> = terms.iter().map(|t| t.as_ref().to_string()).collect();
        for (_, syns) in &self.groups {
            let hit = terms
                .iter()
                .any(|t| syns.iter().any(|s| s.as_ref() == t.as_ref()));
            if hit {
                expanded.extend(syns.iter().map(|s| s.to_string()));
            }
        }
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_appends_whole_group() {
        let table = SynonymTable::financial();
        let expanded = table.expand(&["need", "savings"]);
        assert_eq!(&expanded[..2], &["need", "savings"]);
        for term in ["deposit", "money", "funds", "balance", "reserve"] {
            assert!(expanded.iter().any(|t| t == term), "missing {term}");
        }
    }

    #[test]
    fn expand_without_hits_is_identity() {
        let table = SynonymTable::financial();
        assert_eq!(table.expand(&["mutual", "platform"]), vec!["mutual", "platform"]);
    }

    #[test]
    fn shared_term_triggers_every_group() {
        // "portfolio" belongs to both account and investment
        let table = SynonymTable::financial();
        let expanded = table.expand(&["portfolio"]);
        assert!(expanded.iter().any(|t| t == "wallet"));
        assert!(expanded.iter().any(|t| t == "stocks"));
        assert_eq!(expanded.iter().filter(|t| *t == "portfolio").count(), 3);
    }

    #[test]
    fn custom_table() {
        let table = SynonymTable::new([("card", vec!["card", "debit"])]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("card").map(|s| s.len()), Some(2));
        assert!(table.get("loan").is_none());
        assert_eq!(table.expand(&["debit"]), vec!["debit", "card", "debit"]);
    }
}
