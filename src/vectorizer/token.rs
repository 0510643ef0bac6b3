use std::collections::HashSet;

use indexmap::IndexMap;

/// Words dropped after normalization
/// articles, conjunctions, common prepositions and auxiliary verbs
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
    "of", "with", "by", "is", "are", "was", "were", "be", "been", "have",
    "has", "had", "do", "does", "did", "will", "would", "could", "should",
];

/// Symbols kept through normalization so financial notation survives
pub const KEEP_SYMBOLS: &[char] = &['-', '%', '₹', '$'];

/// Tokens with this many characters or fewer are dropped
pub const MAX_DROPPED_LEN: usize = 2;

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split text into maximal runs of word characters.
#[inline]
pub fn word_runs(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_word_char(c)).filter(|w| !w.is_empty())
}

/// Tokenizer
/// lowercases, strips punctuation noise, splits on word boundaries and
/// filters short tokens and stop words.
///
/// # Examples
/// ```
/// use jupiter_retriever::Tokenizer;
/// let tokenizer = Tokenizer::new();
/// let terms = tokenizer.tokenize("What is the interest rate on savings?");
/// assert_eq!(terms, vec!["what", "interest", "rate", "savings"]);
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stop_words: HashSet<&'static str>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Lowercase the text and replace every character outside the keep-set
    /// (word characters, whitespace, `-`, `%`, `₹`, `$`) with a space.
    pub fn normalize(text: &str) -> String {
        text.chars()
            .map(|c| {
                if is_word_char(c) || c.is_whitespace() || KEEP_SYMBOLS.contains(&c) {
                    c
                } else {
                    ' '
                }
            })
            .collect::<String>()
            .to_lowercase()
    }

    /// Whether a candidate token survives the length and stop-word filters
    #[inline]
    pub fn accepts(&self, token: &str) -> bool {
        token.chars().count() > MAX_DROPPED_LEN && !self.stop_words.contains(token)
    }

    /// Tokenize text into terms, preserving their order of appearance
    ///
    /// # Arguments
    /// * `text` - input text
    ///
    /// # Returns
    /// * `Vec<String>` - filtered terms
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = Self::normalize(text);
        word_runs(&normalized)
            .filter(|w| self.accepts(w))
            .map(str::to_string)
            .collect()
    }

    /// Lowercase word-boundary tokens without any filtering.
    /// Used by the word-overlap fallback.
    pub fn raw_words(text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        word_runs(&lower).map(str::to_string).collect()
    }
}

/// TermFrequency
/// Counts term occurrences within one text.
///
/// Insertion order is the order in which terms were first seen.
#[derive(Debug, Clone, Default)]
pub struct TermFrequency {
    term_count: IndexMap<String, u64>,
    total_term_count: u64,
}

impl TermFrequency {
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// Add a term
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        let count = self.term_count.entry(term.to_string()).or_insert(0);
        *count += 1;
        self.total_term_count += 1;
        self
    }

    /// Add multiple terms
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Occurrences of a term, 0 when absent
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Total number of terms added, duplicates included
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Number of distinct terms
    #[inline]
    pub fn len(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    /// Distinct terms in first-seen order
    pub fn term_set(&self) -> impl Iterator<Item = &str> {
        self.term_count.keys().map(String::as_str)
    }

    /// (term, count) pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_count.iter().map(|(t, &c)| (t.as_str(), c))
    }
}

impl<T: AsRef<str>> FromIterator<T> for TermFrequency {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut freq = TermFrequency::new();
        for term in iter {
            freq.add_term(term.as_ref());
        }
        freq
    }
}
