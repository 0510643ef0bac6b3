use indexmap::IndexMap;
use num::Float;

/// Vocabulary and IDF table in one map.
///
/// A term's dense index is its position in the map and its value is its IDF,
/// so both views always share the same key set.
#[derive(Debug, Clone)]
pub struct Vocabulary<N> {
    entries: IndexMap<Box<str>, N>,
    /// documents seen by the fit that built this vocabulary
    doc_num: u64,
}

impl<N> Default for Vocabulary<N> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            doc_num: 0,
        }
    }
}

impl<N> Vocabulary<N>
where
    N: Float,
{
    pub(crate) fn with_capacity(capacity: usize, doc_num: u64) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            doc_num,
        }
    }

    pub(crate) fn insert(&mut self, term: &str, idf: N) -> usize {
        self.entries.insert_full(term.into(), idf).0
    }

    /// Dense index of a term
    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.entries.get_index_of(term)
    }

    /// IDF weight of a term
    #[inline]
    pub fn idf(&self, term: &str) -> Option<N> {
        self.entries.get(term).copied()
    }

    /// Index and IDF of a term in one lookup
    #[inline]
    pub fn get_full(&self, term: &str) -> Option<(usize, N)> {
        self.entries.get_full(term).map(|(i, _, &idf)| (i, idf))
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(term)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Terms in index order
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|t| t.as_ref())
    }

    /// (term, index, idf) triples in index order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize, N)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (t, &idf))| (t.as_ref(), i, idf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_idf_share_keys() {
        let mut vocab: Vocabulary<f64> = Vocabulary::with_capacity(2, 3);
        assert_eq!(vocab.insert("savings", 0.4), 0);
        assert_eq!(vocab.insert("interest", 1.1), 1);
        assert_eq!(vocab.index_of("interest"), Some(1));
        assert_eq!(vocab.idf("savings"), Some(0.4));
        assert_eq!(vocab.get_full("interest"), Some((1, 1.1)));
        assert!(vocab.index_of("fee").is_none());
        assert!(vocab.idf("fee").is_none());
        assert_eq!(vocab.terms().collect::<Vec<_>>(), vec!["savings", "interest"]);
        assert_eq!(vocab.doc_num(), 3);
    }
}
