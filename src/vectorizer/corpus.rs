use indexmap::IndexMap;

/// keep document count and document frequency per term
///
/// Terms are kept in discovery order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// number of documents added
    pub doc_num: u64,
    /// documents containing each term
    pub term_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            term_counts: IndexMap::new(),
        }
    }

    /// Add one document's terms.
    /// Each distinct term is counted once no matter how often it repeats.
    pub fn add_set<T>(&mut self, terms: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        let mut seen: indexmap::IndexSet<&str> = indexmap::IndexSet::with_capacity(terms.len());
        for term in terms {
            let term = term.as_ref();
            if seen.insert(term) {
                *self.term_counts.entry(term.into()).or_insert(0) += 1;
            }
        }
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Get the document frequency of a term
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Get the current vocabulary size (number of unique terms)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// Keep only the `cap` most frequent terms.
    ///
    /// Ties on document frequency go to the term discovered first. Survivors
    /// keep their discovery order. Returns the number of terms dropped.
    pub fn retain_most_frequent(&mut self, cap: usize) -> usize {
        let before = self.term_counts.len();
        if before <= cap {
            return 0;
        }
        let mut ranked: Vec<(usize, u64)> = self
            .term_counts
            .values()
            .copied()
            .enumerate()
            .collect();
        // stable sort keeps discovery order among equal counts
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        let mut keep = vec![false; before];
        for &(pos, _) in ranked.iter().take(cap) {
            keep[pos] = true;
        }
        let mut pos = 0;
        self.term_counts.retain(|_, _| {
            let k = keep[pos];
            pos += 1;
            k
        });
        before - self.term_counts.len()
    }

    /// (term, document frequency) pairs in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_counts.iter().map(|(t, &c)| (t.as_ref(), c))
    }
}
