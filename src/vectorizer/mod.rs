pub mod corpus;
pub mod evaluate;
pub mod synonym;
pub mod tfidf;
pub mod token;
pub mod vocabulary;

use std::marker::PhantomData;

use num::Float;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{Result, RetrievalError};
use crate::vectorizer::{
    corpus::Corpus,
    synonym::SynonymTable,
    tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    token::{TermFrequency, Tokenizer},
    vocabulary::Vocabulary,
};

/// Default vocabulary cap
pub const DEFAULT_MAX_VOCABULARY_SIZE: usize = 10_000;

/// Dense TF-IDF vector indexed by vocabulary position
pub type TermVector<N> = Vec<N>;

#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<N = f64, E = DefaultTFIDFEngine>
where
    N: Float,
{
    /// Tokenizer shared by fit and transform
    pub tokenizer: Tokenizer,
    /// Synonyms injected while building the vocabulary
    pub synonyms: SynonymTable,
    /// Vocabulary cap applied at fit time
    pub max_vocabulary_size: usize,
    /// Whether fit expands document terms with synonyms
    pub synonym_expansion: bool,
    vocabulary: Vocabulary<N>,
    _marker: PhantomData<E>,
}

impl<N, E> Default for TFIDFVectorizer<N, E>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N> + Send + Sync,
{
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VOCABULARY_SIZE, true)
    }
}

impl<N, E> TFIDFVectorizer<N, E>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N> + Send + Sync,
{
    /// Create an unfitted vectorizer with the financial synonym table
    pub fn new(max_vocabulary_size: usize, synonym_expansion: bool) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            synonyms: SynonymTable::financial(),
            max_vocabulary_size,
            synonym_expansion,
            vocabulary: Vocabulary::default(),
            _marker: PhantomData,
        }
    }

    /// Replace the synonym table
    pub fn with_synonyms(mut self, synonyms: SynonymTable) -> Self {
        self.synonyms = synonyms;
        self
    }

    /// Build the vocabulary and IDF table from a document set.
    ///
    /// Any previous vocabulary is discarded. An empty document set leaves the
    /// vectorizer unfitted.
    pub fn fit<S>(&mut self, documents: &[S])
    where
        S: AsRef<str> + Sync,
    {
        let term_sets: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| {
                let terms = self.tokenizer.tokenize(doc.as_ref());
                if self.synonym_expansion {
                    self.synonyms.expand(&terms)
                } else {
                    terms
                }
            })
            .collect();

        let mut corpus = Corpus::new();
        for terms in &term_sets {
            corpus.add_set(terms);
        }

        let dropped = corpus.retain_most_frequent(self.max_vocabulary_size);
        if dropped > 0 {
            debug!(
                dropped,
                cap = self.max_vocabulary_size,
                "vocabulary capped to most frequent terms"
            );
        }

        let doc_num = corpus.get_doc_num();
        let mut vocabulary = Vocabulary::with_capacity(corpus.vocab_size(), doc_num);
        for (term, doc_freq) in corpus.iter() {
            vocabulary.insert(term, E::idf(doc_num, doc_freq));
        }
        self.vocabulary = vocabulary;

        info!(
            documents = doc_num,
            vocabulary = self.vocabulary.len(),
            synonym_expansion = self.synonym_expansion,
            "vectorizer fitted"
        );
    }

    /// Whether a non-empty vocabulary is available
    #[inline]
    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Transform one text into a TF-IDF vector.
    ///
    /// Returns an empty vector when the vectorizer is unfitted. Synonyms are
    /// not injected here.
    pub fn transform_single(&self, text: &str) -> TermVector<N> {
        self.try_transform_single(text).unwrap_or_default()
    }

    /// Transform texts into TF-IDF vectors, one per text, in input order
    pub fn transform<S>(&self, texts: &[S]) -> Vec<TermVector<N>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.transform_single(text.as_ref()))
            .collect()
    }

    /// Transform one text, reporting `Untrained` instead of an empty vector
    pub fn try_transform_single(&self, text: &str) -> Result<TermVector<N>> {
        if !self.is_fitted() {
            return Err(RetrievalError::Untrained);
        }
        let terms = self.tokenizer.tokenize(text);
        let total = terms.len() as u64;
        let freq: TermFrequency = terms.iter().collect();

        let mut vector = vec![N::zero(); self.vocabulary.len()];
        for (term, count) in freq.iter() {
            if let Some((idx, idf)) = self.vocabulary.get_full(term) {
                vector[idx] = E::tf(count, total) * idf;
            }
        }
        Ok(vector)
    }

    /// Fitted vocabulary and IDF table
    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary<N> {
        &self.vocabulary
    }

    /// Vocabulary terms in index order
    pub fn feature_names(&self) -> Vec<&str> {
        self.vocabulary.terms().collect()
    }

    #[inline]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// IDF of a term, `None` when out of vocabulary
    #[inline]
    pub fn idf(&self, term: &str) -> Option<N> {
        self.vocabulary.idf(term)
    }

    /// Documents seen by the last fit
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.vocabulary.doc_num()
    }
}
