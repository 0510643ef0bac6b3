use std::{collections::HashSet, fmt::Debug};

use num::Float;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::{Result, RetrievalError},
    utils::math::{jaccard, Compare, DefaultCompare},
    vectorizer::{
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        token::Tokenizer,
        TFIDFVectorizer,
    },
};

/// Blend weights for the combined score
/// combined = cosine * cos + overlap * jaccard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityWeights {
    pub cosine: f64,
    pub overlap: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            cosine: 0.7,
            overlap: 0.3,
        }
    }
}

/// How a set of hits was scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// cosine over TF-IDF vectors blended with word overlap
    Blended,
    /// plain word overlap, used when the vectorizer cannot score
    WordOverlap,
}

/// One scored document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult<'a> {
    pub index: usize,
    pub score: f64,
    pub text: &'a str,
}

/// Structure to store search results
pub struct Hits<'a> {
    pub list: Vec<RankedResult<'a>>,
    pub source: ScoreSource,
}

impl<'a> Hits<'a> {
    pub fn new(list: Vec<RankedResult<'a>>, source: ScoreSource) -> Self {
        Hits { list, source }
    }

    /// Sort results by descending score.
    /// Equal scores keep document order.
    pub fn sort_by_score(&mut self) -> &mut Self {
        // Remove NaN scores
        self.list.retain(|r| !r.score.is_nan());
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    /// Keep at most `k` results
    pub fn truncate(&mut self, k: usize) -> &mut Self {
        self.list.truncate(k);
        self
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedResult<'a>> {
        self.list.iter()
    }
}

impl Debug for Hits<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            // Pretty print with alternate formatting: each hit on a new line
            writeln!(f, "Hits ({:?}) [", self.source)?;
            for hit in &self.list {
                writeln!(f, "    #{}: {:.6} (len: {})", hit.index, hit.score, hit.text.len())?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

/// Scores a query against documents.
///
/// Owns the vectorizer it scores with. Scoring never fails: when the
/// vectorizer is unfitted or the vector path errors, every document is
/// scored by word overlap instead.
#[derive(Debug, Clone)]
pub struct SimilarityRanker<N = f64, E = DefaultTFIDFEngine>
where
    N: Float,
{
    vectorizer: TFIDFVectorizer<N, E>,
    weights: SimilarityWeights,
}

impl<N, E> Default for SimilarityRanker<N, E>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N> + Send + Sync,
{
    fn default() -> Self {
        Self::new(TFIDFVectorizer::default(), SimilarityWeights::default())
    }
}

impl<N, E> SimilarityRanker<N, E>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N> + Send + Sync,
{
    pub fn new(vectorizer: TFIDFVectorizer<N, E>, weights: SimilarityWeights) -> Self {
        Self { vectorizer, weights }
    }

    /// Fit the underlying vectorizer
    pub fn fit<S>(&mut self, documents: &[S])
    where
        S: AsRef<str> + Sync,
    {
        self.vectorizer.fit(documents);
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        self.vectorizer.is_fitted()
    }

    #[inline]
    pub fn vectorizer(&self) -> &TFIDFVectorizer<N, E> {
        &self.vectorizer
    }

    #[inline]
    pub fn weights(&self) -> SimilarityWeights {
        self.weights
    }

    /// Score every document against the query.
    ///
    /// Results come back in document order, one per document; sorting is
    /// left to the caller.
    pub fn score<'a, S>(&self, query: &str, documents: &'a [S]) -> Hits<'a>
    where
        S: AsRef<str> + Sync,
    {
        if !self.is_fitted() {
            debug!("vectorizer unfitted, scoring by word overlap");
            return Self::word_overlap_fallback(query, documents);
        }
        match self.try_score(query, documents) {
            Ok(list) => Hits::new(list, ScoreSource::Blended),
            Err(e) => {
                warn!(error = %e, "vector scoring failed, falling back to word overlap");
                Self::word_overlap_fallback(query, documents)
            }
        }
    }

    fn try_score<'a, S>(&self, query: &str, documents: &'a [S]) -> Result<Vec<RankedResult<'a>>>
    where
        S: AsRef<str> + Sync,
    {
        let query_vec = self.vectorizer.try_transform_single(query)?;
        let query_terms = self.term_set(query);
        let weights = self.weights;

        documents
            .par_iter()
            .enumerate()
            .map(|(index, doc)| {
                let doc = doc.as_ref();
                let doc_vec = self.vectorizer.try_transform_single(doc)?;
                let cosine = <DefaultCompare as Compare<N>>::cosine_similarity(&query_vec, &doc_vec)?;
                let overlap = jaccard(&query_terms, &self.term_set(doc));
                let score = weights.cosine * cosine + weights.overlap * overlap;
                if !score.is_finite() {
                    return Err(RetrievalError::NonFiniteScore { index });
                }
                Ok(RankedResult { index, score, text: doc })
            })
            .collect()
    }

    fn term_set(&self, text: &str) -> HashSet<String> {
        self.vectorizer.tokenizer.tokenize(text).into_iter().collect()
    }

    /// Jaccard similarity over tokenizer terms (stop words removed).
    /// 0 when the query has no terms.
    pub fn word_overlap(&self, query: &str, document: &str) -> f64 {
        jaccard(&self.term_set(query), &self.term_set(document))
    }

    /// Score documents by Jaccard similarity over raw lowercase words,
    /// without stop-word filtering. Every document gets a result.
    pub fn word_overlap_fallback<'a, S>(query: &str, documents: &'a [S]) -> Hits<'a>
    where
        S: AsRef<str> + Sync,
    {
        let query_words: HashSet<String> = Tokenizer::raw_words(query).into_iter().collect();
        let list = documents
            .par_iter()
            .enumerate()
            .map(|(index, doc)| {
                let doc = doc.as_ref();
                let doc_words: HashSet<String> = Tokenizer::raw_words(doc).into_iter().collect();
                RankedResult {
                    index,
                    score: jaccard(&query_words, &doc_words),
                    text: doc,
                }
            })
            .collect();
        Hits::new(list, ScoreSource::WordOverlap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<&'static str> {
        vec![
            "Jupiter offers savings accounts with competitive interest rates.",
            "Track your expenses and budget with Jupiter's smart tools.",
            "Invest in mutual funds through Jupiter's platform.",
        ]
    }

    fn fitted() -> SimilarityRanker {
        let mut ranker = SimilarityRanker::default();
        ranker.fit(&docs());
        ranker
    }

    #[test]
    fn score_returns_one_result_per_document_in_order() {
        let ranker = fitted();
        let docs = docs();
        let hits = ranker.score("savings interest", &docs);
        assert_eq!(hits.source, ScoreSource::Blended);
        assert_eq!(hits.len(), 3);
        for (i, hit) in hits.iter().enumerate() {
            assert_eq!(hit.index, i);
            assert_eq!(hit.text, docs[i]);
        }
    }

    #[test]
    fn blended_score_matches_components() {
        let ranker = fitted();
        let docs = docs();
        let query = "What is the interest rate on savings?";
        let hits = ranker.score(query, &docs);
        let v = ranker.vectorizer();
        let cos = <DefaultCompare as Compare<f64>>::cosine_similarity(
            &v.transform_single(query),
            &v.transform_single(docs[0]),
        )
        .unwrap();
        let overlap = ranker.word_overlap(query, docs[0]);
        // query terms {what, interest, rate, savings}, 2 shared, 9 in union
        assert!((overlap - 2.0 / 9.0).abs() < 1e-12);
        assert!((hits.list[0].score - (0.7 * cos + 0.3 * overlap)).abs() < 1e-12);
        assert!(hits.list[0].score > hits.list[1].score);
        assert!(hits.list[0].score > hits.list[2].score);
    }

    #[test]
    fn sort_by_score_orders_descending() {
        let ranker = fitted();
        let docs = docs();
        let mut hits = ranker.score("budget tracking tools", &docs);
        hits.sort_by_score();
        assert_eq!(hits.list[0].index, 1);
        assert!(hits.list.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn unfitted_ranker_falls_back_to_word_overlap() {
        let ranker: SimilarityRanker = SimilarityRanker::default();
        let docs = docs();
        let hits = ranker.score("the savings accounts", &docs);
        assert_eq!(hits.source, ScoreSource::WordOverlap);
        assert_eq!(hits.len(), 3);
        // raw words keep "the": {the, savings, accounts} vs doc 0's 8 words
        assert!((hits.list[0].score - 2.0 / 9.0).abs() < 1e-12);
        assert_eq!(hits.list[1].score, 0.0);
    }

    #[test]
    fn fallback_with_empty_query_scores_zero() {
        let docs = docs();
        let hits = <SimilarityRanker>::word_overlap_fallback("?!", &docs);
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|h| h.score == 0.0));
    }

    #[test]
    fn custom_weights_apply() {
        let mut ranker: SimilarityRanker =
            SimilarityRanker::new(TFIDFVectorizer::default(), SimilarityWeights { cosine: 0.0, overlap: 1.0 });
        ranker.fit(&docs());
        let docs = docs();
        let hits = ranker.score("interest savings", &docs);
        assert!((hits.list[0].score - ranker.word_overlap("interest savings", docs[0])).abs() < 1e-12);
    }

    #[test]
    fn failed_vector_scoring_falls_back_to_word_overlap() {
        // an infinite weight makes every blended score non-finite
        let mut ranker: SimilarityRanker = SimilarityRanker::new(
            TFIDFVectorizer::default(),
            SimilarityWeights { cosine: f64::INFINITY, overlap: 0.3 },
        );
        let docs = ["Jupiter savings accounts", "Budget tools"];
        ranker.fit(&docs);
        assert!(ranker.is_fitted());

        let hits = ranker.score("budget", &docs);
        assert_eq!(hits.source, ScoreSource::WordOverlap);
        assert_eq!(hits.len(), docs.len());
        assert_eq!(hits.list[0].score, 0.0);
        assert_eq!(hits.list[1].score, 0.5);
    }

    #[test]
    fn empty_query_scores_zero_everywhere() {
        let ranker = fitted();
        let docs = docs();
        let hits = ranker.score("", &docs);
        assert_eq!(hits.source, ScoreSource::Blended);
        assert!(hits.iter().all(|h| h.score == 0.0));
    }
}
