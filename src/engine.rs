use serde::Serialize;
use tracing::{info, warn};

use crate::answer::{AnswerSynthesizer, Category};
use crate::config::RetrievalConfig;
use crate::error::Result;
use crate::source::CorpusSource;
use crate::vectorizer::evaluate::scoring::{RankedResult, ScoreSource, SimilarityRanker};
use crate::vectorizer::TFIDFVectorizer;

/// Outcome of a search, as reported to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    NoData,
    NoResults,
    Completed,
}

impl SearchStatus {
    pub fn message(&self) -> &'static str {
        match self {
            SearchStatus::NoData => "No data available. Please scrape first.",
            SearchStatus::NoResults => "No relevant information found.",
            SearchStatus::Completed => "Search completed successfully.",
        }
    }
}

/// Ranked chunks for one query, best first, at most `top_k` of them
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome<'a> {
    pub status: SearchStatus,
    pub message: &'static str,
    pub scoring: Option<ScoreSource>,
    pub results: Vec<RankedResult<'a>>,
}

impl<'a> QueryOutcome<'a> {
    fn empty(status: SearchStatus) -> Self {
        Self {
            status,
            message: status.message(),
            scoring: None,
            results: Vec::new(),
        }
    }

    pub fn chunks(&self) -> Vec<&'a str> {
        self.results.iter().map(|r| r.text).collect()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.results.iter().map(|r| r.score).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Owns the corpus, the ranker and the synthesizer.
///
/// `fit` needs `&mut self`; everything else reads through `&self`, so a
/// fitted engine can be shared across threads for queries.
#[derive(Debug, Clone)]
pub struct RetrievalEngine {
    config: RetrievalConfig,
    ranker: SimilarityRanker,
    synthesizer: AnswerSynthesizer,
    corpus: Vec<String>,
}

impl RetrievalEngine {
    pub fn new(config: RetrievalConfig) -> Result<Self> {
        config.validate()?;
        let vectorizer = TFIDFVectorizer::new(config.max_vocabulary_size, config.synonym_expansion);
        let ranker = SimilarityRanker::new(vectorizer, config.weights());
        let synthesizer = AnswerSynthesizer::from_config(&config)?;
        Ok(Self {
            config,
            ranker,
            synthesizer,
            corpus: Vec::new(),
        })
    }

    /// Replace the corpus and rebuild the index over it
    pub fn fit(&mut self, corpus: Vec<String>) {
        if corpus.is_empty() {
            warn!("fitting on an empty corpus, engine stays untrained");
        }
        self.ranker.fit(&corpus);
        self.corpus = corpus;
        info!(
            documents = self.corpus.len(),
            vocabulary = self.ranker.vectorizer().vocabulary_size(),
            "engine trained"
        );
    }

    /// Load a corpus from `source` and fit on it. Returns the chunk count.
    pub fn load_from(&mut self, source: &dyn CorpusSource) -> Result<usize> {
        let corpus = source.load()?;
        let len = corpus.len();
        self.fit(corpus);
        Ok(len)
    }

    /// A non-empty corpus has been fitted.
    ///
    /// The vocabulary may still be empty (a corpus of stop words); queries
    /// then score by word overlap.
    #[inline]
    pub fn is_trained(&self) -> bool {
        !self.corpus.is_empty()
    }

    pub fn query<'a>(&'a self, text: &str) -> QueryOutcome<'a> {
        if !self.is_trained() {
            return QueryOutcome::empty(SearchStatus::NoData);
        }
        let mut hits = self.ranker.score(text, &self.corpus);
        hits.sort_by_score().truncate(self.config.top_k);
        if hits.is_empty() {
            return QueryOutcome::empty(SearchStatus::NoResults);
        }
        info!(
            results = hits.len(),
            top_score = hits.list[0].score,
            source = ?hits.source,
            "query scored"
        );
        QueryOutcome {
            status: SearchStatus::Completed,
            message: SearchStatus::Completed.message(),
            scoring: Some(hits.source),
            results: hits.list,
        }
    }

    /// Compose an answer from parallel chunk and score lists.
    /// Extra entries in the longer list are ignored.
    pub fn synthesize_answer<S>(&self, query: &str, chunks: &[S], scores: &[f64]) -> String
    where
        S: AsRef<str>,
    {
        let ranked: Vec<(&str, f64)> = chunks
            .iter()
            .map(|chunk| -> &str { chunk.as_ref() })
            .zip(scores.iter().copied())
            .collect();
        self.synthesizer.synthesize(query, &ranked)
    }

    /// Query and synthesize in one step
    pub fn answer<'a>(&'a self, query: &str) -> (QueryOutcome<'a>, String) {
        let outcome = self.query(query);
        let answer = self.synthesize_answer(query, &outcome.chunks(), &outcome.scores());
        (outcome, answer)
    }

    pub fn classify(&self, query: &str) -> Category {
        self.synthesizer.classify(query)
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn corpus(&self) -> &[String] {
        &self.corpus
    }

    pub fn ranker(&self) -> &SimilarityRanker {
        &self.ranker
    }
}
