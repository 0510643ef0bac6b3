/// This crate is a lexical retrieval engine for a financial FAQ corpus.
pub mod answer;
pub mod config;
pub mod engine;
pub mod error;
pub mod source;
pub mod utils;
pub mod vectorizer;

/// Retrieval Engine
/// The top-level struct of this crate. It owns the corpus, a fitted
/// `SimilarityRanker` and an `AnswerSynthesizer`, and exposes:
/// - `fit` / `load_from`: (re)build the index over a corpus
/// - `query`: rank chunks against a question, best first, at most `top_k`
/// - `synthesize_answer`: turn ranked chunks into a formatted answer
///
/// Fitting needs `&mut self`; querying only `&self`.
pub use engine::{QueryOutcome, RetrievalEngine, SearchStatus};

/// Engine configuration
/// Loadable from TOML. Every field has a default.
/// Directories are only created by the explicit `ensure_dirs` step.
pub use config::RetrievalConfig;

/// Error type and `Result` alias used across the crate
pub use error::{Result, RetrievalError};

/// TF-IDF Vectorizer
/// Builds a vocabulary and IDF table with `fit` and turns text into dense
/// term vectors with `transform` / `transform_single`.
///
/// `TFIDFVectorizer<N, E>` has the following generic parameters:
/// - `N`: Vector element type (e.g., f32, f64)
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTFIDFEngine)
///
/// Synonym expansion shapes the vocabulary at fit time only; transforms
/// never inject synonyms.
pub use vectorizer::TFIDFVectorizer;

/// Tokenizer and Term Frequency
/// - `Tokenizer`: lowercases, strips punctuation outside the financial
///   keep-set, drops short tokens and stop words
/// - `TermFrequency`: per-text term counts, the base data for TF
pub use vectorizer::token::{TermFrequency, Tokenizer};

/// Financial synonym table
pub use vectorizer::synonym::SynonymTable;

/// TF IDF Calculation Engine Trait
/// A trait that defines how TF and IDF are computed.
/// `DefaultTFIDFEngine` implements the textbook form:
/// tf = count / total, idf = ln(N / df).
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Similarity scoring
/// - `SimilarityRanker`: blends cosine similarity and word overlap, falling
///   back to raw word overlap when the vector path cannot score
/// - `Hits` / `RankedResult`: scored documents, sortable by score
pub use vectorizer::evaluate::scoring::{Hits, RankedResult, ScoreSource, SimilarityRanker, SimilarityWeights};

/// Query classification and answer synthesis
pub use answer::{AnswerSynthesizer, Category, CategoryRule, QueryClassifier};

/// Corpus sources
pub use source::{CorpusSource, DataInfo, TextFileSource};
