//! Query classification and answer synthesis

pub mod classifier;
pub mod synthesizer;

pub use classifier::{default_rules, Category, CategoryRule, QueryClassifier};
pub use synthesizer::{clean_text_chunk, AnswerSynthesizer};
