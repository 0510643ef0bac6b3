use tracing::debug;

use crate::answer::classifier::{Category, QueryClassifier};
use crate::config::RetrievalConfig;
use crate::error::Result;

pub const NO_INFORMATION_MESSAGE: &str = "I couldn't find specific information on that yet. Try asking about Jupiter's savings accounts, expense tracking, or security features.";
pub const NOT_RELEVANT_MESSAGE: &str =
    "The information I found doesn't seem directly relevant. Try rephrasing your question.";
pub const ANSWER_HEADER: &str = "**Here's what I found about your question:**";
pub const INSIGHT_LABEL: &str = "**Quick insights:**";
pub const FOLLOW_UP_LABEL: &str = "**You might also want to know:**";
pub const SOURCE_ATTRIBUTION: &str = "*This information comes from Jupiter's official website.*";

const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

/// Collapse whitespace and trim a chunk to at most `max_chars` characters.
///
/// An over-long chunk's window is split on `.`, `!` and `?`; every fragment
/// but the last is joined with `". "` and closed with a period, so interior
/// `!`/`?` become periods and decimals split ("7.5%" reads "7. 5%"). Without
/// a terminator the window is cut back to the last space and closed with `...`.
pub fn clean_text_chunk(chunk: &str, max_chars: usize) -> String {
    let collapsed = chunk.split_whitespace().collect::<Vec<_>>().join(" ");
    let cut = match collapsed.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => byte_idx,
        None => return collapsed,
    };
    let window = &collapsed[..cut];
    let fragments: Vec<&str> = window.split(SENTENCE_TERMINATORS).collect();
    match fragments.split_last() {
        // the trailing fragment is the unfinished sentence
        Some((_, complete)) if !complete.is_empty() => format!("{}.", complete.join(". ")),
        _ => {
            let head = window.rfind(' ').map_or(window, |pos| &window[..pos]);
            format!("{head}...")
        }
    }
}

/// Builds the user-facing answer from ranked chunks
#[derive(Debug, Clone)]
pub struct AnswerSynthesizer {
    classifier: QueryClassifier,
    /// chunks must score strictly above this
    pub relevance_threshold: f64,
    /// chunks quoted per answer
    pub max_chunks: usize,
    /// trimming window per chunk, in characters
    pub max_chunk_chars: usize,
    /// append the follow-up suggestion line
    pub follow_up_suggestions: bool,
}

impl AnswerSynthesizer {
    pub fn new(classifier: QueryClassifier) -> Self {
        Self {
            classifier,
            relevance_threshold: 0.15,
            max_chunks: 3,
            max_chunk_chars: 250,
            follow_up_suggestions: true,
        }
    }

    pub fn from_config(config: &RetrievalConfig) -> Result<Self> {
        let classifier = QueryClassifier::from_rules(&config.classifier_rules)?;
        Ok(Self {
            classifier,
            relevance_threshold: config.relevance_threshold,
            max_chunks: config.max_answer_chunks,
            max_chunk_chars: config.max_chunk_chars,
            follow_up_suggestions: config.follow_up_suggestions,
        })
    }

    #[inline]
    pub fn classifier(&self) -> &QueryClassifier {
        &self.classifier
    }

    #[inline]
    pub fn classify(&self, query: &str) -> Category {
        self.classifier.classify(query)
    }

    /// Compose an answer for `query` from (chunk, score) pairs.
    ///
    /// Input order does not matter; chunks are re-sorted by score.
    pub fn synthesize<S>(&self, query: &str, ranked: &[(S, f64)]) -> String
    where
        S: AsRef<str>,
    {
        if ranked.is_empty() {
            return NO_INFORMATION_MESSAGE.to_string();
        }

        let mut relevant: Vec<(&str, f64)> = ranked
            .iter()
            .filter(|(_, score)| *score > self.relevance_threshold)
            .map(|(chunk, score)| (chunk.as_ref(), *score))
            .collect();
        if relevant.is_empty() {
            debug!(
                candidates = ranked.len(),
                threshold = self.relevance_threshold,
                "no chunk passed the relevance threshold"
            );
            return NOT_RELEVANT_MESSAGE.to_string();
        }
        relevant.sort_by(|a, b| b.1.total_cmp(&a.1));
        relevant.truncate(self.max_chunks);

        let category = self.classify(query);

        let mut answer = format!("{ANSWER_HEADER}\n\n");
        for (i, (chunk, _)) in relevant.iter().enumerate() {
            answer.push_str(&format!(
                "{}. {}\n",
                i + 1,
                clean_text_chunk(chunk, self.max_chunk_chars)
            ));
        }
        answer.push_str(&format!("\n{INSIGHT_LABEL} {}", category.insight()));
        if self.follow_up_suggestions {
            answer.push_str(&format!("\n\n{FOLLOW_UP_LABEL} {}", category.follow_up()));
        }
        answer.push_str(&format!("\n\n{SOURCE_ATTRIBUTION}"));
        answer
    }
}
