use std::collections::HashSet;

use jupiter_retriever::utils::math::{jaccard, Compare, DefaultCompare};
use jupiter_retriever::vectorizer::token::STOP_WORDS;
use jupiter_retriever::{SimilarityRanker, TFIDFVectorizer, Tokenizer};
use proptest::prelude::*;

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z]{1,9}", 1..12).prop_map(|words| words.join(" "))
}

fn cos(a: &[f64], b: &[f64]) -> f64 {
    <DefaultCompare as Compare<f64>>::cosine_similarity(a, b).unwrap()
}

proptest! {
    #[test]
    fn tokens_are_long_and_not_stop_words(s in ".{0,200}") {
        let tokenizer = Tokenizer::new();
        for token in tokenizer.tokenize(&s) {
            prop_assert!(token.chars().count() >= 3, "short token {:?}", token);
            prop_assert!(!STOP_WORDS.contains(&token.as_str()), "stop word {:?}", token);
        }
    }

    #[test]
    fn cosine_is_symmetric(pairs in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 0..32)) {
        let (a, b): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let ab = cos(&a, &b);
        prop_assert!((ab - cos(&b, &a)).abs() < 1e-12);
        prop_assert!(ab.is_finite());
        prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&ab));
    }

    #[test]
    fn cosine_with_zero_vector_is_zero(a in prop::collection::vec(-100.0f64..100.0, 0..32)) {
        let zero = vec![0.0; a.len()];
        prop_assert_eq!(cos(&a, &zero), 0.0);
        prop_assert_eq!(cos(&zero, &a), 0.0);
    }

    #[test]
    fn jaccard_is_bounded(
        a in prop::collection::hash_set("[a-d]{1,2}", 0..10),
        b in prop::collection::hash_set("[a-d]{1,2}", 0..10),
    ) {
        let j = jaccard(&a, &b);
        prop_assert!((0.0..=1.0).contains(&j));
        if !a.is_empty() {
            prop_assert_eq!(jaccard(&a, &a), 1.0);
        }
    }

    #[test]
    fn word_overlap_with_itself_is_one(q in sentence()) {
        let ranker: SimilarityRanker = SimilarityRanker::default();
        prop_assume!(!Tokenizer::new().tokenize(&q).is_empty());
        prop_assert_eq!(ranker.word_overlap(&q, &q), 1.0);
    }

    #[test]
    fn word_overlap_is_bounded(q in sentence(), d in sentence()) {
        let ranker: SimilarityRanker = SimilarityRanker::default();
        let overlap = ranker.word_overlap(&q, &d);
        prop_assert!((0.0..=1.0).contains(&overlap));
    }

    #[test]
    fn transform_is_idempotent(docs in prop::collection::vec(sentence(), 1..6), text in sentence()) {
        let mut vectorizer: TFIDFVectorizer = TFIDFVectorizer::default();
        vectorizer.fit(&docs);
        let first = vectorizer.transform_single(&text);
        let second = vectorizer.transform_single(&text);
        prop_assert_eq!(first.len(), vectorizer.vocabulary_size());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn vocabulary_and_idf_share_keys(docs in prop::collection::vec(sentence(), 0..6), cap in 1usize..50) {
        let mut vectorizer: TFIDFVectorizer = TFIDFVectorizer::new(cap, true);
        vectorizer.fit(&docs);
        let names = vectorizer.feature_names();
        prop_assert!(names.len() <= cap);
        prop_assert_eq!(names.len(), vectorizer.vocabulary_size());
        let distinct: HashSet<&str> = names.iter().copied().collect();
        prop_assert_eq!(distinct.len(), names.len());
        for (idx, term) in names.iter().enumerate() {
            prop_assert_eq!(vectorizer.vocabulary().index_of(term), Some(idx));
            let idf = vectorizer.idf(term);
            prop_assert!(matches!(idf, Some(v) if v >= 0.0));
        }
    }

    #[test]
    fn vector_support_is_within_text_terms(docs in prop::collection::vec(sentence(), 1..6), text in sentence()) {
        let mut vectorizer: TFIDFVectorizer = TFIDFVectorizer::default();
        vectorizer.fit(&docs);
        let terms: HashSet<String> = Tokenizer::new().tokenize(&text).into_iter().collect();
        let names = vectorizer.feature_names();
        for (idx, value) in vectorizer.transform_single(&text).iter().enumerate() {
            if *value != 0.0 {
                prop_assert!(terms.contains(names[idx]));
            }
        }
    }
}
