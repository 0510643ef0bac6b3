pub mod compare;

pub use compare::{jaccard, Compare, DefaultCompare};
