use num::{Float, NumCast};

/// TF-IDF calculation strategy
///
/// `TFIDFVectorizer<N, E>` delegates the two weight formulas to `E`, so an
/// alternative weighting can be plugged in without touching fit/transform.
pub trait TFIDFEngine<N>
where
    N: Float,
{
    /// Inverse document frequency
    ///
    /// # Arguments
    /// * `doc_num` - total documents in the fitted corpus
    /// * `doc_freq` - documents containing the term, at least 1
    fn idf(doc_num: u64, doc_freq: u64) -> N;

    /// Term frequency
    ///
    /// # Arguments
    /// * `count` - occurrences of the term in the text
    /// * `total` - total token count of the text
    fn tf(count: u64, total: u64) -> N;
}

/// Textbook TF-IDF
/// - idf = ln(doc_num / doc_freq)
/// - tf = count / total
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl<N> TFIDFEngine<N> for DefaultTFIDFEngine
where
    N: Float,
{
    #[inline]
    fn idf(doc_num: u64, doc_freq: u64) -> N {
        if doc_num == 0 || doc_freq == 0 {
            return N::zero();
        }
        let ratio = doc_num as f64 / doc_freq as f64;
        <N as NumCast>::from(ratio.ln()).unwrap_or_else(N::zero)
    }

    #[inline]
    fn tf(count: u64, total: u64) -> N {
        if total == 0 {
            return N::zero();
        }
        <N as NumCast>::from(count as f64 / total as f64).unwrap_or_else(N::zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idf_is_log_ratio() {
        let idf: f64 = <DefaultTFIDFEngine as TFIDFEngine<f64>>::idf(3, 1);
        assert!((idf - 3f64.ln()).abs() < 1e-12);
        let idf: f64 = <DefaultTFIDFEngine as TFIDFEngine<f64>>::idf(4, 4);
        assert_eq!(idf, 0.0);
    }

    #[test]
    fn tf_is_relative_count() {
        let tf: f32 = <DefaultTFIDFEngine as TFIDFEngine<f32>>::tf(1, 4);
        assert_eq!(tf, 0.25);
        let tf: f64 = <DefaultTFIDFEngine as TFIDFEngine<f64>>::tf(3, 0);
        assert_eq!(tf, 0.0);
    }
}
