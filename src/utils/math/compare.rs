use std::collections::HashSet;
use std::hash::Hash;

use num::Float;

use crate::error::{Result, RetrievalError};

pub trait Compare<N>
where
    N: Float,
{
    /// dot product
    /// d(a, b) = Σ(a_i * b_i)
    fn dot(vec: &[N], other: &[N]) -> Result<f64>;
    /// euclidean norm
    /// ||a|| = sqrt(Σ(a_i^2))
    fn norm(vec: &[N]) -> f64;
    /// cosine similarity
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    /// 0 when either norm is 0
    fn cosine_similarity(vec: &[N], other: &[N]) -> Result<f64>;
}

#[derive(Debug)]
pub struct DefaultCompare;

impl<N> Compare<N> for DefaultCompare
where
    N: Float,
{
    #[inline]
    fn dot(vec: &[N], other: &[N]) -> Result<f64> {
        if vec.len() != other.len() {
            return Err(RetrievalError::DimensionMismatch {
                expected: vec.len(),
                found: other.len(),
            });
        }
        Ok(vec
            .iter()
            .zip(other)
            .map(|(a, b)| a.to_f64().unwrap_or(0.0) * b.to_f64().unwrap_or(0.0))
            .sum())
    }

    #[inline]
    fn norm(vec: &[N]) -> f64 {
        vec.iter()
            .map(|a| {
                let a = a.to_f64().unwrap_or(0.0);
                a * a
            })
            .sum::<f64>()
            .sqrt()
    }

    #[inline]
    fn cosine_similarity(vec: &[N], other: &[N]) -> Result<f64> {
        // an empty vector carries no signal
        if vec.is_empty() || other.is_empty() {
            return Ok(0.0);
        }
        let dot = <Self as Compare<N>>::dot(vec, other)?;
        let norm_a = <Self as Compare<N>>::norm(vec);
        let norm_b = <Self as Compare<N>>::norm(other);
        let denom = norm_a * norm_b;
        if denom == 0.0 {
            return Ok(0.0);
        }
        Ok(dot / denom)
    }
}

/// Jaccard similarity |a ∩ b| / |a ∪ b|
/// 0 when `a` is empty
pub fn jaccard<T>(a: &HashSet<T>, b: &HashSet<T>) -> f64
where
    T: Eq + Hash,
{
    if a.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cos(a: &[f64], b: &[f64]) -> f64 {
        <DefaultCompare as Compare<f64>>::cosine_similarity(a, b).unwrap()
    }

    #[test]
    fn cosine_of_parallel_vectors_is_one() {
        assert!((cos(&[1.0, 2.0, 0.0], &[2.0, 4.0, 0.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        assert_eq!(cos(&[1.0, 0.0], &[0.0, 3.0]), 0.0);
    }

    #[test]
    fn cosine_with_zero_or_empty_is_zero() {
        assert_eq!(cos(&[1.0, 2.0], &[0.0, 0.0]), 0.0);
        assert_eq!(cos(&[], &[1.0]), 0.0);
        assert_eq!(cos(&[], &[]), 0.0);
    }

    #[test]
    fn cosine_rejects_dimension_mismatch() {
        let res = <DefaultCompare as Compare<f64>>::cosine_similarity(&[1.0, 2.0], &[1.0]);
        assert!(matches!(
            res,
            Err(RetrievalError::DimensionMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn jaccard_bounds() {
        let a: HashSet<&str> = ["rate", "savings"].into_iter().collect();
        let b: HashSet<&str> = ["savings", "fee", "card"].into_iter().collect();
        assert!((jaccard(&a, &b) - 0.25).abs() < 1e-12);
        assert_eq!(jaccard(&a, &a), 1.0);
        assert_eq!(jaccard(&HashSet::new(), &b), 0.0);
    }
}
