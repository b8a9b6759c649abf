//! Synthetic polynomial regression dataset
//!
//! Features are evenly spaced over [5, 25] with uniform jitter in
//! [-0.5, 0.5); targets follow `3 - 11.5x + 4.8x^1.7 - 0.65x^2.2` plus
//! uniform noise in [-2.5, 2.5). All feature jitter is drawn before any
//! target noise.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cache::key::GenerationParameters;

const X_START: f64 = 5.0;
const X_END: f64 = 25.0;
const NOISE_SCALE: f64 = 5.0;

/// Noise-free target for a feature value
pub fn model(x: f64) -> f64 {
    3.0 - 11.5 * x + 4.8 * x.powf(1.7) - 0.65 * x.powf(2.2)
}

/// `n` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = end;
            values
        }
    }
}

/// Generate the dataset for `params`; a pure function of the parameters
pub fn generate_polynomial(params: &GenerationParameters) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(params.random_seed);
    let n = params.point_count;

    let x: Vec<f64> = linspace(X_START, X_END, n)
        .into_iter()
        .map(|base| base + rng.gen::<f64>() - 0.5)
        .collect();
    let y: Vec<f64> = x
        .iter()
        .map(|&xi| model(xi) + (rng.gen::<f64>() - 0.5) * NOISE_SCALE)
        .collect();

    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(seed: u64, n: usize) -> GenerationParameters {
        GenerationParameters::new(seed, n).unwrap()
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(5.0, 25.0, 5), vec![5.0, 10.0, 15.0, 20.0, 25.0]);
        assert_eq!(linspace(5.0, 25.0, 1), vec![5.0]);
        assert!(linspace(5.0, 25.0, 0).is_empty());
    }

    #[test]
    fn test_generate_lengths() {
        for n in [1, 2, 20, 50] {
            let (x, y) = generate_polynomial(&params(42, n));
            assert_eq!(x.len(), n);
            assert_eq!(y.len(), n);
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let (x1, y1) = generate_polynomial(&params(42, 50));
        let (x2, y2) = generate_polynomial(&params(42, 50));
        let bits = |v: &[f64]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&x1), bits(&x2));
        assert_eq!(bits(&y1), bits(&y2));
    }

    #[test]
    fn test_seed_changes_output() {
        let (x1, _) = generate_polynomial(&params(1, 20));
        let (x2, _) = generate_polynomial(&params(2, 20));
        assert_ne!(x1, x2);
    }

    #[test]
    fn test_values_within_noise_bounds() {
        let (x, y) = generate_polynomial(&params(7, 200));
        let grid = linspace(X_START, X_END, 200);
        for ((xi, yi), gi) in x.iter().zip(&y).zip(&grid) {
            assert!((xi - gi).abs() <= 0.5);
            assert!((yi - model(*xi)).abs() <= NOISE_SCALE / 2.0);
            assert!(xi.is_finite() && yi.is_finite());
        }
    }
}
