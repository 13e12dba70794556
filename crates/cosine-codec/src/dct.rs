//! Direct orthonormal cosine transforms.
//!
//! Contour vectors are short (around 100 samples), so the transforms
//! are evaluated directly in O(n^2) rather than through an FFT
//! factorization. Both directions use the orthonormal scaling, making
//! [`idct_ortho`] the exact adjoint and inverse of [`dct_ortho`].

use std::f64::consts::PI;

/// Orthonormal DCT-II of `input`.
pub fn dct_ortho(input: &[f64]) -> Vec<f64> {
    let n = input.len();
    if n == 0 {
        return Vec::new();
    }
    let nf = n as f64;
    (0..n)
        .map(|k| {
            let sum: f64 = input
                .iter()
                .enumerate()
                .map(|(i, &x)| x * (PI * (2.0 * i as f64 + 1.0) * k as f64 / (2.0 * nf)).cos())
                .sum();
            scale(k, nf) * sum
        })
        .collect()
}

/// Orthonormal DCT-III of `input`, the inverse of [`dct_ortho`].
pub fn idct_ortho(input: &[f64]) -> Vec<f64> {
    let n = input.len();
    if n == 0 {
        return Vec::new();
    }
    let nf = n as f64;
    (0..n)
        .map(|i| {
            input
                .iter()
                .enumerate()
                .map(|(k, &c)| {
                    scale(k, nf)
                        * c
                        * (PI * (2.0 * i as f64 + 1.0) * k as f64 / (2.0 * nf)).cos()
                })
                .sum()
        })
        .collect()
}

fn scale(k: usize, n: f64) -> f64 {
    if k == 0 {
        (1.0 / n).sqrt()
    } else {
        (2.0 / n).sqrt()
    }
}
