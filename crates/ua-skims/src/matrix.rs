//! Dense zone-by-zone matrices.

use std::sync::Arc;

/// An `n × n` matrix of `f64`, row-major with origins as rows.
///
/// Values are shared: every matrix filled from the same (hour, mode, column)
/// points at one buffer, and all-zero matrices hold no buffer at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n:    usize,
    data: Option<Arc<[f64]>>,
}

impl Matrix {
    /// An all-zero matrix.
    pub fn zeros(n: usize) -> Self {
        Self { n, data: None }
    }

    /// Wrap `n * n` row-major values.
    ///
    /// # Panics
    /// Panics if `data.len() != n * n`.
    pub fn from_shared(n: usize, data: Arc<[f64]>) -> Self {
        assert_eq!(data.len(), n * n, "matrix data must hold n*n values");
        Self { n, data: Some(data) }
    }

    pub fn from_vec(n: usize, data: Vec<f64>) -> Self {
        Self::from_shared(n, data.into())
    }

    /// Side length (zone count).
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn is_zero_filled(&self) -> bool {
        self.data.is_none()
    }

    /// Value at 0-based (origin, destination).
    #[inline]
    pub fn get(&self, origin: usize, destination: usize) -> f64 {
        match &self.data {
            Some(d) => d[origin * self.n + destination],
            None => 0.0,
        }
    }

    /// Value at flat row-major position `k`.
    #[inline]
    pub fn at(&self, k: usize) -> f64 {
        match &self.data {
            Some(d) => d[k],
            None => 0.0,
        }
    }

    /// All values, row-major.  Zero-filled matrices are materialised.
    pub fn to_vec(&self) -> Vec<f64> {
        match &self.data {
            Some(d) => d.to_vec(),
            None => vec![0.0; self.n * self.n],
        }
    }
}
