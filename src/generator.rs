//! Random mock-embedding generation

use ndarray::{Array2, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::error::Result;

/// Two random embedding sets.
///
/// Both matchers read the same `MatrixPair` within a timing run, so the
/// comparison sees identical input.
#[derive(Debug, Clone)]
pub struct MatrixPair {
    /// Matrix A, shape `(rows, vector_length)`
    pub one: Array2<f64>,
    /// Matrix B, shape `(rows, vector_length)`
    pub two: Array2<f64>,
}

impl MatrixPair {
    /// Build the pair from two existing matrices
    pub fn new(one: Array2<f64>, two: Array2<f64>) -> Result<Self> {
        if one.ncols() != two.ncols() {
            return Err(crate::BenchError::ShapeMismatch {
                left: one.ncols(),
                right: two.ncols(),
            });
        }

        Ok(Self { one, two })
    }

    /// Row `row` of A as a borrowed `(1, vector_length)` view
    pub fn row_view(&self, row: usize) -> Option<ArrayView2<'_, f64>> {
        (row < self.one.nrows()).then(|| self.one.row(row).insert_axis(Axis(0)))
    }

    pub fn rows(&self) -> usize {
        self.one.nrows()
    }

    pub fn vector_length(&self) -> usize {
        self.one.ncols()
    }
}

/// Uniform `[0, 1)` matrix generator
pub struct DataGenerator {
    rng: StdRng,
}

impl DataGenerator {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        match config.seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Generate a fresh pair of `(rows, vector_length)` matrices
    pub fn generate(&mut self, rows: usize, vector_length: usize) -> Result<MatrixPair> {
        let one = self.random_matrix(rows, vector_length);
        let two = self.random_matrix(rows, vector_length);
        MatrixPair::new(one, two)
    }

    fn random_matrix(&mut self, rows: usize, cols: usize) -> Array2<f64> {
        let rng = &mut self.rng;
        Array2::from_shape_fn((rows, cols), |_| rng.gen::<f64>())
    }
}
