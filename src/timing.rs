//! Wall-clock timing of zero-argument callables

use std::hint::black_box;
use std::time::Instant;

use crate::error::Result;

/// Repeated timer over a zero-argument callable.
///
/// The callable closes over whatever data it needs; the timer never passes
/// arguments, so each call measures only the work inside the closure.
pub struct Timer<F> {
    callable: F,
}

impl<F> Timer<F> {
    pub fn new(callable: F) -> Self {
        Self { callable }
    }

    /// Time `repeat` runs of `number` calls each, one sample per run
    pub fn repeat<T>(&mut self, repeat: usize, number: usize) -> Result<Samples>
    where
        F: FnMut() -> Result<T>,
    {
        let mut durations = Vec::with_capacity(repeat);

        for _ in 0..repeat {
            let start = Instant::now();
            for _ in 0..number {
                black_box((self.callable)()?);
            }
            durations.push(start.elapsed().as_secs_f64());
        }

        Ok(Samples::new(durations))
    }
}

/// Ordered duration samples in seconds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Samples {
    durations: Vec<f64>,
}

impl Samples {
    pub fn new(durations: Vec<f64>) -> Self {
        Self { durations }
    }

    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    pub fn mean(&self) -> Result<f64> {
        mean(&self.durations)
    }
}

/// Arithmetic mean; an empty slice is an error
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(crate::BenchError::NoSamples(
            "cannot average an empty sequence".to_string(),
        ));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// How many times faster the vectorised mean is than the loop mean
pub fn speedup(loop_mean: f64, vectorised_mean: f64) -> Result<f64> {
    if vectorised_mean == 0.0 {
        return Err(crate::BenchError::ZeroDuration(format!(
            "vectorised mean is zero (loop mean {})",
            loop_mean
        )));
    }
    Ok(loop_mean / vectorised_mean)
}
