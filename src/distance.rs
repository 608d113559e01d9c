//! Pairwise cosine distance and argmin over distance vectors

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::error::Result;

/// Pairwise cosine distance between the rows of `x` and the rows of `y`.
///
/// Entry `(i, j)` is `1 - x_i·y_j / (|x_i| |y_j|)`, clamped to `[0, 2]`.
/// Rows with zero norm produce `NaN`.
pub fn cosine_distance(x: ArrayView2<f64>, y: ArrayView2<f64>) -> Result<Array2<f64>> {
    if x.ncols() != y.ncols() {
        return Err(crate::BenchError::ShapeMismatch {
            left: x.ncols(),
            right: y.ncols(),
        });
    }

    let x_norms = row_norms(x);
    let y_norms = row_norms(y);

    let mut distances = x.dot(&y.t());
    for ((i, j), d) in distances.indexed_iter_mut() {
        *d = (1.0 - *d / (x_norms[i] * y_norms[j])).clamp(0.0, 2.0);
    }

    Ok(distances)
}

fn row_norms(m: ArrayView2<f64>) -> Array1<f64> {
    m.map_axis(Axis(1), |row| row.dot(&row).sqrt())
}

/// Index of the smallest value; the first occurrence wins ties.
///
/// A `NaN` compares as the minimum, so the first `NaN` index is returned.
pub fn argmin(values: ArrayView1<f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (i, &value) in values.iter().enumerate() {
        if value.is_nan() {
            return Some(i);
        }
        match best {
            Some((_, smallest)) if value >= smallest => {}
            _ => best = Some((i, value)),
        }
    }

    best.map(|(i, _)| i)
}
