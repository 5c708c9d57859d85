use rand::Rng;

/// Dense row-major matrix backed by one flat buffer.
///
/// Weight tables are stored `inputs × outputs`, so `get(row, col)` is the
/// connection from input unit `row` to output unit `col` and the flat layout
/// is exactly the one written to model files.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl Matrix {
    /// Wraps an existing flat buffer. Returns `None` if the length does not
    /// equal `rows * cols`.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<f64>) -> Option<Matrix> {
        (data.len() == rows * cols).then_some(Matrix { rows, cols, data })
    }

    /// Xavier (Glorot) uniform initialization: every entry is drawn from
    /// U[-limit, limit] with `limit = sqrt(6 / (rows + cols))`.
    ///
    /// Suited to tanh layers: forward signal variance stays roughly constant
    /// from layer to layer.
    pub fn xavier_uniform<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let limit = xavier_limit(rows, cols);
        let data = (0..rows * cols)
            .map(|_| rng.gen_range(-limit..=limit))
            .collect();
        Matrix { rows, cols, data }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Glorot bound for a layer with the given fan-in and fan-out.
pub fn xavier_limit(fan_in: usize, fan_out: usize) -> f64 {
    (6.0 / (fan_in + fan_out) as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn xavier_weights_stay_within_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Matrix::xavier_uniform(784, 24, &mut rng);
        let limit = xavier_limit(784, 24);

        assert_eq!(m.len(), 784 * 24);
        assert!(m.data.iter().all(|w| (-limit..=limit).contains(w)));
    }

    #[test]
    fn xavier_is_reproducible_for_a_seed() {
        let a = Matrix::xavier_uniform(5, 3, &mut StdRng::seed_from_u64(123));
        let b = Matrix::xavier_uniform(5, 3, &mut StdRng::seed_from_u64(123));
        assert_eq!(a, b);
    }

    #[test]
    fn row_major_indexing() {
        let m = Matrix::from_flat(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.get(1, 0), 4.0);
        assert_eq!(m.row(0), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn from_flat_rejects_wrong_length() {
        assert!(Matrix::from_flat(2, 2, vec![0.0; 3]).is_none());
    }
}
