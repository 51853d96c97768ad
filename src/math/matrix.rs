use rand::Rng;

/// Dense row-major matrix. Shape is fixed at construction; `data` rows are
/// never pushed to or truncated.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Uniform draws on [-0.5, 0.5), filled row by row.
    pub fn uniform<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() - 0.5;
            }
        }

        res
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        let cols = data.first().map_or(0, |row| row.len());
        assert!(
            data.iter().all(|row| row.len() == cols),
            "Matrix rows must all have the same length"
        );
        Matrix {
            rows: data.len(),
            cols,
            data,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Writes `self * v` into `out`. `v` must have `cols` entries and `out` `rows`.
    pub fn mul_vec_into(&self, v: &[f64], out: &mut [f64]) {
        assert_eq!(v.len(), self.cols, "Vector length does not match matrix columns");
        assert_eq!(out.len(), self.rows, "Output length does not match matrix rows");

        for (row, o) in self.data.iter().zip(out.iter_mut()) {
            *o = dot(row, v);
        }
    }

    /// Writes `selfᵀ * v` into `out` without materialising the transpose.
    pub fn transpose_mul_vec_into(&self, v: &[f64], out: &mut [f64]) {
        assert_eq!(v.len(), self.rows, "Vector length does not match matrix rows");
        assert_eq!(out.len(), self.cols, "Output length does not match matrix columns");

        for (j, o) in out.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (i, row) in self.data.iter().enumerate() {
                sum += row[j] * v[i];
            }
            *o = sum;
        }
    }

    /// In-place rank-one update: `self[i][j] += scale * row_factor[i] * col_factor[j]`.
    pub fn add_outer(&mut self, scale: f64, row_factor: &[f64], col_factor: &[f64]) {
        assert_eq!(row_factor.len(), self.rows, "Row factor length does not match matrix rows");
        assert_eq!(col_factor.len(), self.cols, "Column factor length does not match matrix columns");

        for (row, &r) in self.data.iter_mut().zip(row_factor.iter()) {
            let k = scale * r;
            for (w, &c) in row.iter_mut().zip(col_factor.iter()) {
                *w += k * c;
            }
        }
    }
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn uniform_stays_in_half_open_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Matrix::uniform(20, 30, &mut rng);
        assert_eq!(m.shape(), (20, 30));
        assert!(m.data.iter().flatten().all(|&w| (-0.5..0.5).contains(&w)));
    }

    #[test]
    fn mul_vec_and_transpose() {
        let m = Matrix::from_data(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let mut out = [0.0; 2];
        m.mul_vec_into(&[1.0, 0.0, -1.0], &mut out);
        assert_eq!(out, [-2.0, -2.0]);

        let mut back = [0.0; 3];
        m.transpose_mul_vec_into(&[1.0, 2.0], &mut back);
        assert_eq!(back, [9.0, 12.0, 15.0]);
    }

    #[test]
    fn add_outer_keeps_shape() {
        let mut m = Matrix::zeros(2, 3);
        m.add_outer(0.5, &[1.0, 2.0], &[1.0, 0.0, 4.0]);
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.data, vec![vec![0.5, 0.0, 2.0], vec![1.0, 0.0, 4.0]]);
    }
}
