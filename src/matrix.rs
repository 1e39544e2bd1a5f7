//! Dense row-major matrices
//!
//! A deliberately small matrix type carrying exactly the operations the
//! matching solvers need: products (plain and one-side-transposed),
//! elementwise product sums, simultaneous row/column reindexing, the
//! four-block seed split, and Frobenius distances. All data lives in a
//! single contiguous `Vec<f64>`; block extraction reindexes that backing
//! storage rather than going through nested vectors.

use std::ops::{Index, IndexMut};

/// Dense row-major matrix of `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mat {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Mat {
    /// Create a matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create a matrix with every entry set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Create a matrix from a row-major slice.
    ///
    /// # Panics
    /// Panics if `data.len() != rows * cols`.
    pub fn from_slice(data: &[f64], rows: usize, cols: usize) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "data length {} does not match {}x{}",
            data.len(),
            rows,
            cols
        );
        Self {
            rows,
            cols,
            data: data.to_vec(),
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True if the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Borrow the row-major backing storage.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Mat {
        let mut out = Mat::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        out
    }

    /// Matrix product `self · other`.
    pub fn matmul(&self, other: &Mat) -> Mat {
        assert_eq!(self.cols, other.rows, "inner dimensions must agree");
        let mut out = Mat::zeros(self.rows, other.cols);
        // i-k-j loop order keeps the inner accesses contiguous
        for i in 0..self.rows {
            for k in 0..self.cols {
                let aik = self.data[i * self.cols + k];
                if aik == 0.0 {
                    continue;
                }
                let brow = &other.data[k * other.cols..(k + 1) * other.cols];
                let orow = &mut out.data[i * other.cols..(i + 1) * other.cols];
                for (o, &b) in orow.iter_mut().zip(brow) {
                    *o += aik * b;
                }
            }
        }
        out
    }

    /// Matrix product `selfᵀ · other` without materializing the transpose.
    pub fn matmul_tn(&self, other: &Mat) -> Mat {
        assert_eq!(self.rows, other.rows, "inner dimensions must agree");
        let mut out = Mat::zeros(self.cols, other.cols);
        for k in 0..self.rows {
            for i in 0..self.cols {
                let aki = self.data[k * self.cols + i];
                if aki == 0.0 {
                    continue;
                }
                let brow = &other.data[k * other.cols..(k + 1) * other.cols];
                let orow = &mut out.data[i * other.cols..(i + 1) * other.cols];
                for (o, &b) in orow.iter_mut().zip(brow) {
                    *o += aki * b;
                }
            }
        }
        out
    }

    /// Matrix product `self · otherᵀ` without materializing the transpose.
    pub fn matmul_nt(&self, other: &Mat) -> Mat {
        assert_eq!(self.cols, other.cols, "inner dimensions must agree");
        let mut out = Mat::zeros(self.rows, other.rows);
        for i in 0..self.rows {
            let arow = &self.data[i * self.cols..(i + 1) * self.cols];
            for j in 0..other.rows {
                let brow = &other.data[j * other.cols..(j + 1) * other.cols];
                let mut acc = 0.0;
                for (&a, &b) in arow.iter().zip(brow) {
                    acc += a * b;
                }
                out.data[i * other.rows + j] = acc;
            }
        }
        out
    }

    /// Elementwise sum `self + other`.
    pub fn add(&self, other: &Mat) -> Mat {
        assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&x, &y)| x + y)
            .collect();
        Mat {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    /// Sum of the elementwise product `Σ self[i,j] · other[i,j]`.
    pub fn dot_sum(&self, other: &Mat) -> f64 {
        assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        self.data
            .iter()
            .zip(&other.data)
            .map(|(&x, &y)| x * y)
            .sum()
    }

    /// Negated copy.
    pub fn neg(&self) -> Mat {
        Mat {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| -x).collect(),
        }
    }

    /// Reindexed copy: `out[i,j] = self[row_perm[i], col_perm[j]]`.
    pub fn permuted(&self, row_perm: &[usize], col_perm: &[usize]) -> Mat {
        assert_eq!(row_perm.len(), self.rows);
        assert_eq!(col_perm.len(), self.cols);
        let mut out = Mat::zeros(self.rows, self.cols);
        for (i, &ri) in row_perm.iter().enumerate() {
            let src = &self.data[ri * self.cols..(ri + 1) * self.cols];
            let dst = &mut out.data[i * self.cols..(i + 1) * self.cols];
            for (d, &cj) in dst.iter_mut().zip(col_perm) {
                *d = src[cj];
            }
        }
        out
    }

    /// Split a square matrix into four blocks at row/column `m`:
    /// `(X11, X12, X21, X22)` with `X11` of order `m`.
    pub fn split_blocks(&self, m: usize) -> (Mat, Mat, Mat, Mat) {
        assert!(self.is_square());
        assert!(m <= self.rows);
        let k = self.rows - m;
        let mut x11 = Mat::zeros(m, m);
        let mut x12 = Mat::zeros(m, k);
        let mut x21 = Mat::zeros(k, m);
        let mut x22 = Mat::zeros(k, k);
        for i in 0..self.rows {
            for j in 0..self.cols {
                let v = self.data[i * self.cols + j];
                match (i < m, j < m) {
                    (true, true) => x11.data[i * m + j] = v,
                    (true, false) => x12.data[i * k + (j - m)] = v,
                    (false, true) => x21.data[(i - m) * m + j] = v,
                    (false, false) => x22.data[(i - m) * k + (j - m)] = v,
                }
            }
        }
        (x11, x12, x21, x22)
    }

    /// Frobenius norm of `self − other`.
    pub fn frobenius_distance(&self, other: &Mat) -> f64 {
        assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        self.data
            .iter()
            .zip(&other.data)
            .map(|(&x, &y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt()
    }

    /// Per-row sums.
    pub fn row_sums(&self) -> Vec<f64> {
        self.data
            .chunks_exact(self.cols.max(1))
            .map(|row| row.iter().sum())
            .collect()
    }

    /// Per-column sums.
    pub fn col_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.cols];
        for row in self.data.chunks_exact(self.cols.max(1)) {
            for (s, &v) in sums.iter_mut().zip(row) {
                *s += v;
            }
        }
        sums
    }
}

impl Index<(usize, usize)> for Mat {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        debug_assert!(i < self.rows && j < self.cols);
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Mat {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        debug_assert!(i < self.rows && j < self.cols);
        &mut self.data[i * self.cols + j]
    }
}
