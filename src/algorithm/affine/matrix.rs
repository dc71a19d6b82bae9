use crate::Error;

/// A dense, row-major matrix of doubles.
///
/// This is the small linear-algebra kernel backing the control-point
/// constructors of [`AffineTransform`](super::AffineTransform): enough to
/// decompose, solve, and invert, with singularity detection.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl GeneralMatrix {
    /// A `rows` × `cols` matrix of zeros.
    pub fn new(rows: usize, cols: usize) -> Self {
        GeneralMatrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// The `n` × `n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Build a matrix from row slices. All rows must have equal length.
    pub fn from_rows(rows: &[&[f64]]) -> Result<Self, Error> {
        let row_count = rows.len();
        let col_count = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.iter().any(|r| r.len() != col_count) {
            return Err(Error::InvalidArgument("rows must have equal lengths"));
        }
        let mut m = Self::new(row_count, col_count);
        for (i, row) in rows.iter().enumerate() {
            m.data[i * col_count..(i + 1) * col_count].copy_from_slice(row);
        }
        Ok(m)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// A copy of the internal storage in row-major order.
    pub fn row_packed_copy(&self) -> Vec<f64> {
        self.data.clone()
    }

    /// Matrix product `self · other`.
    pub fn matmul(&self, other: &GeneralMatrix) -> Result<GeneralMatrix, Error> {
        if self.cols != other.rows {
            return Err(Error::InvalidArgument("matrix inner dimensions must agree"));
        }
        let mut out = GeneralMatrix::new(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let lhs = self.get(i, k);
                if lhs == 0.0 {
                    continue;
                }
                for j in 0..other.cols {
                    let v = out.get(i, j) + lhs * other.get(k, j);
                    out.set(i, j, v);
                }
            }
        }
        Ok(out)
    }

    /// The LU decomposition of this matrix, with partial pivoting.
    pub fn lu(&self) -> LuDecomposition {
        LuDecomposition::new(self)
    }

    /// Solve `self · x = rhs` for `x`.
    ///
    /// `self` must be square; returns [`Error::SingularMatrix`] when the
    /// decomposition hits a zero pivot.
    pub fn solve(&self, rhs: &GeneralMatrix) -> Result<GeneralMatrix, Error> {
        if !self.is_square() {
            return Err(Error::InvalidArgument("solve requires a square matrix"));
        }
        self.lu().solve(rhs)
    }

    /// The inverse of this square matrix.
    pub fn inverse(&self) -> Result<GeneralMatrix, Error> {
        if !self.is_square() {
            return Err(Error::InvalidArgument("inverse requires a square matrix"));
        }
        self.lu().solve(&GeneralMatrix::identity(self.rows))
    }

    /// The determinant of this square matrix.
    pub fn determinant(&self) -> Result<f64, Error> {
        if !self.is_square() {
            return Err(Error::InvalidArgument(
                "determinant requires a square matrix",
            ));
        }
        Ok(self.lu().determinant())
    }
}

/// LU decomposition with partial pivoting (Crout/Doolittle), in the style of
/// the classical JAMA decomposition: `P·A = L·U` with unit lower-triangular
/// `L` stored below the diagonal of `lu` and `U` on and above it.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    lu: GeneralMatrix,
    piv: Vec<usize>,
    pivsign: f64,
}

impl LuDecomposition {
    fn new(matrix: &GeneralMatrix) -> Self {
        let m = matrix.rows;
        let n = matrix.cols;
        let mut lu = matrix.clone();
        let mut piv: Vec<usize> = (0..m).collect();
        let mut pivsign = 1.0;
        let mut lu_col_j = vec![0.0; m];

        for j in 0..n {
            for (i, entry) in lu_col_j.iter_mut().enumerate().take(m) {
                *entry = lu.get(i, j);
            }

            // apply previous transformations: dot product of row i of L with
            // column j of U
            for i in 0..m {
                let kmax = i.min(j);
                let mut s = 0.0;
                for (k, entry) in lu_col_j.iter().enumerate().take(kmax) {
                    s += lu.get(i, k) * entry;
                }
                lu_col_j[i] -= s;
                lu.set(i, j, lu_col_j[i]);
            }

            // find the pivot and exchange rows if necessary
            let mut p = j;
            for i in (j + 1)..m {
                if lu_col_j[i].abs() > lu_col_j[p].abs() {
                    p = i;
                }
            }
            if p != j {
                for k in 0..n {
                    let tmp = lu.get(p, k);
                    lu.set(p, k, lu.get(j, k));
                    lu.set(j, k, tmp);
                }
                piv.swap(p, j);
                pivsign = -pivsign;
            }

            // compute multipliers
            if j < m && lu.get(j, j) != 0.0 {
                for i in (j + 1)..m {
                    let v = lu.get(i, j) / lu.get(j, j);
                    lu.set(i, j, v);
                }
            }
        }

        LuDecomposition { lu, piv, pivsign }
    }

    /// True iff `U` has no zero diagonal pivot.
    pub fn is_nonsingular(&self) -> bool {
        (0..self.lu.cols.min(self.lu.rows)).all(|j| self.lu.get(j, j) != 0.0)
    }

    /// The determinant of the decomposed matrix.
    pub fn determinant(&self) -> f64 {
        let mut det = self.pivsign;
        for j in 0..self.lu.rows {
            det *= self.lu.get(j, j);
        }
        det
    }

    /// Solve `A · x = rhs` using the decomposition.
    pub fn solve(&self, rhs: &GeneralMatrix) -> Result<GeneralMatrix, Error> {
        if rhs.rows != self.lu.rows {
            return Err(Error::InvalidArgument(
                "right-hand side row count must match the matrix",
            ));
        }
        if !self.is_nonsingular() {
            return Err(Error::SingularMatrix);
        }

        // permute the right-hand side rows to match the pivoting
        let n = self.lu.cols;
        let nx = rhs.cols;
        let mut x = GeneralMatrix::new(rhs.rows, nx);
        for (i, &p) in self.piv.iter().enumerate() {
            for j in 0..nx {
                x.set(i, j, rhs.get(p, j));
            }
        }

        // forward-solve L · y = rhs
        for k in 0..n {
            for i in (k + 1)..n {
                let factor = self.lu.get(i, k);
                for j in 0..nx {
                    let v = x.get(i, j) - x.get(k, j) * factor;
                    x.set(i, j, v);
                }
            }
        }

        // back-solve U · x = y
        for k in (0..n).rev() {
            let pivot = self.lu.get(k, k);
            for j in 0..nx {
                x.set(k, j, x.get(k, j) / pivot);
            }
            for i in 0..k {
                let factor = self.lu.get(i, k);
                for j in 0..nx {
                    let v = x.get(i, j) - x.get(k, j) * factor;
                    x.set(i, j, v);
                }
            }
        }

        Ok(x)
    }
}
