//! Dense complex matrix.
//!
//! Gate matrices are fixed at 2x2/4x4, but reduced density matrices
//! (2^M x 2^M, M chosen at runtime) and the `naryTensor`/`naryMult`
//! helpers need a real variable-size type, backed by a flat row-major
//! buffer with indexing computed as `i*cols + j`.

use super::{C, N};
use crate::error::{CoreError, CoreResult};

/// Row-major dense complex matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: N,
    cols: N,
    data: Vec<C>,
}

impl Matrix {
    pub fn zeros(rows: N, cols: N) -> Self {
        Self {
            rows,
            cols,
            data: vec![C::new(0.0, 0.0); rows * cols],
        }
    }

    pub fn identity(n: N) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, C::new(1.0, 0.0));
        }
        m
    }

    /// Build a matrix from row-major data, checking `data.len() == rows * cols`.
    pub fn from_row_major(rows: N, cols: N, data: Vec<C>) -> CoreResult<Self> {
        if data.len() != rows * cols {
            return Err(CoreError::shape(format!(
                "expected {} entries for a {}x{} matrix, got {}",
                rows * cols,
                rows,
                cols,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    pub fn from_rows(rows: Vec<Vec<C>>) -> CoreResult<Self> {
        let r = rows.len();
        if r == 0 {
            return Err(CoreError::shape("matrix must have at least one row"));
        }
        let c = rows[0].len();
        if rows.iter().any(|row| row.len() != c) {
            return Err(CoreError::shape("ragged row lengths in from_rows"));
        }
        let data = rows.into_iter().flatten().collect();
        Self::from_row_major(r, c, data)
    }

    pub fn rows(&self) -> N {
        self.rows
    }

    pub fn cols(&self) -> N {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    fn index(&self, i: N, j: N) -> N {
        i * self.cols + j
    }

    pub fn get(&self, i: N, j: N) -> C {
        self.data[self.index(i, j)]
    }

    pub fn set(&mut self, i: N, j: N, value: C) {
        let idx = self.index(i, j);
        self.data[idx] = value;
    }

    pub fn as_slice(&self) -> &[C] {
        &self.data
    }

    pub fn sum(&self, other: &Self) -> CoreResult<Self> {
        self.check_same_shape(other, "sum")?;
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a + b)
                .collect(),
        })
    }

    pub fn diff(&self, other: &Self) -> CoreResult<Self> {
        self.check_same_shape(other, "diff")?;
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a - b)
                .collect(),
        })
    }

    pub fn scale(&self, s: C) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|a| a * s).collect(),
        }
    }

    fn check_same_shape(&self, other: &Self, op: &str) -> CoreResult<()> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(CoreError::shape(format!(
                "{}: shapes {}x{} and {}x{} disagree",
                op, self.rows, self.cols, other.rows, other.cols
            )));
        }
        Ok(())
    }

    /// Matrix product; `self` is (a×b), `other` is (b×c), result (a×c).
    pub fn mult(&self, other: &Self) -> CoreResult<Self> {
        if self.cols != other.rows {
            return Err(CoreError::shape(format!(
                "mult: inner dimensions {} and {} disagree",
                self.cols, other.rows
            )));
        }
        let mut out = Self::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a_ik = self.get(i, k);
                if a_ik == C::new(0.0, 0.0) {
                    continue;
                }
                for j in 0..other.cols {
                    let prev = out.get(i, j);
                    out.set(i, j, prev + a_ik * other.get(k, j));
                }
            }
        }
        Ok(out)
    }

    /// `naryMult([M1..Mk])`: associates right-to-left, which is the
    /// cheap order whenever the trailing factor is a column vector,
    /// the common case of applying an explicit operator to a state
    /// vector.
    pub fn nary_mult(factors: &[Self]) -> CoreResult<Self> {
        match factors.split_last() {
            None => Err(CoreError::invalid("nary_mult requires at least one matrix")),
            Some((last, rest)) => {
                let mut acc = last.clone();
                for m in rest.iter().rev() {
                    acc = m.mult(&acc)?;
                }
                Ok(acc)
            }
        }
    }

    /// Kronecker (tensor) product: (a×b) ⊗ (c×d) -> (ac × bd), with
    /// `(i·c + k, j·d + l) <- A[i,j]·B[k,l]`.
    pub fn tensor(&self, other: &Self) -> Self {
        let (a, b, c, d) = (self.rows, self.cols, other.rows, other.cols);
        let mut out = Self::zeros(a * c, b * d);
        for i in 0..a {
            for j in 0..b {
                let a_ij = self.get(i, j);
                if a_ij == C::new(0.0, 0.0) {
                    continue;
                }
                for k in 0..c {
                    for l in 0..d {
                        out.set(i * c + k, j * d + l, a_ij * other.get(k, l));
                    }
                }
            }
        }
        out
    }

    /// `naryTensor([q_{n-1}, ..., q_1, q_0])`: tensors factors in the
    /// order given, so that the caller writes the product in visual
    /// top-to-bottom wire order.
    pub fn nary_tensor(factors: &[Self]) -> CoreResult<Self> {
        let mut iter = factors.iter();
        let first = iter
            .next()
            .ok_or_else(|| CoreError::invalid("nary_tensor requires at least one matrix"))?
            .clone();
        Ok(iter.fold(first, |acc, m| acc.tensor(m)))
    }

    pub fn conjugate_transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.set(j, i, self.get(i, j).conj());
            }
        }
        out
    }

    /// Entrywise complex conjugate, without transposing.
    pub fn conjugate(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|a| a.conj()).collect(),
        }
    }

    pub fn trace(&self) -> CoreResult<C> {
        if !self.is_square() {
            return Err(CoreError::shape("trace requires a square matrix"));
        }
        Ok((0..self.rows).map(|i| self.get(i, i)).sum())
    }

    /// Reorders indices by reversing the bit positions of the index,
    /// for a square `2^n x 2^n` operator or a `2^n x 1` column vector.
    /// An involution on both shapes.
    pub fn reverse_endianness(&self, n: N) -> CoreResult<Self> {
        let dim = 1usize << n;
        let is_vector = self.cols == 1;
        if self.rows != dim || (!is_vector && self.cols != dim) {
            return Err(CoreError::shape(format!(
                "reverse_endianness: shape {}x{} incompatible with n={}",
                self.rows, self.cols, n
            )));
        }

        let reversed = |idx: N| -> N {
            let mut out = 0;
            for bit in 0..n {
                if idx & (1 << bit) != 0 {
                    out |= 1 << (n - 1 - bit);
                }
            }
            out
        };

        if is_vector {
            let mut out = Self::zeros(dim, 1);
            for i in 0..dim {
                out.set(reversed(i), 0, self.get(i, 0));
            }
            Ok(out)
        } else {
            let mut out = Self::zeros(dim, dim);
            for i in 0..dim {
                for j in 0..dim {
                    out.set(reversed(i), reversed(j), self.get(i, j));
                }
            }
            Ok(out)
        }
    }

    pub fn is_hermitian(&self, eps: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        for i in 0..self.rows {
            for j in 0..self.cols {
                if !crate::math::approx_cmp::approx_eq_conj(self.get(i, j), self.get(j, i), eps) {
                    return false;
                }
            }
        }
        true
    }
}
