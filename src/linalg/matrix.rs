//! dense row-major matrices over GF(p)
//!
//! Rows and columns are addressed from 1, the convention of the protocols
//! consuming these matrices.

use super::gauss_jordan;
use crate::error::{Error, Result};
use crate::math::{vector, FieldElement, Modulus};

/// a matrix whose elements all share one modulus
/// Example:
/// ```
/// use gfp_linalg::{linalg::Matrix, math::Modulus};
///
/// let p = Modulus::default();
/// let a = Matrix::from_i64(&p, 2, 3, &[1, 2, 3, 4, 5, 6]).unwrap();
/// let b = Matrix::from_i64(&p, 3, 1, &[3, 2, 1]).unwrap();
/// assert_eq!(a.multiply(&b).unwrap(), Matrix::from_i64(&p, 2, 1, &[10, 28]).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    modulus: Modulus,
    values: Vec<FieldElement>,
}

impl Matrix {
    /// constructs a matrix from row-major values, padding missing entries with zero
    pub fn new(
        modulus: &Modulus,
        rows: usize,
        cols: usize,
        mut values: Vec<FieldElement>,
    ) -> Result<Self> {
        let len = rows
            .checked_mul(cols)
            .ok_or(Error::DimensionMismatch {
                expected: rows,
                actual: cols,
            })?;
        if values.len() > len {
            return Err(Error::DimensionMismatch {
                expected: len,
                actual: values.len(),
            });
        }
        if values.iter().any(|value| value.modulus() != modulus) {
            return Err(Error::ModulusMismatch);
        }
        values.resize(len, FieldElement::zero(modulus));
        Ok(Self {
            rows,
            cols,
            modulus: modulus.clone(),
            values,
        })
    }

    pub fn from_i64(modulus: &Modulus, rows: usize, cols: usize, values: &[i64]) -> Result<Self> {
        let values = values
            .iter()
            .map(|&value| FieldElement::from_i64(modulus, value))
            .collect();
        Self::new(modulus, rows, cols, values)
    }

    /// constructs a matrix from its rows, which must all have the same length
    pub fn from_rows(modulus: &Modulus, rows: Vec<Vec<FieldElement>>) -> Result<Self> {
        let cols = rows.first().ok_or(Error::EmptyMatrix)?.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(Error::RaggedMatrix {
                row: i + 1,
                expected: cols,
                actual: row.len(),
            });
        }
        let count = rows.len();
        Self::new(modulus, count, cols, rows.into_iter().flatten().collect())
    }

    /// # Panics
    /// Panics if `rows * cols` overflows `usize`.
    pub fn zeros(modulus: &Modulus, rows: usize, cols: usize) -> Self {
        let Some(len) = rows.checked_mul(cols) else {
            panic!("matrix of {rows}x{cols} entries overflows usize");
        };
        Self {
            rows,
            cols,
            modulus: modulus.clone(),
            values: vec![FieldElement::zero(modulus); len],
        }
    }

    pub fn identity(modulus: &Modulus, n: usize) -> Self {
        let mut m = Self::zeros(modulus, n, n);
        for i in 0..n {
            m.values[i * n + i] = FieldElement::one(modulus);
        }
        m
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn col_count(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn modulus(&self) -> &Modulus {
        &self.modulus
    }

    /// row-major view of every element
    pub fn values(&self) -> &[FieldElement] {
        &self.values
    }

    fn check_index(index: usize, bound: usize) -> Result<usize> {
        if (1..=bound).contains(&index) {
            Ok(index - 1)
        } else {
            Err(Error::OutOfBounds { index, bound })
        }
    }

    fn check_entries(&self, entries: &[FieldElement], expected: usize) -> Result<()> {
        if entries.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: entries.len(),
            });
        }
        if entries.iter().any(|entry| entry.modulus() != &self.modulus) {
            return Err(Error::ModulusMismatch);
        }
        Ok(())
    }

    fn row_slice(&self, r: usize) -> &[FieldElement] {
        &self.values[r * self.cols..(r + 1) * self.cols]
    }

    /// the entry at row `r`, column `c`
    pub fn get(&self, r: usize, c: usize) -> Result<&FieldElement> {
        let r = Self::check_index(r, self.rows)?;
        let c = Self::check_index(c, self.cols)?;
        Ok(&self.values[r * self.cols + c])
    }

    /// a copy of row `r`
    pub fn row(&self, r: usize) -> Result<Vec<FieldElement>> {
        let r = Self::check_index(r, self.rows)?;
        Ok(self.row_slice(r).to_vec())
    }

    /// a copy of column `c`
    pub fn col(&self, c: usize) -> Result<Vec<FieldElement>> {
        let c = Self::check_index(c, self.cols)?;
        Ok(self
            .values
            .iter()
            .skip(c)
            .step_by(self.cols)
            .cloned()
            .collect())
    }

    /// overwrites row `r`
    pub fn set_row(&mut self, r: usize, row: &[FieldElement]) -> Result<&mut Self> {
        let r = Self::check_index(r, self.rows)?;
        self.check_entries(row, self.cols)?;
        self.values[r * self.cols..(r + 1) * self.cols].clone_from_slice(row);
        Ok(self)
    }

    /// overwrites column `c`
    pub fn set_col(&mut self, c: usize, col: &[FieldElement]) -> Result<&mut Self> {
        let c = Self::check_index(c, self.cols)?;
        self.check_entries(col, self.rows)?;
        for (entry, value) in self
            .values
            .iter_mut()
            .skip(c)
            .step_by(self.cols)
            .zip(col)
        {
            *entry = value.clone();
        }
        Ok(self)
    }

    /// multiplies every element by `scalar` in place
    pub fn scalar_mul(&mut self, scalar: &FieldElement) -> Result<&mut Self> {
        if scalar.modulus() != &self.modulus {
            return Err(Error::ModulusMismatch);
        }
        for value in self.values.iter_mut() {
            *value *= scalar;
        }
        Ok(self)
    }

    pub fn transpose(&self) -> Self {
        let mut values = Vec::with_capacity(self.values.len());
        for c in 0..self.cols {
            values.extend(self.values.iter().skip(c).step_by(self.cols).cloned());
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            modulus: self.modulus.clone(),
            values,
        }
    }

    /// computes `self · other` as a new `self.rows × other.cols` matrix
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        if self.modulus != other.modulus {
            return Err(Error::ModulusMismatch);
        }
        if self.cols != other.rows {
            return Err(Error::DimensionMismatch {
                expected: self.cols,
                actual: other.rows,
            });
        }
        let columns = other.transpose();
        let mut values = Vec::with_capacity(self.rows * other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                values.push(vector::linear_combination(
                    &self.modulus,
                    self.row_slice(i),
                    columns.row_slice(j),
                )?);
            }
        }
        Ok(Self {
            rows: self.rows,
            cols: other.cols,
            modulus: self.modulus.clone(),
            values,
        })
    }

    /// solves `self · x = results`, see [`gauss_jordan::solve`]
    pub fn solve(&self, results: &[FieldElement]) -> Result<Vec<FieldElement>> {
        gauss_jordan::solve(&self.to_2d(), results)
    }

    /// inverts a square matrix by solving against each standard basis vector
    pub fn inverse(&self) -> Result<Self> {
        if self.rows != self.cols {
            return Err(Error::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let n = self.rows;
        if n == 0 {
            return Err(Error::EmptyMatrix);
        }
        let _span = tracing::debug_span!("invert", n).entered();
        let system = self.to_2d();
        let identity = Self::identity(&self.modulus, n);
        let mut inverse = Self::zeros(&self.modulus, n, n);
        for i in 1..=n {
            let column = gauss_jordan::solve(&system, &identity.row(i)?)?;
            inverse.set_col(i, &column)?;
        }
        Ok(inverse)
    }

    /// copies the matrix into nested rows
    pub fn to_2d(&self) -> Vec<Vec<FieldElement>> {
        (0..self.rows).map(|r| self.row_slice(r).to_vec()).collect()
    }

    pub fn is_identity(&self) -> bool {
        self.rows == self.cols
            && self.values.iter().enumerate().all(|(idx, value)| {
                if idx / self.cols == idx % self.cols {
                    value.is_one()
                } else {
                    value.is_zero()
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use rand::{rngs::StdRng, SeedableRng};

    fn random_matrix(p: &Modulus, n: usize, rng: &mut StdRng) -> Matrix {
        let values = (0..n * n)
            .map(|_| FieldElement::random_with(p, rng))
            .collect();
        Matrix::new(p, n, n, values).unwrap()
    }

    #[test]
    fn test_basic_matrix() {
        let p = Modulus::default();
        let data: Vec<_> = (0..10).map(|_| FieldElement::random(&p)).collect();

        let mut m = Matrix::new(&p, 2, 5, data.clone()).unwrap();
        assert_eq!(m.shape(), (2, 5));

        let row = m.row(2).unwrap();
        assert_eq!(row[4], data[9], "get row failed");
        let col = m.col(5).unwrap();
        assert_eq!(row[4], col[1], "get column failed");

        let scalar = FieldElement::from_u64(&p, 2).pow_u64(256);
        m.scalar_mul(&scalar).unwrap();
        assert_eq!(m.values()[9], &data[9] * &scalar, "scalar mult failed");

        let ones = vec![FieldElement::one(&p); 5];
        m.set_row(1, &ones).unwrap();
        assert_eq!(m.values()[0], m.values()[4], "set row failed");
        m.set_col(5, &ones[..2]).unwrap();
        assert_eq!(m.values()[9], m.values()[4], "set column failed");
    }

    #[test]
    fn test_copies_do_not_alias() {
        let p = Modulus::default();
        let m = Matrix::from_i64(&p, 2, 2, &[1, 2, 3, 4]).unwrap();
        let mut row = m.row(1).unwrap();
        row[0] = FieldElement::from_u64(&p, 9);
        let mut grid = m.to_2d();
        grid[1][1] = FieldElement::from_u64(&p, 9);
        let mut copy = m.clone();
        copy.scalar_mul(&FieldElement::from_u64(&p, 3)).unwrap();
        assert_eq!(m, Matrix::from_i64(&p, 2, 2, &[1, 2, 3, 4]).unwrap());
    }

    #[test]
    fn test_chained_setters() {
        let p = Modulus::default();
        let mut m = Matrix::zeros(&p, 2, 2);
        let ones = vec![FieldElement::one(&p); 2];
        m.set_row(1, &ones)
            .unwrap()
            .set_col(2, &ones)
            .unwrap()
            .scalar_mul(&FieldElement::from_u64(&p, 5))
            .unwrap();
        assert_eq!(m, Matrix::from_i64(&p, 2, 2, &[5, 5, 0, 5]).unwrap());
    }

    #[test]
    fn test_padding_and_shape_errors() {
        let p = Modulus::default();
        let m = Matrix::from_i64(&p, 2, 2, &[1]).unwrap();
        assert_eq!(m, Matrix::from_i64(&p, 2, 2, &[1, 0, 0, 0]).unwrap());
        assert_eq!(
            Matrix::from_i64(&p, 1, 2, &[1, 2, 3]),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert_eq!(
            m.row(3),
            Err(Error::OutOfBounds { index: 3, bound: 2 })
        );
        assert_eq!(m.get(0, 1), Err(Error::OutOfBounds { index: 0, bound: 2 }));
        assert_eq!(m.get(1, 1), Ok(&FieldElement::one(&p)));

        let mut m = m;
        assert_eq!(
            m.set_row(1, &[FieldElement::one(&p)]).map(|_| ()),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_from_rows() {
        let p = Modulus::default();
        let e = |v: i64| FieldElement::from_i64(&p, v);
        let m = Matrix::from_rows(&p, vec![vec![e(1), e(2)], vec![e(3), e(4)]]).unwrap();
        assert_eq!(m, Matrix::from_i64(&p, 2, 2, &[1, 2, 3, 4]).unwrap());
        assert_eq!(m.to_2d(), vec![vec![e(1), e(2)], vec![e(3), e(4)]]);
        assert_eq!(
            Matrix::from_rows(&p, vec![vec![e(1), e(2), e(3)], vec![e(4), e(5)]]),
            Err(Error::RaggedMatrix {
                row: 2,
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(Matrix::from_rows(&p, vec![]), Err(Error::EmptyMatrix));
    }

    #[test]
    fn test_mixed_moduli() {
        let p = Modulus::default();
        let q = Modulus::new_unchecked(BigUint::from(5u8));
        assert_eq!(
            Matrix::new(&p, 1, 1, vec![FieldElement::one(&q)]),
            Err(Error::ModulusMismatch)
        );
        let a = Matrix::identity(&p, 2);
        let b = Matrix::identity(&q, 2);
        assert_eq!(a.multiply(&b), Err(Error::ModulusMismatch));
        let mut a = a;
        assert_eq!(
            a.scalar_mul(&FieldElement::one(&q)).map(|_| ()),
            Err(Error::ModulusMismatch)
        );
    }

    #[test]
    fn test_multiplication() {
        let p = Modulus::default();
        let m1 = Matrix::from_i64(&p, 2, 3, &[1, 2, 3, 4, 5, 6]).unwrap();
        let m2 = Matrix::from_i64(&p, 3, 1, &[3, 2, 1]).unwrap();
        let res = m1.multiply(&m2).unwrap();
        assert_eq!(res.shape(), (2, 1), "wrong structure");
        assert_eq!(res.values()[0], FieldElement::from_u64(&p, 10));
        assert_eq!(res.values()[1], FieldElement::from_u64(&p, 28));

        assert_eq!(
            m2.multiply(&m2),
            Err(Error::DimensionMismatch {
                expected: 1,
                actual: 3
            })
        );
    }

    #[test]
    fn test_transpose() {
        let p = Modulus::default();
        let m = Matrix::from_i64(&p, 2, 3, &[1, 2, 3, 4, 5, 6]).unwrap();
        let t = m.transpose();
        assert_eq!(t, Matrix::from_i64(&p, 3, 2, &[1, 4, 2, 5, 3, 6]).unwrap());
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_inverse() {
        let p = Modulus::default();
        let m = Matrix::from_i64(&p, 2, 2, &[7, -3, -2, 1]).unwrap();
        let inv = m.inverse().unwrap();
        assert_eq!(inv, Matrix::from_i64(&p, 2, 2, &[1, 3, 2, 7]).unwrap());
        assert!(m.multiply(&inv).unwrap().is_identity());
        assert!(inv.multiply(&m).unwrap().is_identity());
    }

    #[test]
    fn test_inverse_small_prime() {
        let p = Modulus::new_unchecked(BigUint::from(5u8));
        let m = Matrix::from_i64(&p, 2, 2, &[0, 1, 2, 3]).unwrap();
        let inv = m.inverse().unwrap();
        assert!(m.multiply(&inv).unwrap().is_identity());
    }

    #[test]
    fn test_inverse_random() {
        let p = Modulus::default();
        let mut rng = StdRng::seed_from_u64(2024);
        for n in 1..=6 {
            let m = random_matrix(&p, n, &mut rng);
            let inv = m.inverse().unwrap();
            assert!(m.multiply(&inv).unwrap().is_identity(), "n = {n}");
        }
    }

    #[test]
    fn test_inverse_errors() {
        let p = Modulus::default();
        let singular = Matrix::from_i64(&p, 3, 3, &[1, 2, 3, 4, 5, 6, 5, 7, 9]).unwrap();
        assert_eq!(singular.inverse(), Err(Error::NoSolution));
        let wide = Matrix::from_i64(&p, 2, 3, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(wide.inverse(), Err(Error::NotSquare { rows: 2, cols: 3 }));
        assert_eq!(Matrix::zeros(&p, 0, 0).inverse(), Err(Error::EmptyMatrix));
    }

    #[test]
    fn test_solve_through_matrix() {
        let p = Modulus::default();
        let mut rng = StdRng::seed_from_u64(99);
        let a = random_matrix(&p, 4, &mut rng);
        let x: Vec<_> = (0..4).map(|_| FieldElement::random_with(&p, &mut rng)).collect();
        let b = a
            .multiply(&Matrix::new(&p, 4, 1, x.clone()).unwrap())
            .unwrap();
        assert_eq!(a.solve(b.values()).unwrap(), x);
    }

    #[test]
    fn test_identity() {
        let p = Modulus::default();
        assert_eq!(
            Matrix::identity(&p, 3),
            Matrix::from_i64(&p, 3, 3, &[1, 0, 0, 0, 1, 0, 0, 0, 1]).unwrap()
        );
        assert!(Matrix::identity(&p, 3).is_identity());
        assert!(!Matrix::zeros(&p, 2, 2).is_identity());
        assert!(!Matrix::from_i64(&p, 1, 2, &[1, 0]).unwrap().is_identity());
    }

    #[test]
    fn test_overflowing_dimensions() {
        let p = Modulus::default();
        assert_eq!(
            Matrix::from_i64(&p, usize::MAX, 2, &[]),
            Err(Error::DimensionMismatch {
                expected: usize::MAX,
                actual: 2
            })
        );
        assert_eq!(
            Matrix::new(&p, 2, usize::MAX / 2 + 1, vec![]),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: usize::MAX / 2 + 1
            })
        );
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn test_zeros_overflow_panics() {
        Matrix::zeros(&Modulus::default(), usize::MAX, usize::MAX);
    }
}
