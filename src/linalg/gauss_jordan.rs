//! Gauss-Jordan elimination over GF(p)
//!
//! Pivots are the first nonzero entry of a column. Columns without a pivot are
//! free variables and are set to zero in the returned particular solution.

use crate::error::{Error, Result};
use crate::math::{vector, FieldElement};

/// solves `coefficients · x = results` and returns the particular solution
/// whose free variables are all zero
/// Example:
/// ```
/// use gfp_linalg::{linalg::gauss_jordan, math::{FieldElement, Modulus}};
///
/// let p = Modulus::default();
/// let e = |v: i64| FieldElement::from_i64(&p, v);
/// let x = gauss_jordan::solve(&[vec![e(2), e(1)], vec![e(1), e(3)]], &[e(5), e(10)]).unwrap();
/// assert_eq!(x, vec![e(1), e(3)]);
/// ```
pub fn solve(
    coefficients: &[Vec<FieldElement>],
    results: &[FieldElement],
) -> Result<Vec<FieldElement>> {
    let cols = validate(coefficients, results)?;
    let _span = tracing::debug_span!("gauss_jordan", rows = coefficients.len(), cols).entered();

    let mut extended = extend(coefficients, results);
    eliminate(&mut extended)?;

    let pivots: Vec<Option<usize>> = extended
        .iter()
        .map(|row| vector::first_nonzero(row))
        .collect();
    if let Some(row) = pivots.iter().position(|&pivot| pivot == Some(cols)) {
        tracing::debug!(row, "inconsistent row after elimination");
        return Err(Error::NoSolution);
    }
    back_substitute(&extended, &pivots, cols)
}

/// checks the system shape and returns its column count
fn validate(coefficients: &[Vec<FieldElement>], results: &[FieldElement]) -> Result<usize> {
    let first = coefficients.first().ok_or(Error::EmptyMatrix)?;
    let cols = first.len();
    if let Some((i, row)) = coefficients
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != cols)
    {
        return Err(Error::RaggedMatrix {
            row: i + 1,
            expected: cols,
            actual: row.len(),
        });
    }
    if results.len() != coefficients.len() {
        return Err(Error::DimensionMismatch {
            expected: coefficients.len(),
            actual: results.len(),
        });
    }
    let Some(modulus) = first.first().map(FieldElement::modulus) else {
        return Err(Error::DimensionMismatch {
            expected: 1,
            actual: 0,
        });
    };
    if coefficients
        .iter()
        .flatten()
        .chain(results)
        .any(|entry| entry.modulus() != modulus)
    {
        return Err(Error::ModulusMismatch);
    }
    Ok(cols)
}

/// appends the results as one extra column
fn extend(coefficients: &[Vec<FieldElement>], results: &[FieldElement]) -> Vec<Vec<FieldElement>> {
    coefficients
        .iter()
        .zip(results)
        .map(|(row, result)| {
            let mut extended = Vec::with_capacity(row.len() + 1);
            extended.extend_from_slice(row);
            extended.push(result.clone());
            extended
        })
        .collect()
}

/// reduces the extended matrix to row echelon form
fn eliminate(extended: &mut [Vec<FieldElement>]) -> Result<()> {
    let rows = extended.len();
    let width = extended.first().map_or(0, Vec::len);
    let (mut h, mut k) = (0, 0);
    while h < rows && k < width {
        let Some(offset) = extended[h..].iter().position(|row| !row[k].is_zero()) else {
            tracing::trace!(column = k, "free column");
            k += 1;
            continue;
        };
        extended.swap(h, h + offset);
        tracing::trace!(row = h, column = k, "pivot selected");

        let pivot_row = extended[h].clone();
        let pivot_inv = pivot_row[k].inverse()?;
        for row in extended[h + 1..].iter_mut() {
            if row[k].is_zero() {
                continue;
            }
            let factor = &row[k] * &pivot_inv;
            row[k] = FieldElement::zero(pivot_inv.modulus());
            for (entry, pivot) in row[k + 1..].iter_mut().zip(&pivot_row[k + 1..]) {
                *entry -= &factor * pivot;
            }
        }
        h += 1;
        k += 1;
    }
    Ok(())
}

fn back_substitute(
    extended: &[Vec<FieldElement>],
    pivots: &[Option<usize>],
    cols: usize,
) -> Result<Vec<FieldElement>> {
    let modulus = extended[0][0].modulus().clone();
    let pivot_rows: Vec<(usize, usize)> = pivots
        .iter()
        .enumerate()
        .filter_map(|(i, pivot)| pivot.map(|column| (i, column)))
        .collect();

    let mut result = vec![FieldElement::zero(&modulus); cols];
    for (n, &(i, column)) in pivot_rows.iter().enumerate().rev() {
        let row = &extended[i];
        let (coeffs, solved): (Vec<_>, Vec<_>) = pivot_rows[n + 1..]
            .iter()
            .map(|&(_, later)| (row[later].clone(), result[later].clone()))
            .unzip();
        let known = vector::linear_combination(&modulus, &coeffs, &solved)?;
        result[column] = (&row[cols] - &known) * row[column].inverse()?;
    }
    Ok(result)
}
