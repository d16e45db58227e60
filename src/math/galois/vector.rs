//! vector primitives over GF(p)
//!
//! Sums are accumulated over the integers and reduced once at the end.

use super::primefield::FieldElement;
use crate::error::{Error, Result};
use crate::math::fermat::Modulus;
use num_bigint::BigUint;
use num_traits::Zero;

/// adds an arbitrary number of field elements with a single reduction
/// Example:
/// ```
/// use gfp_linalg::math::{vector, FieldElement, Modulus};
///
/// let p = Modulus::default();
/// let xs: Vec<_> = (1..=4).map(|i| FieldElement::from_u64(&p, i)).collect();
/// assert_eq!(vector::sum(&p, &xs).unwrap(), FieldElement::from_u64(&p, 10));
/// ```
pub fn sum<'a, I>(modulus: &Modulus, addends: I) -> Result<FieldElement>
where
    I: IntoIterator<Item = &'a FieldElement>,
{
    let mut acc = BigUint::zero();
    for addend in addends {
        if addend.modulus() != modulus {
            return Err(Error::ModulusMismatch);
        }
        acc += addend.value();
    }
    Ok(FieldElement::new(modulus, acc))
}

/// dot product of two vectors of equal length
pub fn linear_combination(
    modulus: &Modulus,
    lhs: &[FieldElement],
    rhs: &[FieldElement],
) -> Result<FieldElement> {
    if lhs.len() != rhs.len() {
        return Err(Error::DimensionMismatch {
            expected: lhs.len(),
            actual: rhs.len(),
        });
    }
    let mut acc = BigUint::zero();
    for (a, b) in lhs.iter().zip(rhs) {
        if a.modulus() != modulus || b.modulus() != modulus {
            return Err(Error::ModulusMismatch);
        }
        acc += a.value() * b.value();
    }
    Ok(FieldElement::new(modulus, acc))
}

/// position of the first entry that is not the additive identity
pub fn first_nonzero(entries: &[FieldElement]) -> Option<usize> {
    entries.iter().position(|entry| !entry.is_zero())
}
