//! prime field is a field of prime order

use crate::error::{Error, Result};
use crate::math::fermat::Modulus;
use blake2::{Blake2b512, Digest};
use k256::{elliptic_curve::PrimeField, FieldBytes, Scalar};
use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::{ExtendedGcd, Integer};
use num_traits::{Num, One, Zero};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// represents a number in GF(p), always reduced into [0, p)
/// Example:
/// ```
/// use gfp_linalg::math::{FieldElement, Modulus};
///
/// let p = Modulus::default();
/// let x = FieldElement::from_i64(&p, -1);
/// assert_eq!(&x + &FieldElement::one(&p), FieldElement::zero(&p));
/// assert!((&x * &x.inverse().unwrap()).is_one());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldElement {
    value: BigUint,
    modulus: Modulus,
}

impl FieldElement {
    pub fn new(modulus: &Modulus, value: BigUint) -> Self {
        Self {
            value: value % modulus.value(),
            modulus: modulus.clone(),
        }
    }

    pub fn from_bigint(modulus: &Modulus, value: &BigInt) -> Self {
        let p = BigInt::from(modulus.value().clone());
        let (_, value) = value.mod_floor(&p).into_parts();
        Self {
            value,
            modulus: modulus.clone(),
        }
    }

    pub fn from_i64(modulus: &Modulus, value: i64) -> Self {
        Self::from_bigint(modulus, &BigInt::from(value))
    }

    pub fn from_u64(modulus: &Modulus, value: u64) -> Self {
        Self::new(modulus, BigUint::from(value))
    }

    /// interprets `bytes` as a big-endian integer of any length
    pub fn from_bytes_be(modulus: &Modulus, bytes: &[u8]) -> Self {
        Self::new(modulus, BigUint::from_bytes_be(bytes))
    }

    /// parses an optionally signed integer written in base `radix` (2 to 36)
    pub fn from_str_radix(modulus: &Modulus, src: &str, radix: u32) -> Result<Self> {
        let parse_error = || Error::Parse {
            input: src.to_owned(),
            radix,
        };
        if !(2..=36).contains(&radix) {
            return Err(parse_error());
        }
        let value = BigInt::from_str_radix(src, radix).map_err(|_| parse_error())?;
        Ok(Self::from_bigint(modulus, &value))
    }

    /// samples uniformly from [0, p) using the operating system's CSPRNG
    pub fn random(modulus: &Modulus) -> Self {
        Self::random_with(modulus, &mut OsRng)
    }

    pub fn random_with<R: RngCore + CryptoRng + ?Sized>(modulus: &Modulus, rng: &mut R) -> Self {
        Self {
            value: rng.gen_biguint_below(modulus.value()),
            modulus: modulus.clone(),
        }
    }

    /// reduces the Blake2b-512 digest of `data` into the field
    pub fn hash_to_field(modulus: &Modulus, data: &[u8]) -> Self {
        let mut hasher = Blake2b512::new();
        hasher.update(data);
        Self::from_bytes_be(modulus, &hasher.finalize())
    }

    pub fn zero(modulus: &Modulus) -> Self {
        Self {
            value: BigUint::zero(),
            modulus: modulus.clone(),
        }
    }

    pub fn one(modulus: &Modulus) -> Self {
        Self::new(modulus, BigUint::one())
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn modulus(&self) -> &Modulus {
        &self.modulus
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.value.is_one()
    }

    pub fn pow(&self, exponent: &BigUint) -> Self {
        Self {
            value: self.value.modpow(exponent, self.modulus.value()),
            modulus: self.modulus.clone(),
        }
    }

    pub fn pow_u64(&self, exponent: u64) -> Self {
        self.pow(&BigUint::from(exponent))
    }

    /// multiplicative inverse from the Bézout coefficients of gcd(x, p)
    pub fn inverse(&self) -> Result<Self> {
        let p = BigInt::from(self.modulus.value().clone());
        let x = BigInt::from(self.value.clone());
        let ExtendedGcd { gcd, x: bezout, .. } = x.extended_gcd(&p);
        if !gcd.is_one() {
            return Err(Error::NoInverse);
        }
        Ok(Self::from_bigint(&self.modulus, &bezout))
    }

    /// integer ordering of the reduced values; it carries no field meaning
    pub fn compare(&self, other: &Self) -> Result<Ordering> {
        self.ensure_same_field(other)?;
        Ok(self.value.cmp(&other.value))
    }

    /// minimal big-endian encoding, `[0]` for zero
    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.value.to_bytes_be()
    }

    /// big-endian encoding left-padded to the byte length of the modulus
    pub fn to_fixed_bytes_be(&self) -> Vec<u8> {
        let bytes = self.value.to_bytes_be();
        let mut out = vec![0u8; self.modulus.byte_len().saturating_sub(bytes.len())];
        out.extend_from_slice(&bytes);
        out
    }

    pub fn to_str_radix(&self, radix: u32) -> String {
        self.value.to_str_radix(radix)
    }

    pub fn ensure_same_field(&self, other: &Self) -> Result<()> {
        if self.modulus == other.modulus {
            Ok(())
        } else {
            Err(Error::ModulusMismatch)
        }
    }

    #[inline]
    #[track_caller]
    fn assert_same_field(&self, other: &Self) {
        assert!(
            self.modulus == other.modulus,
            "operands are reduced under different moduli"
        );
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    #[inline]
    #[track_caller]
    fn add(self, other: &FieldElement) -> FieldElement {
        self.assert_same_field(other);
        FieldElement::new(&self.modulus, &self.value + &other.value)
    }
}

impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    #[inline]
    #[track_caller]
    fn sub(self, other: &FieldElement) -> FieldElement {
        self.assert_same_field(other);
        let p = self.modulus.value();
        FieldElement::new(&self.modulus, &self.value + p - &other.value)
    }
}

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    #[inline]
    #[track_caller]
    fn mul(self, other: &FieldElement) -> FieldElement {
        self.assert_same_field(other);
        FieldElement::new(&self.modulus, &self.value * &other.value)
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    #[inline]
    fn neg(self) -> FieldElement {
        if self.is_zero() {
            self.clone()
        } else {
            FieldElement {
                value: self.modulus.value() - &self.value,
                modulus: self.modulus.clone(),
            }
        }
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    #[inline]
    fn neg(self) -> FieldElement {
        -&self
    }
}

/// derives owned-operand binary operators from the borrowed ones
macro_rules! derive_binary_ops {
    ($($Op:ident :: $op:ident)+) => {$(
        impl $Op<FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline]
            #[track_caller]
            fn $op(self, other: FieldElement) -> FieldElement {
                $Op::$op(&self, &other)
            }
        }

        impl $Op<&FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline]
            #[track_caller]
            fn $op(self, other: &FieldElement) -> FieldElement {
                $Op::$op(&self, other)
            }
        }

        impl $Op<FieldElement> for &FieldElement {
            type Output = FieldElement;

            #[inline]
            #[track_caller]
            fn $op(self, other: FieldElement) -> FieldElement {
                $Op::$op(self, &other)
            }
        }
    )+};
}

derive_binary_ops!(Add::add Sub::sub Mul::mul);

/// derives binary assignment operators from the borrowed binary operators
macro_rules! derive_binary_assign_ops {
    ($($Op:ident :: $op:ident => $Base:ident :: $base:ident)+) => {$(
        impl $Op<&FieldElement> for FieldElement {
            #[inline]
            #[track_caller]
            fn $op(&mut self, other: &FieldElement) {
                *self = $Base::$base(&*self, other);
            }
        }

        impl $Op<FieldElement> for FieldElement {
            #[inline]
            #[track_caller]
            fn $op(&mut self, other: FieldElement) {
                $Op::$op(self, &other);
            }
        }
    )+};
}

derive_binary_assign_ops!(
    AddAssign::add_assign => Add::add
    SubAssign::sub_assign => Sub::sub
    MulAssign::mul_assign => Mul::mul
);

impl From<&Scalar> for FieldElement {
    fn from(scalar: &Scalar) -> Self {
        Self::from_bytes_be(&Modulus::secp256k1(), scalar.to_repr().as_ref())
    }
}

impl TryFrom<&FieldElement> for Scalar {
    type Error = Error;

    fn try_from(element: &FieldElement) -> Result<Self> {
        if element.modulus != Modulus::secp256k1() {
            return Err(Error::ModulusMismatch);
        }
        let mut repr = FieldBytes::default();
        repr.copy_from_slice(&element.to_fixed_bytes_be());
        Option::<Scalar>::from(Scalar::from_repr(repr)).ok_or(Error::ModulusMismatch)
    }
}
