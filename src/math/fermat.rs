//! prime modulus arithmetic

use super::galois::primefield::FieldElement;
use crate::error::{Error, Result};
use k256::{elliptic_curve::PrimeField, Scalar};
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{Num, One};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

/// represents the prime modulus shared by every element of a field
/// Example:
/// ```
/// use gfp_linalg::math::Modulus;
///
/// let modulus = Modulus::random(64);
/// let x = modulus.random_make();
/// let y = modulus.random_make();
/// println!("{} + {} = {}", x, y, &x + &y);
/// println!("{} * {} = {}", x, y, &x * &y);
/// ```
#[derive(Clone, Debug, Eq)]
pub struct Modulus(Arc<BigUint>);

impl PartialEq for Modulus {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Hash for Modulus {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

pub trait PseudoPrimalityTester {
    const MAX_ITERTIME: usize = 64;

    /// checks whether witness `a` in [2, n - 2] is consistent with odd `n > 3` being prime
    fn check(n: &BigUint, a: &BigUint) -> bool;

    fn is_prime_with<R: RngCore + CryptoRng + ?Sized>(n: &BigUint, rng: &mut R) -> bool {
        let two = BigUint::from(2u8);
        if *n < two {
            return false;
        }
        if *n == two || *n == BigUint::from(3u8) {
            return true;
        }
        if n.is_even() {
            return false;
        }
        let upper = n - 1u8;
        for _ in 0..Self::MAX_ITERTIME {
            if !Self::check(n, &rng.gen_biguint_range(&two, &upper)) {
                return false;
            }
        }
        true
    }

    fn is_prime(n: &BigUint) -> bool {
        Self::is_prime_with(n, &mut OsRng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MillerRabinTester;

impl PseudoPrimalityTester for MillerRabinTester {
    fn check(n: &BigUint, a: &BigUint) -> bool {
        let m1 = n - 1u8;
        let h = m1.trailing_zeros().unwrap_or(0);
        let t = &m1 >> h;
        let mut b = a.modpow(&t, n);
        if b.is_one() || b == m1 {
            return true;
        }
        for _ in 1..h {
            b = &b * &b % n;
            if b == m1 {
                return true;
            }
            if b.is_one() {
                return false;
            }
        }
        false
    }
}

static SECP256K1_ORDER: OnceLock<Modulus> = OnceLock::new();

impl Modulus {
    /// constructs a prime modulus, rejecting composites
    pub fn new(modulus: BigUint) -> Result<Self> {
        if MillerRabinTester::is_prime(&modulus) {
            Ok(Self(Arc::new(modulus)))
        } else {
            Err(Error::CompositeModulus)
        }
    }

    /// constructs a modulus the caller already knows to be prime
    ///
    /// # Panics
    /// Panics if `modulus < 2`.
    pub fn new_unchecked(modulus: BigUint) -> Self {
        assert!(modulus > BigUint::one(), "modulus must be at least 2");
        Self(Arc::new(modulus))
    }

    /// parses and checks a prime modulus written in base `radix`
    pub fn from_str_radix(src: &str, radix: u32) -> Result<Self> {
        if !(2..=36).contains(&radix) {
            return Err(Error::Parse {
                input: src.to_owned(),
                radix,
            });
        }
        let modulus = BigUint::from_str_radix(src, radix).map_err(|_| Error::Parse {
            input: src.to_owned(),
            radix,
        })?;
        Self::new(modulus)
    }

    /// the group order of secp256k1
    pub fn secp256k1() -> Self {
        SECP256K1_ORDER
            .get_or_init(|| {
                let max = -Scalar::ONE;
                Self(Arc::new(
                    BigUint::from_bytes_be(max.to_repr().as_ref()) + 1u8,
                ))
            })
            .clone()
    }

    /// constructs a random prime modulus of given bit size
    ///
    /// # Panics
    /// Panics if `nbits < 2`.
    pub fn random(nbits: u64) -> Self {
        assert!(nbits >= 2, "no prime fits in fewer than 2 bits");
        let mask = BigUint::one() | (BigUint::one() << (nbits - 1));
        loop {
            let candidate = OsRng.gen_biguint(nbits) | &mask;
            if MillerRabinTester::is_prime(&candidate) {
                return Self(Arc::new(candidate));
            }
        }
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    /// number of bytes of a fixed-width big-endian element encoding
    pub fn byte_len(&self) -> usize {
        self.bits().div_ceil(8) as usize
    }

    /// constructs a number in the field of this modulus
    pub fn make(&self, value: &BigUint) -> FieldElement {
        FieldElement::new(self, value.clone())
    }

    /// constructs a random number in the field of this modulus
    pub fn random_make(&self) -> FieldElement {
        FieldElement::random(self)
    }
}

impl Default for Modulus {
    fn default() -> Self {
        Self::secp256k1()
    }
}

impl fmt::Display for Modulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
