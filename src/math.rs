//! provides basic math functions

pub mod fermat;
pub mod galois;

pub use fermat::{MillerRabinTester, Modulus, PseudoPrimalityTester};
pub use galois::{primefield::FieldElement, vector};
