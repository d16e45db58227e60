//! linear systems and matrices over GF(p)

pub mod gauss_jordan;
pub mod matrix;

pub use matrix::Matrix;
