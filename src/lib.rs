//! exact linear algebra over prime fields GF(p)
//!
//! Elements carry the [`Modulus`](math::Modulus) they were reduced under, so
//! every computation can be traced back to its field without global state.
//! ```
//! use gfp_linalg::{linalg::Matrix, math::Modulus};
//!
//! let p = Modulus::default();
//! let m = Matrix::from_i64(&p, 2, 2, &[7, -3, -2, 1]).unwrap();
//! let inv = m.inverse().unwrap();
//! assert!(m.multiply(&inv).unwrap().is_identity());
//! ```

pub mod error;
pub mod linalg;
pub mod math;

pub use error::{Error, Result};
