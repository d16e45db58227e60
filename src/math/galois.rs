//! finite field arithmetic

pub mod primefield;
pub mod vector;
