//! errors raised by field arithmetic, the solver and the matrix layer

#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("cannot interpret {input:?} as an integer in base {radix}")]
    Parse { input: String, radix: u32 },
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("row {row} has {actual} entries while row 1 has {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("matrix has no rows")]
    EmptyMatrix,
    #[error("only square matrices are invertible, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("linear system has no solution")]
    NoSolution,
    #[error("element has no multiplicative inverse")]
    NoInverse,
    #[error("operands are reduced under different moduli")]
    ModulusMismatch,
    #[error("modulus is not prime")]
    CompositeModulus,
    #[error("index {index} is outside 1..={bound}")]
    OutOfBounds { index: usize, bound: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
