//! Error types for memolru

use std::fmt;

/// Result type alias for memolru operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache and range-sum operations
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Cache constructed with capacity zero
    ZeroCapacity,

    /// Range query with inverted or out-of-bounds bounds
    InvalidRange {
        /// Left bound (inclusive)
        l: usize,
        /// Right bound (inclusive)
        r: usize,
        /// Array length the bounds were checked against
        len: usize,
    },

    /// Point update outside the array
    IndexOutOfBounds {
        /// Offending index
        index: usize,
        /// Array length the index was checked against
        len: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroCapacity => write!(f, "Cache capacity must be at least 1"),
            Error::InvalidRange { l, r, len } => {
                write!(f, "Invalid range [{}, {}] for array of length {}", l, r, len)
            }
            Error::IndexOutOfBounds { index, len } => {
                write!(f, "Index {} out of bounds for array of length {}", index, len)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::InvalidRange { l: 3, r: 1, len: 5 };
        assert_eq!(err.to_string(), "Invalid range [3, 1] for array of length 5");
    }
}
