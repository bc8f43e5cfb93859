use thiserror::Error;

/// Errors raised when untyped input is turned into one of the crate's fixed-size values.
///
/// Operations on already-constructed values are total and never return these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A slice did not have the length fixed by the parameter set.
    #[error("{what}: expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// Which value was being built.
        what: &'static str,
        /// Length required by the parameter set.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// The indices handed over as a permutation were not a bijection of 0..2^m.
    #[error("input is not a permutation of 0..{size}")]
    NotAPermutation {
        /// Size of the permutation domain, 2^m.
        size: usize,
    },

    /// Two field-ordering words were equal, so they do not define a permutation.
    #[error("field ordering words are not distinct")]
    DuplicateOrdering,
}

/// Result alias for fallible constructors.
pub type Result<T> = core::result::Result<T, Error>;

pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::LengthMismatch {
            what,
            expected,
            actual,
        })
    }
}
