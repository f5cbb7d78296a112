//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Contract violations reported by the cipher, the GF(2^8) helpers and CBC chaining.
///
/// Each variant aborts only the operation that produced it; nothing is ever
/// substituted or passed through unmodified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AesError {
    /// Key material was not exactly 16 bytes.
    #[error("AES-128 key must be 16 bytes, got {got}")]
    InvalidKeyLength {
        /// Length that was supplied.
        got: usize,
    },
    /// A block input or output buffer was not exactly 16 bytes.
    #[error("block must be 16 bytes, got {got}")]
    InvalidBlockLength {
        /// Length that was supplied.
        got: usize,
    },
    /// A GF(2^8) multiplier outside {1, 2, 3} or {9, 11, 13, 14}.
    #[error("unsupported GF(2^8) multiplier {factor}")]
    InvalidFactor {
        /// The rejected multiplier.
        factor: u8,
    },
    /// The initialization vector was not exactly 16 bytes.
    #[error("IV must be 16 bytes, got {got}")]
    InvalidIvLength {
        /// Length that was supplied.
        got: usize,
    },
    /// CBC input that is not a whole number of blocks and has no padding scheme.
    #[error("input of {len} bytes is not a multiple of the 16-byte block size")]
    BlockCountMismatch {
        /// Length of the offending input.
        len: usize,
    },
    /// PKCS#7 trailer missing or malformed after decryption.
    #[error("invalid PKCS#7 padding")]
    InvalidPadding,
}
