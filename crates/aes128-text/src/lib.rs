//! Hex text format used by the aes128 tooling for keys, IVs and ciphertext.
//!
//! Bytes are written as two uppercase hex digits each followed by a single
//! space (`"2B 7E 15 "`). Reading accepts any whitespace between tokens and
//! either case, but every token must be exactly two hex digits.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use aes128_core::{Block, BLOCK_SIZE};
use thiserror::Error;

/// Errors raised while decoding hex text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TextError {
    /// A token that is not exactly two hex digits.
    #[error("token {index} ({token:?}) is not a two-digit hex byte")]
    InvalidToken {
        /// Zero-based position of the token.
        index: usize,
        /// The offending token.
        token: String,
    },
    /// The text held the wrong number of bytes.
    #[error("expected {expected}, found {got} bytes")]
    WrongLength {
        /// Human-readable expectation, e.g. `"16 bytes"`.
        expected: &'static str,
        /// Number of bytes actually decoded.
        got: usize,
    },
}

/// Encodes bytes as `"XX "` groups.
pub fn encode_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for byte in bytes {
        out.push_str(&hex::encode_upper([*byte]));
        out.push(' ');
    }
    out
}

/// Decodes whitespace-separated two-digit hex tokens.
pub fn decode_bytes(text: &str) -> Result<Vec<u8>, TextError> {
    text.split_whitespace()
        .enumerate()
        .map(|(index, token)| {
            let mut byte = [0u8; 1];
            hex::decode_to_slice(token, &mut byte)
                .map(|()| byte[0])
                .map_err(|_| TextError::InvalidToken {
                    index,
                    token: token.to_owned(),
                })
        })
        .collect()
}

/// Decodes exactly one block, as stored in key and IV files.
pub fn decode_block(text: &str) -> Result<Block, TextError> {
    let bytes = decode_bytes(text)?;
    bytes.as_slice().try_into().map_err(|_| TextError::WrongLength {
        expected: "16 bytes",
        got: bytes.len(),
    })
}

/// Decodes a sequence of whole blocks.
pub fn decode_blocks(text: &str) -> Result<Vec<Block>, TextError> {
    let bytes = decode_bytes(text)?;
    aes128_core::split_blocks(&bytes).map_err(|_| TextError::WrongLength {
        expected: "a multiple of 16 bytes",
        got: bytes.len(),
    })
}

/// Renders a state as a 4x4 grid; row `r` lists bytes `r, r+4, r+8, r+12`.
pub fn format_grid(state: &Block) -> String {
    let mut out = String::with_capacity(BLOCK_SIZE * 3 + 4);
    for row in 0..4 {
        for col in 0..4 {
            out.push_str(&hex::encode_upper([state[col * 4 + row]]));
            out.push(' ');
        }
        out.push('\n');
    }
    out
}
