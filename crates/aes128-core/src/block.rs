//! Block representation helpers.

use crate::error::AesError;

/// Size of an AES block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES block of 16 bytes, laid out column-major: bytes `4c..4c+4` form column `c`.
pub type Block = [u8; BLOCK_SIZE];

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Returns `lhs ^ rhs` as a new block.
#[inline]
pub fn xor(lhs: &Block, rhs: &Block) -> Block {
    let mut out = *lhs;
    xor_in_place(&mut out, rhs);
    out
}

/// Copies a slice into a block, rejecting any length other than 16.
pub fn block_from_slice(bytes: &[u8]) -> Result<Block, AesError> {
    bytes
        .try_into()
        .map_err(|_| AesError::InvalidBlockLength { got: bytes.len() })
}

/// Splits `data` into whole blocks; fails unless its length is a multiple of 16.
pub fn split_blocks(data: &[u8]) -> Result<Vec<Block>, AesError> {
    if data.len() % BLOCK_SIZE != 0 {
        return Err(AesError::BlockCountMismatch { len: data.len() });
    }
    Ok(data
        .chunks_exact(BLOCK_SIZE)
        .map(|chunk| {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            block
        })
        .collect())
}

/// Concatenates blocks back into a byte vector.
pub fn join_blocks(blocks: &[Block]) -> Vec<u8> {
    blocks.iter().flatten().copied().collect()
}

#[inline]
pub(crate) const fn cell(row: usize, col: usize) -> usize {
    col * 4 + row
}
