//! Framing of arbitrary-length messages into whole blocks.

use crate::block::{join_blocks, split_blocks, Block, BLOCK_SIZE};
use crate::error::AesError;

/// How a message is extended to a whole number of blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Padding {
    /// PKCS#7: always append 1..=16 bytes, each equal to the pad length.
    #[default]
    Pkcs7,
    /// No padding; the message must already be block-aligned.
    None,
}

/// Splits `data` into blocks, padding it first when requested.
pub fn pad(data: &[u8], padding: Padding) -> Result<Vec<Block>, AesError> {
    match padding {
        Padding::None => split_blocks(data),
        Padding::Pkcs7 => {
            let pad_len = BLOCK_SIZE - data.len() % BLOCK_SIZE;
            let mut padded = Vec::with_capacity(data.len() + pad_len);
            padded.extend_from_slice(data);
            padded.resize(data.len() + pad_len, pad_len as u8);
            split_blocks(&padded)
        }
    }
}

/// Joins decrypted blocks and strips the padding trailer.
pub fn unpad(blocks: &[Block], padding: Padding) -> Result<Vec<u8>, AesError> {
    let mut data = join_blocks(blocks);
    if padding == Padding::None {
        return Ok(data);
    }

    let pad_len = usize::from(*data.last().ok_or(AesError::InvalidPadding)?);
    if pad_len == 0 || pad_len > BLOCK_SIZE {
        return Err(AesError::InvalidPadding);
    }
    let body_len = data.len() - pad_len;
    if data[body_len..].iter().any(|&b| usize::from(b) != pad_len) {
        return Err(AesError::InvalidPadding);
    }
    data.truncate(body_len);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pkcs7_pads_short_input() {
        let blocks = pad(b"Hello, World!", Padding::Pkcs7).expect("pad");
        assert_eq!(blocks.len(), 1);
        assert_eq!(&blocks[0][13..], &[3, 3, 3]);
        assert_eq!(unpad(&blocks, Padding::Pkcs7).expect("unpad"), b"Hello, World!");
    }

    #[test]
    fn pkcs7_adds_full_block_when_aligned() {
        let blocks = pad(&[0xaa; 16], Padding::Pkcs7).expect("pad");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1], [16u8; 16]);
        assert_eq!(unpad(&blocks, Padding::Pkcs7).expect("unpad"), vec![0xaa; 16]);
    }

    #[test]
    fn trailing_zero_bytes_survive() {
        let message = [b'a', b'b', 0, 0, 0];
        let blocks = pad(&message, Padding::Pkcs7).expect("pad");
        assert_eq!(unpad(&blocks, Padding::Pkcs7).expect("unpad"), message);
    }

    #[test]
    fn empty_message_is_one_padding_block() {
        let blocks = pad(&[], Padding::Pkcs7).expect("pad");
        assert_eq!(blocks, vec![[16u8; 16]]);
        assert!(unpad(&blocks, Padding::Pkcs7).expect("unpad").is_empty());
    }

    #[test]
    fn malformed_trailers_are_rejected() {
        assert_eq!(unpad(&[], Padding::Pkcs7), Err(AesError::InvalidPadding));
        assert_eq!(unpad(&[[0u8; 16]], Padding::Pkcs7), Err(AesError::InvalidPadding));
        assert_eq!(unpad(&[[17u8; 16]], Padding::Pkcs7), Err(AesError::InvalidPadding));
        let mut block = [4u8; 16];
        block[13] = 9;
        assert_eq!(unpad(&[block], Padding::Pkcs7), Err(AesError::InvalidPadding));
    }

    #[test]
    fn no_padding_requires_alignment() {
        assert_eq!(
            pad(&[1u8; 20], Padding::None),
            Err(AesError::BlockCountMismatch { len: 20 })
        );
        let blocks = pad(&[1u8; 32], Padding::None).expect("aligned");
        assert_eq!(unpad(&blocks, Padding::None).expect("unpad"), vec![1u8; 32]);
    }
}
