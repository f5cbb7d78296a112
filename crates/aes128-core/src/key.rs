//! Key types and the AES-128 key schedule.

use core::fmt;

use crate::block::Block;
use crate::error::AesError;
use crate::sbox::sbox;

/// Number of round keys produced for AES-128 (initial key plus ten rounds).
pub const ROUND_KEY_COUNT: usize = 11;

const RCON: [u8; 10] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

/// AES-128 key wrapper. `Debug` does not print the key bytes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Aes128Key(pub [u8; 16]);

impl fmt::Debug for Aes128Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Aes128Key(..)")
    }
}

impl From<[u8; 16]> for Aes128Key {
    fn from(value: [u8; 16]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Aes128Key {
    type Error = AesError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        bytes
            .try_into()
            .map(Self)
            .map_err(|_| AesError::InvalidKeyLength { got: bytes.len() })
    }
}

impl AsRef<[u8]> for Aes128Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Expanded round keys for AES-128.
///
/// Derived once from a key and never mutated; shared read-only by every
/// encryption and decryption that uses it.
#[derive(Clone, PartialEq, Eq)]
pub struct RoundKeys([Block; ROUND_KEY_COUNT]);

impl fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RoundKeys(..)")
    }
}

impl RoundKeys {
    /// Returns the round key at the requested index (0..=10).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.0[round]
    }

    /// All eleven round keys in order.
    pub fn as_blocks(&self) -> &[Block; ROUND_KEY_COUNT] {
        &self.0
    }

    /// The schedule as the 44 four-byte words `w[0..44]`.
    pub fn words(&self) -> [[u8; 4]; 4 * ROUND_KEY_COUNT] {
        core::array::from_fn(|i| {
            let rk = &self.0[i / 4];
            let offset = (i % 4) * 4;
            [rk[offset], rk[offset + 1], rk[offset + 2], rk[offset + 3]]
        })
    }
}

fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

fn sub_word(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(sbox))
}

/// Expands a 128-bit key into 11 round keys.
pub fn expand_key(key: &Aes128Key) -> RoundKeys {
    let mut w = [0u32; 4 * ROUND_KEY_COUNT];
    for (word, chunk) in w.iter_mut().zip(key.0.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for i in 4..w.len() {
        let mut temp = w[i - 1];
        if i % 4 == 0 {
            temp = sub_word(rot_word(temp)) ^ (u32::from(RCON[i / 4 - 1]) << 24);
        }
        w[i] = w[i - 4] ^ temp;
    }

    let mut round_keys = [[0u8; 16]; ROUND_KEY_COUNT];
    for (round, rk) in round_keys.iter_mut().enumerate() {
        for (word_idx, bytes) in rk.chunks_exact_mut(4).enumerate() {
            bytes.copy_from_slice(&w[round * 4 + word_idx].to_be_bytes());
        }
    }

    RoundKeys(round_keys)
}
