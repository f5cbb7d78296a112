//! Cipher Block Chaining over an ordered sequence of blocks.
//!
//! CBC provides confidentiality only. Nothing here detects tampering; callers
//! that need integrity must authenticate the IV and ciphertext separately.
//! An IV may be public but must never be reused for two messages under one key.

use crate::block::{block_from_slice, join_blocks, split_blocks, xor, Block};
use crate::cipher::Aes128;
use crate::error::AesError;
use crate::padding::{pad, unpad, Padding};

/// 16-byte initialization vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Iv(pub [u8; 16]);

impl From<[u8; 16]> for Iv {
    fn from(value: [u8; 16]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Iv {
    type Error = AesError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        block_from_slice(bytes)
            .map(Self)
            .map_err(|_| AesError::InvalidIvLength { got: bytes.len() })
    }
}

impl AsRef<[u8]> for Iv {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Encrypts `blocks` in order: `C[i] = E(P[i] ^ C[i-1])` with `C[-1] = iv`.
pub fn cbc_encrypt(cipher: &Aes128, iv: &Iv, blocks: &[Block]) -> Vec<Block> {
    let mut prev = iv.0;
    blocks
        .iter()
        .map(|block| {
            prev = cipher.encrypt_block(&xor(block, &prev));
            prev
        })
        .collect()
}

/// Decrypts `blocks`: `P[i] = D(C[i]) ^ C[i-1]` with `C[-1] = iv`.
pub fn cbc_decrypt(cipher: &Aes128, iv: &Iv, blocks: &[Block]) -> Vec<Block> {
    let mut prev = iv.0;
    blocks
        .iter()
        .map(|block| {
            let plain = xor(&cipher.decrypt_block(block), &prev);
            prev = *block;
            plain
        })
        .collect()
}

/// Byte-level [`cbc_encrypt`] for block-aligned input without padding.
pub fn cbc_encrypt_bytes(cipher: &Aes128, iv: &[u8], data: &[u8]) -> Result<Vec<u8>, AesError> {
    let iv = Iv::try_from(iv)?;
    let blocks = split_blocks(data)?;
    Ok(join_blocks(&cbc_encrypt(cipher, &iv, &blocks)))
}

/// Byte-level [`cbc_decrypt`] for block-aligned input without padding.
pub fn cbc_decrypt_bytes(cipher: &Aes128, iv: &[u8], data: &[u8]) -> Result<Vec<u8>, AesError> {
    let iv = Iv::try_from(iv)?;
    let blocks = split_blocks(data)?;
    Ok(join_blocks(&cbc_decrypt(cipher, &iv, &blocks)))
}

/// A cipher paired with the IV of one message.
#[derive(Clone, Copy, Debug)]
pub struct Cbc<'a> {
    cipher: &'a Aes128,
    iv: Iv,
}

impl<'a> Cbc<'a> {
    /// Creates a chaining context for a single message.
    pub fn new(cipher: &'a Aes128, iv: Iv) -> Self {
        Self { cipher, iv }
    }

    /// The IV this context chains from.
    pub fn iv(&self) -> &Iv {
        &self.iv
    }

    /// See [`cbc_encrypt`].
    pub fn encrypt_blocks(&self, blocks: &[Block]) -> Vec<Block> {
        cbc_encrypt(self.cipher, &self.iv, blocks)
    }

    /// See [`cbc_decrypt`].
    pub fn decrypt_blocks(&self, blocks: &[Block]) -> Vec<Block> {
        cbc_decrypt(self.cipher, &self.iv, blocks)
    }

    /// Pads and encrypts an arbitrary-length message.
    pub fn encrypt_padded(&self, data: &[u8], padding: Padding) -> Result<Vec<u8>, AesError> {
        let blocks = pad(data, padding)?;
        Ok(join_blocks(&self.encrypt_blocks(&blocks)))
    }

    /// Decrypts a block-aligned ciphertext and strips its padding.
    pub fn decrypt_padded(&self, data: &[u8], padding: Padding) -> Result<Vec<u8>, AesError> {
        let blocks = split_blocks(data)?;
        unpad(&self.decrypt_blocks(&blocks), padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Aes128Key;
    use rand::{Rng, RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn hex_to_bytes(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    fn sp800_38a() -> (Aes128, Iv) {
        let cipher = Aes128::from_slice(&hex_to_bytes("2b7e151628aed2a6abf7158809cf4f3c")).unwrap();
        let iv = Iv::try_from(&hex_to_bytes("000102030405060708090a0b0c0d0e0f")[..]).unwrap();
        (cipher, iv)
    }

    // NIST SP 800-38A F.2.1 / F.2.2.
    const PLAIN: &str = "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e5130c81c46a35ce411e5fbc1191a0a52eff69f2445df4f9b17ad2b417be66c3710";
    const CIPHER: &str = "7649abac8119b246cee98e9b12e9197d5086cb9b507219ee95db113a917678b273bed6b8e3c1743b7116e69e222295163ff1caa1681fac09120eca307586e1a7";

    #[test]
    fn matches_sp800_38a_vectors() {
        let (cipher, iv) = sp800_38a();
        let ct = cbc_encrypt_bytes(&cipher, &iv.0, &hex_to_bytes(PLAIN)).unwrap();
        assert_eq!(ct, hex_to_bytes(CIPHER));
        let pt = cbc_decrypt_bytes(&cipher, &iv.0, &ct).unwrap();
        assert_eq!(pt, hex_to_bytes(PLAIN));
    }

    #[test]
    fn first_block_is_encryption_of_plain_xor_iv() {
        let (cipher, iv) = sp800_38a();
        let blocks = split_blocks(&hex_to_bytes(PLAIN)).unwrap();
        let ct = cbc_encrypt(&cipher, &iv, &blocks);
        assert_eq!(ct[0], cipher.encrypt_block(&xor(&blocks[0], &iv.0)));
        assert_eq!(ct[2], cipher.encrypt_block(&xor(&blocks[2], &ct[1])));
    }

    #[test]
    fn identical_plaintext_blocks_encrypt_differently() {
        let (cipher, iv) = sp800_38a();
        let ct = cbc_encrypt(&cipher, &iv, &[[0x41u8; 16]; 3]);
        assert_ne!(ct[0], ct[1]);
        assert_ne!(ct[1], ct[2]);
    }

    #[test]
    fn round_trip_random_messages() {
        let mut rng = ChaCha20Rng::from_seed([9u8; 32]);
        for _ in 0..32 {
            let mut key = [0u8; 16];
            let mut iv = [0u8; 16];
            rng.fill_bytes(&mut key);
            rng.fill_bytes(&mut iv);
            let cipher = Aes128::new(&Aes128Key::from(key));
            let n = rng.gen_range(0..8);
            let blocks: Vec<Block> = (0..n)
                .map(|_| {
                    let mut b = [0u8; 16];
                    rng.fill_bytes(&mut b);
                    b
                })
                .collect();
            let ct = cbc_encrypt(&cipher, &Iv(iv), &blocks);
            assert_eq!(ct.len(), blocks.len());
            assert_eq!(cbc_decrypt(&cipher, &Iv(iv), &ct), blocks);
        }
    }

    #[test]
    fn wrong_iv_corrupts_only_first_block() {
        let (cipher, iv) = sp800_38a();
        let blocks = split_blocks(&hex_to_bytes(PLAIN)).unwrap();
        let ct = cbc_encrypt(&cipher, &iv, &blocks);
        let pt = cbc_decrypt(&cipher, &Iv([0xffu8; 16]), &ct);
        assert_ne!(pt[0], blocks[0]);
        assert_eq!(pt[1..], blocks[1..]);
    }

    #[test]
    fn padded_round_trip() {
        let (cipher, iv) = sp800_38a();
        let cbc = Cbc::new(&cipher, iv);
        for len in [0usize, 1, 15, 16, 17, 100] {
            let message: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let ct = cbc.encrypt_padded(&message, Padding::Pkcs7).unwrap();
            assert_eq!(ct.len(), (len / 16 + 1) * 16);
            assert_eq!(cbc.decrypt_padded(&ct, Padding::Pkcs7).unwrap(), message);
        }
        assert_eq!(cbc.iv(), &iv);
    }

    #[test]
    fn length_violations_are_reported() {
        let (cipher, iv) = sp800_38a();
        assert_eq!(
            cbc_encrypt_bytes(&cipher, &[0u8; 8], &[0u8; 16]),
            Err(AesError::InvalidIvLength { got: 8 })
        );
        assert_eq!(
            cbc_decrypt_bytes(&cipher, &iv.0, &[0u8; 17]),
            Err(AesError::BlockCountMismatch { len: 17 })
        );
        let cbc = Cbc::new(&cipher, iv);
        assert_eq!(
            cbc.encrypt_padded(&[0u8; 5], Padding::None),
            Err(AesError::BlockCountMismatch { len: 5 })
        );
        assert_eq!(
            cbc.decrypt_padded(&[0u8; 31], Padding::Pkcs7),
            Err(AesError::BlockCountMismatch { len: 31 })
        );
    }
}
