//! From-scratch AES-128 with Cipher Block Chaining.
//!
//! This crate mirrors the FIPS-197 specification and provides:
//! - GF(2^8) multiplication by the MixColumns constants and the Rijndael S-boxes.
//! - Key schedule for AES-128.
//! - Single-block encryption and decryption, with an optional per-step trace hook.
//! - CBC chaining over block sequences, with PKCS#7 framing for byte messages.
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; it should not be treated as side-channel hardened. CBC gives
//! confidentiality only, never integrity.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cbc;
mod cipher;
mod error;
mod gf;
mod key;
mod padding;
mod round;
mod sbox;
mod trace;

pub use crate::block::{block_from_slice, join_blocks, split_blocks, xor, Block, BLOCK_SIZE};
pub use crate::cbc::{cbc_decrypt, cbc_decrypt_bytes, cbc_encrypt, cbc_encrypt_bytes, Cbc, Iv};
pub use crate::cipher::{
    decrypt_block, decrypt_block_traced, encrypt_block, encrypt_block_traced, Aes128,
};
pub use crate::error::AesError;
pub use crate::gf::{
    g_mul, g_mul_checked, inv_g_mul, inv_g_mul_checked, xtime, InvMixFactor, MixFactor,
};
pub use crate::key::{expand_key, Aes128Key, RoundKeys, ROUND_KEY_COUNT};
pub use crate::padding::{pad, unpad, Padding};
pub use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
pub use crate::sbox::{inv_sbox, sbox, INV_SBOX, SBOX};
pub use crate::trace::{NoTrace, Recorder, RoundObserver, Step};
