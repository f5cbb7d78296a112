//! AES-128 block encryption and decryption.

use core::fmt;

use crate::block::{block_from_slice, Block};
use crate::error::AesError;
use crate::key::{expand_key, Aes128Key, RoundKeys};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::trace::{NoTrace, RoundObserver, Step};

const ROUNDS: usize = 10;

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    encrypt_block_traced(block, round_keys, &mut NoTrace)
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    decrypt_block_traced(block, round_keys, &mut NoTrace)
}

/// [`encrypt_block`], reporting the state to `observer` after every step.
pub fn encrypt_block_traced<O>(block: &Block, round_keys: &RoundKeys, observer: &mut O) -> Block
where
    O: RoundObserver + ?Sized,
{
    // The state is a fresh local copy; nothing outside this call can alias it.
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(0));
    observer.observe(0, Step::AddRoundKey, state);

    for round in 1..ROUNDS {
        sub_bytes(&mut state);
        observer.observe(round, Step::SubBytes, state);
        shift_rows(&mut state);
        observer.observe(round, Step::ShiftRows, state);
        mix_columns(&mut state);
        observer.observe(round, Step::MixColumns, state);
        add_round_key(&mut state, round_keys.get(round));
        observer.observe(round, Step::AddRoundKey, state);
    }

    sub_bytes(&mut state);
    observer.observe(ROUNDS, Step::SubBytes, state);
    shift_rows(&mut state);
    observer.observe(ROUNDS, Step::ShiftRows, state);
    add_round_key(&mut state, round_keys.get(ROUNDS));
    observer.observe(ROUNDS, Step::AddRoundKey, state);

    state
}

/// [`decrypt_block`], reporting the state to `observer` after every step.
pub fn decrypt_block_traced<O>(block: &Block, round_keys: &RoundKeys, observer: &mut O) -> Block
where
    O: RoundObserver + ?Sized,
{
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(ROUNDS));
    observer.observe(ROUNDS, Step::AddRoundKey, state);
    inv_shift_rows(&mut state);
    observer.observe(ROUNDS, Step::InvShiftRows, state);
    inv_sub_bytes(&mut state);
    observer.observe(ROUNDS, Step::InvSubBytes, state);

    for round in (1..ROUNDS).rev() {
        add_round_key(&mut state, round_keys.get(round));
        observer.observe(round, Step::AddRoundKey, state);
        inv_mix_columns(&mut state);
        observer.observe(round, Step::InvMixColumns, state);
        inv_shift_rows(&mut state);
        observer.observe(round, Step::InvShiftRows, state);
        inv_sub_bytes(&mut state);
        observer.observe(round, Step::InvSubBytes, state);
    }

    add_round_key(&mut state, round_keys.get(0));
    observer.observe(0, Step::AddRoundKey, state);

    state
}

/// AES-128 cipher holding its expanded key schedule.
///
/// Every call works on its own scratch state and returns an owned block, so a
/// single instance can be shared across threads and results never alias.
#[derive(Clone)]
pub struct Aes128 {
    round_keys: RoundKeys,
}

impl fmt::Debug for Aes128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aes128").finish_non_exhaustive()
    }
}

impl Aes128 {
    /// Expands `key` and builds a cipher around the resulting schedule.
    pub fn new(key: &Aes128Key) -> Self {
        Self {
            round_keys: expand_key(key),
        }
    }

    /// Builds a cipher from raw key bytes, which must be exactly 16 bytes long.
    pub fn from_slice(key: &[u8]) -> Result<Self, AesError> {
        Aes128Key::try_from(key).map(|key| Self::new(&key))
    }

    /// The expanded schedule.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Encrypts one block.
    pub fn encrypt_block(&self, plaintext: &Block) -> Block {
        encrypt_block(plaintext, &self.round_keys)
    }

    /// Decrypts one block.
    pub fn decrypt_block(&self, ciphertext: &Block) -> Block {
        decrypt_block(ciphertext, &self.round_keys)
    }

    /// Encrypts one block while reporting every step to `observer`.
    pub fn encrypt_block_traced<O>(&self, plaintext: &Block, observer: &mut O) -> Block
    where
        O: RoundObserver + ?Sized,
    {
        encrypt_block_traced(plaintext, &self.round_keys, observer)
    }

    /// Decrypts one block while reporting every step to `observer`.
    pub fn decrypt_block_traced<O>(&self, ciphertext: &Block, observer: &mut O) -> Block
    where
        O: RoundObserver + ?Sized,
    {
        decrypt_block_traced(ciphertext, &self.round_keys, observer)
    }

    /// Encrypts a slice that must be exactly one block long.
    pub fn encrypt_slice(&self, plaintext: &[u8]) -> Result<Block, AesError> {
        block_from_slice(plaintext).map(|block| self.encrypt_block(&block))
    }

    /// Decrypts a slice that must be exactly one block long.
    pub fn decrypt_slice(&self, ciphertext: &[u8]) -> Result<Block, AesError> {
        block_from_slice(ciphertext).map(|block| self.decrypt_block(&block))
    }
}
