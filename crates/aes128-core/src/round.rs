//! AES round transformations.
//!
//! Every transform works in place on a column-major 4x4 state.

use crate::block::{cell, xor_in_place, Block};
use crate::gf::{g_mul, inv_g_mul, INV_MIX_MATRIX, MIX_MATRIX};
use crate::sbox::{inv_sbox, sbox};

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
}

fn row(state: &Block, r: usize) -> [u8; 4] {
    core::array::from_fn(|c| state[cell(r, c)])
}

fn set_row(state: &mut Block, r: usize, values: [u8; 4]) {
    for (c, value) in values.into_iter().enumerate() {
        state[cell(r, c)] = value;
    }
}

/// Performs ShiftRows in place: row `r` rotates left by `r` positions.
#[inline]
pub fn shift_rows(state: &mut Block) {
    for r in 1..4 {
        let mut values = row(state, r);
        values.rotate_left(r);
        set_row(state, r, values);
    }
}

/// Performs the inverse of ShiftRows in place: row `r` rotates right by `r` positions.
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    for r in 1..4 {
        let mut values = row(state, r);
        values.rotate_right(r);
        set_row(state, r, values);
    }
}

fn mix_single_column(col: &mut [u8; 4]) {
    let input = *col;
    for (out, coefficients) in col.iter_mut().zip(MIX_MATRIX.iter()) {
        *out = coefficients
            .iter()
            .zip(input.iter())
            .fold(0, |acc, (&f, &x)| acc ^ g_mul(x, f));
    }
}

fn inv_mix_single_column(col: &mut [u8; 4]) {
    let input = *col;
    for (out, coefficients) in col.iter_mut().zip(INV_MIX_MATRIX.iter()) {
        *out = coefficients
            .iter()
            .zip(input.iter())
            .fold(0, |acc, (&f, &x)| acc ^ inv_g_mul(x, f));
    }
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut Block) {
    for chunk in state.chunks_exact_mut(4) {
        let mut column = [chunk[0], chunk[1], chunk[2], chunk[3]];
        mix_single_column(&mut column);
        chunk.copy_from_slice(&column);
    }
}

/// Inverse MixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut Block) {
    for chunk in state.chunks_exact_mut(4) {
        let mut column = [chunk[0], chunk[1], chunk[2], chunk[3]];
        inv_mix_single_column(&mut column);
        chunk.copy_from_slice(&column);
    }
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn counting_state() -> Block {
        core::array::from_fn(|i| i as u8)
    }

    #[test]
    fn shift_rows_matches_fixed_permutation() {
        let mut state = counting_state();
        shift_rows(&mut state);
        assert_eq!(
            state,
            [0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11]
        );
        inv_shift_rows(&mut state);
        assert_eq!(state, counting_state());
    }

    #[test]
    fn shift_rows_leaves_row_zero() {
        let mut state = counting_state();
        shift_rows(&mut state);
        assert_eq!(row(&state, 0), [0, 4, 8, 12]);
        assert_eq!(row(&state, 1), [5, 9, 13, 1]);
        assert_eq!(row(&state, 3), [15, 3, 7, 11]);
    }

    #[test]
    fn mix_columns_known_column() {
        // Standard test column db 13 53 45 -> 8e 4d a1 bc.
        let mut state = [0u8; 16];
        state[..4].copy_from_slice(&[0xdb, 0x13, 0x53, 0x45]);
        state[4..8].copy_from_slice(&[0xf2, 0x0a, 0x22, 0x5c]);
        state[8..12].copy_from_slice(&[0x01, 0x01, 0x01, 0x01]);
        state[12..].copy_from_slice(&[0xc6, 0xc6, 0xc6, 0xc6]);
        mix_columns(&mut state);
        assert_eq!(&state[..4], &[0x8e, 0x4d, 0xa1, 0xbc]);
        assert_eq!(&state[4..8], &[0x9f, 0xdc, 0x58, 0x9d]);
        assert_eq!(&state[8..12], &[0x01, 0x01, 0x01, 0x01]);
        assert_eq!(&state[12..], &[0xc6, 0xc6, 0xc6, 0xc6]);
    }

    #[test]
    fn inverse_transforms_round_trip_random_states() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for _ in 0..256 {
            let mut original = [0u8; 16];
            let mut key = [0u8; 16];
            rng.fill_bytes(&mut original);
            rng.fill_bytes(&mut key);

            let mut state = original;
            mix_columns(&mut state);
            inv_mix_columns(&mut state);
            assert_eq!(state, original);

            shift_rows(&mut state);
            inv_shift_rows(&mut state);
            assert_eq!(state, original);

            sub_bytes(&mut state);
            inv_sub_bytes(&mut state);
            assert_eq!(state, original);

            add_round_key(&mut state, &key);
            add_round_key(&mut state, &key);
            assert_eq!(state, original);
        }
    }
}
