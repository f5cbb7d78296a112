//! Multiplication by the fixed MixColumns constants over GF(2^8).
//!
//! The field uses the reduction polynomial x^8 + x^4 + x^3 + x + 1 (0x11B).
//! Only the multipliers that appear in the MixColumns and InvMixColumns
//! matrices are representable; anything else is rejected at the `u8` boundary.

use crate::error::AesError;

/// Multiplier used by the forward MixColumns matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MixFactor {
    /// Identity.
    One,
    /// `x`.
    Two,
    /// `x + 1`.
    Three,
}

/// Multiplier used by the InvMixColumns matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvMixFactor {
    /// `0x09`.
    Nine,
    /// `0x0b`.
    Eleven,
    /// `0x0d`.
    Thirteen,
    /// `0x0e`.
    Fourteen,
}

impl MixFactor {
    /// The multiplier as a field element.
    pub const fn value(self) -> u8 {
        match self {
            MixFactor::One => 1,
            MixFactor::Two => 2,
            MixFactor::Three => 3,
        }
    }
}

impl InvMixFactor {
    /// The multiplier as a field element.
    pub const fn value(self) -> u8 {
        match self {
            InvMixFactor::Nine => 9,
            InvMixFactor::Eleven => 11,
            InvMixFactor::Thirteen => 13,
            InvMixFactor::Fourteen => 14,
        }
    }
}

impl TryFrom<u8> for MixFactor {
    type Error = AesError;

    fn try_from(factor: u8) -> Result<Self, Self::Error> {
        match factor {
            1 => Ok(MixFactor::One),
            2 => Ok(MixFactor::Two),
            3 => Ok(MixFactor::Three),
            _ => Err(AesError::InvalidFactor { factor }),
        }
    }
}

impl TryFrom<u8> for InvMixFactor {
    type Error = AesError;

    fn try_from(factor: u8) -> Result<Self, Self::Error> {
        match factor {
            9 => Ok(InvMixFactor::Nine),
            11 => Ok(InvMixFactor::Eleven),
            13 => Ok(InvMixFactor::Thirteen),
            14 => Ok(InvMixFactor::Fourteen),
            _ => Err(AesError::InvalidFactor { factor }),
        }
    }
}

/// MixColumns matrix, row-major.
pub(crate) const MIX_MATRIX: [[MixFactor; 4]; 4] = {
    use MixFactor::{One as I, Three as T, Two as D};
    [[D, T, I, I], [I, D, T, I], [I, I, D, T], [T, I, I, D]]
};

/// InvMixColumns matrix, row-major.
pub(crate) const INV_MIX_MATRIX: [[InvMixFactor; 4]; 4] = {
    use InvMixFactor::{Eleven as B, Fourteen as E, Nine as N, Thirteen as D};
    [[E, B, D, N], [N, E, B, D], [D, N, E, B], [B, D, N, E]]
};

/// Multiplies by `x`: shift left and reduce when the high bit falls off.
#[inline]
pub const fn xtime(byte: u8) -> u8 {
    let shifted = byte << 1;
    if byte & 0x80 != 0 {
        shifted ^ 0x1b
    } else {
        shifted
    }
}

/// Forward MixColumns multiplication.
#[inline]
pub const fn g_mul(x: u8, factor: MixFactor) -> u8 {
    match factor {
        MixFactor::One => x,
        MixFactor::Two => xtime(x),
        MixFactor::Three => x ^ xtime(x),
    }
}

/// InvMixColumns multiplication, built only from repeated doubling and XOR.
#[inline]
pub const fn inv_g_mul(x: u8, factor: InvMixFactor) -> u8 {
    match factor {
        InvMixFactor::Nine => xtime(xtime(xtime(x))) ^ x,
        InvMixFactor::Eleven => xtime(xtime(xtime(x)) ^ x) ^ x,
        InvMixFactor::Thirteen => xtime(xtime(xtime(x) ^ x)) ^ x,
        InvMixFactor::Fourteen => xtime(xtime(xtime(x) ^ x) ^ x),
    }
}

/// [`g_mul`] for a raw multiplier; fails with [`AesError::InvalidFactor`] outside {1, 2, 3}.
pub fn g_mul_checked(x: u8, factor: u8) -> Result<u8, AesError> {
    MixFactor::try_from(factor).map(|f| g_mul(x, f))
}

/// [`inv_g_mul`] for a raw multiplier; fails with [`AesError::InvalidFactor`] outside {9, 11, 13, 14}.
pub fn inv_g_mul_checked(x: u8, factor: u8) -> Result<u8, AesError> {
    InvMixFactor::try_from(factor).map(|f| inv_g_mul(x, f))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Schoolbook multiplication, used only to cross-check the fixed multipliers.
    fn gmul(mut a: u8, mut b: u8) -> u8 {
        let mut product = 0u8;
        for _ in 0..8 {
            if b & 1 != 0 {
                product ^= a;
            }
            a = xtime(a);
            b >>= 1;
        }
        product
    }

    #[test]
    fn xtime_reduces_high_bit() {
        assert_eq!(xtime(0x57), 0xae);
        assert_eq!(xtime(0xae), 0x47);
        assert_eq!(xtime(0x80), 0x1b);
        assert_eq!(xtime(0x00), 0x00);
    }

    #[test]
    fn fips197_multiplication_example() {
        // {57} * {13} = {fe}
        assert_eq!(inv_g_mul(0x57, InvMixFactor::Thirteen), 0xfe);
        assert_eq!(g_mul(0x57, MixFactor::Three), 0x57 ^ 0xae);
    }

    #[test]
    fn fixed_multipliers_match_generic_product() {
        for x in 0..=255u8 {
            for f in [MixFactor::One, MixFactor::Two, MixFactor::Three] {
                assert_eq!(g_mul(x, f), gmul(x, f.value()), "x={x:#04x} f={f:?}");
            }
            for f in [
                InvMixFactor::Nine,
                InvMixFactor::Eleven,
                InvMixFactor::Thirteen,
                InvMixFactor::Fourteen,
            ] {
                assert_eq!(inv_g_mul(x, f), gmul(x, f.value()), "x={x:#04x} f={f:?}");
            }
        }
    }

    #[test]
    fn unsupported_factors_are_rejected() {
        for factor in [0u8, 4, 5, 8, 10, 12, 15, 0xff] {
            assert_eq!(
                g_mul_checked(0x12, factor),
                Err(AesError::InvalidFactor { factor })
            );
        }
        for factor in [0u8, 1, 2, 3, 10, 12, 15] {
            assert_eq!(
                inv_g_mul_checked(0x12, factor),
                Err(AesError::InvalidFactor { factor })
            );
        }
        assert_eq!(g_mul_checked(0x57, 2), Ok(0xae));
        assert_eq!(inv_g_mul_checked(0x57, 13), Ok(0xfe));
    }

    #[test]
    fn matrices_are_inverse() {
        for i in 0..4 {
            for j in 0..4 {
                let mut acc = 0u8;
                for k in 0..4 {
                    acc ^= gmul(MIX_MATRIX[i][k].value(), INV_MIX_MATRIX[k][j].value());
                }
                assert_eq!(acc, u8::from(i == j), "entry ({i}, {j})");
            }
        }
    }
}
