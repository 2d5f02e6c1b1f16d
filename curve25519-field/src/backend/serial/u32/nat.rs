// -*- mode: rust; -*-
//
// This file is part of curve25519-field.
// See LICENSE for licensing information.

//! Fixed-width natural-number arithmetic on little-endian `u32` limb
//! vectors, with `u64` accumulators for every carry and borrow.
//!
//! These are the leaves of the field arithmetic: they know nothing about
//! the modulus.  Every loop runs a fixed number of times determined by the
//! array length, and carries and borrows are returned as `0`/`1` words
//! rather than acted on, so that the caller can turn them into a
//! [`Choice`] instead of branching.

use subtle::Choice;

/// Compute `x + y`, returning the sum modulo \\(2\^{32N}\\) and the
/// outgoing carry bit.
#[inline]
pub(crate) fn add<const N: usize>(x: &[u32; N], y: &[u32; N]) -> ([u32; N], u32) {
    let mut z = [0u32; N];
    let mut c = 0u64;
    for i in 0..N {
        c += (x[i] as u64) + (y[i] as u64);
        z[i] = c as u32;
        c >>= 32;
    }
    (z, c as u32)
}

/// Compute `x - y`, returning the difference modulo \\(2\^{32N}\\) and
/// the outgoing borrow bit.
#[inline]
pub(crate) fn sub<const N: usize>(x: &[u32; N], y: &[u32; N]) -> ([u32; N], u32) {
    let mut z = [0u32; N];
    let mut borrow = 0u64;
    for i in 0..N {
        // A negative difference wraps around to a value with bit 63 set.
        let d = (x[i] as u64).wrapping_sub(y[i] as u64).wrapping_sub(borrow);
        z[i] = d as u32;
        borrow = d >> 63;
    }
    (z, borrow as u32)
}

/// Return `Choice(1)` iff `x < y`.
#[inline]
pub(crate) fn lt<const N: usize>(x: &[u32; N], y: &[u32; N]) -> Choice {
    let (_, borrow) = sub(x, y);
    Choice::from(borrow as u8)
}

/// Shift `x` up by one bit, shifting the bit `c` (`0` or `1`) in at the
/// bottom.  Returns the shifted value and the bit shifted out at the top.
#[inline]
pub(crate) fn shift_up_bit<const N: usize>(x: &[u32; N], mut c: u32) -> ([u32; N], u32) {
    let mut z = [0u32; N];
    for i in 0..N {
        let next = x[i] >> 31;
        z[i] = (x[i] << 1) | c;
        c = next;
    }
    (z, c)
}

/// Shift `x` down by one bit, shifting the bit `c` (`0` or `1`) in at the
/// top.  Returns the shifted value and the bit shifted out at the bottom.
#[inline]
pub(crate) fn shift_down_bit<const N: usize>(x: &[u32; N], mut c: u32) -> ([u32; N], u32) {
    let mut z = [0u32; N];
    for i in (0..N).rev() {
        let next = x[i] & 1;
        z[i] = (x[i] >> 1) | (c << 31);
        c = next;
    }
    (z, c)
}

/// Add the word `w` into the limbs of `z`, returning the carry out of the
/// top limb of the slice.
///
/// `w` must be below \\(2\^{63}\\) so that the first accumulation cannot
/// overflow.
#[inline]
pub(crate) fn add_word_to(w: u64, z: &mut [u32]) -> u32 {
    debug_assert!(w < (1u64 << 63));
    let mut c = w;
    for limb in z.iter_mut() {
        c += *limb as u64;
        *limb = c as u32;
        c >>= 32;
    }
    c as u32
}

/// Compute `w * x + y`, returning the low 256 bits and the high word.
#[inline]
pub(crate) fn mul_word_add(w: u32, x: &[u32; 8], y: &[u32; 8]) -> ([u32; 8], u32) {
    let w = w as u64;
    let mut z = [0u32; 8];
    let mut c = 0u64;
    for i in 0..8 {
        c += w * (x[i] as u64) + (y[i] as u64);
        z[i] = c as u32;
        c >>= 32;
    }
    (z, c as u32)
}

/// Schoolbook product of two 256-bit values.
pub(crate) fn mul(x: &[u32; 8], y: &[u32; 8]) -> [u32; 16] {
    let mut zz = [0u32; 16];
    for i in 0..8 {
        let xi = x[i] as u64;
        let mut c = 0u64;
        for j in 0..8 {
            // (2^32 - 1)^2 + 2 (2^32 - 1) = 2^64 - 1, so this never overflows.
            c += xi * (y[j] as u64) + (zz[i + j] as u64);
            zz[i + j] = c as u32;
            c >>= 32;
        }
        zz[i + 8] = c as u32;
    }
    zz
}

/// Accumulate `x * y` into `zz`, returning the carry out of the top limb.
pub(crate) fn mul_add_to(x: &[u32; 8], y: &[u32; 8], zz: &mut [u32; 16]) -> u32 {
    let mut zc = 0u64;
    for i in 0..8 {
        let xi = x[i] as u64;
        let mut c = 0u64;
        for j in 0..8 {
            c += xi * (y[j] as u64) + (zz[i + j] as u64);
            zz[i + j] = c as u32;
            c >>= 32;
        }
        // Both the row carry and the previous column carry land on limb i + 8.
        zc += c + (zz[i + 8] as u64);
        zz[i + 8] = zc as u32;
        zc >>= 32;
    }
    zc as u32
}

/// Square of a 256-bit value.
///
/// Each cross product \\(x\_i x\_j, i < j\\) is computed once and the sum
/// of them doubled with a one-bit shift, before the diagonal terms
/// \\(x\_i\^2\\) are added in.
pub(crate) fn square(x: &[u32; 8]) -> [u32; 16] {
    let mut zz = [0u32; 16];
    for i in 0..8 {
        let xi = x[i] as u64;
        let mut c = 0u64;
        for j in (i + 1)..8 {
            c += xi * (x[j] as u64) + (zz[i + j] as u64);
            zz[i + j] = c as u32;
            c >>= 32;
        }
        zz[i + 8] = c as u32;
    }

    // The cross products sum to less than 2^511, so nothing is shifted out.
    let (mut zz, _) = shift_up_bit(&zz, 0);

    let mut c = 0u64;
    for i in 0..8 {
        let sq = (x[i] as u64) * (x[i] as u64);
        c += (sq & 0xFFFF_FFFF) + (zz[2 * i] as u64);
        zz[2 * i] = c as u32;
        c >>= 32;
        c += (sq >> 32) + (zz[2 * i + 1] as u64);
        zz[2 * i + 1] = c as u32;
        c >>= 32;
    }
    zz
}

#[cfg(test)]
mod test {
    use super::*;

    const MAX: [u32; 8] = [u32::MAX; 8];

    fn one() -> [u32; 8] {
        let mut x = [0u32; 8];
        x[0] = 1;
        x
    }

    #[test]
    fn add_carries_through_every_limb() {
        let (z, c) = add(&MAX, &one());
        assert_eq!(z, [0u32; 8]);
        assert_eq!(c, 1);
    }

    #[test]
    fn sub_borrows_through_every_limb() {
        let (z, borrow) = sub(&[0u32; 8], &one());
        assert_eq!(z, MAX);
        assert_eq!(borrow, 1);

        let (z, borrow) = sub(&MAX, &MAX);
        assert_eq!(z, [0u32; 8]);
        assert_eq!(borrow, 0);
    }

    #[test]
    fn comparisons() {
        assert!(bool::from(lt(&one(), &MAX)));
        assert!(!bool::from(lt(&MAX, &MAX)));
        assert!(!bool::from(lt(&[0u32; 8], &[0u32; 8])));
    }

    #[test]
    fn shifts_move_bits_across_limbs() {
        let mut x = [0u32; 8];
        x[0] = 0x8000_0001;
        x[7] = 0x8000_0000;
        let (up, out) = shift_up_bit(&x, 1);
        assert_eq!(out, 1);
        assert_eq!(up[0], 0x0000_0003);
        assert_eq!(up[1], 0x0000_0001);
        assert_eq!(up[7], 0);

        let (down, out) = shift_down_bit(&up, out);
        assert_eq!(out, 1);
        assert_eq!(down, x);
    }

    #[test]
    fn add_word_reports_carry() {
        let mut z = [u32::MAX; 7];
        let c = add_word_to(1, &mut z[..]);
        assert_eq!(c, 1);
        assert_eq!(z, [0u32; 7]);

        let mut z = [0u32; 7];
        let c = add_word_to(0x1_0000_0002, &mut z[..]);
        assert_eq!(c, 0);
        assert_eq!(&z[..2], &[2, 1]);
    }

    #[test]
    fn mul_of_maximal_values() {
        // (2^256 - 1)^2 = 2^512 - 2^257 + 1
        let zz = mul(&MAX, &MAX);
        let mut expected = [0u32; 16];
        expected[0] = 1;
        expected[8] = 0xFFFF_FFFE;
        for limb in expected[9..].iter_mut() {
            *limb = u32::MAX;
        }
        assert_eq!(zz, expected);
        assert_eq!(square(&MAX), expected);
    }

    #[test]
    fn square_matches_mul() {
        let x = [
            0x0123_4567, 0x89AB_CDEF, 0xDEAD_BEEF, 0x0000_0001,
            0xFFFF_FFFF, 0x8000_0000, 0x7FFF_FFFF, 0x1357_9BDF,
        ];
        assert_eq!(square(&x), mul(&x, &x));
    }

    #[test]
    fn mul_add_accumulates() {
        let x = [7u32, 0, 0, 0, 0, 0, 0, 0x8000_0000];
        let y = [3u32, 0, 0, 0, 0, 0, 0, 2];
        let mut zz = mul(&x, &y);
        let c = mul_add_to(&x, &y, &mut zz);
        assert_eq!(c, 0);
        let (twice, _) = shift_up_bit(&mul(&x, &y), 0);
        assert_eq!(zz, twice);
    }

    #[test]
    fn mul_add_reports_top_carry() {
        let mut zz = mul(&MAX, &MAX);
        let c = mul_add_to(&MAX, &MAX, &mut zz);
        assert_eq!(c, 1);
    }

    #[test]
    fn mul_word_add_folds() {
        let (z, c) = mul_word_add(19, &MAX, &one());
        // 19 (2^256 - 1) + 1 = 18 * 2^256 + (2^256 - 18)
        assert_eq!(c, 18);
        let mut expected = MAX;
        expected[0] = 0xFFFF_FFEE;
        assert_eq!(z, expected);
    }
}
