// -*- mode: rust; -*-
//
// This file is part of curve25519-field.
// See LICENSE for licensing information.

//! Field arithmetic modulo \\(p = 2\^{255} - 19\\), using eight saturated
//! \\(32\\)-bit limbs with \\(64\\)-bit accumulators.
//!
//! Unlike the unsaturated radix-\\(2\^{25.5}\\) and radix-\\(2\^{51}\\)
//! representations, every limb here uses all 32 of its bits, so a
//! `FieldElement32` is always held fully reduced: each operation ends
//! with a constant-time conditional subtraction of \\(p\\).
//!
//! Products are formed in a `WideFieldElement32` of sixteen limbs and
//! folded back with the identity \\(2\^{255} \equiv 19 \pmod p\\).

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use super::constants::{P, P7, P_EXT, P_INV};
use super::nat;

/// A `FieldElement32` represents an element of the field
/// \\( \mathbb Z / (2\^{255} - 19)\\).
///
/// The value is stored as eight little-endian `u32` limbs,
/// $$
/// x = \sum\_{i=0}\^7 x\_i 2\^{32 i},
/// $$
/// and is always canonical, i.e. \\(0 \leq x < p\\).  Bit 255 is therefore
/// always clear.
///
/// # Note
///
/// The `curve25519_field::field` module provides the type alias
/// `curve25519_field::FieldElement` to this type.
#[derive(Copy, Clone)]
pub struct FieldElement32(pub(crate) [u32; 8]);

impl Debug for FieldElement32 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement32({:?})", &self.0[..])
    }
}

/// A `WideFieldElement32` is an unreduced 512-bit value, held as sixteen
/// little-endian `u32` limbs.
///
/// It is scratch space for products: `FieldElement32::mul_wide` and
/// `FieldElement32::square_wide` produce one, `mul_add` accumulates
/// further products into it, and `reduce` folds it back into a
/// `FieldElement32`.  The wide add, subtract and accumulate operations
/// keep values below \\(p\^2\\); `reduce` accepts any 512-bit value.
#[derive(Copy, Clone)]
pub struct WideFieldElement32(pub(crate) [u32; 16]);

impl Debug for WideFieldElement32 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "WideFieldElement32({:?})", &self.0[..])
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement32 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for WideFieldElement32 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Select `b` where `choice` is set and `a` elsewhere, limb by limb.
#[inline]
fn select_limbs<const N: usize>(a: &[u32; N], b: &[u32; N], choice: Choice) -> [u32; N] {
    let mut out = [0u32; N];
    for i in 0..N {
        out[i] = u32::conditional_select(&a[i], &b[i], choice);
    }
    out
}

/// Subtract \\(p\\) from `z` if `z >= p`.  The result is canonical
/// whenever `z < 2p`.
#[inline]
fn sub_p_if_gte(z: &[u32; 8]) -> [u32; 8] {
    let (d, borrow) = nat::sub(z, &P);
    select_limbs(&d, z, Choice::from(borrow as u8))
}

/// Subtract \\(p\^2\\) from the 513-bit value `carry * 2^512 + zz` if it
/// is at least \\(p\^2\\).
#[inline]
fn sub_p_ext_if_gte(zz: &[u32; 16], carry: u32) -> [u32; 16] {
    let (d, borrow) = nat::sub(zz, &P_EXT);
    let keep = Choice::from(borrow as u8) & !Choice::from(carry as u8);
    select_limbs(&d, zz, keep)
}

/// Fold a value `excess * 2^255 + z`, with bit 255 of `z` already
/// cleared, into canonical form.
///
/// The caller guarantees `excess * 19 < 2^63`; the folded value is then
/// below \\(2\^{255} + 2\^{63} < 2p\\), so one conditional subtraction
/// finishes the job.
#[inline]
fn fold_excess(mut z: [u32; 8], excess: u64) -> FieldElement32 {
    debug_assert_eq!(z[7] >> 31, 0);
    let c = nat::add_word_to(excess * (P_INV as u64), &mut z[..7]);
    z[7] += c;
    FieldElement32(sub_p_if_gte(&z))
}

/// Load eight little-endian limbs from 32 bytes, without any reduction.
#[inline]
pub(crate) fn load_limbs(bytes: &[u8; 32]) -> [u32; 8] {
    let mut limbs = [0u32; 8];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(4)) {
        *limb = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    limbs
}

impl<'b> AddAssign<&'b FieldElement32> for FieldElement32 {
    fn add_assign(&mut self, rhs: &'b FieldElement32) {
        // Both summands are below p < 2^255, so the sum cannot carry out.
        let (sum, _) = nat::add(&self.0, &rhs.0);
        self.0 = sub_p_if_gte(&sum);
    }
}

impl<'a, 'b> Add<&'b FieldElement32> for &'a FieldElement32 {
    type Output = FieldElement32;
    fn add(self, rhs: &'b FieldElement32) -> FieldElement32 {
        let mut output = *self;
        output += rhs;
        output
    }
}

define_add_variants!(LHS = FieldElement32, RHS = FieldElement32, Output = FieldElement32);
define_add_assign_variants!(LHS = FieldElement32, RHS = FieldElement32);

impl<'b> SubAssign<&'b FieldElement32> for FieldElement32 {
    fn sub_assign(&mut self, rhs: &'b FieldElement32) {
        // The true difference lies in (-p, p): add p back once on borrow.
        let (d, borrow) = nat::sub(&self.0, &rhs.0);
        let (e, _) = nat::add(&d, &P);
        self.0 = select_limbs(&d, &e, Choice::from(borrow as u8));
    }
}

impl<'a, 'b> Sub<&'b FieldElement32> for &'a FieldElement32 {
    type Output = FieldElement32;
    fn sub(self, rhs: &'b FieldElement32) -> FieldElement32 {
        let mut output = *self;
        output -= rhs;
        output
    }
}

define_sub_variants!(LHS = FieldElement32, RHS = FieldElement32, Output = FieldElement32);
define_sub_assign_variants!(LHS = FieldElement32, RHS = FieldElement32);

impl<'b> MulAssign<&'b FieldElement32> for FieldElement32 {
    fn mul_assign(&mut self, rhs: &'b FieldElement32) {
        let result = (self as &FieldElement32) * rhs;
        self.0 = result.0;
    }
}

impl<'a, 'b> Mul<&'b FieldElement32> for &'a FieldElement32 {
    type Output = FieldElement32;
    fn mul(self, rhs: &'b FieldElement32) -> FieldElement32 {
        self.mul_wide(rhs).reduce()
    }
}

define_mul_variants!(LHS = FieldElement32, RHS = FieldElement32, Output = FieldElement32);
define_mul_assign_variants!(LHS = FieldElement32, RHS = FieldElement32);

impl<'a> Neg for &'a FieldElement32 {
    type Output = FieldElement32;
    fn neg(self) -> FieldElement32 {
        let mut output = *self;
        output.negate();
        output
    }
}

define_neg_variant!(Type = FieldElement32);

impl ConditionallySelectable for FieldElement32 {
    fn conditional_select(a: &FieldElement32, b: &FieldElement32, choice: Choice) -> FieldElement32 {
        FieldElement32(select_limbs(&a.0, &b.0, choice))
    }
}

impl From<u64> for FieldElement32 {
    /// Every `u64` is already below \\(p\\).
    fn from(x: u64) -> FieldElement32 {
        let mut limbs = [0u32; 8];
        limbs[0] = x as u32;
        limbs[1] = (x >> 32) as u32;
        FieldElement32(limbs)
    }
}

impl Default for FieldElement32 {
    fn default() -> FieldElement32 {
        FieldElement32::ZERO
    }
}

impl FieldElement32 {
    pub(crate) const fn from_limbs(limbs: [u32; 8]) -> FieldElement32 {
        FieldElement32(limbs)
    }

    /// The scalar \\( 0 \\).
    pub const ZERO: FieldElement32 = FieldElement32::from_limbs([0, 0, 0, 0, 0, 0, 0, 0]);
    /// The scalar \\( 1 \\).
    pub const ONE: FieldElement32 = FieldElement32::from_limbs([1, 0, 0, 0, 0, 0, 0, 0]);
    /// The scalar \\( -1 \\).
    pub const MINUS_ONE: FieldElement32 = FieldElement32::from_limbs([
        0xFFFF_FFEC, 0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF,
        0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF, 0x7FFF_FFFF,
    ]);

    /// The little-endian limbs of this element.
    pub fn as_limbs(&self) -> &[u32; 8] {
        &self.0
    }

    /// Reduce an arbitrary 256-bit limb vector.
    ///
    /// Since \\(2\^{256} - 1 < 3p\\), two conditional subtractions of
    /// \\(p\\) always suffice.
    #[cfg(feature = "num-bigint")]
    pub(crate) fn reduce_limbs(limbs: [u32; 8]) -> FieldElement32 {
        let once = sub_p_if_gte(&limbs);
        FieldElement32(sub_p_if_gte(&once))
    }

    /// Determine if this `FieldElement32` is zero, by OR-ing the limbs
    /// together and comparing the result to zero in constant time.
    ///
    /// # Return
    ///
    /// If zero, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    pub fn is_zero(&self) -> Choice {
        let mut d = 0u32;
        for limb in self.0.iter() {
            d |= *limb;
        }
        d.ct_eq(&0)
    }

    /// Invert the sign of this field element.
    ///
    /// Zero maps to zero: its negation is computed as \\(p - p\\).
    pub fn negate(&mut self) {
        let x = select_limbs(&self.0, &P, self.is_zero());
        let (z, _) = nat::sub(&P, &x);
        self.0 = z;
    }

    /// Compute `self + 1`.
    pub fn add_one(&self) -> FieldElement32 {
        let (sum, _) = nat::add(&self.0, &FieldElement32::ONE.0);
        FieldElement32(sub_p_if_gte(&sum))
    }

    /// Compute `2 * self` with a one-bit shift.
    pub fn double(&self) -> FieldElement32 {
        let (z, _) = nat::shift_up_bit(&self.0, 0);
        FieldElement32(sub_p_if_gte(&z))
    }

    /// Compute `self / 2`.
    ///
    /// An odd value is made even by adding \\(p\\) (which is odd) before
    /// shifting; the addend is masked by the low bit rather than chosen
    /// by a branch.
    pub fn half(&self) -> FieldElement32 {
        let mask = 0u32.wrapping_sub(self.0[0] & 1);
        let mut addend = P;
        for limb in addend.iter_mut() {
            *limb &= mask;
        }
        let (sum, carry) = nat::add(&self.0, &addend);
        let (z, _) = nat::shift_down_bit(&sum, carry);
        FieldElement32(z)
    }

    /// Compute the full 512-bit product `self * rhs` without reducing.
    pub fn mul_wide(&self, rhs: &FieldElement32) -> WideFieldElement32 {
        WideFieldElement32(nat::mul(&self.0, &rhs.0))
    }

    /// Compute the full 512-bit square of `self` without reducing.
    pub fn square_wide(&self) -> WideFieldElement32 {
        WideFieldElement32(nat::square(&self.0))
    }

    /// Compute `self^2`.
    pub fn square(&self) -> FieldElement32 {
        self.square_wide().reduce()
    }

    /// Given `k > 0`, return `self^(2^k)`.
    pub fn pow2k(&self, k: u32) -> FieldElement32 {
        debug_assert!(k > 0);
        let mut z = self.square();
        for _ in 1..k {
            z = z.square();
        }
        z
    }

    /// Fold a word `hi`, sitting at weight \\(2\^{256}\\) above the
    /// 256-bit value `lo`, into a canonical field element.
    ///
    /// `lo` need not be reduced.  With a 64-bit accumulator the fold is
    /// exact for every `u32` value of `hi`, not only for the 27-bit
    /// excess that accumulation patterns produce.
    pub fn reduce27(hi: u32, lo: &[u32; 8]) -> FieldElement32 {
        let mut z = *lo;
        // hi * 2^256 + lo = (2 hi + bit 255) * 2^255 + (lo mod 2^255)
        let excess = ((hi as u64) << 1) | ((z[7] >> 31) as u64);
        z[7] &= P7;
        fold_excess(z, excess)
    }

    /// Load a `FieldElement32` from the low 255 bits of a 256-bit
    /// input.
    ///
    /// # Warning
    ///
    /// This function does not check that the input used the canonical
    /// representative.  It masks the high bit, but it will happily
    /// decode 2^255 - 18 to 1.  Applications that require a canonical
    /// encoding of every field element should use
    /// `FieldElement::from_canonical_bytes` instead.
    pub fn from_bytes(bytes: &[u8; 32]) -> FieldElement32 {
        let mut limbs = load_limbs(bytes);
        limbs[7] &= P7;
        FieldElement32(sub_p_if_gte(&limbs))
    }

    /// Serialize this `FieldElement32` to a 32-byte array.  The
    /// encoding is canonical.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (chunk, limb) in bytes.chunks_exact_mut(4).zip(self.0.iter()) {
            chunk.copy_from_slice(&limb.to_le_bytes());
        }
        bytes
    }
}

impl<'b> AddAssign<&'b WideFieldElement32> for WideFieldElement32 {
    fn add_assign(&mut self, rhs: &'b WideFieldElement32) {
        let (sum, carry) = nat::add(&self.0, &rhs.0);
        self.0 = sub_p_ext_if_gte(&sum, carry);
    }
}

impl<'a, 'b> Add<&'b WideFieldElement32> for &'a WideFieldElement32 {
    type Output = WideFieldElement32;
    fn add(self, rhs: &'b WideFieldElement32) -> WideFieldElement32 {
        let mut output = *self;
        output += rhs;
        output
    }
}

define_add_variants!(LHS = WideFieldElement32, RHS = WideFieldElement32, Output = WideFieldElement32);
define_add_assign_variants!(LHS = WideFieldElement32, RHS = WideFieldElement32);

impl<'b> SubAssign<&'b WideFieldElement32> for WideFieldElement32 {
    fn sub_assign(&mut self, rhs: &'b WideFieldElement32) {
        let (d, borrow) = nat::sub(&self.0, &rhs.0);
        let (e, _) = nat::add(&d, &P_EXT);
        self.0 = select_limbs(&d, &e, Choice::from(borrow as u8));
    }
}

impl<'a, 'b> Sub<&'b WideFieldElement32> for &'a WideFieldElement32 {
    type Output = WideFieldElement32;
    fn sub(self, rhs: &'b WideFieldElement32) -> WideFieldElement32 {
        let mut output = *self;
        output -= rhs;
        output
    }
}

define_sub_variants!(LHS = WideFieldElement32, RHS = WideFieldElement32, Output = WideFieldElement32);
define_sub_assign_variants!(LHS = WideFieldElement32, RHS = WideFieldElement32);

impl ConditionallySelectable for WideFieldElement32 {
    fn conditional_select(
        a: &WideFieldElement32,
        b: &WideFieldElement32,
        choice: Choice,
    ) -> WideFieldElement32 {
        WideFieldElement32(select_limbs(&a.0, &b.0, choice))
    }
}

impl Default for WideFieldElement32 {
    fn default() -> WideFieldElement32 {
        WideFieldElement32::ZERO
    }
}

impl WideFieldElement32 {
    /// The wide value \\( 0 \\).
    pub const ZERO: WideFieldElement32 = WideFieldElement32([0u32; 16]);

    /// Wrap sixteen little-endian limbs.  Any 512-bit value may be
    /// reduced; the wide add, subtract and `mul_add` additionally expect
    /// their operands to be below \\(p\^2\\).
    pub const fn from_limbs(limbs: [u32; 16]) -> WideFieldElement32 {
        WideFieldElement32(limbs)
    }

    /// The little-endian limbs of this value.
    pub fn as_limbs(&self) -> &[u32; 16] {
        &self.0
    }

    /// Accumulate the product `a * b` into `self`, keeping the sum below
    /// \\(p\^2\\) with at most one subtraction.
    ///
    /// Requires `self < p^2`; then `self + a * b < 2 p^2 < 2^511`.
    pub fn mul_add(&mut self, a: &FieldElement32, b: &FieldElement32) {
        let carry = nat::mul_add_to(&a.0, &b.0, &mut self.0);
        self.0 = sub_p_ext_if_gte(&self.0, carry);
    }

    /// Reduce this 512-bit value modulo \\(p\\).
    ///
    /// Write the value as \\(L + 2\^{256} H\\).  Shifting \\(H\\) up one
    /// bit and pulling in bit 255 of \\(L\\) puts everything above bit
    /// 254 in units of \\(2\^{255}\\), which fold down as \\(\times 19\\).
    /// The first pass leaves a small carry word and a possibly set bit
    /// 255; those are counted, bit 255 is cleared, and the excess is
    /// folded in a second \\(\times 19\\) pass.  Exact for every input,
    /// including \\(2\^{512} - 1\\).
    pub fn reduce(&self) -> FieldElement32 {
        let mut lo = [0u32; 8];
        let mut hi = [0u32; 8];
        lo.copy_from_slice(&self.0[..8]);
        hi.copy_from_slice(&self.0[8..]);

        let b = lo[7] >> 31;
        // 2H + b, and h = bit 511 which the shift pushes out.
        let (hi2, h) = nat::shift_up_bit(&hi, b);
        // 19 (2H + b) + L, except for the 19 h 2^256 term.
        let (mut z, c) = nat::mul_word_add(P_INV, &hi2, &lo);

        // What now sits at or above 2^255, in units of 2^255: the carry
        // word and 19 h (each worth 2^256), bit 255 of z, minus bit 255 of
        // L which the shift already counted.  At most 77.
        let excess = (((c + P_INV * h) << 1) + (z[7] >> 31) - b) as u64;
        z[7] &= P7;

        fold_excess(z, excess)
    }
}
