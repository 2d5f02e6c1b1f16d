// -*- mode: rust; -*-
//
// This file is part of curve25519-field.
// See LICENSE for licensing information.

//! Field arithmetic modulo \\(p = 2\^{255} - 19\\).
//!
//! The `curve25519_field::field` module provides the type aliases
//! `FieldElement` and `WideFieldElement` for the element types defined in
//! the `backend` module.
//!
//! Field operations defined in terms of machine operations, such as
//! field multiplication or squaring, are defined in the backend
//! implementation.
//!
//! Field operations defined in terms of other field operations, such as
//! field inversion, as well as sampling and conversions, are defined
//! here.

use subtle::Choice;
use subtle::ConstantTimeEq;
use subtle::CtOption;

#[cfg(feature = "alloc")]
use subtle::ConditionallySelectable;

#[cfg(feature = "num-bigint")]
use num_bigint::BigUint;

#[cfg(feature = "rand_core")]
use rand_core::CryptoRngCore;

#[cfg(all(feature = "rand_core", feature = "zeroize"))]
use zeroize::Zeroize;

#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::backend;
use crate::backend::serial::u32::constants::P;
use crate::backend::serial::u32::field::load_limbs;
use crate::backend::serial::u32::nat;
use crate::errors::{FieldError, InternalError};

/// A `FieldElement` represents an element of the field
/// \\( \mathbb Z / (2\^{255} - 19)\\).
///
/// The `FieldElement` type is an alias for the backend implementation,
/// eight saturated `u32` limbs held in canonical form.
pub type FieldElement = backend::serial::u32::field::FieldElement32;

/// A `WideFieldElement` is an unreduced 512-bit intermediate, such as
/// the product of two field elements before reduction.
pub type WideFieldElement = backend::serial::u32::field::WideFieldElement32;

impl Eq for FieldElement {}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for FieldElement {
    /// Test equality between two `FieldElement`s.  The representation
    /// is canonical, so the limbs are compared directly.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.as_limbs()[..].ct_eq(&other.as_limbs()[..])
    }
}

impl FieldElement {
    /// Attempt to construct a `FieldElement` from a canonical
    /// little-endian encoding.
    ///
    /// # Return
    ///
    /// - `Some(x)` if `bytes` encodes an integer \\(x < p\\);
    /// - `None` otherwise, including when bit 255 is set.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> CtOption<FieldElement> {
        let limbs = load_limbs(&bytes);
        let is_canonical = nat::lt(&limbs, &P);
        CtOption::new(FieldElement::from_limbs(limbs), is_canonical)
    }

    /// Return a `FieldElement` chosen uniformly at random using a
    /// user-provided RNG.
    ///
    /// 32 random bytes are drawn, bit 255 is cleared, and the candidate
    /// is rejected and redrawn while it is not below \\(p\\).  Only 19 of
    /// the \\(2\^{255}\\) masked candidates are rejected.
    ///
    /// # Inputs
    ///
    /// * `rng`: any RNG which implements `CryptoRngCore`
    ///   (i.e. `CryptoRng` + `RngCore`) interface.
    #[cfg(feature = "rand_core")]
    pub fn random<R: CryptoRngCore + ?Sized>(rng: &mut R) -> FieldElement {
        let mut bytes = [0u8; 32];
        let mut rejected = 0u32;
        loop {
            rng.fill_bytes(&mut bytes);
            bytes[31] &= 0x7f;
            let candidate = Option::<FieldElement>::from(FieldElement::from_canonical_bytes(bytes));
            if let Some(x) = candidate {
                #[cfg(feature = "zeroize")]
                bytes.zeroize();
                if rejected > 0 {
                    log::trace!("rejected {} out-of-range field element candidate(s)", rejected);
                }
                return x;
            }
            rejected += 1;
        }
    }

    /// Return a nonzero `FieldElement` chosen uniformly at random, for use
    /// as a multiplicative blinding factor.
    #[cfg(feature = "rand_core")]
    pub fn random_nonzero<R: CryptoRngCore + ?Sized>(rng: &mut R) -> FieldElement {
        let mut rejected = 0u32;
        loop {
            let x = FieldElement::random(rng);
            if !bool::from(x.is_zero()) {
                if rejected > 0 {
                    log::trace!("rejected {} zero field element candidate(s)", rejected);
                }
                return x;
            }
            rejected += 1;
        }
    }

    /// Convert an arbitrary-precision integer of at most 256 bits into
    /// its canonical field representation.
    ///
    /// Any such integer is below \\(3p\\), so it is reduced by at most
    /// two conditional subtractions of \\(p\\).  This is not a general
    /// reduction: wider integers are rejected.
    #[cfg(feature = "num-bigint")]
    pub fn from_biguint(n: &BigUint) -> Result<FieldElement, FieldError> {
        let bits = n.bits();
        if bits > 256 {
            return Err(FieldError(InternalError::IntegerTooLarge { bits }));
        }
        let mut limbs = [0u32; 8];
        for (limb, digit) in limbs.iter_mut().zip(n.iter_u32_digits()) {
            *limb = digit;
        }
        Ok(FieldElement::reduce_limbs(limbs))
    }

    /// The integer in \\([0, p)\\) represented by this element.
    #[cfg(feature = "num-bigint")]
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_slice(self.as_limbs())
    }

    /// Compute \\(x\^{2\^k - 1}\\) for the run lengths of the exponent
    /// \\(p - 2\\), then combine them into \\(x\^{p-2}\\).
    #[rustfmt::skip] // keep alignment of explanatory comments
    fn pow_p_minus_2(&self) -> FieldElement {
        // The bits of p-2 = 2^255 - 21 are {250 ones} 01011.
        //
        // Each x_k is self^(2^k - 1).  Squaring k times shifts the
        // exponent up by k bits, and multiplying by x_j fills the low j
        // bits with ones, so x_(k+j) = x_k^(2^j) * x_j.
        //
        //                                          run lengths
        let x1   = *self;
        let x2   = &x1.square() * &x1;           // 1 + 1
        let x3   = &x2.square() * &x1;           // 2 + 1
        let x5   = &x3.pow2k(2) * &x2;           // 3 + 2
        let x10  = &x5.pow2k(5) * &x5;           // 5 + 5
        let x15  = &x10.pow2k(5) * &x5;          // 10 + 5
        let x25  = &x15.pow2k(10) * &x10;        // 15 + 10
        let x50  = &x25.pow2k(25) * &x25;        // 25 + 25
        let x75  = &x50.pow2k(25) * &x25;        // 50 + 25
        let x125 = &x75.pow2k(50) * &x50;        // 75 + 50
        let x250 = &x125.pow2k(125) * &x125;     // 125 + 125

        //                                          exponent bits
        let t = &x250.pow2k(2) * &x1;            // {250 ones} 01
        &t.pow2k(3) * &x2                        // {250 ones} 01011
    }

    /// Given a nonzero field element, compute its inverse.
    ///
    /// The inverse is computed as self^(p-2), since
    /// x^(p-2)x = x^(p-1) = 1 (mod p).
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument `FieldError` if `self` is zero.  The
    /// receiver is borrowed immutably, so nothing is modified.
    pub fn invert(&self) -> Result<FieldElement, FieldError> {
        if bool::from(self.is_zero()) {
            log::debug!("refusing to invert the zero field element");
            return Err(FieldError(InternalError::ZeroInversion));
        }
        Ok(self.pow_p_minus_2())
    }

    /// Given a slice of `FieldElement`s, replace each nonzero entry with
    /// its inverse.
    ///
    /// When an input `FieldElement` is zero, its value is unchanged.
    #[cfg(feature = "alloc")]
    pub fn batch_invert(inputs: &mut [FieldElement]) {
        // Montgomery’s Trick and Fast Implementation of Masked AES
        // Genelle, Prouff and Quisquater
        // Section 3.2

        let n = inputs.len();
        let mut scratch = alloc::vec![FieldElement::ONE; n];

        // Keep an accumulator of all of the previous products
        let mut acc = FieldElement::ONE;

        // Pass through the input vector, recording the previous
        // products in the scratch space
        for (input, scratch) in inputs.iter().zip(scratch.iter_mut()) {
            *scratch = acc;
            // acc <- acc * input, but skipping zeros (constant-time)
            acc.conditional_assign(&(&acc * input), !input.is_zero());
        }

        // acc is nonzero because we skipped zeros in inputs
        debug_assert!(!bool::from(acc.is_zero()));

        // Compute the inverse of all products
        acc = acc.pow_p_minus_2();

        // Pass through the vector backwards to compute the inverses
        // in place
        for (input, scratch) in inputs.iter_mut().rev().zip(scratch.into_iter().rev()) {
            let tmp = &acc * &*input;
            // input <- acc * scratch, then acc <- tmp
            // Again, we skip zeros in a constant-time way
            let nz = !input.is_zero();
            input.conditional_assign(&(&acc * &scratch), nz);
            acc.conditional_assign(&tmp, nz);
        }
    }
}

#[cfg(feature = "num-bigint")]
impl TryFrom<&BigUint> for FieldElement {
    type Error = FieldError;

    fn try_from(n: &BigUint) -> Result<FieldElement, FieldError> {
        FieldElement::from_biguint(n)
    }
}

#[cfg(feature = "num-bigint")]
impl From<&FieldElement> for BigUint {
    fn from(x: &FieldElement) -> BigUint {
        x.to_biguint()
    }
}

#[cfg(feature = "serde")]
impl Serialize for FieldElement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tup = serializer.serialize_tuple(32)?;
        for byte in self.to_bytes().iter() {
            tup.serialize_element(byte)?;
        }
        tup.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldElementVisitor;

        impl<'de> Visitor<'de> for FieldElementVisitor {
            type Value = FieldElement;

            fn expecting(&self, formatter: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                formatter.write_str(
                    "a sequence of 32 bytes whose little-endian interpretation is less than \
                     2^255 - 19",
                )
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<FieldElement, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = [0u8; 32];
                #[allow(clippy::needless_range_loop)]
                for i in 0..32 {
                    bytes[i] = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &"expected 32 bytes"))?;
                }
                Option::from(FieldElement::from_canonical_bytes(bytes))
                    .ok_or_else(|| serde::de::Error::custom("field element was not canonically encoded"))
            }
        }

        deserializer.deserialize_tuple(32, FieldElementVisitor)
    }
}

#[cfg(test)]
mod test {
    use crate::field::*;

    use subtle::ConditionallyNegatable;

    /// Random element a of GF(2^255-19), from Sage
    /// a = 1070314506888354081329385823235218444233221\
    ///     2228051251926706380353716438957572
    static A_BYTES: [u8; 32] = [
        0x04, 0xfe, 0xdf, 0x98, 0xa7, 0xfa, 0x0a, 0x68, 0x84, 0x92, 0xbd, 0x59, 0x08, 0x07, 0xa7,
        0x03, 0x9e, 0xd1, 0xf6, 0xf2, 0xe1, 0xd9, 0xe2, 0xa4, 0xa4, 0x51, 0x47, 0x36, 0xf3, 0xc3,
        0xa9, 0x17,
    ];

    /// Byte representation of a**2
    static ASQ_BYTES: [u8; 32] = [
        0x75, 0x97, 0x24, 0x9e, 0xe6, 0x06, 0xfe, 0xab, 0x24, 0x04, 0x56, 0x68, 0x07, 0x91, 0x2d,
        0x5d, 0x0b, 0x0f, 0x3f, 0x1c, 0xb2, 0x6e, 0xf2, 0xe2, 0x63, 0x9c, 0x12, 0xba, 0x73, 0x0b,
        0xe3, 0x62,
    ];

    /// Byte representation of 1/a
    static AINV_BYTES: [u8; 32] = [
        0x96, 0x1b, 0xcd, 0x8d, 0x4d, 0x5e, 0xa2, 0x3a, 0xe9, 0x36, 0x37, 0x93, 0xdb, 0x7b, 0x4d,
        0x70, 0xb8, 0x0d, 0xc0, 0x55, 0xd0, 0x4c, 0x1d, 0x7b, 0x90, 0x71, 0xd8, 0xe9, 0xb6, 0x18,
        0xe6, 0x30,
    ];

    #[test]
    fn a_mul_a_vs_a_squared_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let asq = FieldElement::from_bytes(&ASQ_BYTES);
        assert_eq!(asq, &a * &a);
    }

    #[test]
    fn a_square_vs_a_squared_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let asq = FieldElement::from_bytes(&ASQ_BYTES);
        assert_eq!(asq, a.square());
    }

    #[test]
    fn a_invert_vs_inverse_of_a_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let ainv = FieldElement::from_bytes(&AINV_BYTES);
        let should_be_inverse = a.invert().unwrap();
        assert_eq!(ainv, should_be_inverse);
        assert_eq!(FieldElement::ONE, &a * &should_be_inverse);
    }

    #[test]
    fn invert_zero_is_rejected() {
        let err = FieldElement::ZERO.invert().unwrap_err();
        assert_eq!(err, FieldError(InternalError::ZeroInversion));
        assert!(err.is_zero_inversion());
    }

    #[test]
    fn invert_two_is_half_of_p_plus_one() {
        let two = FieldElement::from(2u64);
        let inv = two.invert().unwrap();
        assert_eq!(inv, FieldElement::ONE.half());
        assert_eq!(&two * &inv, FieldElement::ONE);
    }

    #[test]
    fn small_values() {
        let two = FieldElement::from(2u64);
        let three = FieldElement::from(3u64);
        assert_eq!(&two * &three, FieldElement::from(6u64));
        assert_eq!(&FieldElement::ZERO - &FieldElement::ONE, FieldElement::MINUS_ONE);
    }

    #[test]
    fn pow2k_matches_repeated_squaring() {
        let a = FieldElement::from_bytes(&A_BYTES);
        for k in [1u32, 2, 5, 10, 25] {
            let mut expected = a;
            for _ in 0..k {
                expected = expected.square();
            }
            assert_eq!(a.pow2k(k), expected);
        }
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn batch_invert_a_matches_nonbatched() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let asq = FieldElement::from_bytes(&ASQ_BYTES);
        let ainv = FieldElement::from_bytes(&AINV_BYTES);
        let a0 = &a - &a;
        let a2 = &a + &a;
        let a_list = vec![a, asq, ainv, a0, a2];
        let mut ainv_list = a_list.clone();
        FieldElement::batch_invert(&mut ainv_list[..]);
        for (x, xinv) in a_list.iter().zip(ainv_list.iter()) {
            match x.invert() {
                Ok(expected) => assert_eq!(expected, *xinv),
                Err(_) => assert_eq!(*xinv, FieldElement::ZERO),
            }
        }
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn batch_invert_empty() {
        FieldElement::batch_invert(&mut []);
    }

    #[test]
    fn equality() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let ainv = FieldElement::from_bytes(&AINV_BYTES);
        assert!(a == a);
        assert!(a != ainv);
    }

    /// Notice that the last element has the high bit set, which
    /// should be ignored
    static B_BYTES: [u8; 32] = [
        113, 191, 169, 143, 91, 234, 121, 15, 241, 131, 217, 36, 230, 101, 92, 234, 8, 208, 170,
        251, 97, 127, 70, 210, 58, 23, 166, 87, 240, 169, 184, 178,
    ];

    #[test]
    fn from_bytes_highbit_is_ignored() {
        let mut cleared_bytes = B_BYTES;
        cleared_bytes[31] &= 127u8;
        let with_highbit_set = FieldElement::from_bytes(&B_BYTES);
        let without_highbit_set = FieldElement::from_bytes(&cleared_bytes);
        assert_eq!(without_highbit_set, with_highbit_set);
    }

    #[test]
    fn from_canonical_bytes_rejects_p_and_highbit() {
        let p_bytes = FieldElement::MINUS_ONE.add_one().to_bytes();
        assert_eq!(p_bytes, [0u8; 32]);

        let mut p_bytes = [0xffu8; 32];
        p_bytes[0] = 0xed;
        p_bytes[31] = 0x7f;
        assert!(bool::from(FieldElement::from_canonical_bytes(p_bytes).is_none()));

        p_bytes[0] = 0xec;
        let minus_one = FieldElement::from_canonical_bytes(p_bytes).unwrap();
        assert_eq!(minus_one, FieldElement::MINUS_ONE);

        assert!(bool::from(FieldElement::from_canonical_bytes(B_BYTES).is_none()));
    }

    #[test]
    fn conditional_negate() {
        let one = FieldElement::ONE;
        let minus_one = FieldElement::MINUS_ONE;
        let mut x = one;
        x.conditional_negate(Choice::from(1));
        assert_eq!(x, minus_one);
        x.conditional_negate(Choice::from(0));
        assert_eq!(x, minus_one);
        x.conditional_negate(Choice::from(1));
        assert_eq!(x, one);
    }

    #[test]
    fn encoding_is_canonical() {
        // Encode 1 wrongly as 1 + (2^255 - 19) = 2^255 - 18
        let one_encoded_wrongly_bytes: [u8; 32] = [
            0xee, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0x7f,
        ];
        // Decode to a field element
        let one = FieldElement::from_bytes(&one_encoded_wrongly_bytes);
        // .. then check that the encoding is correct
        let one_bytes = one.to_bytes();
        assert_eq!(one_bytes[0], 1);
        for byte in &one_bytes[1..] {
            assert_eq!(*byte, 0);
        }
    }

    #[test]
    #[cfg(feature = "num-bigint")]
    fn from_biguint_reduces_up_to_256_bits() {
        let max = (BigUint::from(1u32) << 256usize) - 1u32;
        let p = (BigUint::from(1u32) << 255usize) - 19u32;
        let x = FieldElement::from_biguint(&max).unwrap();
        assert_eq!(x.to_biguint(), &max % &p);

        let x = FieldElement::try_from(&p).unwrap();
        assert_eq!(x, FieldElement::ZERO);

        let too_wide = BigUint::from(1u32) << 256usize;
        let err = FieldElement::from_biguint(&too_wide).unwrap_err();
        assert_eq!(err, FieldError(InternalError::IntegerTooLarge { bits: 257 }));
        assert!(!err.is_zero_inversion());
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serde_bincode_roundtrip() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let encoded = bincode::serialize(&a).unwrap();
        assert_eq!(encoded.len(), 32);
        assert_eq!(&encoded[..], &A_BYTES[..]);
        let decoded: FieldElement = bincode::deserialize(&encoded).unwrap();
        assert_eq!(a, decoded);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serde_rejects_non_canonical() {
        let result: Result<FieldElement, _> = bincode::deserialize(&B_BYTES);
        assert!(result.is_err());
    }
}
