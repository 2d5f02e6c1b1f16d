// -*- mode: rust; -*-
//
// This file is part of curve25519-field.
// See LICENSE for licensing information.

//! Various constants, such as the little-endian encoding of the modulus.

use crate::field::FieldElement;

/// The modulus \\(p = 2\^{255} - 19\\) in little-endian bytes.  This is
/// the smallest 32-byte string rejected by
/// `FieldElement::from_canonical_bytes` with bit 255 clear.
pub const MODULUS_BYTES: [u8; 32] = [
    0xed, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f,
];

/// The inverse of two, \\((p + 1) / 2\\).
pub const HALF: FieldElement = FieldElement::from_limbs([
    0xFFFF_FFF7, 0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF,
    0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF, 0x3FFF_FFFF,
]);
