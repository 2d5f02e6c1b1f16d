// -*- mode: rust; -*-
//
// This file is part of curve25519-field.
// See LICENSE for licensing information.

//! Limb-level constants for the 32-bit backend.

/// \\(p = 2\^{255} - 19\\), as eight little-endian `u32` limbs.
pub(crate) const P: [u32; 8] = [
    0xFFFF_FFED, 0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF,
    0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF, 0x7FFF_FFFF,
];

/// The top limb of \\(p\\), which doubles as the mask clearing bit 255.
pub(crate) const P7: u32 = 0x7FFF_FFFF;

/// \\(p\^2 = 2\^{510} - 19 \cdot 2\^{256} + 361\\), the bound under which
/// wide values are kept by the wide add, subtract and accumulate.
pub(crate) const P_EXT: [u32; 16] = [
    0x0000_0169, 0x0000_0000, 0x0000_0000, 0x0000_0000,
    0x0000_0000, 0x0000_0000, 0x0000_0000, 0x0000_0000,
    0xFFFF_FFED, 0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF,
    0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF, 0x3FFF_FFFF,
];

/// \\(2\^{255} \equiv 19 \pmod p\\).
pub(crate) const P_INV: u32 = 19;
