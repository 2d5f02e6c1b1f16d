// -*- mode: rust; -*-
//
// This file is part of curve25519-field.
// See LICENSE for licensing information.

//! Arithmetic backends.
//!
//! Only the portable serial backend over saturated `u32` limbs exists.
//! It needs nothing from the target beyond a 32 x 32 -> 64-bit multiply.

pub mod serial;
