// -*- mode: rust; -*-
//
// This file is part of curve25519-field.
// See LICENSE for licensing information.

//! The `u32` backend uses eight saturated `u32` limbs and `u64`
//! accumulators.

pub(crate) mod nat;

pub mod field;

pub(crate) mod constants;
