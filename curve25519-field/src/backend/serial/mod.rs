// -*- mode: rust; -*-
//
// This file is part of curve25519-field.
// See LICENSE for licensing information.

//! Serial implementations of field arithmetic.

pub mod u32;
