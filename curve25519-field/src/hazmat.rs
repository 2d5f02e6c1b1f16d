// -*- mode: rust; -*-
//
// This file is part of curve25519-field.
// See LICENSE for licensing information.

//! Hazardous materials with no semver guarantees.
//!
//! A [`WideFieldElement`] holds an unreduced 512-bit intermediate.  It
//! lets a caller accumulate several products, for instance the terms of
//! a dot product, and pay for a single reduction at the end:
//!
//! ```
//! use curve25519_field::FieldElement;
//! use curve25519_field::hazmat::WideFieldElement;
//!
//! let a = [FieldElement::from(3u64), FieldElement::from(5u64)];
//! let b = [FieldElement::from(7u64), FieldElement::MINUS_ONE];
//!
//! let mut acc = WideFieldElement::ZERO;
//! for (x, y) in a.iter().zip(b.iter()) {
//!     acc.mul_add(x, y);
//! }
//! assert_eq!(acc.reduce(), FieldElement::from(16u64));
//! ```
//!
//! Nothing here checks its preconditions: the accumulator must stay below
//! \\(p\^2\\) for `mul_add`, `+` and `-`, which holds when every input was
//! produced by these operations.

pub use crate::field::WideFieldElement;
