// -*- mode: rust; -*-
//
// This file is part of curve25519-field.
// See LICENSE for licensing information.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_docs)]
#![doc(html_root_url = "https://docs.rs/curve25519-field/0.1.0")]

//! Constant-time arithmetic in the prime field \\(\mathbb F\_p\\),
//! \\(p = 2\^{255} - 19\\), on eight saturated 32-bit limbs.
//!
//! Elements are always held in canonical form.  Products are formed in
//! an unreduced 512-bit [`field::WideFieldElement`] and folded back with
//! \\(2\^{255} \equiv 19 \pmod p\\).
//!
//! ```
//! use curve25519_field::FieldElement;
//!
//! let two = FieldElement::from(2u64);
//! let three = FieldElement::from(3u64);
//! assert_eq!(&two * &three, FieldElement::from(6u64));
//!
//! let half = two.invert().unwrap();
//! assert_eq!(half, FieldElement::ONE.half());
//!
//! assert!(FieldElement::ZERO.invert().is_err());
//! assert_eq!(FieldElement::ZERO - FieldElement::ONE, FieldElement::MINUS_ONE);
//! ```

//------------------------------------------------------------------------
// External dependencies:
//------------------------------------------------------------------------

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

// Internal macros. Must come first!
#[macro_use]
pub(crate) mod macros;

//------------------------------------------------------------------------
// curve25519-field public modules
//------------------------------------------------------------------------

// Finite field arithmetic mod p = 2^255 - 19
pub mod field;

// Useful constants, like the modulus and 1/2
pub mod constants;

// Low-level wide arithmetic
pub mod hazmat;

//------------------------------------------------------------------------
// curve25519-field internal modules
//------------------------------------------------------------------------

// Arithmetic backends live here
pub(crate) mod backend;

// Error types
mod errors;

pub use crate::errors::FieldError;
pub use crate::field::FieldElement;
