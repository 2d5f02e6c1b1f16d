// -*- mode: rust; -*-
//
// This file is part of curve25519-field.
// See LICENSE for licensing information.

//! Errors which may occur when inverting or constructing field elements.
//!
//! Both are invalid-argument conditions raised at the boundary of a
//! single call; nothing is retried or recovered internally.

use core::fmt;
use core::fmt::Display;

/// Internal errors.  Most application-level developers will likely not
/// need to pay any attention to these.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) enum InternalError {
    /// Zero has no multiplicative inverse.
    ZeroInversion,
    /// An integer handed to a constructor does not fit in 256 bits.
    #[cfg(feature = "num-bigint")]
    IntegerTooLarge {
        bits: u64,
    },
}

impl Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InternalError::ZeroInversion
                => write!(f, "Cannot invert the zero field element"),
            #[cfg(feature = "num-bigint")]
            InternalError::IntegerTooLarge { bits }
                => write!(f, "Integer of {} bits does not fit in 256 bits", bits),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InternalError {}

/// Errors which may occur while operating on field elements.
///
/// This error may arise due to:
///
/// * Asking for the inverse of zero.
///
/// * Converting an arbitrary-precision integer wider than 256 bits into a
///   field element, with the `num-bigint` feature.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct FieldError(pub(crate) InternalError);

impl FieldError {
    /// Whether this error was caused by inverting zero.
    pub fn is_zero_inversion(&self) -> bool {
        self.0 == InternalError::ZeroInversion
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}
