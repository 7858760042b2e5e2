//! # Errors
//!
//! Every failure in the core is returned as a value. Parsing produces a [`ParseError`]
//! that points at the offending part of the input; operations on already-built ranges
//! produce an [`AddressError`].

use std::fmt;

use thiserror::Error;

use crate::network::format::Family;

/// The category of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad character, wrong segment count, bad radix mix, value too large.
    MalformedSyntax,
    /// A range was written with its lower bound above its upper bound.
    RangeOrderInverted,
    /// Prefix length outside `[0, bit count]`.
    PrefixOutOfBounds,
    /// The value needs a shape (non-contiguous range, ranged byte) the result cannot hold.
    IncompatibleAddress,
    /// Empty zone or zone with reserved characters.
    ZoneMalformed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MalformedSyntax => "malformed syntax",
            Self::RangeOrderInverted => "inverted range",
            Self::PrefixOutOfBounds => "prefix length out of bounds",
            Self::IncompatibleAddress => "incompatible address",
            Self::ZoneMalformed => "malformed zone",
        };
        f.write_str(s)
    }
}

/// A structured parse failure.
///
/// `position` is the byte offset of `substring` inside `input`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {reason} ('{substring}' at {position} in '{input}')")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub input: String,
    pub substring: String,
    pub position: usize,
    pub reason: &'static str,
}

impl ParseError {
    pub fn new(
        kind: ErrorKind,
        input: &str,
        substring: &str,
        position: usize,
        reason: &'static str,
    ) -> Self {
        Self {
            kind,
            input: input.to_string(),
            substring: substring.to_string(),
            position,
            reason,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Failures of operations on constructed ranges (masking, conversion, formatting).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("incompatible address: {0}")]
    Incompatible(&'static str),
    #[error("mismatched address families: {0} and {1}")]
    FamilyMismatch(Family, Family),
    #[error("prefix length {prefix} exceeds {bits} bits")]
    PrefixOutOfBounds { prefix: u8, bits: u8 },
    #[error("{0} bytes do not form an address")]
    InvalidByteLength(usize),
}

impl AddressError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Incompatible(_) | Self::FamilyMismatch(..) => ErrorKind::IncompatibleAddress,
            Self::PrefixOutOfBounds { .. } => ErrorKind::PrefixOutOfBounds,
            Self::InvalidByteLength(_) => ErrorKind::MalformedSyntax,
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
