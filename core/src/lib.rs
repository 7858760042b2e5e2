//! # Rangr Core
//!
//! Parsing, formatting, masking and ordering of IPv4, IPv6 and MAC address ranges.
//!
//! ## Layout
//! * **[`network`]**: the address model and every operation on it.
//!     * [`network::range`] holds [`network::range::AddressRange`], the central value type.
//!     * [`network::parse`] and [`network::strings`] move between text and ranges.
//! * **[`config`]**: parser options and the subnet policy.
//! * **[`error`]**: parse and address errors.
//!
//! The crate does no IO. The only side effect is `tracing` output from host resolution.

pub mod config;
pub mod error;
pub mod network;
