//! # Network Layer
//!
//! * **[`segment`]**, **[`format`]**: building blocks shared by every family.
//! * **[`range`]**: the address range model.
//! * **[`parse`]**, **[`strings`]**, **[`address_string`]**: text in and out.
//! * **[`mask`]**: masking arithmetic over value ranges.
//! * **[`order`]**: total ordering of ranges and address strings.
//! * **[`host`]**: host names, ports and services around an address.
//! * **[`convert`]**: bytes, integers, `std::net` and `pnet` types.

pub mod address_string;
pub mod convert;
pub mod format;
pub mod host;
pub mod mask;
pub mod order;
pub mod parse;
pub mod range;
pub mod segment;
pub mod strings;

pub use address_string::AddressString;
pub use format::Family;
pub use parse::{ParseOutcome, ParsedAddress, parse, parse_address};
pub use range::{AddressCount, AddressRange};
pub use segment::SegmentValue;
