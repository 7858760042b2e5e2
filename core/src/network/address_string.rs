//! # Address String
//!
//! The original text of an address together with its parse outcome. Invalid inputs keep their
//! text and error, so a list of user inputs can be sorted and reported as a whole.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::config::ParseOptions;
use crate::error::{ErrorKind, ParseError};
use crate::network::order::{AddressComparator, Bucket};
use crate::network::parse::{ParsedAddress, parse_address};
use crate::network::range::AddressRange;

#[derive(Debug, Clone)]
pub struct AddressString {
    text: String,
    result: Result<ParsedAddress, ParseError>,
}

impl AddressString {
    pub fn new(text: &str, options: &ParseOptions) -> Self {
        Self {
            text: text.to_string(),
            result: parse_address(text, options),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parsed(&self) -> Result<&ParsedAddress, &ParseError> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.result.as_ref().err()
    }

    pub fn address(&self) -> Option<&AddressRange> {
        self.result.as_ref().ok().and_then(ParsedAddress::address)
    }

    pub fn prefix_only(&self) -> Option<u8> {
        match self.result {
            Ok(ParsedAddress::PrefixOnly(prefix)) => Some(prefix),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.result, Ok(ParsedAddress::Empty))
    }

    pub fn is_all(&self) -> bool {
        matches!(self.result, Ok(ParsedAddress::All))
    }

    pub fn bucket(&self) -> Bucket {
        match &self.result {
            Err(_) => Bucket::Invalid,
            Ok(ParsedAddress::Empty) => Bucket::Empty,
            Ok(ParsedAddress::All) => Bucket::All,
            Ok(ParsedAddress::PrefixOnly(_)) => Bucket::PrefixOnly,
            Ok(ParsedAddress::Address(range)) => Bucket::from(range.family()),
        }
    }

    /// The address range, failing for invalid text and for inputs that hold no address.
    pub fn to_address(&self) -> Result<AddressRange, ParseError> {
        match &self.result {
            Err(err) => Err(err.clone()),
            Ok(ParsedAddress::Address(range)) => Ok(range.clone()),
            Ok(_) => Err(ParseError::new(
                ErrorKind::IncompatibleAddress,
                &self.text,
                &self.text,
                0,
                "input holds no address",
            )),
        }
    }
}

impl FromStr for AddressString {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s, &ParseOptions::default()))
    }
}

impl fmt::Display for AddressString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq for AddressString {
    /// Equal addresses, equal prefix-only lengths, or (for invalid and empty) equal text.
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AddressString {}

impl Hash for AddressString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bucket().hash(state);
        match &self.result {
            Ok(ParsedAddress::Address(range)) => range.hash(state),
            Ok(ParsedAddress::PrefixOnly(prefix)) => prefix.hash(state),
            Ok(ParsedAddress::All) => {}
            Ok(ParsedAddress::Empty) | Err(_) => self.text.hash(state),
        }
    }
}

impl PartialOrd for AddressString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AddressString {
    fn cmp(&self, other: &Self) -> Ordering {
        AddressComparator::default().compare_strings(self, other)
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
