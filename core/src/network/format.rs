//! # Format Registry
//!
//! Lookup tables shared by the parser and the string producers: per-family segment
//! layout, digit alphabets, and the reserved separator characters.

use std::fmt;

/// Address family tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    Ipv4,
    Ipv6,
    Mac,
}

impl Family {
    pub const fn segment_count(self) -> usize {
        match self {
            Self::Ipv4 => 4,
            Self::Ipv6 => 8,
            Self::Mac => 6,
        }
    }

    pub const fn segment_bits(self) -> u32 {
        match self {
            Self::Ipv4 | Self::Mac => 8,
            Self::Ipv6 => 16,
        }
    }

    pub const fn bit_count(self) -> u32 {
        self.segment_bits() * self.segment_count() as u32
    }

    pub const fn byte_count(self) -> usize {
        (self.bit_count() / 8) as usize
    }

    pub const fn max_segment_value(self) -> u16 {
        match self {
            Self::Ipv4 | Self::Mac => 0xff,
            Self::Ipv6 => 0xffff,
        }
    }

    /// Largest whole-address value.
    pub const fn max_value(self) -> u128 {
        match self {
            Self::Ipv4 => u32::MAX as u128,
            Self::Ipv6 => u128::MAX,
            Self::Mac => (1u128 << 48) - 1,
        }
    }

    pub const fn default_radix(self) -> Radix {
        match self {
            Self::Ipv4 => Radix::Decimal,
            Self::Ipv6 | Self::Mac => Radix::Hex,
        }
    }

    pub const fn separator(self) -> char {
        match self {
            Self::Ipv4 => IPV4_SEPARATOR,
            Self::Ipv6 | Self::Mac => IPV6_SEPARATOR,
        }
    }

    pub fn is_ip(self) -> bool {
        !matches!(self, Self::Mac)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ipv4 => "IPv4",
            Self::Ipv6 => "IPv6",
            Self::Mac => "MAC",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radix {
    Octal,
    Decimal,
    Hex,
    Base85,
}

impl Radix {
    pub const fn base(self) -> u32 {
        match self {
            Self::Octal => 8,
            Self::Decimal => 10,
            Self::Hex => 16,
            Self::Base85 => 85,
        }
    }

    /// Value of `c` in this radix.
    pub fn digit(self, c: char) -> Option<u32> {
        match self {
            Self::Base85 => base85_digit(c),
            _ => c.to_digit(self.base()),
        }
    }
}

pub const IPV4_SEPARATOR: char = '.';
pub const IPV6_SEPARATOR: char = ':';
pub const MAC_DASH_SEPARATOR: char = '-';
pub const MAC_DOTTED_SEPARATOR: char = '.';
pub const WILDCARD: char = '*';
pub const RANGE_SEPARATOR: char = '-';
/// Range separator where `-` is already the segment separator (dashed MAC).
pub const ALT_RANGE_SEPARATOR: char = '|';
pub const ZONE_SEPARATOR: char = '%';
pub const PREFIX_SEPARATOR: char = '/';
/// Zone separator inside base-85 strings, whose alphabet contains `%`.
pub const BASE85_ZONE_SEPARATOR: char = '§';
/// Range separator inside base-85 and `ipv6-literal.net` strings.
pub const EXTENDED_RANGE_SEPARATOR: char = '»';
/// Percent-encoded zone separator used in URIs and bracketed hosts.
pub const ENCODED_ZONE_SEPARATOR: &str = "%25";

pub const HEX_PREFIX: &str = "0x";
pub const OCTAL_PREFIX: char = '0';

pub const IPV4_REVERSE_DNS_SUFFIX: &str = ".in-addr.arpa";
pub const IPV6_REVERSE_DNS_SUFFIX: &str = ".ip6.arpa";
pub const IPV6_LITERAL_NET_SUFFIX: &str = ".ipv6-literal.net";
pub const IPV6_LITERAL_NET_SEPARATOR: char = '-';
pub const IPV6_LITERAL_NET_ZONE_SEPARATOR: char = 's';

/// Number of base-85 digits in a 128-bit value.
pub const BASE85_LEN: usize = 20;

/// RFC 1924 alphabet.
pub const BASE85_ALPHABET: &[u8; 85] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!#$%&()*+-;<=>?@^_`{|}~";

pub fn base85_digit(c: char) -> Option<u32> {
    if !c.is_ascii() {
        return None;
    }
    BASE85_ALPHABET
        .iter()
        .position(|&b| b == c as u8)
        .map(|p| p as u32)
}

pub fn base85_char(digit: u32) -> char {
    BASE85_ALPHABET[digit as usize % 85] as char
}

/// Characters never allowed in a zone.
pub fn is_reserved_zone_char(c: char) -> bool {
    matches!(c, ZONE_SEPARATOR | PREFIX_SEPARATOR | '[' | ']') || c.is_whitespace()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
