//! # Conversions
//!
//! Bytes, integers, `std::net` addresses and the `pnet` network types.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use pnet::ipnetwork::IpNetwork;
use pnet::util::MacAddr;

use crate::error::AddressError;
use crate::network::format::Family;
use crate::network::range::AddressRange;

impl AddressRange {
    /// Big-endian bytes of a single address: 4, 16 or 6 of them.
    pub fn to_bytes(&self) -> Result<Vec<u8>, AddressError> {
        let value = self.to_value()?;
        Ok(value_bytes(self.family(), value))
    }

    /// Bytes of the lowest address, for ranges as well as single addresses.
    pub fn lower_bytes(&self) -> Vec<u8> {
        value_bytes(self.family(), self.lower_value())
    }

    pub fn upper_bytes(&self) -> Vec<u8> {
        value_bytes(self.family(), self.upper_value())
    }

    /// The family follows from the length: 4 is IPv4, 16 is IPv6, 6 is MAC.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        let family = match bytes.len() {
            4 => Family::Ipv4,
            16 => Family::Ipv6,
            6 => Family::Mac,
            n => return Err(AddressError::InvalidByteLength(n)),
        };
        let value = bytes.iter().fold(0u128, |acc, b| (acc << 8) | *b as u128);
        Ok(Self::from_value(family, value))
    }

    /// Numeric value of a single address.
    pub fn to_value(&self) -> Result<u128, AddressError> {
        if self.is_multiple() {
            return Err(AddressError::Incompatible("a range has no single value"));
        }
        Ok(self.lower_value())
    }
}

fn value_bytes(family: Family, value: u128) -> Vec<u8> {
    let len = family.byte_count();
    value.to_be_bytes()[16 - len..].to_vec()
}

impl From<Ipv4Addr> for AddressRange {
    fn from(addr: Ipv4Addr) -> Self {
        let [a, b, c, d] = addr.octets();
        Self::ipv4(a, b, c, d)
    }
}

impl From<Ipv6Addr> for AddressRange {
    fn from(addr: Ipv6Addr) -> Self {
        Self::from_value(Family::Ipv6, u128::from(addr))
    }
}

impl From<IpAddr> for AddressRange {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => v4.into(),
            IpAddr::V6(v6) => v6.into(),
        }
    }
}

impl From<MacAddr> for AddressRange {
    fn from(mac: MacAddr) -> Self {
        let bytes = [mac.0, mac.1, mac.2, mac.3, mac.4, mac.5];
        let value = bytes.iter().fold(0u128, |acc, b| (acc << 8) | *b as u128);
        Self::from_value(Family::Mac, value)
    }
}

/// The whole block of the network, with its prefix length attached.
impl From<IpNetwork> for AddressRange {
    fn from(network: IpNetwork) -> Self {
        let range = AddressRange::from(network.ip());
        // the prefix is bounded by the family width
        range
            .to_prefix_block(network.prefix())
            .unwrap_or_else(|_| AddressRange::from(network.ip()))
    }
}

impl TryFrom<&AddressRange> for Ipv4Addr {
    type Error = AddressError;

    fn try_from(range: &AddressRange) -> Result<Self, Self::Error> {
        if range.family() != Family::Ipv4 {
            return Err(AddressError::FamilyMismatch(range.family(), Family::Ipv4));
        }
        Ok(Ipv4Addr::from(range.to_value()? as u32))
    }
}

impl TryFrom<&AddressRange> for Ipv6Addr {
    type Error = AddressError;

    fn try_from(range: &AddressRange) -> Result<Self, Self::Error> {
        if range.family() != Family::Ipv6 {
            return Err(AddressError::FamilyMismatch(range.family(), Family::Ipv6));
        }
        Ok(Ipv6Addr::from(range.to_value()?))
    }
}

impl TryFrom<&AddressRange> for IpAddr {
    type Error = AddressError;

    fn try_from(range: &AddressRange) -> Result<Self, Self::Error> {
        match range.family() {
            Family::Ipv4 => Ipv4Addr::try_from(range).map(IpAddr::V4),
            Family::Ipv6 => Ipv6Addr::try_from(range).map(IpAddr::V6),
            Family::Mac => Err(AddressError::Incompatible("MAC addresses are not IP addresses")),
        }
    }
}

impl TryFrom<&AddressRange> for MacAddr {
    type Error = AddressError;

    fn try_from(range: &AddressRange) -> Result<Self, Self::Error> {
        if range.family() != Family::Mac {
            return Err(AddressError::FamilyMismatch(range.family(), Family::Mac));
        }
        let b = range.to_bytes()?;
        Ok(MacAddr::new(b[0], b[1], b[2], b[3], b[4], b[5]))
    }
}

/// Ranges that are exactly one CIDR block.
impl TryFrom<&AddressRange> for IpNetwork {
    type Error = AddressError;

    fn try_from(range: &AddressRange) -> Result<Self, Self::Error> {
        let prefix = range
            .single_block_prefix()
            .ok_or(AddressError::Incompatible("range is not a single CIDR block"))?;
        let ip = IpAddr::try_from(&range.lower())?;
        IpNetwork::new(ip, prefix).map_err(|_| AddressError::PrefixOutOfBounds {
            prefix,
            bits: range.family().bit_count() as u8,
        })
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
