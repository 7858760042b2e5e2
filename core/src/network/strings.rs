//! # String Producers
//!
//! Every output form is a pure function of the [`AddressRange`]. Forms that cannot express
//! every range (joined-value forms, nibble and byte forms) return an [`AddressError`] for
//! ranges they cannot hold.

use std::fmt::Write;

use crate::error::AddressError;
use crate::network::format::{
    self, Family, Radix, EXTENDED_RANGE_SEPARATOR, HEX_PREFIX, IPV4_REVERSE_DNS_SUFFIX,
    IPV6_LITERAL_NET_SEPARATOR, IPV6_LITERAL_NET_SUFFIX, IPV6_LITERAL_NET_ZONE_SEPARATOR,
    IPV6_REVERSE_DNS_SUFFIX, MAC_DASH_SEPARATOR, WILDCARD,
};
use crate::network::range::{self, AddressRange};
use crate::network::segment::{self, SegmentValue};

#[derive(Clone, Copy)]
struct SegmentStyle {
    radix: Radix,
    /// Zero-pad every value to this many digits.
    pad: usize,
    /// Write a full-range segment as `*`.
    wildcard: bool,
    range_separator: char,
}

impl SegmentStyle {
    fn plain(family: Family) -> Self {
        Self {
            radix: family.default_radix(),
            pad: if family == Family::Mac { 2 } else { 0 },
            wildcard: true,
            range_separator: '-',
        }
    }

    fn full(family: Family) -> Self {
        Self {
            radix: family.default_radix(),
            pad: match family {
                Family::Ipv4 => 3,
                Family::Ipv6 => 4,
                Family::Mac => 2,
            },
            wildcard: false,
            range_separator: '-',
        }
    }

    fn write_value(&self, out: &mut String, value: u16) {
        // writing to a String cannot fail
        let _ = match self.radix {
            Radix::Hex => write!(out, "{:0width$x}", value, width = self.pad),
            Radix::Octal => write!(out, "{:0width$o}", value, width = self.pad),
            _ => write!(out, "{:0width$}", value, width = self.pad),
        };
    }

    fn write(&self, out: &mut String, seg: &SegmentValue, bits: u32) {
        if self.wildcard && seg.is_full(bits) {
            out.push(WILDCARD);
        } else if seg.is_multiple() {
            self.write_value(out, seg.lower());
            out.push(self.range_separator);
            self.write_value(out, seg.upper());
        } else {
            self.write_value(out, seg.lower());
        }
    }
}

fn join_segments(range: &AddressRange, style: SegmentStyle, separator: char) -> String {
    let bits = range.family().segment_bits();
    let mut out = String::new();
    for (i, seg) in range.segments().iter().enumerate() {
        if i > 0 {
            out.push(separator);
        }
        style.write(&mut out, seg, bits);
    }
    out
}

/// Longest run of single zero segments at least `min_len` long, leftmost on ties.
fn zero_run(segments: &[SegmentValue], min_len: usize) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut i = 0;
    while i < segments.len() {
        if segments[i] == SegmentValue::single(0) {
            let start = i;
            while i < segments.len() && segments[i] == SegmentValue::single(0) {
                i += 1;
            }
            let len = i - start;
            if len >= min_len && best.is_none_or(|(_, l)| len > l) {
                best = Some((start, len));
            }
        } else {
            i += 1;
        }
    }
    best
}

fn write_compressed(out: &mut String, segments: &[SegmentValue], style: SegmentStyle, min_run: usize) {
    let write_list = |out: &mut String, segs: &[SegmentValue]| {
        for (i, seg) in segs.iter().enumerate() {
            if i > 0 {
                out.push(':');
            }
            style.write(out, seg, 16);
        }
    };
    match zero_run(segments, min_run) {
        Some((start, len)) => {
            write_list(out, &segments[..start]);
            out.push_str("::");
            write_list(out, &segments[start + len..]);
        }
        None => write_list(out, segments),
    }
}

impl AddressRange {
    fn push_zone_and_prefix(&self, out: &mut String) {
        if let Some(zone) = self.zone() {
            out.push(format::ZONE_SEPARATOR);
            out.push_str(zone);
        }
        if let Some(prefix) = self.prefix_length() {
            let _ = write!(out, "/{prefix}");
        }
    }

    fn ipv6_body(&self, min_run: usize) -> String {
        let mut out = String::new();
        write_compressed(&mut out, self.segments(), SegmentStyle::plain(Family::Ipv6), min_run);
        out
    }

    /// Wildcard form without prefix length: `1.2.*.*`, `1::*`, `0a:0b:*:*:*:*`.
    pub fn to_subnet_string(&self) -> String {
        let mut out = match self.family() {
            Family::Ipv6 => self.ipv6_body(2),
            family => join_segments(self, SegmentStyle::plain(family), family.separator()),
        };
        if let Some(zone) = self.zone() {
            out.push(format::ZONE_SEPARATOR);
            out.push_str(zone);
        }
        out
    }

    /// RFC 5952 style for IPv6, dotted decimal for IPv4, dashed bytes for MAC. A prefix length,
    /// when present, follows the segments, so the string reparses to an equal range under the
    /// subnet policy that produced it.
    pub fn to_canonical_string(&self) -> String {
        let mut out = match self.family() {
            Family::Ipv6 => self.ipv6_body(2),
            Family::Mac => self.mac_dashed(),
            Family::Ipv4 => join_segments(self, SegmentStyle::plain(Family::Ipv4), '.'),
        };
        self.push_zone_and_prefix(&mut out);
        out
    }

    fn mac_dashed(&self) -> String {
        let style = SegmentStyle {
            range_separator: format::ALT_RANGE_SEPARATOR,
            ..SegmentStyle::plain(Family::Mac)
        };
        join_segments(self, style, MAC_DASH_SEPARATOR)
    }

    /// No compression, no leading zeros: `1:0:0:0:0:0:0:1`. MAC uses colons.
    pub fn to_normalized_string(&self) -> String {
        let family = self.family();
        let mut out = join_segments(self, SegmentStyle::plain(family), family.separator());
        self.push_zone_and_prefix(&mut out);
        out
    }

    /// Compresses the longest zero run even when it is a single segment.
    pub fn to_compressed_string(&self) -> String {
        if self.family() != Family::Ipv6 {
            return self.to_canonical_string();
        }
        let mut out = self.ipv6_body(1);
        self.push_zone_and_prefix(&mut out);
        out
    }

    /// Every segment zero-padded, ranges written out in full.
    ///
    /// Padded IPv4 segments read back as decimal. Under `inet_aton_octal` they read as octal,
    /// so `010.020.030.040` becomes `8.16.24.32`.
    pub fn to_full_string(&self) -> String {
        let family = self.family();
        let mut out = join_segments(self, SegmentStyle::full(family), family.separator());
        self.push_zone_and_prefix(&mut out);
        out
    }

    /// `network/prefix` when the range is a single CIDR block, otherwise canonical.
    pub fn to_cidr_string(&self) -> String {
        match self.single_block_prefix() {
            Some(prefix) if self.is_multiple() || self.prefix_length() == Some(prefix) => {
                let mut out = self.lower().without_prefix_length().to_canonical_string();
                let _ = write!(out, "/{prefix}");
                out
            }
            _ => self.to_canonical_string(),
        }
    }

    /// IPv6 with the last 32 bits written as dotted IPv4: `::ffff:1.2.3.4`.
    pub fn to_mixed_string(&self) -> Result<String, AddressError> {
        if self.family() != Family::Ipv6 {
            return Err(AddressError::FamilyMismatch(self.family(), Family::Ipv6));
        }
        let segments = self.segments();
        let (a, b) = range::split_pair(segments[6])?;
        let (c, d) = range::split_pair(segments[7])?;

        let mut out = String::new();
        let style = SegmentStyle::plain(Family::Ipv6);
        match zero_run(&segments[..6], 2) {
            Some((start, len)) => {
                for (i, seg) in segments[..start].iter().enumerate() {
                    if i > 0 {
                        out.push(':');
                    }
                    style.write(&mut out, seg, 16);
                }
                out.push_str("::");
                for seg in &segments[start + len..6] {
                    style.write(&mut out, seg, 16);
                    out.push(':');
                }
            }
            None => {
                for seg in &segments[..6] {
                    style.write(&mut out, seg, 16);
                    out.push(':');
                }
            }
        }
        let v4_style = SegmentStyle::plain(Family::Ipv4);
        for (i, seg) in [a, b, c, d].iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            v4_style.write(&mut out, seg, 8);
        }
        self.push_zone_and_prefix(&mut out);
        Ok(out)
    }

    /// `4.3.2.1.in-addr.arpa` or the 32-nibble `ip6.arpa` form.
    pub fn to_reverse_dns_string(&self) -> Result<String, AddressError> {
        match self.family() {
            Family::Ipv4 => {
                let style = SegmentStyle::plain(Family::Ipv4);
                let mut out = String::new();
                for seg in self.segments().iter().rev() {
                    style.write(&mut out, seg, 8);
                    out.push('.');
                }
                out.pop();
                out.push_str(IPV4_REVERSE_DNS_SUFFIX);
                Ok(out)
            }
            Family::Ipv6 => {
                let mut nibbles = Vec::with_capacity(32);
                for seg in self.segments() {
                    let parts = segment::split_value_range(seg.lower() as u128, seg.upper() as u128, 4, 4)
                        .ok_or(AddressError::Incompatible("segment range has no nibble form"))?;
                    nibbles.extend(parts);
                }
                let style = SegmentStyle {
                    radix: Radix::Hex,
                    pad: 0,
                    wildcard: true,
                    range_separator: '-',
                };
                let mut out = String::new();
                for nibble in nibbles.iter().rev() {
                    style.write(&mut out, nibble, 4);
                    out.push('.');
                }
                out.pop();
                out.push_str(IPV6_REVERSE_DNS_SUFFIX);
                Ok(out)
            }
            Family::Mac => Err(AddressError::Incompatible("MAC addresses have no reverse DNS form")),
        }
    }

    /// Windows UNC host form: `2001-db8--1.ipv6-literal.net`, zone after `s`, ranges with `»`.
    pub fn to_ipv6_literal_net_string(&self) -> Result<String, AddressError> {
        if self.family() != Family::Ipv6 {
            return Err(AddressError::FamilyMismatch(self.family(), Family::Ipv6));
        }
        let style = SegmentStyle {
            range_separator: EXTENDED_RANGE_SEPARATOR,
            ..SegmentStyle::plain(Family::Ipv6)
        };
        let mut out = String::new();
        write_compressed(&mut out, self.segments(), style, 2);
        let mut out = out.replace(':', &IPV6_LITERAL_NET_SEPARATOR.to_string());
        if let Some(zone) = self.zone() {
            out.push(IPV6_LITERAL_NET_ZONE_SEPARATOR);
            out.push_str(zone);
        }
        out.push_str(IPV6_LITERAL_NET_SUFFIX);
        Ok(out)
    }

    fn joined_bounds(&self) -> Result<(u128, Option<u128>), AddressError> {
        if !self.is_sequential() {
            return Err(AddressError::Incompatible("range is not one contiguous value range"));
        }
        let (lower, upper) = self.value_range();
        Ok((lower, (lower != upper).then_some(upper)))
    }

    /// The whole value in hex: `0x01020304`, or `0x..-0x..` for a contiguous range.
    pub fn to_hex_string(&self) -> Result<String, AddressError> {
        let digits = self.family().bit_count() as usize / 4;
        let (lower, upper) = self.joined_bounds()?;
        let mut out = format!("{HEX_PREFIX}{lower:0digits$x}");
        if let Some(upper) = upper {
            let _ = write!(out, "-{HEX_PREFIX}{upper:0digits$x}");
        }
        Ok(out)
    }

    /// The whole value in octal with a leading `0`.
    pub fn to_octal_string(&self) -> Result<String, AddressError> {
        let (lower, upper) = self.joined_bounds()?;
        let mut out = format!("0{lower:o}");
        if let Some(upper) = upper {
            let _ = write!(out, "-0{upper:o}");
        }
        Ok(out)
    }

    /// RFC 1924 form of an IPv6 value: 20 base-85 digits.
    pub fn to_base85_string(&self) -> Result<String, AddressError> {
        if self.family() != Family::Ipv6 {
            return Err(AddressError::FamilyMismatch(self.family(), Family::Ipv6));
        }
        let (lower, upper) = self.joined_bounds()?;
        let mut out = encode_base85(lower);
        if let Some(upper) = upper {
            out.push(EXTENDED_RANGE_SEPARATOR);
            out.push_str(&encode_base85(upper));
        }
        if let Some(zone) = self.zone() {
            out.push(format::BASE85_ZONE_SEPARATOR);
            out.push_str(zone);
        }
        if let Some(prefix) = self.prefix_length() {
            let _ = write!(out, "/{prefix}");
        }
        Ok(out)
    }

    /// MAC as three dotted 16-bit groups: `aabb.ccdd.eeff`.
    pub fn to_dotted_string(&self) -> Result<String, AddressError> {
        if self.family() != Family::Mac {
            return Err(AddressError::FamilyMismatch(self.family(), Family::Mac));
        }
        let segments = self.segments();
        let style = SegmentStyle {
            radix: Radix::Hex,
            pad: 4,
            wildcard: true,
            range_separator: '-',
        };
        let mut out = String::new();
        for (i, pair) in segments.chunks(2).enumerate() {
            if i > 0 {
                out.push('.');
            }
            let joined = range::join_pair(pair[0], pair[1])?;
            style.write(&mut out, &joined, 16);
        }
        Ok(out)
    }
}

fn encode_base85(mut value: u128) -> String {
    let mut digits = [b'0'; format::BASE85_LEN];
    for slot in digits.iter_mut().rev() {
        *slot = format::base85_char((value % 85) as u32) as u8;
        value /= 85;
    }
    digits.iter().map(|&b| b as char).collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
