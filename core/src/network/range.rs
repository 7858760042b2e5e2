//! # Address Range Model
//!
//! An [`AddressRange`] is a family tag, a fixed number of [`SegmentValue`]s (most significant
//! first), an optional prefix length and, for IPv6, an optional zone. Each segment may be a
//! single value or an inclusive range, so one value can stand for a single address, a CIDR
//! block, or any product of per-segment ranges such as `1.2-3.*.4`.
//!
//! Values are immutable. Operations that change the range build a new one.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::config::SubnetPolicy;
use crate::error::AddressError;
use crate::network::format::Family;
use crate::network::mask::{self, MaskedRange};
use crate::network::segment::{self, SegmentValue};

/// Fixed-length segment storage, one variant per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segments {
    V4([SegmentValue; 4]),
    V6([SegmentValue; 8]),
    Mac([SegmentValue; 6]),
}

impl Segments {
    pub fn family(&self) -> Family {
        match self {
            Self::V4(_) => Family::Ipv4,
            Self::V6(_) => Family::Ipv6,
            Self::Mac(_) => Family::Mac,
        }
    }

    pub fn as_slice(&self) -> &[SegmentValue] {
        match self {
            Self::V4(s) => s,
            Self::V6(s) => s,
            Self::Mac(s) => s,
        }
    }

    /// Returns `None` when the slice length does not match the family.
    pub fn from_slice(family: Family, segments: &[SegmentValue]) -> Option<Self> {
        match family {
            Family::Ipv4 => segments.try_into().ok().map(Self::V4),
            Family::Ipv6 => segments.try_into().ok().map(Self::V6),
            Family::Mac => segments.try_into().ok().map(Self::Mac),
        }
    }

    fn map(&self, f: impl Fn(usize, &SegmentValue) -> SegmentValue) -> Self {
        let mapped: Vec<SegmentValue> = self
            .as_slice()
            .iter()
            .enumerate()
            .map(|(i, seg)| f(i, seg))
            .collect();
        // same length as self
        Self::from_slice(self.family(), &mapped).unwrap_or(*self)
    }
}

/// Number of concrete addresses in a range.
///
/// Exact up to and including 2^128, the size of the whole IPv6 space: a product of per-segment
/// counts never exceeds 2^(bit count), so the only value past `u128::MAX` is 2^128 itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddressCount {
    full_ipv6: bool,
    value: u128,
}

impl AddressCount {
    pub const ONE: Self = Self {
        full_ipv6: false,
        value: 1,
    };

    fn of(segments: &[SegmentValue]) -> Self {
        let mut value: u128 = 1;
        for seg in segments {
            match value.checked_mul(seg.count() as u128) {
                Some(v) => value = v,
                None => {
                    return Self {
                        full_ipv6: true,
                        value: 0,
                    };
                }
            }
        }
        Self {
            full_ipv6: false,
            value,
        }
    }

    /// The count, unless it is 2^128.
    pub fn as_u128(&self) -> Option<u128> {
        (!self.full_ipv6).then_some(self.value)
    }
}

impl fmt::Display for AddressCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.full_ipv6 {
            f.write_str("340282366920938463463374607431768211456")
        } else {
            write!(f, "{}", self.value)
        }
    }
}

#[derive(Debug, Clone)]
pub struct AddressRange {
    segments: Segments,
    prefix_length: Option<u8>,
    zone: Option<String>,
}

/// Result of masking a whole address. See [`MaskedRange`] for the meaning of `sequential`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedAddress {
    pub range: AddressRange,
    pub sequential: bool,
}

impl AddressRange {
    pub fn new(family: Family, segments: &[SegmentValue]) -> Result<Self, AddressError> {
        let segments = Segments::from_slice(family, segments)
            .ok_or(AddressError::Incompatible("segment count does not match the family"))?;
        Ok(Self::from_segments(segments))
    }

    pub fn from_segments(segments: Segments) -> Self {
        Self {
            segments,
            prefix_length: None,
            zone: None,
        }
    }

    pub fn ipv4(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self::from_segments(Segments::V4([a, b, c, d].map(|v| SegmentValue::single(v as u16))))
    }

    /// Single address from its numeric value. Bits above the family width are ignored.
    pub fn from_value(family: Family, value: u128) -> Self {
        let value = value & family.max_value();
        // a single value always splits
        match Self::from_value_range(family, value, value) {
            Ok(range) => range,
            Err(_) => Self::from_segments(zeroed(family)),
        }
    }

    /// Range covering `[lower, upper]`, when it has a per-segment form.
    pub fn from_value_range(family: Family, lower: u128, upper: u128) -> Result<Self, AddressError> {
        let segments = segment::split_value_range(
            lower,
            upper,
            family.segment_count(),
            family.segment_bits(),
        )
        .ok_or(AddressError::Incompatible("value range has no per-segment form"))?;
        Self::new(family, &segments)
    }

    /// Every address of the family.
    pub fn all(family: Family) -> Self {
        let full = SegmentValue::full(family.segment_bits());
        let segments = vec![full; family.segment_count()];
        // lengths match by construction
        Self::new(family, &segments).unwrap_or_else(|_| Self::from_segments(zeroed(family)))
    }

    /// Attaches a prefix length as metadata, without touching the segments.
    pub fn with_prefix_length(mut self, prefix: u8) -> Result<Self, AddressError> {
        self.check_prefix(prefix)?;
        self.prefix_length = Some(prefix);
        Ok(self)
    }

    pub fn without_prefix_length(mut self) -> Self {
        self.prefix_length = None;
        self
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Result<Self, AddressError> {
        if self.family() != Family::Ipv6 {
            return Err(AddressError::Incompatible("only IPv6 addresses carry a zone"));
        }
        self.zone = Some(zone.into());
        Ok(self)
    }

    pub fn without_zone(mut self) -> Self {
        self.zone = None;
        self
    }

    /// Attaches `prefix` and, depending on `policy`, widens the host bits to the full block.
    pub fn apply_prefix(self, prefix: u8, policy: SubnetPolicy) -> Result<Self, AddressError> {
        self.check_prefix(prefix)?;
        let expand = match policy {
            SubnetPolicy::AllSubnets => true,
            SubnetPolicy::Explicit => false,
            SubnetPolicy::ZeroHostSubnets => self.host_is_zero(prefix),
        };
        if expand {
            self.to_prefix_block(prefix)
        } else {
            self.with_prefix_length(prefix)
        }
    }

    fn host_is_zero(&self, prefix: u8) -> bool {
        let bits = self.family().bit_count();
        let host = mask::host_mask_value(bits, prefix as u32);
        let (lower, upper) = self.value_range();
        lower & host == 0 && (upper & host == 0 || upper & host == host)
    }

    fn check_prefix(&self, prefix: u8) -> Result<(), AddressError> {
        let bits = self.family().bit_count();
        if prefix as u32 > bits {
            return Err(AddressError::PrefixOutOfBounds {
                prefix,
                bits: bits as u8,
            });
        }
        Ok(())
    }

    pub fn family(&self) -> Family {
        self.segments.family()
    }

    pub fn segments(&self) -> &[SegmentValue] {
        self.segments.as_slice()
    }

    pub fn segment(&self, index: usize) -> Option<SegmentValue> {
        self.segments().get(index).copied()
    }

    pub fn prefix_length(&self) -> Option<u8> {
        self.prefix_length
    }

    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    pub fn is_ipv4(&self) -> bool {
        self.family() == Family::Ipv4
    }

    pub fn is_ipv6(&self) -> bool {
        self.family() == Family::Ipv6
    }

    pub fn is_mac(&self) -> bool {
        self.family() == Family::Mac
    }

    pub fn is_multiple(&self) -> bool {
        self.segments().iter().any(SegmentValue::is_multiple)
    }

    /// Whether the joined range is one contiguous integer interval.
    pub fn is_sequential(&self) -> bool {
        segment::is_sequential(self.segments(), self.family().segment_bits())
    }

    pub fn count(&self) -> AddressCount {
        AddressCount::of(self.segments())
    }

    /// Network bits of `prefix` that fall in segment `index`.
    fn segment_network_bits(&self, index: usize, prefix: u8) -> u32 {
        let bits = self.family().segment_bits();
        let start = bits * index as u32;
        (prefix as u32).saturating_sub(start).min(bits)
    }

    /// True when the host bits selected by the prefix length span their full range.
    pub fn is_prefix_block(&self) -> bool {
        let Some(prefix) = self.prefix_length else {
            return false;
        };
        self.covers_host_bits(prefix)
    }

    /// A prefix block whose network bits hold a single value.
    pub fn is_single_prefix_block(&self) -> bool {
        let Some(prefix) = self.prefix_length else {
            return false;
        };
        if !self.covers_host_bits(prefix) {
            return false;
        }
        let bits = self.family().segment_bits();
        self.segments().iter().enumerate().all(|(i, seg)| {
            let host = segment::host_mask_for(bits, self.segment_network_bits(i, prefix));
            seg.lower() & !host == seg.upper() & !host
        })
    }

    fn covers_host_bits(&self, prefix: u8) -> bool {
        let bits = self.family().segment_bits();
        self.segments()
            .iter()
            .enumerate()
            .all(|(i, seg)| seg.is_block(bits, self.segment_network_bits(i, prefix)))
    }

    /// Prefix length of the single CIDR block this range is exactly equal to, if any.
    pub fn single_block_prefix(&self) -> Option<u8> {
        let (lower, upper) = self.value_range();
        let host = lower ^ upper;
        if host & host.wrapping_add(1) != 0 || lower & host != 0 || upper & host != host {
            return None;
        }
        Some((self.family().bit_count() - host.count_ones()) as u8)
    }

    /// The block of `prefix` that contains this range, with the prefix attached.
    pub fn to_prefix_block(&self, prefix: u8) -> Result<Self, AddressError> {
        self.check_prefix(prefix)?;
        let bits = self.family().segment_bits();
        let segments = self
            .segments
            .map(|i, seg| seg.to_block(bits, self.segment_network_bits(i, prefix)));
        Ok(Self {
            segments,
            prefix_length: Some(prefix),
            zone: self.zone.clone(),
        })
    }

    /// Network mask of `prefix` for `family`, e.g. `255.255.0.0` for IPv4 `/16`.
    pub fn network_mask(family: Family, prefix: u8) -> Result<Self, AddressError> {
        let bits = family.bit_count();
        if prefix as u32 > bits {
            return Err(AddressError::PrefixOutOfBounds {
                prefix,
                bits: bits as u8,
            });
        }
        Ok(Self::from_value(
            family,
            mask::network_mask_value(bits, prefix as u32),
        ))
    }

    /// Host mask of `prefix` for `family`, e.g. `0.0.255.255` for IPv4 `/16`.
    pub fn host_mask(family: Family, prefix: u8) -> Result<Self, AddressError> {
        let bits = family.bit_count();
        if prefix as u32 > bits {
            return Err(AddressError::PrefixOutOfBounds {
                prefix,
                bits: bits as u8,
            });
        }
        Ok(Self::from_value(family, mask::host_mask_value(bits, prefix as u32)))
    }

    /// Bounds of the joined numeric value.
    pub fn value_range(&self) -> (u128, u128) {
        segment::join_value_range(self.segments(), self.family().segment_bits())
    }

    pub fn lower_value(&self) -> u128 {
        self.value_range().0
    }

    pub fn upper_value(&self) -> u128 {
        self.value_range().1
    }

    /// The lowest address, keeping prefix length and zone.
    pub fn lower(&self) -> Self {
        Self {
            segments: self.segments.map(|_, seg| SegmentValue::single(seg.lower())),
            prefix_length: self.prefix_length,
            zone: self.zone.clone(),
        }
    }

    /// The highest address, keeping prefix length and zone.
    pub fn upper(&self) -> Self {
        Self {
            segments: self.segments.map(|_, seg| SegmentValue::single(seg.upper())),
            prefix_length: self.prefix_length,
            zone: self.zone.clone(),
        }
    }

    /// Whether every address of `other` is also in `self`.
    ///
    /// Families never contain one another. A zoned range only contains ranges with the same zone.
    pub fn contains(&self, other: &AddressRange) -> bool {
        if self.family() != other.family() {
            return false;
        }
        if self.zone.is_some() && self.zone != other.zone {
            return false;
        }
        self.segments()
            .iter()
            .zip(other.segments())
            .all(|(mine, theirs)| mine.contains(theirs))
    }

    /// Masks every segment with the lower value of the corresponding `mask` segment.
    ///
    /// The result keeps a prefix length only when `mask` is a network mask.
    pub fn mask(&self, mask: &AddressRange) -> Result<MaskedAddress, AddressError> {
        let prefix = self.mask_prefix(mask)?;
        self.apply_segment_op(mask, prefix, mask::mask_range)
    }

    /// Like [`mask`](Self::mask), failing when a masked segment is not contiguous.
    pub fn mask_strict(&self, mask: &AddressRange) -> Result<AddressRange, AddressError> {
        let masked = self.mask(mask)?;
        if !masked.sequential {
            return Err(AddressError::Incompatible("masked segments are not contiguous"));
        }
        Ok(masked.range)
    }

    /// ORs every segment with the lower value of the corresponding `mask` segment.
    pub fn bitwise_or(&self, mask: &AddressRange) -> Result<MaskedAddress, AddressError> {
        if self.family() != mask.family() {
            return Err(AddressError::FamilyMismatch(self.family(), mask.family()));
        }
        self.apply_segment_op(mask, None, mask::or_range)
    }

    fn mask_prefix(&self, mask: &AddressRange) -> Result<Option<u8>, AddressError> {
        if self.family() != mask.family() {
            return Err(AddressError::FamilyMismatch(self.family(), mask.family()));
        }
        let bits = self.family().bit_count();
        Ok(mask::prefix_len_of_network_mask(mask.lower_value(), bits).map(|p| p as u8))
    }

    fn apply_segment_op(
        &self,
        mask: &AddressRange,
        prefix: Option<u8>,
        op: fn(u128, u128, u128, Option<u128>) -> MaskedRange,
    ) -> Result<MaskedAddress, AddressError> {
        let mut sequential = true;
        let mut segments = Vec::with_capacity(self.segments().len());
        for (seg, mask_seg) in self.segments().iter().zip(mask.segments()) {
            let masked = op(
                seg.lower() as u128,
                seg.upper() as u128,
                mask_seg.lower() as u128,
                None,
            );
            sequential &= masked.sequential;
            segments.push(
                SegmentValue::new(masked.lower as u16, masked.upper as u16)
                    .ok_or(AddressError::Incompatible("masked bounds out of order"))?,
            );
        }
        let range = Self {
            segments: Segments::from_slice(self.family(), &segments)
                .ok_or(AddressError::Incompatible("segment count does not match the family"))?,
            prefix_length: prefix,
            zone: self.zone.clone(),
        };
        Ok(MaskedAddress { range, sequential })
    }

    /// The IPv4-mapped IPv6 form `::ffff:a.b.c.d`.
    pub fn to_ipv6_mapped(&self) -> Result<AddressRange, AddressError> {
        if self.family() != Family::Ipv4 {
            return Err(AddressError::FamilyMismatch(self.family(), Family::Ipv4));
        }
        let v4 = self.segments();
        let mut segments = [SegmentValue::single(0); 8];
        segments[5] = SegmentValue::single(0xffff);
        segments[6] = join_pair(v4[0], v4[1])?;
        segments[7] = join_pair(v4[2], v4[3])?;
        let prefix_length = self.prefix_length.map(|p| p + 96);
        Ok(Self {
            segments: Segments::V6(segments),
            prefix_length,
            zone: None,
        })
    }

    /// The IPv4 address embedded in an IPv4-mapped IPv6 range.
    pub fn to_ipv4(&self) -> Result<AddressRange, AddressError> {
        if self.family() != Family::Ipv6 {
            return Err(AddressError::FamilyMismatch(self.family(), Family::Ipv6));
        }
        let v6 = self.segments();
        let mapped = v6[..5].iter().all(|s| *s == SegmentValue::single(0))
            && v6[5] == SegmentValue::single(0xffff);
        if !mapped {
            return Err(AddressError::Incompatible("not an IPv4-mapped address"));
        }
        let (a, b) = split_pair(v6[6])?;
        let (c, d) = split_pair(v6[7])?;
        let prefix_length = self.prefix_length.map(|p| p.saturating_sub(96));
        Ok(Self {
            segments: Segments::V4([a, b, c, d]),
            prefix_length,
            zone: None,
        })
    }

    /// Iterates over every concrete address, lowest first.
    pub fn iter(&self) -> AddressIter {
        AddressIter {
            range: self.clone(),
            next: Some(self.segments().iter().map(SegmentValue::lower).collect()),
        }
    }
}

fn zeroed(family: Family) -> Segments {
    match family {
        Family::Ipv4 => Segments::V4([SegmentValue::single(0); 4]),
        Family::Ipv6 => Segments::V6([SegmentValue::single(0); 8]),
        Family::Mac => Segments::Mac([SegmentValue::single(0); 6]),
    }
}

/// Joins two 8-bit segments into one 16-bit segment.
pub(crate) fn join_pair(high: SegmentValue, low: SegmentValue) -> Result<SegmentValue, AddressError> {
    if high.is_multiple() && !low.is_full(8) {
        return Err(AddressError::Incompatible("byte range cannot be joined into one segment"));
    }
    let lower = (high.lower() << 8) | low.lower();
    let upper = (high.upper() << 8) | low.upper();
    SegmentValue::new(lower, upper).ok_or(AddressError::Incompatible("joined bounds out of order"))
}

/// Splits one 16-bit segment into two 8-bit segments.
pub(crate) fn split_pair(seg: SegmentValue) -> Result<(SegmentValue, SegmentValue), AddressError> {
    let parts = segment::split_value_range(seg.lower() as u128, seg.upper() as u128, 2, 8)
        .ok_or(AddressError::Incompatible("segment range cannot be split into bytes"))?;
    Ok((parts[0], parts[1]))
}

impl PartialEq for AddressRange {
    /// Same family, same set of addresses and same zone. The prefix length is not compared:
    /// the subnet policy already decided at construction whether it widened the segments.
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments && self.zone == other.zone
    }
}

impl Eq for AddressRange {}

impl Hash for AddressRange {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
        self.zone.hash(state);
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

/// Iterator over the concrete addresses of a range.
pub struct AddressIter {
    range: AddressRange,
    next: Option<Vec<u16>>,
}

impl Iterator for AddressIter {
    type Item = AddressRange;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let segments: Vec<SegmentValue> = current.iter().map(|&v| SegmentValue::single(v)).collect();

        // odometer step from the least significant segment
        let mut following = current;
        let mut advanced = false;
        for (i, seg) in self.range.segments().iter().enumerate().rev() {
            if following[i] < seg.upper() {
                following[i] += 1;
                advanced = true;
                break;
            }
            following[i] = seg.lower();
        }
        if advanced {
            self.next = Some(following);
        }

        Some(AddressRange {
            segments: Segments::from_slice(self.range.family(), &segments)?,
            prefix_length: self.range.prefix_length,
            zone: self.range.zone.clone(),
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
