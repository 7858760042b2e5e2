//! # Segment Value
//!
//! The inclusive `(lower, upper)` range held by one octet, 16-bit group, or MAC byte.

use std::fmt;

/// One segment of an address. A single value when `lower == upper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SegmentValue {
    lower: u16,
    upper: u16,
}

impl SegmentValue {
    /// Returns `None` when `lower > upper`.
    pub const fn new(lower: u16, upper: u16) -> Option<Self> {
        if lower > upper {
            None
        } else {
            Some(Self { lower, upper })
        }
    }

    pub const fn single(value: u16) -> Self {
        Self {
            lower: value,
            upper: value,
        }
    }

    /// Full range of a segment holding `bits` bits.
    pub const fn full(bits: u32) -> Self {
        Self {
            lower: 0,
            upper: max_for_bits(bits),
        }
    }

    pub const fn lower(&self) -> u16 {
        self.lower
    }

    pub const fn upper(&self) -> u16 {
        self.upper
    }

    pub const fn is_multiple(&self) -> bool {
        self.lower < self.upper
    }

    pub const fn is_full(&self, bits: u32) -> bool {
        self.lower == 0 && self.upper == max_for_bits(bits)
    }

    pub const fn count(&self) -> u32 {
        (self.upper - self.lower) as u32 + 1
    }

    pub const fn contains(&self, other: &SegmentValue) -> bool {
        self.lower <= other.lower && other.upper <= self.upper
    }

    /// Whether the host bits (the low `bits - network_bits`) of the range form a full block:
    /// zero in the lower bound and all ones in the upper bound.
    pub const fn is_block(&self, bits: u32, network_bits: u32) -> bool {
        let host = host_mask_for(bits, network_bits);
        self.lower & host == 0 && self.upper & host == host
    }

    /// Widens the range to the whole block of its network bits.
    pub const fn to_block(&self, bits: u32, network_bits: u32) -> Self {
        let host = host_mask_for(bits, network_bits);
        Self {
            lower: self.lower & !host,
            upper: self.upper | host,
        }
    }
}

impl From<u16> for SegmentValue {
    fn from(value: u16) -> Self {
        Self::single(value)
    }
}

impl fmt::Display for SegmentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_multiple() {
            write!(f, "{}-{}", self.lower, self.upper)
        } else {
            write!(f, "{}", self.lower)
        }
    }
}

/// Splits the joined range `[lower, upper]` into `count` segments of `bits` bits.
///
/// Only ranges that are a product of per-segment ranges can be split: past the first segment
/// where the bounds differ, every segment must span its full range. Returns `None` otherwise,
/// or when `upper` does not fit in `count * bits` bits.
pub fn split_value_range(lower: u128, upper: u128, count: usize, bits: u32) -> Option<Vec<SegmentValue>> {
    let total = bits * count as u32;
    if lower > upper || (total < 128 && upper >> total != 0) {
        return None;
    }
    let max = max_for_bits(bits);
    let mut segments = Vec::with_capacity(count);
    let mut differed = false;
    for i in 0..count {
        let shift = bits * (count - 1 - i) as u32;
        let lo = ((lower >> shift) & max as u128) as u16;
        let hi = ((upper >> shift) & max as u128) as u16;
        if differed {
            if lo != 0 || hi != max {
                return None;
            }
            segments.push(SegmentValue::full(bits));
        } else {
            differed = lo != hi;
            segments.push(SegmentValue { lower: lo, upper: hi });
        }
    }
    Some(segments)
}

/// Joins segments of `bits` bits into the bounds of the whole value.
pub fn join_value_range(segments: &[SegmentValue], bits: u32) -> (u128, u128) {
    segments.iter().fold((0u128, 0u128), |(lo, hi), seg| {
        ((lo << bits) | seg.lower as u128, (hi << bits) | seg.upper as u128)
    })
}

/// Whether the joined range of `segments` is exactly the integer interval of its bounds.
pub fn is_sequential(segments: &[SegmentValue], bits: u32) -> bool {
    segments
        .iter()
        .skip_while(|seg| !seg.is_multiple())
        .skip(1)
        .all(|seg| seg.is_full(bits))
}

pub const fn max_for_bits(bits: u32) -> u16 {
    if bits >= 16 {
        u16::MAX
    } else {
        (1u16 << bits) - 1
    }
}

/// Mask of the bits of a `bits`-wide segment that lie after `network_bits` leading bits.
pub const fn host_mask_for(bits: u32, network_bits: u32) -> u16 {
    if network_bits >= bits {
        0
    } else {
        max_for_bits(bits - network_bits)
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
