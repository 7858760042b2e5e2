//! # Masking Engine
//!
//! Applies a bitmask to every value of an inclusive range `[lower, upper]` and reports
//! the bounds of the masked set together with whether that set is still one contiguous
//! interval.
//!
//! The range is split at the highest bit where `lower` and `upper` differ. One half of each
//! split is always an aligned block (every combination of the bits below the split point),
//! whose masked set is computed directly, so the recursion descends at most once per bit.

/// Result of masking a range.
///
/// When `sequential` is false the bounds enclose the masked set but the set has gaps,
/// so the bounds are an over-approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskedRange {
    pub lower: u128,
    pub upper: u128,
    pub sequential: bool,
}

impl MaskedRange {
    const fn single(value: u128) -> Self {
        Self {
            lower: value,
            upper: value,
            sequential: true,
        }
    }
}

/// Masks every value of `[lower, upper]` with `mask` (bitwise AND).
///
/// `clamp_max` caps both bounds before masking, for sources whose nominal upper bound runs past
/// the family maximum.
pub fn mask_range(lower: u128, upper: u128, mask: u128, clamp_max: Option<u128>) -> MaskedRange {
    let (lower, upper) = clamp(lower, upper, clamp_max);
    mask_split(lower, upper, mask)
}

/// ORs every value of `[lower, upper]` with `mask`.
///
/// `x | m` is `!(!x & !m)` and complementing `[lower, upper]` gives `[!upper, !lower]`, so this is
/// the complement of masking the complemented range.
pub fn or_range(lower: u128, upper: u128, mask: u128, clamp_max: Option<u128>) -> MaskedRange {
    let (lower, upper) = clamp(lower, upper, clamp_max);
    let inverted = mask_split(!upper, !lower, !mask);
    MaskedRange {
        lower: !inverted.upper,
        upper: !inverted.lower,
        sequential: inverted.sequential,
    }
}

fn clamp(lower: u128, upper: u128, clamp_max: Option<u128>) -> (u128, u128) {
    match clamp_max {
        Some(max) => (lower.min(max), upper.min(max)),
        None => (lower, upper),
    }
}

fn mask_split(lower: u128, upper: u128, mask: u128) -> MaskedRange {
    if lower >= upper {
        return MaskedRange::single(lower & mask);
    }

    let differing = lower ^ upper;
    let bit_pos = 127 - differing.leading_zeros();
    let split_bit = 1u128 << bit_pos;
    let below = split_bit - 1;
    let block = split_bit | below;

    if lower & block == 0 && upper & block == block {
        return mask_block(lower, block, mask);
    }

    let low_end = lower | below;
    let low = mask_split(lower, low_end, mask);
    let high = mask_split(low_end + 1, upper, mask);

    if mask & split_bit != 0 {
        // every masked low value has the bit clear, every masked high value has it set
        MaskedRange {
            lower: low.lower,
            upper: high.upper,
            sequential: low.sequential
                && high.sequential
                && low.upper.checked_add(1) == Some(high.lower),
        }
    } else {
        let touching = low.lower <= high.upper.saturating_add(1)
            && high.lower <= low.upper.saturating_add(1);
        MaskedRange {
            lower: low.lower.min(high.lower),
            upper: low.upper.max(high.upper),
            sequential: low.sequential && high.sequential && touching,
        }
    }
}

/// `base` has every bit of `block` clear and the range covers all values of those bits.
fn mask_block(base: u128, block: u128, mask: u128) -> MaskedRange {
    let varying = mask & block;
    let lower = base & mask;
    MaskedRange {
        lower,
        upper: lower | varying,
        // the submasks of `varying` are contiguous only for a run of low ones
        sequential: varying & varying.wrapping_add(1) == 0,
    }
}

/// Whole-address network mask for `prefix` leading ones in a `bits`-wide value.
pub fn network_mask_value(bits: u32, prefix: u32) -> u128 {
    let full = width_max(bits);
    if prefix >= bits {
        full
    } else {
        full & !(width_max(bits - prefix))
    }
}

/// Whole-address host mask for a `bits`-wide value after `prefix` network bits.
pub fn host_mask_value(bits: u32, prefix: u32) -> u128 {
    !network_mask_value(bits, prefix) & width_max(bits)
}

/// Prefix length of `value` when it is a contiguous network mask (ones then zeros).
pub fn prefix_len_of_network_mask(value: u128, bits: u32) -> Option<u32> {
    let full = width_max(bits);
    let inverted = !value & full;
    // inverted must be a run of low ones
    if inverted & inverted.wrapping_add(1) != 0 {
        return None;
    }
    Some(bits - (128 - inverted.leading_zeros()))
}

pub(crate) fn width_max(bits: u32) -> u128 {
    if bits >= 128 {
        u128::MAX
    } else {
        (1u128 << bits) - 1
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
