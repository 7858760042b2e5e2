use std::cmp::Ordering;

use proptest::collection::vec;
use proptest::prelude::*;
use rangr_core::network::SegmentValue;
use rangr_core::network::format::Family;
use rangr_core::network::mask::{mask_range, or_range};
use rangr_core::network::order::{AddressComparator, OrderingPolicy};
use rangr_core::network::range::AddressRange;

fn policy() -> impl Strategy<Value = OrderingPolicy> {
    prop_oneof![
        Just(OrderingPolicy::Default),
        Just(OrderingPolicy::PreferLow),
        Just(OrderingPolicy::PreferHigh),
    ]
}

fn ipv4_block() -> impl Strategy<Value = AddressRange> {
    (any::<u32>(), 0u8..=32).prop_map(|(value, prefix)| {
        AddressRange::from_value(Family::Ipv4, value as u128)
            .to_prefix_block(prefix)
            .unwrap()
    })
}

fn ipv6_block() -> impl Strategy<Value = AddressRange> {
    (any::<u128>(), 0u8..=128).prop_map(|(value, prefix)| {
        AddressRange::from_value(Family::Ipv6, value)
            .to_prefix_block(prefix)
            .unwrap()
    })
}

fn any_block() -> impl Strategy<Value = AddressRange> {
    prop_oneof![ipv4_block(), ipv6_block()]
}

/// Singles, zeros, wildcards and arbitrary bounds, so every string form sees each shape.
fn segment(bits: u32) -> impl Strategy<Value = SegmentValue> {
    let max = ((1u32 << bits) - 1) as u16;
    prop_oneof![
        (0..=max).prop_map(SegmentValue::single),
        Just(SegmentValue::single(0)),
        Just(SegmentValue::full(bits)),
        (0..=max, 0..=max).prop_map(|(a, b)| SegmentValue::new(a.min(b), a.max(b)).unwrap()),
    ]
}

fn segment_range(family: Family) -> impl Strategy<Value = AddressRange> {
    vec(segment(family.segment_bits()), family.segment_count())
        .prop_map(move |segments| AddressRange::new(family, &segments).unwrap())
}

fn any_range() -> impl Strategy<Value = AddressRange> {
    prop_oneof![
        segment_range(Family::Ipv4),
        segment_range(Family::Ipv6),
        segment_range(Family::Mac),
    ]
}

proptest! {
    #[test]
    fn ipv4_strings_reparse(value in any::<u32>()) {
        let addr = AddressRange::from_value(Family::Ipv4, value as u128);
        let reparsed: AddressRange = addr.to_canonical_string().parse().unwrap();
        prop_assert_eq!(&reparsed, &addr);
        let full: AddressRange = addr.to_full_string().parse().unwrap();
        prop_assert_eq!(full, addr);
    }

    #[test]
    fn ipv6_strings_reparse(value in any::<u128>()) {
        let addr = AddressRange::from_value(Family::Ipv6, value);
        for text in [addr.to_canonical_string(), addr.to_normalized_string(), addr.to_full_string()] {
            let reparsed: AddressRange = text.parse().unwrap();
            prop_assert_eq!(&reparsed, &addr, "text {}", text);
        }
    }

    #[test]
    fn mac_strings_reparse(value in 0u128..(1 << 48)) {
        let addr = AddressRange::from_value(Family::Mac, value);
        let reparsed: AddressRange = addr.to_normalized_string().parse().unwrap();
        prop_assert_eq!(reparsed, addr);
    }

    #[test]
    fn blocks_reparse(block in any_block()) {
        let reparsed: AddressRange = block.to_canonical_string().parse().unwrap();
        prop_assert_eq!(reparsed, block);
    }

    #[test]
    fn every_string_form_reparses(range in any_range()) {
        let mut forms = vec![
            ("canonical", range.to_canonical_string()),
            ("normalized", range.to_normalized_string()),
            ("full", range.to_full_string()),
            ("compressed", range.to_compressed_string()),
            ("subnet", range.to_subnet_string()),
        ];
        // these forms exist only for some families and shapes
        let optional = [
            ("reverse dns", range.to_reverse_dns_string()),
            ("mixed", range.to_mixed_string()),
            ("literal net", range.to_ipv6_literal_net_string()),
            ("dotted", range.to_dotted_string()),
        ];
        forms.extend(optional.into_iter().filter_map(|(name, text)| text.ok().map(|t| (name, t))));

        for (name, text) in forms {
            let reparsed = text.parse::<AddressRange>();
            prop_assert!(reparsed.is_ok(), "{} form '{}' rejected: {:?}", name, text, reparsed);
            prop_assert_eq!(reparsed.unwrap(), range.clone(), "{} form '{}'", name, text);
        }
    }

    #[test]
    fn blocks_contain_their_addresses(value in any::<u32>(), prefix in 0u8..32) {
        let addr = AddressRange::from_value(Family::Ipv4, value as u128);
        let wide = addr.to_prefix_block(prefix).unwrap();
        let narrow = addr.to_prefix_block(prefix + 1).unwrap();

        prop_assert!(wide.contains(&addr));
        prop_assert!(wide.contains(&narrow));
        prop_assert!(!narrow.contains(&wide));
        prop_assert!(wide.contains(&wide));

        let wide_count = wide.count().as_u128().unwrap();
        let narrow_count = narrow.count().as_u128().unwrap();
        prop_assert_eq!(wide_count, 1u128 << (32 - prefix));
        prop_assert_eq!(wide_count, narrow_count * 2);
    }

    #[test]
    fn mutual_containment_is_equality(a in ipv4_block(), b in ipv4_block()) {
        if a.contains(&b) && b.contains(&a) {
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn ordering_is_antisymmetric(a in any_block(), b in any_block(), policy in policy()) {
        let cmp = AddressComparator::new(policy);
        prop_assert_eq!(cmp.compare_ranges(&a, &b), cmp.compare_ranges(&b, &a).reverse());
        prop_assert_eq!(cmp.compare_ranges(&a, &b) == Ordering::Equal, a == b);
    }

    #[test]
    fn masking_is_idempotent(value in any::<u32>(), mask in any::<u32>()) {
        let addr = AddressRange::from_value(Family::Ipv4, value as u128);
        let mask = AddressRange::from_value(Family::Ipv4, mask as u128);
        let once = addr.mask(&mask).unwrap().range;
        let twice = once.mask(&mask).unwrap().range;
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn masked_bounds_are_exact(lower in 0u128..512, len in 0u128..512, mask in 0u128..512) {
        let upper = lower + len;
        let values: Vec<u128> = (lower..=upper).map(|v| v & mask).collect();
        let result = mask_range(lower, upper, mask, None);
        prop_assert_eq!(result.lower, *values.iter().min().unwrap());
        prop_assert_eq!(result.upper, *values.iter().max().unwrap());
        if result.sequential {
            let mut distinct = values.clone();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(distinct.len() as u128, result.upper - result.lower + 1);
        }
    }

    #[test]
    fn or_bounds_are_exact(lower in 0u128..512, len in 0u128..512, mask in 0u128..512) {
        let upper = lower + len;
        let values: Vec<u128> = (lower..=upper).map(|v| v | mask).collect();
        let result = or_range(lower, upper, mask, None);
        prop_assert_eq!(result.lower, *values.iter().min().unwrap());
        prop_assert_eq!(result.upper, *values.iter().max().unwrap());
    }
}
