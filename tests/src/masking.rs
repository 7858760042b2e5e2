use rangr_core::error::AddressError;
use rangr_core::network::format::Family;
use rangr_core::network::range::AddressRange;

fn range(text: &str) -> AddressRange {
    text.parse()
        .unwrap_or_else(|e| panic!("'{text}' should parse: {e}"))
}

#[test]
fn network_masks_keep_a_prefix() {
    let masked = range("192.168.77.5").mask(&range("255.255.0.0")).unwrap();
    assert!(masked.sequential);
    assert_eq!(masked.range, range("192.168.0.0"));
    assert_eq!(masked.range.prefix_length(), Some(16));
}

#[test]
fn masks_with_holes_have_no_prefix() {
    let masked = range("192.168.77.5").mask(&range("255.0.255.0")).unwrap();
    assert_eq!(masked.range, range("192.0.77.0"));
    assert_eq!(masked.range.prefix_length(), None);
}

#[test]
fn masking_ranges() {
    let wide = range("10.0.0.0-255");
    let low_bits = wide.mask(&range("255.255.255.15")).unwrap();
    assert!(low_bits.sequential);
    assert_eq!(low_bits.range, range("10.0.0.0-15"));

    // every sixteenth value survives, the bounds only enclose them
    let high_bits = wide.mask(&range("255.255.255.240")).unwrap();
    assert!(!high_bits.sequential);
    assert_eq!(high_bits.range, range("10.0.0.0-240"));

    let scattered = range("10.0.0.0-15").mask(&range("255.255.255.5")).unwrap();
    assert!(!scattered.sequential);
    assert!(range("10.0.0.0-15").mask_strict(&range("255.255.255.5")).is_err());
}

#[test]
fn or_masks() {
    let ored = range("10.0.0.0").bitwise_or(&range("0.0.0.255")).unwrap();
    assert_eq!(ored.range, range("10.0.0.255"));
    assert!(ored.sequential);
}

#[test]
fn ipv6_network_masks() {
    let mask = AddressRange::network_mask(Family::Ipv6, 64).unwrap();
    let masked = range("2001:db8:1:2:3:4:5:6").mask(&mask).unwrap();
    assert_eq!(masked.range, range("2001:db8:1:2::"));
    assert_eq!(masked.range.prefix_length(), Some(64));
}

#[test]
fn families_must_agree() {
    let err = range("1.2.3.4").mask(&range("ffff::")).unwrap_err();
    assert_eq!(err, AddressError::FamilyMismatch(Family::Ipv4, Family::Ipv6));
    assert!(range("1.2.3.4").bitwise_or(&range("aa:bb:cc:dd:ee:ff")).is_err());
}

#[test]
fn masks_in_address_suffix() {
    let r = range("10.1.2.3/255.255.0.0");
    assert_eq!(r.prefix_length(), Some(16));
    assert!(range("10.1.0.0/255.255.0.0").contains(&range("10.1.200.7")));
}
