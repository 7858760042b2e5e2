use rangr_core::config::{EmptyPolicy, ParseOptions, SubnetPolicy};
use rangr_core::error::ErrorKind;
use rangr_core::network::format::Family;
use rangr_core::network::range::AddressRange;
use rangr_core::network::{ParseOutcome, ParsedAddress, parse, parse_address};

fn range(text: &str) -> AddressRange {
    text.parse()
        .unwrap_or_else(|e| panic!("'{text}' should parse: {e}"))
}

/// Every textual form of one address must land on the same value.
#[test]
fn ipv4_forms_agree() {
    let expected = AddressRange::ipv4(192, 168, 1, 10);
    for text in ["192.168.1.10", "0xc0a8010a", "3232235786", "192.168.266"] {
        let parsed = parse_address(text, &ParseOptions::default());
        assert_eq!(
            parsed.ok().and_then(ParsedAddress::into_address),
            Some(expected.clone()),
            "form '{text}'"
        );
    }
}

#[test]
fn ipv6_forms_agree() {
    let expected = range("2001:db8::1");
    for text in [
        "2001:0db8:0000:0000:0000:0000:0000:0001",
        "[2001:db8::1]",
        "2001:db8:0:0::1",
        "0x20010db8000000000000000000000001",
    ] {
        assert_eq!(range(text), expected, "form '{text}'");
    }
}

#[test]
fn reverse_dns_round_trip() {
    let v4 = range("10.20.30.40");
    assert_eq!(range(&v4.to_reverse_dns_string().unwrap()), v4);

    let v6 = range("2001:db8::abcd");
    assert_eq!(range(&v6.to_reverse_dns_string().unwrap()), v6);
}

#[test]
fn wildcards_and_ranges() {
    let r = range("10.1-3.*.0");
    assert_eq!(r.count().as_u128(), Some(3 * 256));
    assert!(!r.is_sequential());

    let tail = range("10.0.0.1-10.0.0.9");
    assert_eq!(tail.count().as_u128(), Some(9));
    assert!(tail.contains(&range("10.0.0.5")));
    assert!(!tail.contains(&range("10.0.0.10")));

    assert_eq!(range("1::*").segments()[7].count(), 0x1_0000);
}

#[test]
fn prefix_policies() {
    let zero_host = ParseOptions::default();
    let explicit = ParseOptions::default().with_policy(SubnetPolicy::Explicit);
    let all = ParseOptions::default().with_policy(SubnetPolicy::AllSubnets);

    let block = parse_address("10.0.0.0/8", &zero_host).unwrap().into_address().unwrap();
    assert_eq!(block.count().as_u128(), Some(1 << 24));

    let host = parse_address("10.0.0.1/8", &zero_host).unwrap().into_address().unwrap();
    assert_eq!(host.count().as_u128(), Some(1));
    assert_eq!(host.prefix_length(), Some(8));

    let kept = parse_address("10.0.0.0/8", &explicit).unwrap().into_address().unwrap();
    assert!(!kept.is_multiple());

    let widened = parse_address("10.0.0.1/8", &all).unwrap().into_address().unwrap();
    assert!(widened.contains(&range("10.255.255.255")));
}

#[test]
fn special_inputs() {
    let opts = ParseOptions::default();
    assert_eq!(parse_address("", &opts).unwrap(), ParsedAddress::Empty);
    assert_eq!(parse_address("*", &opts).unwrap(), ParsedAddress::All);
    assert_eq!(parse_address("/24", &opts).unwrap(), ParsedAddress::PrefixOnly(24));

    let loopback = ParseOptions::default().with_empty_policy(EmptyPolicy::Loopback);
    let parsed = parse_address("", &loopback).unwrap().into_address();
    assert_eq!(parsed, Some(range("127.0.0.1")));
}

#[test]
fn rejected_inputs() {
    let opts = ParseOptions::default();
    for text in ["1.2.3.256", "1.2.3.4.5", "1:::2", "1.2.3.4/33", "gg::1", "10.0.0.9-10.0.0.1"] {
        assert!(parse_address(text, &opts).is_err(), "'{text}' should be rejected");
    }

    let err = parse_address("1.2.3.4/33", &opts).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PrefixOutOfBounds);
}

#[test]
fn zones_only_on_ipv6() {
    let zoned = range("fe80::1%eth0");
    assert_eq!(zoned.zone(), Some("eth0"));
    assert_eq!(zoned.family(), Family::Ipv6);
    assert!(parse_address("1.2.3.4%eth0", &ParseOptions::default()).is_err());
}

#[test]
fn hosts_fall_back_from_addresses() {
    let opts = ParseOptions::default();
    match parse("example.com:443", &opts).unwrap() {
        ParseOutcome::Host(host) => {
            assert_eq!(host.name(), Some("example.com"));
            assert_eq!(host.port(), Some(443));
        }
        other => panic!("expected a host, got {other:?}"),
    }
    assert!(matches!(
        parse("1.2.3.4", &opts).unwrap(),
        ParseOutcome::Address(ParsedAddress::Address(_))
    ));
}

#[test]
fn canonical_strings_reparse_under_their_policy() {
    let explicit = ParseOptions::default().with_policy(SubnetPolicy::Explicit);
    let kept = parse_address("1.2.0.0/16", &explicit).unwrap().into_address().unwrap();
    let canonical = kept.to_canonical_string();
    assert_eq!(canonical, "1.2.0.0/16");

    let again = parse_address(&canonical, &explicit).unwrap().into_address();
    assert_eq!(again, Some(kept.clone()));

    let widened = parse_address(&canonical, &ParseOptions::default()).unwrap().into_address();
    assert_ne!(widened, Some(kept));
}

#[test]
fn padded_ipv4_reads_as_octal_when_asked() {
    let addr = range("10.20.30.40");
    let full = addr.to_full_string();
    assert_eq!(full, "010.020.030.040");
    assert_eq!(range(&full), addr);

    let octal = ParseOptions::default().with_octal(true);
    let reread = parse_address(&full, &octal).unwrap().into_address();
    assert_eq!(reread, Some(AddressRange::ipv4(8, 16, 24, 32)));
}

#[test]
fn base85_alphabet_overlaps_other_syntaxes() {
    let mac = range("4e-0e|14-00-17-a6-2b");
    assert_eq!(mac.family(), Family::Mac);
    assert_eq!(mac.to_canonical_string(), "4e-0e|14-00-17-a6-2b");
    assert_eq!(range("0x000000000000000001"), range("::1"));
}
