use std::cmp::Ordering;

use rangr_core::config::ParseOptions;
use rangr_core::network::AddressString;
use rangr_core::network::order::{AddressComparator, Bucket, OrderingPolicy};
use rangr_core::network::range::AddressRange;

fn sorted(texts: &[&str], policy: OrderingPolicy) -> Vec<String> {
    let options = ParseOptions::default();
    let mut strings: Vec<AddressString> = texts.iter().map(|t| AddressString::new(t, &options)).collect();
    AddressComparator::new(policy).sort_strings(&mut strings);
    strings.iter().map(|s| s.text().to_string()).collect()
}

#[test]
fn mixed_inputs_sort_by_bucket() {
    let input = [
        "::1",
        "bogus",
        "",
        "10.0.0.0/8",
        "1.2.3.4",
        "*",
        "/16",
        "aa:bb:cc:dd:ee:ff",
    ];
    assert_eq!(
        sorted(&input, OrderingPolicy::Default),
        ["bogus", "", "1.2.3.4", "10.0.0.0/8", "::1", "aa:bb:cc:dd:ee:ff", "/16", "*"]
    );
}

#[test]
fn buckets_of_strings() {
    let options = ParseOptions::default();
    let bucket = |text: &str| AddressString::new(text, &options).bucket();
    assert_eq!(bucket("1:2:3:4:5:6:7:8:9"), Bucket::Invalid);
    assert_eq!(bucket(""), Bucket::Empty);
    assert_eq!(bucket("/64"), Bucket::PrefixOnly);
    assert_eq!(bucket("fe80::1%eth0"), Bucket::Ipv6);
}

#[test]
fn policies_differ_on_wide_ranges() {
    let input = ["1.2.3.*", "1.2.3.5-10", "1.2.3.4"];
    assert_eq!(
        sorted(&input, OrderingPolicy::Default),
        ["1.2.3.4", "1.2.3.5-10", "1.2.3.*"]
    );
    assert_eq!(
        sorted(&input, OrderingPolicy::PreferLow),
        ["1.2.3.*", "1.2.3.4", "1.2.3.5-10"]
    );
    assert_eq!(
        sorted(&input, OrderingPolicy::PreferHigh),
        ["1.2.3.4", "1.2.3.5-10", "1.2.3.*"]
    );
}

#[test]
fn order_matches_equality() {
    let a: AddressRange = "192.168.0.0/16".parse().unwrap();
    let b: AddressRange = "192.168.*.*".parse().unwrap();
    assert_eq!(a, b);
    assert_eq!(a.cmp(&b), Ordering::Equal);

    let mut ranges: Vec<AddressRange> = ["::2", "1.1.1.1", "::1"]
        .iter()
        .map(|t| t.parse().unwrap())
        .collect();
    ranges.sort();
    let texts: Vec<String> = ranges.iter().map(ToString::to_string).collect();
    assert_eq!(texts, ["1.1.1.1", "::1", "::2"]);
}
