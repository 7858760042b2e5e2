use crate::terminal::colors;
use colored::*;
use rangr_core::network::format::Family;
use rangr_core::network::order::Bucket;
use rangr_core::network::range::AddressRange;

/// Short label for the kind of IPv6 address at the lower bound.
pub fn ipv6_type_str(range: &AddressRange) -> &'static str {
    let first = range.lower_value() >> 112;
    let first_byte = (first >> 8) as u8;
    if (0x20..=0x3f).contains(&first_byte) {
        return "GUA";
    }
    if first & 0xfe00 == 0xfc00 {
        return "ULA";
    }
    if first & 0xffc0 == 0xfe80 {
        return "LLA";
    }
    if first & 0xff00 == 0xff00 {
        return "MCAST";
    }
    "IPv6"
}

pub fn family_color(family: Family) -> Color {
    match family {
        Family::Ipv4 => colors::IPV4_ADDR,
        Family::Ipv6 => colors::IPV6_ADDR,
        Family::Mac => colors::MAC_ADDR,
    }
}

pub fn colored_range(range: &AddressRange) -> ColoredString {
    range.to_string().color(family_color(range.family()))
}

pub fn bucket_name(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Invalid => "invalid",
        Bucket::Empty => "empty",
        Bucket::Ipv4 => "IPv4",
        Bucket::Ipv6 => "IPv6",
        Bucket::Mac => "MAC",
        Bucket::PrefixOnly => "prefix",
        Bucket::All => "all",
    }
}

pub fn yes_no(value: bool) -> ColoredString {
    if value { "yes".green() } else { "no".red() }
}

/// Every alternative string form the range supports, for a one-level tree.
pub fn string_forms(range: &AddressRange) -> Vec<(String, ColoredString)> {
    let color = family_color(range.family());
    let mut forms: Vec<(&str, String)> = vec![
        ("normalized", range.to_normalized_string()),
        ("compressed", range.to_compressed_string()),
        ("full", range.to_full_string()),
        ("subnet", range.to_subnet_string()),
        ("cidr", range.to_cidr_string()),
    ];
    let optional = [
        ("mixed", range.to_mixed_string()),
        ("reverse dns", range.to_reverse_dns_string()),
        ("literal net", range.to_ipv6_literal_net_string()),
        ("hex", range.to_hex_string()),
        ("octal", range.to_octal_string()),
        ("base85", range.to_base85_string()),
        ("dotted", range.to_dotted_string()),
    ];
    forms.extend(optional.into_iter().filter_map(|(k, v)| v.ok().map(|v| (k, v))));
    forms
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.color(color)))
        .collect()
}
