use anyhow::Context;
use colored::*;
use rangr_core::config::ParseOptions;
use rangr_core::network::format::Family;
use rangr_core::network::parse::{ParsedAddress, parse_address};
use rangr_core::network::range::AddressRange;
use tracing::debug;

use crate::terminal::{colors, format, print};

pub fn info(text: &str, options: &ParseOptions) -> anyhow::Result<()> {
    let parsed = parse_address(text, options).with_context(|| format!("invalid address '{text}'"))?;
    match parsed {
        ParsedAddress::Empty => print::print_status("empty input, no address"),
        ParsedAddress::All => print::print_status("every address of every family"),
        ParsedAddress::PrefixOnly(prefix) => prefix_only(prefix)?,
        ParsedAddress::Address(range) => describe(&range),
    }
    Ok(())
}

fn prefix_only(prefix: u8) -> anyhow::Result<()> {
    print::set_key_width(["IPv4 mask", "IPv6 mask", "prefix"]);
    print::aligned_line("prefix", prefix.to_string().color(colors::PREFIX));
    for family in [Family::Ipv4, Family::Ipv6] {
        if prefix as u32 > family.bit_count() {
            debug!(%family, prefix, "prefix longer than the family");
            continue;
        }
        let mask = AddressRange::network_mask(family, prefix)?;
        print::aligned_line(&format!("{family} mask"), format::colored_range(&mask));
    }
    Ok(())
}

fn describe(range: &AddressRange) {
    let family = range.family();
    let kind = match family {
        Family::Ipv6 => format::ipv6_type_str(range),
        _ => "",
    };
    let prefix = match range.prefix_length() {
        Some(p) => p.to_string().color(colors::PREFIX),
        None => "none".color(colors::MUTED),
    };
    let block = match range.single_block_prefix() {
        Some(p) => format!("/{p}").color(colors::PREFIX),
        None => "no".red(),
    };

    print::set_key_width(["family", "canonical", "count", "sequential", "prefix", "prefix block", "single block", "lower", "upper"]);
    if kind.is_empty() {
        print::aligned_line("family", family.to_string());
    } else {
        print::aligned_line("family", format!("{family} ({kind})"));
    }
    print::aligned_line("canonical", format::colored_range(range));
    print::aligned_line("count", range.count().to_string().color(colors::ACCENT));
    print::aligned_line("sequential", format::yes_no(range.is_sequential()));
    print::aligned_line("prefix", prefix);
    print::aligned_line("prefix block", format::yes_no(range.is_prefix_block()));
    print::aligned_line("single block", block);
    if range.is_multiple() {
        print::aligned_line("lower", format::colored_range(&range.lower()));
        print::aligned_line("upper", format::colored_range(&range.upper()));
    }

    print::header("string forms", 0);
    print::as_tree_one_level(format::string_forms(range));
}
