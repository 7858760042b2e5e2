use std::net::ToSocketAddrs;

use anyhow::Context;
use colored::*;
use rangr_core::config::ParseOptions;
use rangr_core::network::host::{HostWrapper, Resolver};
use rangr_core::network::range::AddressRange;
use tracing::debug;

use crate::terminal::{colors, format, print};

/// Looks names up through the operating system.
struct SystemResolver;

impl Resolver for SystemResolver {
    fn resolve(&self, name: &str) -> Option<AddressRange> {
        match (name, 0).to_socket_addrs() {
            Ok(mut addrs) => addrs.next().map(|addr| AddressRange::from(addr.ip())),
            Err(err) => {
                debug!(name, %err, "system lookup failed");
                None
            }
        }
    }
}

pub fn host(text: &str, resolve: bool, options: &ParseOptions) -> anyhow::Result<()> {
    let mut host = HostWrapper::parse(text, options).with_context(|| format!("invalid host '{text}'"))?;
    if resolve {
        host = host
            .resolve(&SystemResolver, options.policy)
            .with_context(|| format!("cannot apply the prefix length of '{text}'"))?;
    }

    let missing = || "-".color(colors::MUTED);
    print::set_key_width(["name", "address", "port", "service", "zone", "prefix"]);
    print::aligned_line("name", host.name().map_or_else(missing, |n| n.color(colors::PRIMARY)));
    print::aligned_line("address", host.address().map_or_else(missing, format::colored_range));
    print::aligned_line("port", host.port().map_or_else(missing, |p| p.to_string().color(colors::ACCENT)));
    print::aligned_line("service", host.service().map_or_else(missing, |s| s.color(colors::ACCENT)));
    print::aligned_line("zone", host.zone().map_or_else(missing, |z| z.color(colors::TEXT_DEFAULT)));
    print::aligned_line(
        "prefix",
        host.prefix_length().map_or_else(missing, |p| p.to_string().color(colors::PREFIX)),
    );
    Ok(())
}
