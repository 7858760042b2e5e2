pub mod contains;
pub mod host;
pub mod info;
pub mod mask;
pub mod sort;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use rangr_core::config::{EmptyPolicy, ParseOptions, SubnetPolicy};
use rangr_core::network::order::OrderingPolicy;
use rangr_core::network::parse::{ParsedAddress, parse_address};
use rangr_core::network::range::AddressRange;

#[derive(Parser)]
#[command(name = "rangr")]
#[command(about = "Parse, mask and sort IPv4, IPv6 and MAC address ranges.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// How a prefix length attached to an address is read
    #[arg(long, global = true, value_enum, default_value_t = PolicyArg::ZeroHost)]
    pub policy: PolicyArg,

    /// What an empty input parses to
    #[arg(long, global = true, value_enum, default_value_t = EmptyArg::Empty)]
    pub empty: EmptyArg,

    /// Read IPv4 segments with a leading zero as octal
    #[arg(long, global = true)]
    pub octal: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Less decoration
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every form of an address or range
    #[command(alias = "i")]
    Info { address: String },
    /// Mask an address range with a mask address
    #[command(alias = "m")]
    Mask {
        address: String,
        mask: String,
        /// Bitwise OR instead of AND
        #[arg(long)]
        or: bool,
        /// Fail when the result is not one contiguous range
        #[arg(long)]
        strict: bool,
    },
    /// Sort addresses (from arguments, or one per line on stdin)
    #[command(alias = "s")]
    Sort {
        inputs: Vec<String>,
        #[arg(long, value_enum, default_value_t = OrderArg::Default)]
        order: OrderArg,
    },
    /// Check which addresses fall inside a range
    #[command(alias = "c")]
    Contains {
        container: String,
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// Split a host string into name, address, port and service
    #[command(alias = "h")]
    Host {
        host: String,
        /// Look the name up with the system resolver
        #[arg(long)]
        resolve: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Explicit,
    ZeroHost,
    All,
}

impl From<PolicyArg> for SubnetPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Explicit => SubnetPolicy::Explicit,
            PolicyArg::ZeroHost => SubnetPolicy::ZeroHostSubnets,
            PolicyArg::All => SubnetPolicy::AllSubnets,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmptyArg {
    Empty,
    Loopback,
    Invalid,
}

impl From<EmptyArg> for EmptyPolicy {
    fn from(arg: EmptyArg) -> Self {
        match arg {
            EmptyArg::Empty => EmptyPolicy::Empty,
            EmptyArg::Loopback => EmptyPolicy::Loopback,
            EmptyArg::Invalid => EmptyPolicy::Invalid,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Default,
    Low,
    High,
}

impl From<OrderArg> for OrderingPolicy {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Default => OrderingPolicy::Default,
            OrderArg::Low => OrderingPolicy::PreferLow,
            OrderArg::High => OrderingPolicy::PreferHigh,
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default()
            .with_policy(self.policy.into())
            .with_empty_policy(self.empty.into())
            .with_octal(self.octal)
    }
}

/// Parses `text` into an address range, rejecting inputs that hold no address.
pub fn parse_range(text: &str, options: &ParseOptions) -> anyhow::Result<AddressRange> {
    let parsed = parse_address(text, options).with_context(|| format!("invalid address '{text}'"))?;
    match parsed {
        ParsedAddress::Address(range) => Ok(range),
        ParsedAddress::Empty => bail!("'{text}' is empty, an address is needed here"),
        ParsedAddress::All => bail!("'*' covers every family, pick one such as '*.*.*.*' or '*:*'"),
        ParsedAddress::PrefixOnly(p) => bail!("'/{p}' is a prefix length without an address"),
    }
}
