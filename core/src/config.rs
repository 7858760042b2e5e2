//! # Parser Configuration
//!
//! All switches that change what the parser accepts and how prefixed addresses are
//! interpreted. Values are plain data, passed into every parse call.

/// How a prefix length attached to an address is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubnetPolicy {
    /// Every prefixed address denotes its whole prefix block (`1.2.3.4/16` is `1.2.*.*`).
    AllSubnets,
    /// Only a prefixed address whose host bits are zero denotes its block
    /// (`1.2.0.0/16` is `1.2.*.*`, `1.2.3.4/16` stays a single address).
    #[default]
    ZeroHostSubnets,
    /// The prefix length is metadata only and never expands the address.
    Explicit,
}

impl SubnetPolicy {
    pub fn all_prefixed_addresses_are_subnets(&self) -> bool {
        matches!(self, Self::AllSubnets)
    }

    pub fn prefixed_subnets_are_explicit(&self) -> bool {
        matches!(self, Self::Explicit)
    }
}

/// What an empty (or blank) input parses to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmptyPolicy {
    /// A distinct "empty" value.
    #[default]
    Empty,
    /// The IPv4 loopback address.
    Loopback,
    /// A parse failure.
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    pub policy: SubnetPolicy,
    pub empty: EmptyPolicy,
    /// `0x` prefixed IPv4 segments.
    pub inet_aton_hex: bool,
    /// Leading zero means octal for IPv4 segments. When off, leading zeros are decimal.
    pub inet_aton_octal: bool,
    /// Fewer than four IPv4 segments, the last one covering the remaining bits.
    pub inet_aton_joined_segments: bool,
    pub allow_wildcards: bool,
    pub allow_ranges: bool,
    pub allow_zone: bool,
    /// Trailing `/mask` written as an address.
    pub allow_mask: bool,
    /// A bare `/n` with no address.
    pub allow_prefix_only: bool,
    /// A bare `*` denoting every address of every family.
    pub allow_all: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            policy: SubnetPolicy::default(),
            empty: EmptyPolicy::default(),
            inet_aton_hex: true,
            inet_aton_octal: false,
            inet_aton_joined_segments: true,
            allow_wildcards: true,
            allow_ranges: true,
            allow_zone: true,
            allow_mask: true,
            allow_prefix_only: true,
            allow_all: true,
        }
    }
}

impl ParseOptions {
    pub fn with_policy(mut self, policy: SubnetPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_empty_policy(mut self, empty: EmptyPolicy) -> Self {
        self.empty = empty;
        self
    }

    pub fn with_octal(mut self, octal: bool) -> Self {
        self.inet_aton_octal = octal;
        self
    }

    /// Plain single addresses only: no wildcards, ranges, or inet_aton shortcuts.
    pub fn strict() -> Self {
        Self {
            inet_aton_hex: false,
            inet_aton_joined_segments: false,
            allow_wildcards: false,
            allow_ranges: false,
            allow_prefix_only: false,
            allow_all: false,
            ..Self::default()
        }
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
