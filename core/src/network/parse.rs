//! # Address Parser
//!
//! Turns text into an [`AddressRange`] (or one of the address-less outcomes in
//! [`ParsedAddress`]). Supported syntax:
//!
//! * **IPv4**: `1.2.3.4`, wildcards `1.2.*.*`, ranges `1.2.3-4.0`, inet_aton forms
//!   (`0x7f.1`, `16909060`, octal when enabled), short forms with a wildcard absorbing the
//!   missing segments (`1.*`), address ranges `1.2.3.4-1.2.3.9` and `10.0.0.1-2.255`.
//! * **IPv6**: colon-hex with `::`, mixed `::ffff:1.2.3.4`, `%zone`, bracketed `[::1]`,
//!   32-digit hex values, RFC 1924 base-85.
//! * **MAC**: `aa:bb:cc:dd:ee:ff`, `aa-bb-cc-dd-ee-ff` (ranges with `|`), `aabb.ccdd.eeff`.
//! * **Reverse DNS**: `in-addr.arpa` and `ip6.arpa`; UNC `ipv6-literal.net` hosts.
//! * A trailing `/prefix` or `/mask`.
//!
//! Parsing is pure: the result depends only on the text and the [`ParseOptions`].

use std::str::FromStr;

use crate::config::{EmptyPolicy, ParseOptions};
use crate::error::{AddressError, ErrorKind, ParseError};
use crate::network::format::{
    self, Family, Radix, ALT_RANGE_SEPARATOR, BASE85_LEN, BASE85_ZONE_SEPARATOR,
    ENCODED_ZONE_SEPARATOR, EXTENDED_RANGE_SEPARATOR, HEX_PREFIX, IPV4_REVERSE_DNS_SUFFIX,
    IPV6_LITERAL_NET_SUFFIX, IPV6_LITERAL_NET_ZONE_SEPARATOR, IPV6_REVERSE_DNS_SUFFIX,
    PREFIX_SEPARATOR, RANGE_SEPARATOR, WILDCARD, ZONE_SEPARATOR,
};
use crate::network::host::HostWrapper;
use crate::network::mask;
use crate::network::range::{self, AddressRange};
use crate::network::segment::{self, SegmentValue};

/// Outcome of parsing address text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAddress {
    /// Empty or blank input.
    Empty,
    /// `*`: every address of every family.
    All,
    /// `/n`: a prefix length with no address.
    PrefixOnly(u8),
    Address(AddressRange),
}

impl ParsedAddress {
    pub fn address(&self) -> Option<&AddressRange> {
        match self {
            Self::Address(range) => Some(range),
            _ => None,
        }
    }

    pub fn into_address(self) -> Option<AddressRange> {
        match self {
            Self::Address(range) => Some(range),
            _ => None,
        }
    }
}

/// Parses `text` with `options`.
pub fn parse_address(text: &str, options: &ParseOptions) -> Result<ParsedAddress, ParseError> {
    Parser::new(text, options).parse()
}

/// An address, or a host string carrying a name, port or service.
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Address(ParsedAddress),
    Host(HostWrapper),
}

/// Parses `text` as an address, falling back to a host string.
///
/// When both readings fail the address error is returned, since it points closer to the
/// problem for anything that looks numeric.
pub fn parse(text: &str, options: &ParseOptions) -> Result<ParseOutcome, ParseError> {
    match parse_address(text, options) {
        Ok(parsed) => Ok(ParseOutcome::Address(parsed)),
        Err(err) => HostWrapper::parse(text, options)
            .map(ParseOutcome::Host)
            .map_err(|_| err),
    }
}

impl FromStr for AddressRange {
    type Err = ParseError;

    /// Parses with default options. Empty, `*` and prefix-only inputs are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_address(s, &ParseOptions::default())? {
            ParsedAddress::Address(range) => Ok(range),
            _ => Err(ParseError::new(
                ErrorKind::MalformedSyntax,
                s,
                s,
                0,
                "not an address",
            )),
        }
    }
}

/// Inclusive bounds of one parsed token.
#[derive(Debug, Clone, Copy)]
struct Token {
    lower: u128,
    upper: u128,
}

#[derive(Clone, Copy)]
enum Digits {
    /// inet_aton rules: decimal, `0x` hex, leading-zero octal.
    Ipv4,
    /// Plain hex with a digit limit.
    Hex(usize),
}

pub(crate) struct Parser<'a> {
    input: &'a str,
    options: &'a ParseOptions,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a str, options: &'a ParseOptions) -> Self {
        Self { input, options }
    }

    /// Byte offset of `part` inside the input, 0 when `part` is not a slice of it.
    fn pos(&self, part: &str) -> usize {
        let base = self.input.as_ptr() as usize;
        let start = part.as_ptr() as usize;
        if start >= base && start <= base + self.input.len() {
            start - base
        } else {
            0
        }
    }

    fn error(&self, kind: ErrorKind, part: &str, reason: &'static str) -> ParseError {
        ParseError::new(kind, self.input, part, self.pos(part), reason)
    }

    fn malformed(&self, part: &str, reason: &'static str) -> ParseError {
        self.error(ErrorKind::MalformedSyntax, part, reason)
    }

    fn from_address_error(&self, err: AddressError, part: &str) -> ParseError {
        let reason = match err {
            AddressError::Incompatible(reason) => reason,
            AddressError::FamilyMismatch(..) => "address families differ",
            AddressError::PrefixOutOfBounds { .. } => "prefix exceeds the address bit count",
            AddressError::InvalidByteLength(_) => "invalid byte length",
        };
        self.error(err.kind(), part, reason)
    }

    /// Moves an error raised while parsing rewritten text back onto the original input.
    fn rebase(&self, err: ParseError, part: &str) -> ParseError {
        ParseError {
            input: self.input.to_string(),
            position: self.pos(part),
            ..err
        }
    }

    fn parse(&self) -> Result<ParsedAddress, ParseError> {
        let text = self.input.trim();
        if text.is_empty() {
            return match self.options.empty {
                EmptyPolicy::Empty => Ok(ParsedAddress::Empty),
                EmptyPolicy::Loopback => Ok(ParsedAddress::Address(AddressRange::ipv4(127, 0, 0, 1))),
                EmptyPolicy::Invalid => Err(self.malformed(text, "empty address")),
            };
        }
        if text.len() == 1 && text.starts_with(WILDCARD) && self.options.allow_all {
            return Ok(ParsedAddress::All);
        }
        if let Some(prefix) = text.strip_prefix(PREFIX_SEPARATOR) {
            if !self.options.allow_prefix_only {
                return Err(self.malformed(text, "prefix length without an address"));
            }
            let bits = self.parse_prefix_length(prefix, Family::Ipv6.bit_count())?;
            return Ok(ParsedAddress::PrefixOnly(bits));
        }
        self.parse_range(text, false).map(ParsedAddress::Address)
    }

    /// Address with optional zone and `/suffix`. `bracketed` enables `%25` zone decoding.
    pub(crate) fn parse_range(&self, text: &str, bracketed: bool) -> Result<AddressRange, ParseError> {
        if let Some(inner) = text.strip_prefix('[') {
            return self.parse_bracketed(inner);
        }

        let lower = text.to_ascii_lowercase();
        if let Some(labels) = strip_suffix_ignoring_dot(&lower, IPV4_REVERSE_DNS_SUFFIX) {
            return self.parse_reverse_ipv4(&text[..labels.len()]);
        }
        if let Some(labels) = strip_suffix_ignoring_dot(&lower, IPV6_REVERSE_DNS_SUFFIX) {
            return self.parse_reverse_ipv6(&text[..labels.len()]);
        }
        if let Some(host) = strip_suffix_ignoring_dot(&lower, IPV6_LITERAL_NET_SUFFIX) {
            return self.parse_literal_net(&text[..host.len()]);
        }

        // text made of hex digits, `x`, `*`, `-` and `|` is base 85 only when no other reading fits
        let delimited_syntax = is_delimited_syntax(text);
        if !delimited_syntax {
            if let Some(range) = self.try_base85(text)? {
                return Ok(range);
            }
        }

        let (body, suffix) = match text.rfind(PREFIX_SEPARATOR) {
            Some(i) => (&text[..i], Some(&text[i + 1..])),
            None => (text, None),
        };
        let parsed = self.parse_body(body, bracketed).and_then(|range| match suffix {
            Some(suffix) => self.apply_suffix(range, suffix),
            None => Ok(range),
        });
        match parsed {
            Err(err) if delimited_syntax => match self.try_base85(text) {
                Ok(Some(range)) => Ok(range),
                _ => Err(err),
            },
            parsed => parsed,
        }
    }

    fn parse_bracketed(&self, inner: &str) -> Result<AddressRange, ParseError> {
        let Some(close) = inner.find(']') else {
            return Err(self.malformed(inner, "missing closing bracket"));
        };
        let (body, rest) = (&inner[..close], &inner[close + 1..]);
        let range = self.parse_range(body, true)?;
        if !range.is_ipv6() {
            return Err(self.malformed(body, "brackets must enclose an IPv6 address"));
        }
        if rest.is_empty() {
            return Ok(range);
        }
        match rest.strip_prefix(PREFIX_SEPARATOR) {
            Some(suffix) => self.apply_suffix(range, suffix),
            None => Err(self.malformed(rest, "unexpected text after closing bracket")),
        }
    }

    /// Address text without prefix suffix.
    fn parse_body(&self, body: &str, bracketed: bool) -> Result<AddressRange, ParseError> {
        let (addr, zone) = self.split_zone(body, bracketed)?;
        if addr.is_empty() {
            return Err(self.malformed(body, "missing address"));
        }

        let range = if addr.contains(':') {
            if is_mac_colon(addr) {
                self.parse_mac(addr, ':', RANGE_SEPARATOR)?
            } else {
                self.parse_ipv6_or_range(addr)?
            }
        } else if addr.contains('.') {
            if is_mac_dotted(addr) {
                self.parse_mac_dotted(addr)?
            } else {
                self.parse_ipv4_or_range(addr)?
            }
        } else if is_mac_dashed(addr) {
            self.parse_mac(addr, format::MAC_DASH_SEPARATOR, ALT_RANGE_SEPARATOR)?
        } else {
            self.parse_undelimited(addr)?
        };

        match zone {
            Some(zone) if !range.is_ipv6() => {
                Err(self.malformed(zone, "only IPv6 addresses carry a zone"))
            }
            Some(zone) => range
                .with_zone(zone)
                .map_err(|e| self.from_address_error(e, zone)),
            None => Ok(range),
        }
    }

    fn split_zone<'s>(&self, body: &'s str, bracketed: bool) -> Result<(&'s str, Option<&'s str>), ParseError> {
        let Some(i) = body.find(ZONE_SEPARATOR) else {
            return Ok((body, None));
        };
        let rest = &body[i..];
        let zone = if bracketed && rest.starts_with(ENCODED_ZONE_SEPARATOR) {
            &rest[ENCODED_ZONE_SEPARATOR.len()..]
        } else {
            &rest[1..]
        };
        self.check_zone(zone)?;
        Ok((&body[..i], Some(zone)))
    }

    fn check_zone(&self, zone: &str) -> Result<(), ParseError> {
        if !self.options.allow_zone {
            return Err(self.error(ErrorKind::ZoneMalformed, zone, "zones are not allowed"));
        }
        if zone.is_empty() {
            return Err(self.error(ErrorKind::ZoneMalformed, zone, "empty zone"));
        }
        if zone.chars().any(format::is_reserved_zone_char) {
            return Err(self.error(ErrorKind::ZoneMalformed, zone, "reserved character in zone"));
        }
        Ok(())
    }

    fn apply_suffix(&self, range: AddressRange, suffix: &str) -> Result<AddressRange, ParseError> {
        if suffix.is_empty() {
            return Err(self.malformed(suffix, "missing prefix length"));
        }
        let policy = self.options.policy;
        if suffix.bytes().all(|b| b.is_ascii_digit()) {
            let prefix = self.parse_prefix_length(suffix, range.family().bit_count())?;
            return range
                .apply_prefix(prefix, policy)
                .map_err(|e| self.from_address_error(e, suffix));
        }
        if suffix.starts_with(RANGE_SEPARATOR) {
            return Err(self.error(
                ErrorKind::PrefixOutOfBounds,
                suffix,
                "negative prefix length",
            ));
        }
        if !self.options.allow_mask || !range.family().is_ip() {
            return Err(self.malformed(suffix, "invalid prefix length"));
        }

        let mask = self.parse_body(suffix, false)?;
        if mask.family() != range.family() {
            return Err(self.malformed(suffix, "mask family differs from the address"));
        }
        if mask.is_multiple() {
            return Err(self.error(
                ErrorKind::IncompatibleAddress,
                suffix,
                "mask must be a single address",
            ));
        }
        let bits = range.family().bit_count();
        match mask::prefix_len_of_network_mask(mask.lower_value(), bits) {
            Some(prefix) => range
                .apply_prefix(prefix as u8, policy)
                .map_err(|e| self.from_address_error(e, suffix)),
            None => {
                let masked = range
                    .mask(&mask)
                    .map_err(|e| self.from_address_error(e, suffix))?;
                if !masked.sequential {
                    return Err(self.error(
                        ErrorKind::IncompatibleAddress,
                        suffix,
                        "mask produces a non-contiguous range",
                    ));
                }
                Ok(masked.range.without_prefix_length())
            }
        }
    }

    fn parse_prefix_length(&self, text: &str, bits: u32) -> Result<u8, ParseError> {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.malformed(text, "invalid prefix length"));
        }
        let out_of_bounds =
            || self.error(ErrorKind::PrefixOutOfBounds, text, "prefix exceeds the address bit count");
        let value: u32 = text.parse().map_err(|_| out_of_bounds())?;
        if value > bits {
            return Err(out_of_bounds());
        }
        Ok(value as u8)
    }

    // ---------------------------------------------------------------- tokens

    fn parse_number(&self, text: &str, digits: Digits) -> Result<(u128, Radix), ParseError> {
        if text.is_empty() {
            return Err(self.malformed(text, "missing digits"));
        }
        let (body, radix) = match digits {
            Digits::Ipv4 => {
                if let Some(hex) = text.strip_prefix(HEX_PREFIX).or_else(|| text.strip_prefix("0X")) {
                    if !self.options.inet_aton_hex {
                        return Err(self.malformed(text, "hex IPv4 segments are not allowed"));
                    }
                    (hex, Radix::Hex)
                } else if text.len() > 1 && text.starts_with(format::OCTAL_PREFIX) && self.options.inet_aton_octal {
                    (&text[1..], Radix::Octal)
                } else {
                    (text, Radix::Decimal)
                }
            }
            Digits::Hex(max_digits) => {
                if text.len() > max_digits {
                    return Err(self.malformed(text, "too many digits in segment"));
                }
                (text, Radix::Hex)
            }
        };
        if body.is_empty() {
            return Err(self.malformed(text, "missing digits"));
        }
        let value = self.accumulate(body, radix)?;
        Ok((value, radix))
    }

    fn accumulate(&self, text: &str, radix: Radix) -> Result<u128, ParseError> {
        let mut value: u128 = 0;
        for c in text.chars() {
            let digit = radix
                .digit(c)
                .ok_or_else(|| self.malformed(text, "invalid digit"))?;
            value = value
                .checked_mul(radix.base() as u128)
                .and_then(|v| v.checked_add(digit as u128))
                .ok_or_else(|| self.malformed(text, "value too large"))?;
        }
        Ok(value)
    }

    /// One segment token: a value, `*`, or `lo-hi` with either bound optional.
    fn parse_token(&self, text: &str, max: u128, digits: Digits, range_separator: char) -> Result<Token, ParseError> {
        if text.len() == 1 && text.starts_with(WILDCARD) {
            if !self.options.allow_wildcards {
                return Err(self.malformed(text, "wildcards are not allowed"));
            }
            return Ok(Token { lower: 0, upper: max });
        }

        let too_large = |part: &str| self.malformed(part, "value exceeds the segment maximum");

        let Some((lo_text, hi_text)) = text.split_once(range_separator) else {
            let (value, _) = self.parse_number(text, digits)?;
            if value > max {
                return Err(too_large(text));
            }
            return Ok(Token { lower: value, upper: value });
        };

        if !self.options.allow_ranges {
            return Err(self.malformed(text, "ranges are not allowed"));
        }
        let lower = if lo_text.is_empty() {
            None
        } else {
            Some(self.parse_number(lo_text, digits)?)
        };
        let upper = if hi_text.is_empty() {
            None
        } else {
            Some(self.parse_number(hi_text, digits)?)
        };
        if let (Some((lo, lo_radix)), Some((hi, hi_radix))) = (lower, upper) {
            // a bare zero reads the same in every radix
            let neutral = lo_text == "0" || hi_text == "0";
            if lo_radix != hi_radix && !neutral && lo != hi {
                return Err(self.malformed(text, "range bounds use different radices"));
            }
        }
        let lower = lower.map_or(0, |(v, _)| v);
        let upper = upper.map_or(max, |(v, _)| v);
        if lower > max {
            return Err(too_large(lo_text));
        }
        if upper > max {
            return Err(too_large(hi_text));
        }
        if lower > upper {
            return Err(self.error(
                ErrorKind::RangeOrderInverted,
                text,
                "range lower bound exceeds upper bound",
            ));
        }
        Ok(Token { lower, upper })
    }

    fn segment(&self, text: &str, max: u128, digits: Digits, range_separator: char) -> Result<SegmentValue, ParseError> {
        let token = self.parse_token(text, max, digits, range_separator)?;
        SegmentValue::new(token.lower as u16, token.upper as u16)
            .ok_or_else(|| self.error(ErrorKind::RangeOrderInverted, text, "range lower bound exceeds upper bound"))
    }

    fn build(&self, family: Family, segments: &[SegmentValue], part: &str) -> Result<AddressRange, ParseError> {
        AddressRange::new(family, segments).map_err(|e| self.from_address_error(e, part))
    }

    /// Index of the wildcard segment that absorbs missing segments, if wildcards are allowed.
    fn absorbing_wildcard(&self, groups: &[&str]) -> Option<usize> {
        if !self.options.allow_wildcards {
            return None;
        }
        groups.iter().rposition(|g| g.len() == 1 && g.starts_with(WILDCARD))
    }

    // ---------------------------------------------------------------- IPv4

    fn parse_ipv4_or_range(&self, addr: &str) -> Result<AddressRange, ParseError> {
        match self.parse_ipv4(addr) {
            Ok(range) => Ok(range),
            Err(err) => match self.parse_ipv4_address_range(addr) {
                Some(result) => result,
                None => Err(err),
            },
        }
    }

    fn parse_ipv4(&self, addr: &str) -> Result<AddressRange, ParseError> {
        let groups: Vec<&str> = addr.split(format::IPV4_SEPARATOR).collect();
        if groups.len() > Family::Ipv4.segment_count() {
            return Err(self.malformed(addr, "too many IPv4 segments"));
        }
        if let Some(empty) = groups.iter().find(|g| g.is_empty()) {
            return Err(self.malformed(empty, "empty segment"));
        }

        let count = groups.len();
        let mut segments = Vec::with_capacity(4);
        if count == 4 {
            for group in &groups {
                segments.push(self.segment(group, 0xff, Digits::Ipv4, RANGE_SEPARATOR)?);
            }
        } else if let Some(wildcard) = self.absorbing_wildcard(&groups) {
            for (i, group) in groups.iter().enumerate() {
                if i == wildcard {
                    segments.extend(std::iter::repeat_n(SegmentValue::full(8), 4 - count + 1));
                } else {
                    segments.push(self.segment(group, 0xff, Digits::Ipv4, RANGE_SEPARATOR)?);
                }
            }
        } else if self.options.inet_aton_joined_segments {
            let Some((last, leading)) = groups.split_last() else {
                return Err(self.malformed(addr, "missing address"));
            };
            for group in leading {
                segments.push(self.segment(group, 0xff, Digits::Ipv4, RANGE_SEPARATOR)?);
            }
            let joined = 4 - leading.len();
            let max = mask::width_max(8 * joined as u32);
            let token = self.parse_token(last, max, Digits::Ipv4, RANGE_SEPARATOR)?;
            let split = segment::split_value_range(token.lower, token.upper, joined, 8).ok_or_else(|| {
                self.error(
                    ErrorKind::IncompatibleAddress,
                    last,
                    "range spanning segments has no per-segment form",
                )
            })?;
            segments.extend(split);
        } else {
            return Err(self.malformed(addr, "too few IPv4 segments"));
        }
        self.build(Family::Ipv4, &segments, addr)
    }

    /// `start-end` where `end` is a full address or its trailing octets (`10.0.0.1-2.255`).
    fn parse_ipv4_address_range(&self, addr: &str) -> Option<Result<AddressRange, ParseError>> {
        for (i, _) in addr.match_indices(RANGE_SEPARATOR) {
            let (start_text, end_text) = (&addr[..i], &addr[i + 1..]);
            if !start_text.contains('.') || end_text.is_empty() {
                continue;
            }
            let Ok(start) = self.parse_ipv4(start_text) else {
                continue;
            };
            if start.is_multiple() {
                continue;
            }
            let Some(end) = self.parse_range_end(end_text, &start) else {
                continue;
            };
            return Some(self.range_between(&start, &end, addr));
        }
        None
    }

    fn parse_range_end(&self, end_text: &str, start: &AddressRange) -> Option<AddressRange> {
        let groups: Vec<&str> = end_text.split(format::IPV4_SEPARATOR).collect();
        if groups.len() == 4 {
            return self.parse_ipv4(end_text).ok().filter(|end| !end.is_multiple());
        }
        if groups.len() > 4 {
            return None;
        }
        let mut octets: Vec<SegmentValue> = start.segments().to_vec();
        let offset = 4 - groups.len();
        for (i, group) in groups.iter().enumerate() {
            let token = self.parse_token(group, 0xff, Digits::Ipv4, RANGE_SEPARATOR).ok()?;
            if token.lower != token.upper {
                return None;
            }
            octets[offset + i] = SegmentValue::single(token.lower as u16);
        }
        AddressRange::new(Family::Ipv4, &octets).ok()
    }

    fn range_between(&self, start: &AddressRange, end: &AddressRange, part: &str) -> Result<AddressRange, ParseError> {
        let (lower, upper) = (start.lower_value(), end.lower_value());
        if lower > upper {
            return Err(self.error(
                ErrorKind::RangeOrderInverted,
                part,
                "range start exceeds range end",
            ));
        }
        AddressRange::from_value_range(start.family(), lower, upper).map_err(|_| {
            self.error(
                ErrorKind::IncompatibleAddress,
                part,
                "address range has no per-segment form",
            )
        })
    }

    // ---------------------------------------------------------------- IPv6

    fn parse_ipv6_or_range(&self, addr: &str) -> Result<AddressRange, ParseError> {
        match self.parse_ipv6(addr) {
            Ok(range) => Ok(range),
            Err(err) => {
                for (i, _) in addr.match_indices(RANGE_SEPARATOR) {
                    let (start_text, end_text) = (&addr[..i], &addr[i + 1..]);
                    if !start_text.contains(':') || !end_text.contains(':') {
                        continue;
                    }
                    let (Ok(start), Ok(end)) = (self.parse_ipv6(start_text), self.parse_ipv6(end_text)) else {
                        continue;
                    };
                    if start.is_multiple() || end.is_multiple() {
                        continue;
                    }
                    return self.range_between(&start, &end, addr);
                }
                Err(err)
            }
        }
    }

    fn parse_ipv6(&self, addr: &str) -> Result<AddressRange, ParseError> {
        if addr.matches("::").count() > 1 {
            return Err(self.malformed(addr, "'::' appears more than once"));
        }
        let (head, tail) = match addr.split_once("::") {
            Some((head, tail)) => (head, Some(tail)),
            None => (addr, None),
        };
        let mut head_groups: Vec<&str> = if head.is_empty() && tail.is_some() {
            Vec::new()
        } else {
            head.split(':').collect()
        };
        let mut tail_groups: Vec<&str> = match tail {
            Some(tail) if !tail.is_empty() => tail.split(':').collect(),
            _ => Vec::new(),
        };

        // trailing dotted IPv4 fills the last two segments
        let last_list = if tail.is_some() { &mut tail_groups } else { &mut head_groups };
        let mixed_text = last_list.last().copied().filter(|g| g.contains('.'));
        let mixed = match mixed_text {
            Some(text) => {
                last_list.pop();
                Some(self.parse_mixed_tail(text)?)
            }
            None => None,
        };

        let mixed_count = if mixed.is_some() { 2 } else { 0 };
        let explicit = head_groups.len() + tail_groups.len() + mixed_count;

        let mut segments = Vec::with_capacity(8);
        if tail.is_some() {
            if explicit > 7 {
                return Err(self.malformed(addr, "too many IPv6 segments"));
            }
            for group in &head_groups {
                segments.push(self.ipv6_segment(group)?);
            }
            segments.extend(std::iter::repeat_n(SegmentValue::single(0), 8 - explicit));
            for group in &tail_groups {
                segments.push(self.ipv6_segment(group)?);
            }
        } else if explicit == 8 {
            for group in &head_groups {
                segments.push(self.ipv6_segment(group)?);
            }
        } else if explicit > 8 {
            return Err(self.malformed(addr, "too many IPv6 segments"));
        } else if let Some(wildcard) = self.absorbing_wildcard(&head_groups) {
            for (i, group) in head_groups.iter().enumerate() {
                if i == wildcard {
                    segments.extend(std::iter::repeat_n(SegmentValue::full(16), 8 - explicit + 1));
                } else {
                    segments.push(self.ipv6_segment(group)?);
                }
            }
        } else {
            return Err(self.malformed(addr, "too few IPv6 segments"));
        }
        if let Some([high, low]) = mixed {
            segments.push(high);
            segments.push(low);
        }
        self.build(Family::Ipv6, &segments, addr)
    }

    fn ipv6_segment(&self, group: &str) -> Result<SegmentValue, ParseError> {
        if group.is_empty() {
            return Err(self.malformed(group, "empty segment"));
        }
        self.segment(group, 0xffff, Digits::Hex(4), RANGE_SEPARATOR)
    }

    fn parse_mixed_tail(&self, text: &str) -> Result<[SegmentValue; 2], ParseError> {
        let v4 = self.parse_ipv4(text)?;
        let octets = v4.segments();
        let join = |high, low| {
            range::join_pair(high, low).map_err(|e| self.from_address_error(e, text))
        };
        Ok([join(octets[0], octets[1])?, join(octets[2], octets[3])?])
    }

    /// Text with no separators: 32-digit or `0x` prefixed IPv6 hex, otherwise inet_aton IPv4.
    fn parse_undelimited(&self, addr: &str) -> Result<AddressRange, ParseError> {
        let first = addr.split(RANGE_SEPARATOR).next().unwrap_or(addr);
        let prefixed = first.strip_prefix(HEX_PREFIX).or_else(|| first.strip_prefix("0X"));
        let is_ipv6 = match prefixed {
            Some(digits) => digits.len() > 8,
            None => first.len() == 32 && first.bytes().all(|b| b.is_ascii_hexdigit()),
        };
        if !is_ipv6 {
            return self.parse_ipv4(addr);
        }
        let value = |text: &str| -> Result<u128, ParseError> {
            let digits = text
                .strip_prefix(HEX_PREFIX)
                .or_else(|| text.strip_prefix("0X"))
                .unwrap_or(text);
            if digits.is_empty() || digits.len() > 32 {
                return Err(self.malformed(text, "IPv6 hex value needs 1 to 32 digits"));
            }
            self.accumulate(digits, Radix::Hex)
        };
        let (lower, upper) = match addr.split_once(RANGE_SEPARATOR) {
            Some((lo, hi)) => {
                if !self.options.allow_ranges {
                    return Err(self.malformed(addr, "ranges are not allowed"));
                }
                (value(lo)?, value(hi)?)
            }
            None => {
                let v = value(addr)?;
                (v, v)
            }
        };
        if lower > upper {
            return Err(self.error(
                ErrorKind::RangeOrderInverted,
                addr,
                "range lower bound exceeds upper bound",
            ));
        }
        AddressRange::from_value_range(Family::Ipv6, lower, upper).map_err(|e| self.from_address_error(e, addr))
    }

    fn try_base85(&self, text: &str) -> Result<Option<AddressRange>, ParseError> {
        let (main, suffix) = match text.rfind(PREFIX_SEPARATOR) {
            Some(i) => (&text[..i], Some(&text[i + 1..])),
            None => (text, None),
        };
        let (body, zone) = match main.find(BASE85_ZONE_SEPARATOR) {
            Some(i) => (&main[..i], Some(&main[i + BASE85_ZONE_SEPARATOR.len_utf8()..])),
            None => (main, None),
        };
        let (lo_text, hi_text) = match body.split_once(EXTENDED_RANGE_SEPARATOR) {
            Some((lo, hi)) => (lo, Some(hi)),
            None => (body, None),
        };
        if !is_base85_value(lo_text) || hi_text.is_some_and(|hi| !is_base85_value(hi)) {
            return Ok(None);
        }

        let lower = self.accumulate(lo_text, Radix::Base85)?;
        let upper = match hi_text {
            Some(hi) => self.accumulate(hi, Radix::Base85)?,
            None => lower,
        };
        if lower > upper {
            return Err(self.error(
                ErrorKind::RangeOrderInverted,
                body,
                "range lower bound exceeds upper bound",
            ));
        }
        let mut range = AddressRange::from_value_range(Family::Ipv6, lower, upper)
            .map_err(|e| self.from_address_error(e, body))?;
        if let Some(zone) = zone {
            self.check_zone(zone)?;
            range = range.with_zone(zone).map_err(|e| self.from_address_error(e, zone))?;
        }
        match suffix {
            Some(suffix) => self.apply_suffix(range, suffix).map(Some),
            None => Ok(Some(range)),
        }
    }

    // ---------------------------------------------------------------- MAC

    fn parse_mac(&self, addr: &str, separator: char, range_separator: char) -> Result<AddressRange, ParseError> {
        let groups: Vec<&str> = addr.split(separator).collect();
        if groups.len() != Family::Mac.segment_count() {
            return Err(self.malformed(addr, "MAC address needs six segments"));
        }
        let mut segments = Vec::with_capacity(6);
        for group in &groups {
            if group.is_empty() {
                return Err(self.malformed(group, "empty segment"));
            }
            segments.push(self.segment(group, 0xff, Digits::Hex(2), range_separator)?);
        }
        self.build(Family::Mac, &segments, addr)
    }

    fn parse_mac_dotted(&self, addr: &str) -> Result<AddressRange, ParseError> {
        let mut segments = Vec::with_capacity(6);
        for group in addr.split(format::MAC_DOTTED_SEPARATOR) {
            let joined = self.segment(group, 0xffff, Digits::Hex(4), RANGE_SEPARATOR)?;
            let (high, low) = range::split_pair(joined).map_err(|e| self.from_address_error(e, group))?;
            segments.push(high);
            segments.push(low);
        }
        self.build(Family::Mac, &segments, addr)
    }

    // ---------------------------------------------------------------- reverse DNS

    fn parse_reverse_ipv4(&self, labels_text: &str) -> Result<AddressRange, ParseError> {
        let labels: Vec<&str> = labels_text.split('.').collect();
        if labels.len() > 4 {
            return Err(self.malformed(labels_text, "too many in-addr.arpa labels"));
        }
        let mut segments = Vec::with_capacity(4);
        for label in labels.iter().rev() {
            if label.is_empty() {
                return Err(self.malformed(label, "empty label"));
            }
            segments.push(self.segment(label, 0xff, Digits::Ipv4, RANGE_SEPARATOR)?);
        }
        let given = segments.len();
        segments.resize(4, SegmentValue::full(8));
        let range = self.build(Family::Ipv4, &segments, labels_text)?;
        if given < 4 {
            return range
                .with_prefix_length((given * 8) as u8)
                .map_err(|e| self.from_address_error(e, labels_text));
        }
        Ok(range)
    }

    fn parse_reverse_ipv6(&self, labels_text: &str) -> Result<AddressRange, ParseError> {
        let labels: Vec<&str> = labels_text.split('.').collect();
        if labels.len() > 32 {
            return Err(self.malformed(labels_text, "too many ip6.arpa labels"));
        }
        let mut nibbles = Vec::with_capacity(32);
        for label in labels.iter().rev() {
            if label.is_empty() {
                return Err(self.malformed(label, "empty label"));
            }
            nibbles.push(self.segment(label, 0xf, Digits::Hex(1), RANGE_SEPARATOR)?);
        }
        let given = nibbles.len();
        nibbles.resize(32, SegmentValue::full(4));

        let mut segments = Vec::with_capacity(8);
        for chunk in nibbles.chunks(4) {
            if !segment::is_sequential(chunk, 4) {
                return Err(self.error(
                    ErrorKind::IncompatibleAddress,
                    labels_text,
                    "nibble ranges have no per-segment form",
                ));
            }
            let (lower, upper) = segment::join_value_range(chunk, 4);
            segments.push(SegmentValue::new(lower as u16, upper as u16).ok_or_else(|| {
                self.error(ErrorKind::RangeOrderInverted, labels_text, "range lower bound exceeds upper bound")
            })?);
        }
        let range = self.build(Family::Ipv6, &segments, labels_text)?;
        if given < 32 {
            return range
                .with_prefix_length((given * 4) as u8)
                .map_err(|e| self.from_address_error(e, labels_text));
        }
        Ok(range)
    }

    fn parse_literal_net(&self, host: &str) -> Result<AddressRange, ParseError> {
        let (addr, zone) = match host.find(IPV6_LITERAL_NET_ZONE_SEPARATOR) {
            Some(i) => (&host[..i], Some(&host[i + 1..])),
            None => (host, None),
        };
        let converted: String = addr
            .chars()
            .map(|c| match c {
                format::IPV6_LITERAL_NET_SEPARATOR => ':',
                EXTENDED_RANGE_SEPARATOR => RANGE_SEPARATOR,
                c => c,
            })
            .collect();
        let inner = Parser::new(&converted, self.options);
        let range = inner
            .parse_ipv6_or_range(&converted)
            .map_err(|e| self.rebase(e, host))?;
        match zone {
            Some(zone) => {
                self.check_zone(zone)?;
                range.with_zone(zone).map_err(|e| self.from_address_error(e, zone))
            }
            None => Ok(range),
        }
    }
}

/// `text` without `suffix` (and an optional final `.`), when it ends with `suffix`.
fn strip_suffix_ignoring_dot<'s>(text: &'s str, suffix: &str) -> Option<&'s str> {
    let text = text.strip_suffix('.').unwrap_or(text);
    text.strip_suffix(suffix)
}

/// Characters the hex, MAC and wildcard syntaxes share with the base 85 alphabet, plus `/`.
fn is_delimited_syntax(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_ascii_hexdigit() || matches!(c, 'x' | 'X' | '*' | '-' | '|' | '/'))
}

fn is_base85_value(text: &str) -> bool {
    text.chars().count() == BASE85_LEN && text.chars().all(|c| format::base85_digit(c).is_some())
}

fn is_hex_group(text: &str, max_len: usize) -> bool {
    !text.is_empty() && text.len() <= max_len && text.bytes().all(|b| b.is_ascii_hexdigit())
}

/// A group of a MAC address: `*`, hex value, or hex range with optional bounds.
fn is_mac_group(group: &str, range_separator: char, exact_len: Option<usize>) -> bool {
    if group.len() == 1 && group.starts_with(WILDCARD) {
        return true;
    }
    let value_ok = |part: &str| match exact_len {
        Some(len) => part.len() == len && is_hex_group(part, len),
        None => part.is_empty() || is_hex_group(part, 2),
    };
    match group.split_once(range_separator) {
        Some((lo, hi)) => value_ok(lo) && value_ok(hi) && !(lo.is_empty() && hi.is_empty()),
        None => !group.is_empty() && value_ok(group),
    }
}

fn is_mac_colon(addr: &str) -> bool {
    !addr.contains("::")
        && addr.split(':').count() == 6
        && addr.split(':').all(|g| is_mac_group(g, RANGE_SEPARATOR, None))
}

fn is_mac_dashed(addr: &str) -> bool {
    addr.split('-').count() == 6 && addr.split('-').all(|g| is_mac_group(g, ALT_RANGE_SEPARATOR, None))
}

fn is_mac_dotted(addr: &str) -> bool {
    addr.split('.').count() == 3 && addr.split('.').all(|g| is_mac_group(g, RANGE_SEPARATOR, Some(4)))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SubnetPolicy;

    fn parse(text: &str) -> AddressRange {
        parse_with(text, &ParseOptions::default())
    }

    fn parse_with(text: &str, options: &ParseOptions) -> AddressRange {
        match parse_address(text, options) {
            Ok(ParsedAddress::Address(range)) => range,
            other => panic!("'{text}' did not parse to an address: {other:?}"),
        }
    }

    fn kind(text: &str) -> ErrorKind {
        parse_address(text, &ParseOptions::default())
            .expect_err(text)
            .kind()
    }

    fn seg(lower: u16, upper: u16) -> SegmentValue {
        SegmentValue::new(lower, upper).unwrap()
    }

    #[test]
    fn ipv4_basic() {
        assert_eq!(parse("1.2.3.4"), AddressRange::ipv4(1, 2, 3, 4));
        assert_eq!(parse("  10.0.0.1 "), AddressRange::ipv4(10, 0, 0, 1));
        assert_eq!(parse("001.002.003.004"), AddressRange::ipv4(1, 2, 3, 4));
    }

    #[test]
    fn ipv4_wildcards_and_ranges() {
        let r = parse("1.2.*.4-9");
        assert_eq!(r.segments()[2], SegmentValue::full(8));
        assert_eq!(r.segments()[3], seg(4, 9));

        let open = parse("1.2.3.-9");
        assert_eq!(open.segments()[3], seg(0, 9));
        let open = parse("1.2.3.200-");
        assert_eq!(open.segments()[3], seg(200, 255));

        // a short address with a wildcard
        let short = parse("1.*");
        assert_eq!(short.to_canonical_string(), "1.*.*.*");
        let middle = parse("1.*.4");
        assert_eq!(middle.to_canonical_string(), "1.*.*.4");
    }

    #[test]
    fn ipv4_inet_aton() {
        assert_eq!(parse("16909060"), AddressRange::ipv4(1, 2, 3, 4));
        assert_eq!(parse("0x01020304"), AddressRange::ipv4(1, 2, 3, 4));
        assert_eq!(parse("127.1"), AddressRange::ipv4(127, 0, 0, 1));
        assert_eq!(parse("1.2.772"), AddressRange::ipv4(1, 2, 3, 4));
        assert_eq!(parse("0x7f.0.0.0x1"), AddressRange::ipv4(127, 0, 0, 1));

        let octal = ParseOptions::default().with_octal(true);
        assert_eq!(parse_with("010.0.0.1", &octal), AddressRange::ipv4(8, 0, 0, 1));
        assert_eq!(parse("010.0.0.1"), AddressRange::ipv4(10, 0, 0, 1));

        let strict = ParseOptions::strict();
        assert!(parse_address("127.1", &strict).is_err());
        assert!(parse_address("0x7f.0.0.1", &strict).is_err());
    }

    #[test]
    fn ipv4_joined_ranges_span_segments() {
        let r = parse("1.2.256-65535");
        assert_eq!(r.segments()[2], seg(1, 255));
        assert_eq!(r.segments()[3], SegmentValue::full(8));

        let err = parse_address("1.2.255-256", &ParseOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompatibleAddress);
        assert_eq!(err.substring, "255-256");
        assert_eq!(err.position, 4);
    }

    #[test]
    fn ipv4_address_ranges() {
        let r = parse("1.2.3.4-1.2.3.9");
        assert_eq!(r.segments()[3], seg(4, 9));

        let r = parse("192.168.1.0-2.255");
        assert_eq!(r.segments()[2], seg(1, 2));
        assert_eq!(r.segments()[3], SegmentValue::full(8));

        assert_eq!(kind("192.168.1.10-2.255"), ErrorKind::IncompatibleAddress);
        assert_eq!(kind("1.2.3.9-1.2.3.4"), ErrorKind::RangeOrderInverted);
    }

    #[test]
    fn ipv4_errors() {
        assert_eq!(kind("1.2.3.4.5"), ErrorKind::MalformedSyntax);
        assert_eq!(kind("1.2..4"), ErrorKind::MalformedSyntax);
        assert_eq!(kind("1.2.3.256"), ErrorKind::MalformedSyntax);
        assert_eq!(kind("1.2.3.x"), ErrorKind::MalformedSyntax);
        assert_eq!(kind("1.2.3.9-4"), ErrorKind::RangeOrderInverted);
        assert_eq!(kind("1.2.3.4/33"), ErrorKind::PrefixOutOfBounds);
        assert_eq!(kind("1.2.3.4%eth0"), ErrorKind::MalformedSyntax);
        assert_eq!(kind("1.2.3.0x10-020"), ErrorKind::MalformedSyntax);
        assert_eq!(kind("bla"), ErrorKind::MalformedSyntax);
    }

    #[test]
    fn prefix_under_each_policy() {
        let all = ParseOptions::default().with_policy(SubnetPolicy::AllSubnets);
        let r = parse_with("1.2.3.4/16", &all);
        assert_eq!(r.to_canonical_string(), "1.2.*.*/16");
        assert!(r.is_prefix_block());

        let explicit = ParseOptions::default().with_policy(SubnetPolicy::Explicit);
        let r = parse_with("1.2.3.4/16", &explicit);
        assert!(!r.is_multiple());
        assert_eq!(r.prefix_length(), Some(16));
        assert!(!r.is_prefix_block());

        let r = parse("1.2.3.4/16");
        assert!(!r.is_multiple());
        let r = parse("1.2.0.0/16");
        assert!(r.is_prefix_block());
    }

    #[test]
    fn mask_suffix() {
        let all = ParseOptions::default().with_policy(SubnetPolicy::AllSubnets);
        let r = parse_with("1.2.3.4/255.255.0.0", &all);
        assert_eq!(r.prefix_length(), Some(16));
        assert!(r.is_prefix_block());

        // not a network mask: applied as a plain AND
        let r = parse("1.2.3.4/255.0.255.0");
        assert_eq!(r, AddressRange::ipv4(1, 0, 3, 0));
        assert_eq!(r.prefix_length(), None);

        assert_eq!(kind("1.2.3.2-5/255.255.255.2"), ErrorKind::IncompatibleAddress);
        assert_eq!(kind("1.2.3.4/::ffff"), ErrorKind::MalformedSyntax);
        assert_eq!(kind("1.2.3.4/-1"), ErrorKind::PrefixOutOfBounds);
        assert_eq!(kind("1::/-64"), ErrorKind::PrefixOutOfBounds);
    }

    #[test]
    fn ipv6_forms() {
        let r = parse("2001:db8::1");
        assert_eq!(r.segments()[0], SegmentValue::single(0x2001));
        assert_eq!(r.segments()[7], SegmentValue::single(1));
        assert_eq!(parse("::").count().as_u128(), Some(1));
        assert_eq!(parse("1:2:3:4:5:6:7:8").segments()[4], SegmentValue::single(5));
        assert_eq!(parse("::ffff:1.2.3.4"), AddressRange::ipv4(1, 2, 3, 4).to_ipv6_mapped().unwrap());
        assert_eq!(parse("1::*").segments()[7], SegmentValue::full(16));
        assert_eq!(parse("1:*").to_normalized_string(), "1:*:*:*:*:*:*:*");
        assert_eq!(parse("1::2-ff").segments()[7], seg(2, 0xff));
        assert_eq!(parse("0x20010db8000000000000000000000001"), r);
        assert_eq!(parse("20010db8000000000000000000000001"), r);
    }

    #[test]
    fn ipv6_errors() {
        assert_eq!(kind("1::2::3"), ErrorKind::MalformedSyntax);
        assert_eq!(kind("1:2:3:4:5:6:7:8:9"), ErrorKind::MalformedSyntax);
        assert_eq!(kind("1:2:3:4:5:6:7"), ErrorKind::MalformedSyntax);
        assert_eq!(kind("12345::"), ErrorKind::MalformedSyntax);
        assert_eq!(kind("1::/129"), ErrorKind::PrefixOutOfBounds);
        assert_eq!(kind("fe80::1%"), ErrorKind::ZoneMalformed);
        assert_eq!(kind("fe80::1%a b"), ErrorKind::ZoneMalformed);
        assert_eq!(kind("::ffff:1-2.3.4.5"), ErrorKind::IncompatibleAddress);
        assert_eq!(kind("1:::2"), ErrorKind::MalformedSyntax);
    }

    #[test]
    fn zones() {
        let r = parse("fe80::1%eth0");
        assert_eq!(r.zone(), Some("eth0"));
        let r = parse("fe80::1%eth0/64");
        assert_eq!(r.zone(), Some("eth0"));
        assert_eq!(r.prefix_length(), Some(64));

        let r = parse("[fe80::1%25eth0]");
        assert_eq!(r.zone(), Some("eth0"));
        let r = parse("[fe80::1]/64");
        assert_eq!(r.prefix_length(), Some(64));
        assert_eq!(kind("[1.2.3.4]"), ErrorKind::MalformedSyntax);

        let no_zones = ParseOptions {
            allow_zone: false,
            ..ParseOptions::default()
        };
        let err = parse_address("fe80::1%eth0", &no_zones).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ZoneMalformed);
    }

    #[test]
    fn ipv6_address_range() {
        let r = parse("1::1-1::5");
        assert_eq!(r.segments()[7], seg(1, 5));
    }

    #[test]
    fn base85() {
        let r = parse("4)+k&C#VzJ4br>0wv%Yp");
        assert_eq!(r, parse("1080::8:800:200c:417a"));
        let zoned = parse("4)+k&C#VzJ4br>0wv%Yp§eth1");
        assert_eq!(zoned.zone(), Some("eth1"));

        // twenty characters of the alphabet that also read as other syntaxes
        let mac = parse("4e-0e|14-00-17-a6-2b");
        assert!(mac.is_mac());
        assert_eq!(mac.segments()[1], seg(0x0e, 0x14));
        assert_eq!(parse("0x000000000000000001"), parse("::1"));

        // hex-only text with no other reading falls back to base 85
        assert!(parse("aaaaaaaaaaaaaaaaaaaa").is_ipv6());
    }

    #[test]
    fn reverse_dns() {
        assert_eq!(parse("4.3.2.1.in-addr.arpa"), AddressRange::ipv4(1, 2, 3, 4));
        assert_eq!(parse("4.3.2.1.IN-ADDR.ARPA."), AddressRange::ipv4(1, 2, 3, 4));
        let partial = parse("2.1.in-addr.arpa");
        assert_eq!(partial.to_canonical_string(), "1.2.*.*/16");

        let v6 = parse("2001:db8::1");
        let text = v6.to_reverse_dns_string().unwrap();
        assert_eq!(parse(&text), v6);

        let block = parse("8.b.d.0.1.0.0.2.ip6.arpa");
        assert_eq!(block.prefix_length(), Some(32));
        assert_eq!(block.single_block_prefix(), Some(32));
    }

    #[test]
    fn literal_net() {
        let r = parse("fe80--1seth0.ipv6-literal.net");
        assert_eq!(r, parse("fe80::1%eth0"));
        let ranged = parse("1--1»5.ipv6-literal.net");
        assert_eq!(ranged.segments()[7], seg(1, 5));
    }

    #[test]
    fn mac_forms() {
        let colon = parse("aa:bb:cc:dd:ee:ff");
        assert!(colon.is_mac());
        assert_eq!(parse("AA-BB-CC-DD-EE-FF"), colon);
        assert_eq!(parse("aabb.ccdd.eeff"), colon);
        let ranged = parse("aa:bb:cc:dd:ee:0-f");
        assert_eq!(ranged.segments()[5], seg(0, 0xf));
        let dashed = parse("aa-bb-cc-dd-ee-0|f");
        assert_eq!(dashed, ranged);
        assert!(parse("aa:bb:cc:*:*:*").is_multiple());
        assert_eq!(kind("aabb.ccdd.eeff/49"), ErrorKind::PrefixOutOfBounds);
    }

    #[test]
    fn special_inputs() {
        let opts = ParseOptions::default();
        assert_eq!(parse_address("", &opts), Ok(ParsedAddress::Empty));
        assert_eq!(parse_address("   ", &opts), Ok(ParsedAddress::Empty));
        assert_eq!(parse_address("*", &opts), Ok(ParsedAddress::All));
        assert_eq!(parse_address("/16", &opts), Ok(ParsedAddress::PrefixOnly(16)));
        assert!(parse_address("/129", &opts).is_err());

        let loopback = opts.clone().with_empty_policy(EmptyPolicy::Loopback);
        assert_eq!(
            parse_address("", &loopback),
            Ok(ParsedAddress::Address(AddressRange::ipv4(127, 0, 0, 1)))
        );
        let invalid = opts.with_empty_policy(EmptyPolicy::Invalid);
        assert!(parse_address("", &invalid).is_err());
    }

    #[test]
    fn falls_back_to_hosts() {
        let opts = ParseOptions::default();
        assert!(matches!(super::parse("1.2.3.4", &opts), Ok(ParseOutcome::Address(_))));
        match super::parse("1.2.3.4:80", &opts) {
            Ok(ParseOutcome::Host(host)) => assert_eq!(host.port(), Some(80)),
            other => panic!("expected a host: {other:?}"),
        }
        match super::parse("bla", &opts) {
            Ok(ParseOutcome::Host(host)) => assert_eq!(host.name(), Some("bla")),
            other => panic!("expected a host: {other:?}"),
        }
        let err = super::parse("1.2.3.4.5:x y", &opts).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedSyntax);
    }

    #[test]
    fn from_str_rejects_non_addresses() {
        assert!("1.2.3.4".parse::<AddressRange>().is_ok());
        assert!("*".parse::<AddressRange>().is_err());
        assert!("".parse::<AddressRange>().is_err());
    }

    #[test]
    fn canonical_round_trip() {
        for text in [
            "1.2.3.4",
            "1.2.*.*",
            "1.2.3-4.*",
            "2001:db8::1",
            "fe80::1%eth0",
            "1::*",
            "aa:bb:cc:dd:ee:ff",
            "aa:bb:cc:0-f:*:*",
            "10.0.0.0/8",
            "::ffff:1.2.3.4",
        ] {
            let range = parse(text);
            let canonical = range.to_canonical_string();
            assert_eq!(parse(&canonical), range, "{text} -> {canonical}");
            assert_eq!(parse(&range.to_normalized_string()), range, "{text}");
            assert_eq!(parse(&range.to_full_string()), range, "{text}");
        }
    }
}
