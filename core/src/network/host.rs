//! # Host Wrapper
//!
//! Couples an address range or an unresolved host name with the metadata that travels with it
//! in host strings: port, service name, zone and prefix length.
//!
//! Accepted forms:
//! * any address the parser accepts (`1.2.3.4`, `fe80::1%eth0`, `10.0.0.0/8`)
//! * `host:port` and `host:service` for IPv4 and names (`1.2.3.4:80`, `example.com:http`)
//! * bracketed IPv6 with optional `%25` zone and port (`[fe80::1%25eth0]:443`)
//! * a name with a prefix length (`example.com/24`)
//!
//! Name lookup is left to a [`Resolver`]; the wrapper never caches a lookup itself.

use std::fmt;

use tracing::debug;

use crate::config::{ParseOptions, SubnetPolicy};
use crate::error::{AddressError, ErrorKind, ParseError};
use crate::network::format::{PREFIX_SEPARATOR, ZONE_SEPARATOR};
use crate::network::parse::{ParsedAddress, Parser, parse_address};
use crate::network::range::AddressRange;

const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Name lookup collaborator.
pub trait Resolver {
    fn resolve(&self, name: &str) -> Option<AddressRange>;
}

impl<F> Resolver for F
where
    F: Fn(&str) -> Option<AddressRange>,
{
    fn resolve(&self, name: &str) -> Option<AddressRange> {
        self(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct HostWrapper {
    resolved: Option<AddressRange>,
    name: Option<String>,
    port: Option<u16>,
    service: Option<String>,
    zone: Option<String>,
    prefix_length: Option<u8>,
}

impl HostWrapper {
    pub fn from_address(range: AddressRange) -> Self {
        Self {
            zone: range.zone().map(str::to_string),
            prefix_length: range.prefix_length(),
            resolved: Some(range),
            ..Self::default()
        }
    }

    pub fn from_name(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn parse(text: &str, options: &ParseOptions) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        let parser = Parser::new(text, options);
        let malformed = |part: &str, reason| {
            let position = text.find(part).unwrap_or(0);
            ParseError::new(ErrorKind::MalformedSyntax, text, part, position, reason)
        };
        if trimmed.is_empty() {
            return Err(malformed(trimmed, "empty host"));
        }

        if trimmed.starts_with('[') {
            let Some(close) = trimmed.find(']') else {
                return Err(malformed(trimmed, "missing closing bracket"));
            };
            let rest = &trimmed[close + 1..];
            if let Some(port) = rest.strip_prefix(':') {
                let range = parser.parse_range(&trimmed[..=close], true)?;
                return Self::from_address(range).with_port_or_service(port, text);
            }
            return parser.parse_range(trimmed, true).map(Self::from_address);
        }

        if let Ok(ParsedAddress::Address(range)) = parse_address(trimmed, options) {
            return Ok(Self::from_address(range));
        }

        // a single colon separates a port or service; more colons mean a bad IPv6 address
        if let Some((host, port)) = trimmed.split_once(':') {
            if port.contains(':') {
                return parser.parse_range(trimmed, false).map(Self::from_address);
            }
            let wrapper = match parse_address(host, options) {
                Ok(ParsedAddress::Address(range)) => Self::from_address(range),
                _ => Self::parse_name(host, text, options)?,
            };
            return wrapper.with_port_or_service(port, text);
        }

        Self::parse_name(trimmed, text, options)
    }

    /// `name` or `name/prefix`.
    fn parse_name(host: &str, text: &str, options: &ParseOptions) -> Result<Self, ParseError> {
        let position = text.find(host).unwrap_or(0);
        let error = |kind, part: &str, reason| {
            ParseError::new(kind, text, part, position + host.find(part).unwrap_or(0), reason)
        };
        let (name, prefix) = match host.split_once(PREFIX_SEPARATOR) {
            Some((name, prefix)) => (name, Some(prefix)),
            None => (host, None),
        };
        if name.contains(ZONE_SEPARATOR) || !is_valid_name(name) {
            return Err(error(ErrorKind::MalformedSyntax, name, "invalid host name"));
        }
        let prefix_length = match prefix {
            None => None,
            Some(_) if !options.allow_prefix_only => {
                return Err(error(ErrorKind::MalformedSyntax, host, "prefix lengths are not allowed"));
            }
            Some(p) => match p.parse::<u8>() {
                Ok(value) if value <= 128 => Some(value),
                Ok(_) => {
                    return Err(error(ErrorKind::PrefixOutOfBounds, p, "prefix exceeds 128 bits"));
                }
                Err(_) if !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()) => {
                    return Err(error(ErrorKind::PrefixOutOfBounds, p, "prefix exceeds 128 bits"));
                }
                Err(_) => {
                    return Err(error(ErrorKind::MalformedSyntax, p, "invalid prefix length"));
                }
            },
        };
        Ok(Self {
            name: Some(name.to_ascii_lowercase()),
            prefix_length,
            ..Self::default()
        })
    }

    fn with_port_or_service(mut self, value: &str, text: &str) -> Result<Self, ParseError> {
        let position = text.rfind(value).unwrap_or(0);
        if value.is_empty() {
            return Err(ParseError::new(ErrorKind::MalformedSyntax, text, value, position, "missing port"));
        }
        if value.bytes().all(|b| b.is_ascii_digit()) {
            let port = value.parse::<u16>().map_err(|_| {
                ParseError::new(ErrorKind::MalformedSyntax, text, value, position, "port out of range")
            })?;
            self.port = Some(port);
        } else if is_valid_service(value) {
            self.service = Some(value.to_ascii_lowercase());
        } else {
            return Err(ParseError::new(
                ErrorKind::MalformedSyntax,
                text,
                value,
                position,
                "invalid port or service",
            ));
        }
        Ok(self)
    }

    pub fn address(&self) -> Option<&AddressRange> {
        self.resolved.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    pub fn prefix_length(&self) -> Option<u8> {
        self.prefix_length
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Looks up the name through `resolver` and returns a wrapper holding the result.
    ///
    /// The wrapper's prefix length is applied to the resolved range under `policy`. A wrapper
    /// that already holds an address, or a name the resolver does not know, is returned as is.
    pub fn resolve<R>(&self, resolver: &R, policy: SubnetPolicy) -> Result<Self, AddressError>
    where
        R: Resolver + ?Sized,
    {
        let Some(name) = self.name.as_deref().filter(|_| self.resolved.is_none()) else {
            return Ok(self.clone());
        };
        let Some(range) = resolver.resolve(name) else {
            debug!(name, "host name did not resolve");
            return Ok(self.clone());
        };
        debug!(name, address = %range, "resolved host name");
        let range = match self.prefix_length {
            Some(prefix) => range.apply_prefix(prefix, policy)?,
            None => range,
        };
        Ok(Self {
            zone: range.zone().map(str::to_string).or_else(|| self.zone.clone()),
            resolved: Some(range),
            ..self.clone()
        })
    }

    /// Whether the wrapper's address contains `range`. Unresolved wrappers contain nothing.
    pub fn contains(&self, range: &AddressRange) -> bool {
        self.resolved.as_ref().is_some_and(|own| own.contains(range))
    }
}

impl From<AddressRange> for HostWrapper {
    fn from(range: AddressRange) -> Self {
        Self::from_address(range)
    }
}

impl PartialEq for HostWrapper {
    /// Compares addresses when both sides hold one, names otherwise. Port and service
    /// must match in both cases.
    fn eq(&self, other: &Self) -> bool {
        let host_eq = match (&self.resolved, &other.resolved) {
            (Some(a), Some(b)) => a == b,
            _ => self.name.is_some() && self.name == other.name,
        };
        host_eq && self.port == other.port && self.service == other.service
    }
}

impl fmt::Display for HostWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bracketed = self.resolved.as_ref().is_some_and(|r| r.is_ipv6())
            && (self.port.is_some() || self.service.is_some());
        match (&self.resolved, &self.name) {
            (Some(range), _) if bracketed => write!(f, "[{range}]")?,
            (Some(range), _) => write!(f, "{range}")?,
            (None, Some(name)) => {
                f.write_str(name)?;
                if let Some(prefix) = self.prefix_length {
                    write!(f, "/{prefix}")?;
                }
            }
            (None, None) => {}
        }
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        } else if let Some(service) = &self.service {
            write!(f, ":{service}")?;
        }
        Ok(())
    }
}

fn is_valid_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return false;
    }
    let name = name.strip_suffix('.').unwrap_or(name);
    name.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    })
}

fn is_valid_service(service: &str) -> bool {
    service.bytes().any(|b| b.is_ascii_alphabetic())
        && service.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
