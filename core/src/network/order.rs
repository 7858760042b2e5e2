//! # Ordering Engine
//!
//! A total order over address ranges and address strings, used for sorting mixed
//! collections of valid, invalid and empty inputs.
//!
//! Values are first grouped into [`Bucket`]s. Inside the address buckets the
//! [`OrderingPolicy`] picks how segments are compared. Every policy looks at the
//! segments and the zone only, never the prefix length, so two ranges compare equal
//! exactly when they are `==`.

use std::cmp::Ordering;

use crate::network::address_string::AddressString;
use crate::network::format::Family;
use crate::network::range::AddressRange;
use crate::network::segment::SegmentValue;

/// Tie-break rule for multi-valued segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderingPolicy {
    /// Address count first, then segments most significant first, lower bound before upper.
    #[default]
    Default,
    /// Segments most significant first, lower bound before upper.
    PreferLow,
    /// Segments most significant first, upper bound before lower.
    PreferHigh,
}

/// Coarse grouping, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    Invalid,
    Empty,
    Ipv4,
    Ipv6,
    Mac,
    PrefixOnly,
    All,
}

impl From<Family> for Bucket {
    fn from(family: Family) -> Self {
        match family {
            Family::Ipv4 => Self::Ipv4,
            Family::Ipv6 => Self::Ipv6,
            Family::Mac => Self::Mac,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddressComparator {
    policy: OrderingPolicy,
}

impl AddressComparator {
    pub const fn new(policy: OrderingPolicy) -> Self {
        Self { policy }
    }

    pub const fn policy(&self) -> OrderingPolicy {
        self.policy
    }

    pub fn compare_ranges(&self, a: &AddressRange, b: &AddressRange) -> Ordering {
        Bucket::from(a.family())
            .cmp(&Bucket::from(b.family()))
            .then_with(|| self.compare_same_family(a, b))
            .then_with(|| a.zone().cmp(&b.zone()))
    }

    fn compare_same_family(&self, a: &AddressRange, b: &AddressRange) -> Ordering {
        let segments = || a.segments().iter().zip(b.segments());
        match self.policy {
            OrderingPolicy::Default => a
                .count()
                .cmp(&b.count())
                .then_with(|| compare_segments(segments(), low_then_high)),
            OrderingPolicy::PreferLow => compare_segments(segments(), low_then_high),
            OrderingPolicy::PreferHigh => compare_segments(segments(), high_then_low),
        }
    }

    pub fn compare_strings(&self, a: &AddressString, b: &AddressString) -> Ordering {
        let bucket = a.bucket().cmp(&b.bucket());
        if bucket != Ordering::Equal {
            return bucket;
        }
        match (a.address(), b.address()) {
            (Some(x), Some(y)) => self.compare_ranges(x, y),
            _ => match (a.prefix_only(), b.prefix_only()) {
                (Some(x), Some(y)) => x.cmp(&y),
                // Invalid, Empty and All: by text
                _ if a.bucket() == Bucket::All => Ordering::Equal,
                _ => a.text().cmp(b.text()),
            },
        }
    }

    pub fn sort_ranges(&self, ranges: &mut [AddressRange]) {
        ranges.sort_by(|a, b| self.compare_ranges(a, b));
    }

    pub fn sort_strings(&self, strings: &mut [AddressString]) {
        strings.sort_by(|a, b| self.compare_strings(a, b));
    }
}

fn compare_segments<'a>(
    pairs: impl Iterator<Item = (&'a SegmentValue, &'a SegmentValue)>,
    rule: fn(&SegmentValue, &SegmentValue) -> Ordering,
) -> Ordering {
    pairs
        .map(|(x, y)| rule(x, y))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn low_then_high(x: &SegmentValue, y: &SegmentValue) -> Ordering {
    x.lower().cmp(&y.lower()).then(x.upper().cmp(&y.upper()))
}

fn high_then_low(x: &SegmentValue, y: &SegmentValue) -> Ordering {
    x.upper().cmp(&y.upper()).then(x.lower().cmp(&y.lower()))
}

impl PartialOrd for AddressRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AddressRange {
    /// The [`OrderingPolicy::Default`] order.
    fn cmp(&self, other: &Self) -> Ordering {
        AddressComparator::default().compare_ranges(self, other)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseOptions;

    fn range(text: &str) -> AddressRange {
        text.parse().unwrap()
    }

    fn strings(texts: &[&str]) -> Vec<AddressString> {
        let options = ParseOptions::default();
        texts.iter().map(|t| AddressString::new(t, &options)).collect()
    }

    #[test]
    fn default_orders_by_count_first() {
        let mut ranges = vec![range("*.*.*.*"), range("1.2.3.*"), range("1.2.3.4")];
        AddressComparator::default().sort_ranges(&mut ranges);
        let texts: Vec<String> = ranges.iter().map(|r| r.to_canonical_string()).collect();
        assert_eq!(texts, ["1.2.3.4", "1.2.3.*", "*.*.*.*"]);

        // a wide range in a low segment outranks a narrow one in a high segment
        assert!(range("9.9.9.9") < range("1.1.1.0-1"));
    }

    #[test]
    fn prefer_low_and_high_are_lexicographic() {
        let low = AddressComparator::new(OrderingPolicy::PreferLow);
        let high = AddressComparator::new(OrderingPolicy::PreferHigh);

        let wide = range("1.0-9.0.0");
        let narrow = range("1.2.0.0");
        assert_eq!(low.compare_ranges(&wide, &narrow), Ordering::Less);
        assert_eq!(high.compare_ranges(&wide, &narrow), Ordering::Greater);
        assert_eq!(
            AddressComparator::default().compare_ranges(&wide, &narrow),
            Ordering::Greater
        );

        let a = range("1.2-5.0.0");
        let b = range("1.2-3.0.0");
        assert_eq!(low.compare_ranges(&a, &b), Ordering::Greater);
        assert_eq!(high.compare_ranges(&a, &b), Ordering::Greater);
        let c = range("1.1-3.0.0");
        assert_eq!(high.compare_ranges(&c, &b), Ordering::Less);
    }

    #[test]
    fn families_and_zones() {
        assert!(range("255.255.255.255") < range("::"));
        assert!(range("ffff::") < range("00:00:00:00:00:00"));
        assert!(range("fe80::1") < range("fe80::1%eth0"));
        assert!(range("fe80::1%eth0") < range("fe80::1%eth1"));
    }

    #[test]
    fn equal_ranges_compare_equal_under_every_policy() {
        let prefixed = range("1.2.0.0/16");
        let wildcard = range("1.2.*.*");
        assert_eq!(prefixed, wildcard);
        for policy in [OrderingPolicy::Default, OrderingPolicy::PreferLow, OrderingPolicy::PreferHigh] {
            let cmp = AddressComparator::new(policy);
            assert_eq!(cmp.compare_ranges(&prefixed, &wildcard), Ordering::Equal);
        }
    }

    #[test]
    fn bucket_order() {
        let mut values = strings(&["*", "/16", "aa:bb:cc:dd:ee:ff", "::1", "1.2.3.4", "", "bla"]);
        values.reverse();
        AddressComparator::default().sort_strings(&mut values);
        let buckets: Vec<Bucket> = values.iter().map(AddressString::bucket).collect();
        assert_eq!(
            buckets,
            [
                Bucket::Invalid,
                Bucket::Empty,
                Bucket::Ipv4,
                Bucket::Ipv6,
                Bucket::Mac,
                Bucket::PrefixOnly,
                Bucket::All
            ]
        );
    }

    #[test]
    fn invalid_and_empty_compare_by_text() {
        let cmp = AddressComparator::default();
        let v = strings(&["zzz", "abc", "", "  "]);
        assert_eq!(cmp.compare_strings(&v[1], &v[0]), Ordering::Less);
        assert_eq!(cmp.compare_strings(&v[0], &v[2]), Ordering::Less);
        assert_eq!(cmp.compare_strings(&v[2], &v[3]), Ordering::Less);

        let p = strings(&["/8", "/16"]);
        assert_eq!(cmp.compare_strings(&p[0], &p[1]), Ordering::Less);
    }
}
