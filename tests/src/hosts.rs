use rangr_core::config::{ParseOptions, SubnetPolicy};
use rangr_core::network::host::HostWrapper;
use rangr_core::network::range::AddressRange;

fn host(text: &str) -> HostWrapper {
    HostWrapper::parse(text, &ParseOptions::default())
        .unwrap_or_else(|e| panic!("'{text}' should parse as a host: {e}"))
}

fn lookup(name: &str) -> Option<AddressRange> {
    match name {
        "gateway.lan" => Some(AddressRange::ipv4(192, 168, 0, 1)),
        "v6.lan" => "2001:db8::10".parse().ok(),
        _ => None,
    }
}

#[test]
fn resolved_names_get_their_prefix() {
    let h = host("gateway.lan/24");
    assert!(!h.is_resolved());

    let resolved = h.resolve(&lookup, SubnetPolicy::AllSubnets).unwrap();
    assert!(resolved.is_resolved());
    assert!(resolved.contains(&AddressRange::ipv4(192, 168, 0, 200)));
    assert_eq!(resolved.name(), Some("gateway.lan"));

    let explicit = h.resolve(&lookup, SubnetPolicy::Explicit).unwrap();
    assert!(!explicit.contains(&AddressRange::ipv4(192, 168, 0, 200)));
}

#[test]
fn unknown_names_stay_unresolved() {
    let h = host("nowhere.lan");
    let after = h.resolve(&lookup, SubnetPolicy::default()).unwrap();
    assert!(!after.is_resolved());
    assert!(!after.contains(&AddressRange::ipv4(192, 168, 0, 1)));
}

#[test]
fn ports_and_services() {
    let h = host("[2001:db8::10]:8080");
    assert_eq!(h.port(), Some(8080));
    assert_eq!(h.to_string(), "[2001:db8::10]:8080");

    let by_name = host("v6.lan:8080").resolve(&lookup, SubnetPolicy::default()).unwrap();
    assert_eq!(by_name, h);

    let service = host("gateway.lan:https");
    assert_eq!(service.service(), Some("https"));
    assert_ne!(service, host("gateway.lan:443"));
}
