//! Integration tests for the public parsing API: end-to-end host name
//! scenarios, the normative accept/reject table, and the cross-cutting
//! properties (idempotence, qualification round-trip, strictness).

use domain_parts::{Domain, MailAddress, MailAddressOptions, TopLevelDomain};

#[test]
fn test_full_decomposition_preserves_case_and_qualification() {
    let domain = Domain::parse("WWW.Example.COM.", false).unwrap();

    assert_eq!(domain.subdomain_name(), Some("WWW"));
    let sld = domain.sld().unwrap();
    assert_eq!(sld.host_name(), "Example");
    let tld = sld.tld().unwrap();
    assert_eq!(tld.value(), "COM");

    assert!(domain.is_fully_qualified());
    assert!(domain.has_tld());
    assert!(domain.has_known_tld());
    assert!(domain.is_generic());
    assert_eq!(domain.to_string(), "WWW.Example.COM.");
}

#[test]
fn test_loopback_literal() {
    let domain = Domain::parse("127.0.0.1", false).unwrap();
    assert!(domain.is_ipv4_address());
    assert!(domain.is_local());
    assert!(domain.is_reserved());
    assert!(domain.sld().is_none());
    assert_eq!(domain.ip_address(), Some("127.0.0.1"));
}

#[test]
fn test_localhost_resolves_without_tld() {
    let domain = Domain::parse("localhost", false).unwrap();
    assert!(domain.is_local());
    assert!(domain.is_reserved());
    assert!(!domain.has_tld());
    assert_eq!(domain.sld().unwrap().host_name(), "localhost");
}

#[test]
fn test_url_shortener() {
    let domain = Domain::parse("bit.ly", false).unwrap();
    assert!(domain.is_url_shortener());
    assert_eq!(domain.sld().unwrap().to_string(), "bit.ly");
}

#[test]
fn test_unknown_tld_rejected_in_known_mode() {
    assert!(Domain::parse("sub.example.zz", true).is_err());
}

#[test]
fn test_double_tld_decomposition() {
    let domain = Domain::parse("example.co.uk", false).unwrap();
    assert!(domain.has_double_tld());
    assert!(domain.has_known_tld());
    assert_eq!(domain.subdomain_name(), None);
    assert_eq!(domain.sld().unwrap().host_name(), "example");
    assert_eq!(domain.sld().unwrap().tld().unwrap().value(), "co.uk");
}

// The normative accept/reject table for the parse entry points.
#[test]
fn test_literal_acceptance_table() {
    assert!(Domain::parse("www.example.com", false).is_ok());
    assert!(Domain::parse("example.com.", false).is_ok());
    assert!(Domain::parse("example.co.uk", false).is_ok());
    assert!(Domain::parse("192.168.1.1", false).is_ok());
    assert!(TopLevelDomain::parse("xn--p1ai", false).is_ok());

    assert!(Domain::parse("999", false).is_err());
    assert!(Domain::parse("a..b.com", false).is_err());
    assert!(Domain::parse("toolong-unknown-tld.zz9", true).is_err());
}

#[test]
fn test_subdomain_depth_boundary() {
    assert!(Domain::parse("a.com", false).is_ok());
    assert!(Domain::parse("c.a.com", false).is_ok());
    assert!(Domain::parse("a.b.c.d.com", false).is_err());
}

// Rendering a parsed domain and re-parsing the rendering must not change
// any classification outcome.
#[test]
fn test_render_reparse_idempotence() {
    let inputs = [
        "www.example.com",
        "example.com.",
        "example.co.uk",
        "WWW.Example.COM.",
        "bit.ly",
        "x.bit.ly",
        "user32.com",
        "localhost",
        "127.0.0.1",
        "8.8.8.8",
        "::1",
        "sub.example.zz",
    ];

    for input in inputs {
        let first = Domain::parse(input, false).unwrap();
        let second = Domain::parse(&first.to_string(), false).unwrap();
        assert_eq!(first, second, "re-parse of '{}' diverged", input);
    }
}

// Re-parsing the force-fully-qualified rendering preserves everything but
// the qualification flag.
#[test]
fn test_qualification_round_trip() {
    for input in ["www.example.com", "example.co.uk", "bit.ly"] {
        let plain = Domain::parse(input, false).unwrap();
        assert!(!plain.is_fully_qualified());

        let qualified = Domain::parse(&plain.to_fully_qualified_string(), false).unwrap();
        assert!(qualified.is_fully_qualified());

        assert_eq!(plain.subdomain_name(), qualified.subdomain_name());
        assert_eq!(plain.has_known_tld(), qualified.has_known_tld());
        assert_eq!(plain.has_double_tld(), qualified.has_double_tld());
        assert_eq!(plain.is_generic(), qualified.is_generic());
        assert_eq!(plain.is_country(), qualified.is_country());
        assert_eq!(plain.is_reserved(), qualified.is_reserved());
        assert_eq!(plain.is_url_shortener(), qualified.is_url_shortener());
        assert_eq!(plain.is_dynamic(), qualified.is_dynamic());
        assert_eq!(
            plain.to_unqualified_string(),
            qualified.to_unqualified_string()
        );
    }
}

// Everything accepted in known-only mode must be accepted in lenient mode
// too, with identical decomposition.
#[test]
fn test_known_mode_is_stricter() {
    let inputs = [
        "www.example.com",
        "example.co.uk",
        "shop.example.org.",
        "host.de",
        "bit.ly",
        "192.168.1.1",
    ];

    for input in inputs {
        let strict = Domain::parse(input, true).unwrap();
        let lenient = Domain::parse(input, false).unwrap();
        assert_eq!(strict, lenient, "decomposition of '{}' diverged", input);
    }

    // The reverse direction does not hold.
    assert!(Domain::parse("host.zz", false).is_ok());
    assert!(Domain::parse("host.zz", true).is_err());
}

// The ordered precedence of the TLD classification chain, including the
// unguarded final country test.
#[test]
fn test_classification_precedence() {
    let expectations: &[(&str, &str)] = &[
        ("co.uk", "double"),
        ("com", "generic"),
        ("arpa", "reserved"),
        ("berlin", "geographic"),
        ("xn--io0a7i", "localized-generic"),
        ("xn--p1ai", "localized-country"),
        ("de", "country"),
    ];

    for (label, class) in expectations {
        let tld = TopLevelDomain::parse(label, true).unwrap();
        assert!(tld.is_known(), "{} should be known", label);
        assert_eq!(tld.is_double(), *class == "double", "{}", label);
        assert_eq!(
            tld.is_generic(),
            matches!(*class, "generic" | "localized-generic"),
            "{}",
            label
        );
        assert_eq!(tld.is_reserved(), *class == "reserved", "{}", label);
        assert_eq!(tld.is_geographic(), *class == "geographic", "{}", label);
        assert_eq!(
            tld.is_localized(),
            matches!(*class, "localized-generic" | "localized-country"),
            "{}",
            label
        );
        assert_eq!(
            tld.is_country(),
            matches!(*class, "country" | "localized-country"),
            "{}",
            label
        );
    }
}

#[test]
fn test_mail_address_end_to_end() {
    let address = MailAddress::parse("Jane.Roe@Mail.Orange.FR").unwrap();
    assert_eq!(address.user(), "jane.roe");
    assert_eq!(address.domain().subdomain_name(), Some("mail"));
    assert!(address.domain().is_country());
    assert_eq!(address.to_string(), "jane.roe@mail.orange.fr");

    // Reserved domains need an explicit opt-in.
    assert!(MailAddress::parse("admin@example.org").is_err());
    let options = MailAddressOptions::default().with_allow_reserved(true);
    assert!(MailAddress::parse_with("admin@example.org", options).is_ok());
}

#[test]
fn test_serialization_smoke() {
    let domain = Domain::parse("www.example.co.uk", false).unwrap();
    let json = serde_json::to_value(&domain).unwrap();

    // The decomposed labels survive into the serialized form.
    assert_eq!(json["subdomain_name"], "www");
    assert_eq!(json["sld"]["host_name"], "example");
    assert_eq!(json["sld"]["tld"]["value"], "co.uk");
}
