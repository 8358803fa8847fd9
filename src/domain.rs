//! Full domain parsing.
//!
//! A domain is an optional sub-domain name plus a [`SecondLevelDomain`]:
//! `www` + `example.com` in `www.example.com`. Alternatively the whole
//! value may be a literal IPv4 or IPv6 address, in which case no label
//! decomposition applies and the raw address text is kept as-is.
//!
//! Classification of address literals (local and special-use ranges) is
//! computed once at construction from the rendered value and cached.

use crate::error::ParseError;
use crate::sld::SecondLevelDomain;
use crate::Result;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// One IPv4 octet, 0-255.
const IPV4_OCTET: &str = r"(\d{1,2}|1\d{2}|2([0-4]\d|5([0-4]\d|5[0-5])))";

/// IPv6 literal forms, including an optional prefix length.
const IPV6_LITERAL: &str = r"([0-9a-fA-F]{1,4}(:[0-9a-fA-F]{1,4}){7}|::[0-9a-fA-F]{1,4}([0-9a-fA-F:.]+)?(/\d{1,3})?|::[0-9a-fA-F]{0,4})(/\d{1,3})?";

lazy_static::lazy_static! {
    static ref IPV4_RE: Regex =
        Regex::new(&format!(r"^{0}(\.{0}){{3}}$", IPV4_OCTET)).unwrap();

    static ref IPV6_RE: Regex =
        Regex::new(&format!(r"^{}$", IPV6_LITERAL)).unwrap();

    static ref IP_LITERAL_RE: Regex =
        Regex::new(&format!(r"^({0}(\.{0}){{3}}|{1})$", IPV4_OCTET, IPV6_LITERAL)).unwrap();

    // Loopback and RFC1918 private ranges.
    static ref LOCAL_ADDRESS_RE: Regex = Regex::new(&format!(
        r"^(127(\.{0}){{3}}|172\.(1[6-9]|2\d|3[01])(\.{0}){{2}}|192\.168(\.{0}){{2}})$",
        IPV4_OCTET
    ))
    .unwrap();

    // RFC5735 / RFC6598 special-use ranges.
    static ref RESERVED_ADDRESS_RE: Regex = Regex::new(&format!(
        r"^(127(\.{0}){{3}}|(100\.(6[4-9]|[7-9]\d|1([01]\d|2[0-7]))|169\.254|172\.(1[6-9]|2\d|3[01])|192\.168|198\.1[89])(\.{0}){{2}}|192\.0\.[02]\.{0}|198\.51\.100\.{0}|192\.88\.99\.{0})$",
        IPV4_OCTET
    ))
    .unwrap();

    // Sub-domain alphabet plus structural rejections: punctuation next to
    // a dot and punctuation at the end.
    static ref SUBDOMAIN_RE: Regex = Regex::new(r"(?i)^[a-z0-9][a-z0-9_.-]*$").unwrap();
    static ref DOT_ADJACENT_PUNCT_RE: Regex =
        Regex::new(r"(?i)(\.[^a-z0-9_]|[^a-z0-9_]\.)").unwrap();
    static ref TRAILING_PUNCT_RE: Regex = Regex::new(r"(?i)[^a-z0-9_]$").unwrap();
}

/// Address-range state derived from the rendered value at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
struct AddressFlags {
    ipv4: bool,
    ipv6: bool,
    local: bool,
    reserved: bool,
}

/// A parsed domain: optional sub-domain name plus optional second-level
/// domain, or a literal IP address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Domain {
    subdomain_name: Option<String>,
    sld: Option<SecondLevelDomain>,
    flags: AddressFlags,
}

impl Domain {
    fn new(subdomain_name: Option<String>, sld: Option<SecondLevelDomain>) -> Domain {
        let mut domain = Domain {
            subdomain_name,
            sld,
            flags: AddressFlags::default(),
        };
        let value = domain.to_string();
        domain.flags = AddressFlags {
            ipv4: IPV4_RE.is_match(&value),
            ipv6: IPV6_RE.is_match(&value),
            local: LOCAL_ADDRESS_RE.is_match(&value),
            reserved: RESERVED_ADDRESS_RE.is_match(&value),
        };
        domain
    }

    /// Parse a domain string such as `www.example.com`, `localhost`,
    /// `example.co.uk.`, or `192.168.1.1`.
    ///
    /// The string is consumed from the right: TLD first, then the
    /// second-level label; whatever remains is the sub-domain name. Input
    /// that fails label decomposition is accepted only if it is a literal
    /// IPv4 or IPv6 address. With `only_known` set, a resolved TLD that is
    /// not in the registries fails the parse.
    ///
    /// # Arguments
    ///
    /// * `text` - The domain string to parse
    /// * `only_known` - Whether the TLD must appear in the known registries
    pub fn parse(text: &str, only_known: bool) -> Result<Domain> {
        if text.is_empty() {
            return Err(ParseError::new(text, "empty domain"));
        }

        let (sld, remainder) = match SecondLevelDomain::extract_from_host(text, only_known) {
            Ok(pair) => pair,
            Err(_) => {
                if IP_LITERAL_RE.is_match(text) {
                    return Ok(Domain::new(Some(text.to_string()), None));
                }
                return Err(ParseError::new(
                    text,
                    "neither a host name nor an IP address literal",
                ));
            }
        };

        let subdomain_name = if remainder.is_empty() {
            None
        } else {
            if !SUBDOMAIN_RE.is_match(remainder)
                || DOT_ADJACENT_PUNCT_RE.is_match(remainder)
                || TRAILING_PUNCT_RE.is_match(remainder)
                || remainder.split('.').count() > 2
            {
                return Err(ParseError::new(text, "invalid sub-domain name"));
            }
            Some(remainder.to_string())
        };

        if only_known && !sld.has_known_tld() {
            return Err(ParseError::new(text, "top-level domain is not known"));
        }

        Ok(Domain::new(subdomain_name, Some(sld)))
    }

    /// The sub-domain name, if one exists. `None` when the value is an IP
    /// address.
    pub fn subdomain_name(&self) -> Option<&str> {
        if self.is_ip_address() {
            return None;
        }
        self.subdomain_name.as_deref()
    }

    /// The raw address text when the value is an IP address.
    pub fn ip_address(&self) -> Option<&str> {
        if self.is_ip_address() {
            self.subdomain_name.as_deref()
        } else {
            None
        }
    }

    /// The owned second-level domain, absent for IP addresses.
    pub fn sld(&self) -> Option<&SecondLevelDomain> {
        self.sld.as_ref()
    }

    /// Whether the value is a literal IPv4 or IPv6 address.
    pub fn is_ip_address(&self) -> bool {
        self.flags.ipv4 || self.flags.ipv6
    }

    /// Whether the value is a literal IPv4 address.
    pub fn is_ipv4_address(&self) -> bool {
        self.flags.ipv4
    }

    /// Whether the value is a literal IPv6 address.
    pub fn is_ipv6_address(&self) -> bool {
        self.flags.ipv6
    }

    /// Whether the value was written with an explicit root label.
    pub fn is_fully_qualified(&self) -> bool {
        self.sld
            .as_ref()
            .map_or(false, SecondLevelDomain::is_fully_qualified)
    }

    /// Whether a TLD was resolved. `false` for IP addresses.
    pub fn has_tld(&self) -> bool {
        self.sld.as_ref().map_or(false, SecondLevelDomain::has_tld)
    }

    /// Whether the TLD is a known two-label pair such as `co.uk`.
    pub fn has_double_tld(&self) -> bool {
        self.sld
            .as_ref()
            .map_or(false, SecondLevelDomain::has_double_tld)
    }

    /// Whether the TLD appears in the known registries.
    pub fn has_known_tld(&self) -> bool {
        self.sld
            .as_ref()
            .map_or(false, SecondLevelDomain::has_known_tld)
    }

    /// Whether a sub-domain name is present. `false` for IP addresses.
    pub fn has_subdomain(&self) -> bool {
        !self.is_ip_address()
            && self
                .subdomain_name
                .as_ref()
                .map_or(false, |name| !name.is_empty())
    }

    /// Whether the TLD is a known country code.
    pub fn is_country(&self) -> bool {
        self.sld.as_ref().map_or(false, SecondLevelDomain::is_country)
    }

    /// Whether the TLD is a known generic TLD.
    pub fn is_generic(&self) -> bool {
        self.sld.as_ref().map_or(false, SecondLevelDomain::is_generic)
    }

    /// Whether the TLD is a known geographic TLD.
    pub fn is_geographic(&self) -> bool {
        self.sld
            .as_ref()
            .map_or(false, SecondLevelDomain::is_geographic)
    }

    /// Whether the TLD is a localized punycode TLD.
    pub fn is_localized(&self) -> bool {
        self.sld
            .as_ref()
            .map_or(false, SecondLevelDomain::is_localized)
    }

    /// Whether the value is reserved: a special-use address range, or a
    /// reserved host or TLD.
    pub fn is_reserved(&self) -> bool {
        if self.flags.reserved || self.flags.local {
            return true;
        }
        self.sld.as_ref().map_or(false, SecondLevelDomain::is_reserved)
    }

    /// Whether the value is local: a loopback or private address range, or
    /// a local host name.
    pub fn is_local(&self) -> bool {
        if self.flags.local {
            return true;
        }
        self.sld.as_ref().map_or(false, SecondLevelDomain::is_local)
    }

    /// Whether the SLD is a known public URL shortener service.
    pub fn is_url_shortener(&self) -> bool {
        self.sld
            .as_ref()
            .map_or(false, SecondLevelDomain::is_url_shortener)
    }

    /// Whether the SLD is a known public dynamic-DNS service.
    pub fn is_dynamic(&self) -> bool {
        self.sld.as_ref().map_or(false, SecondLevelDomain::is_dynamic)
    }

    /// Render with the root dot at the TLD level.
    pub fn to_fully_qualified_string(&self) -> String {
        let subdomain = self.subdomain_name.as_deref().unwrap_or("");
        if subdomain.is_empty() {
            return match &self.sld {
                Some(sld) => sld.to_fully_qualified_string(),
                None => String::new(),
            };
        }
        match &self.sld {
            Some(sld) => format!("{}.{}", subdomain, sld.to_fully_qualified_string()),
            None => subdomain.to_string(),
        }
    }

    /// Render without the root dot.
    pub fn to_unqualified_string(&self) -> String {
        let subdomain = self.subdomain_name.as_deref().unwrap_or("");
        if subdomain.is_empty() {
            return match &self.sld {
                Some(sld) => sld.to_unqualified_string(),
                None => String::new(),
            };
        }
        match &self.sld {
            Some(sld) => format!("{}.{}", subdomain, sld.to_unqualified_string()),
            None => subdomain.to_string(),
        }
    }
}

impl fmt::Display for Domain {
    /// Renders as parsed; the root dot appears only if the value carried
    /// it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subdomain = self.subdomain_name.as_deref().unwrap_or("");
        if subdomain.is_empty() {
            return match &self.sld {
                Some(sld) => write!(f, "{}", sld),
                None => Ok(()),
            };
        }
        match &self.sld {
            Some(sld) => write!(f, "{}.{}", subdomain, sld),
            None => f.write_str(subdomain),
        }
    }
}
