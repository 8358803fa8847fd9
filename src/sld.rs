//! Second-level domain parsing.
//!
//! A second-level domain (SLD) pairs a host label with an optional
//! [`TopLevelDomain`]: `example.com` is the SLD of `www.example.com`. The
//! TLD may be absent (`localhost` is an SLD with no TLD), in which case all
//! TLD-derived classification reads default to `false`.
//!
//! Beyond the TLD flags, an SLD carries its own classification: local
//! hosts, reserved hosts, public dynamic-DNS providers, and public URL
//! shortener services, each checked against a fixed table.

use crate::error::ParseError;
use crate::tld::TopLevelDomain;
use crate::Result;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Public URL shortener domains, matched by exact lowercase comparison
/// against the full second-level-plus-TLD string.
const URL_SHORTENERS: &[&str] = &[
    "bit.do",
    "t.co",
    "lnkd.in",
    "db.tt",
    "qr.ae",
    "adf.ly",
    "goo.gl",
    "bitly.com",
    "cur.lv",
    "tinyurl.com",
    "ow.ly",
    "bit.ly",
    "adcrun.ch",
    "ity.im",
    "q.gs",
    "viralurl.com",
    "is.gd",
    "vur.me",
    "bc.vc",
    "twitthis.com",
    "u.to",
    "j.mp",
    "buzurl.com",
    "cutt.us",
    "u.bb",
    "yourls.org",
    "crisco.com",
    "x.co",
    "prettylinkpro.com",
    "viralurl.biz",
    "adcraft.co",
    "virl.ws",
    "scrnch.me",
    "filoops.info",
    "vurl.bz",
    "vzturl.com",
    "lemde.fr",
    "qr.net",
    "1url.com",
    "tweez.me",
    "7vd.cn",
    "v.gd",
    "dft.ba",
    "aka.gr",
    "tr.im",
    "tinyarrows.com",
    "adflav.com",
    "bee4.biz",
    "cektkp.com",
    "fun.ly",
    "fzy.co",
    "gog.li",
    "golinks.co",
    "hit.my",
    "id.tl",
    "linkto.im",
    "lnk.co",
    "nov.io",
    "p6l.org",
    "picz.us",
    "shortquik.com",
    "su.pr",
    "sk.gy",
    "tota2.com",
    "xlinkz.info",
    "xtu.me",
    "yu2.it",
    "zpag.es",
];

/// Public dynamic-DNS provider hosts, see <http://dnslookup.me/dynamic-dns/>.
const DYN_DNS_SERVICES: &str = r"(?i)^(.+\.wow64|(cable|optus|ddns|evangelion)\.nu|(45z|au2000|user32|darsite|darweb|dns2go|dnsmadeeasy|dnspark|dumb1|dyn(dns|dsl|serv|-access|nip)|thatip|tklapp|weedns|easydns|tzo|easydns4u|etowns|freelancedeveloper|hldns|powerdns|kyed|no-ip|ohflip|oray|servequake|usarmyreserve|wikababa|zerigo|zoneedit|zonomi)\.com|(dtdns|dynamic-dns|dynamic-site|dyns|dynserv|dynup|dyn-access|idleplay|minidns|sytes|tftpd|cjb|8866|xicp|planetdns|tzo)\.net|(afraid|3322|darktech|dhis|dhs|dynserv|dyn-access|irc-chat|planetdns|tzo)\.org|(dnsd|prout)\.be|dyn\.ee|dyn-access\.(de|info|biz)|dynam\.ac|dyn\.ro|my-ho\.st|(dyndns|lir|yaboo)\.dk|(dyns|metadns)\.cx|(homepc|myserver|ods|staticcling|yi|whyi|b0b|xname)\.org|widescreenhd\.tv|planetdns\.(biz|ca)|tzo\.cc)$";

lazy_static::lazy_static! {
    static ref DYN_DNS_RE: Regex = Regex::new(DYN_DNS_SERVICES).unwrap();

    static ref LOCAL_HOSTS_RE: Regex = Regex::new(r"^(local(host|domain)?)$").unwrap();

    static ref RESERVED_HOSTS_RE: Regex =
        Regex::new(r"^(example\.(com|net|org)|speedport\.ip)$").unwrap();

    // Host label alphabet; the `+` also enforces the two-character minimum.
    static ref HOST_LABEL_RE: Regex = Regex::new(r"(?i)^[a-z0-9_][a-z.0-9_-]+$").unwrap();

    // Same alphabet without the length minimum. A second-level label that
    // sits in front of a resolved TLD may be a single character (`t.co`,
    // `j.mp`, and friends are all in the shortener table).
    static ref SHORT_HOST_LABEL_RE: Regex = Regex::new(r"(?i)^[a-z0-9_][a-z.0-9_-]*$").unwrap();

    // Mirrors a loose numeric-literal check without misreading labels such
    // as `nan` or `inf` as numbers.
    static ref NUMERIC_RE: Regex =
        Regex::new(r"(?i)^[+-]?(\d+(\.\d+)?|\.\d+)(e[+-]?\d+)?$").unwrap();
}

fn is_url_shortener(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    URL_SHORTENERS.iter().any(|entry| *entry == lower)
}

fn is_numeric(text: &str) -> bool {
    NUMERIC_RE.is_match(text)
}

/// Classification state owned by the SLD itself (as opposed to state
/// delegated to the TLD).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
struct SldFlags {
    reserved: bool,
    local: bool,
    shortener: bool,
    dynamic: bool,
}

/// A second-level domain: a host label plus an optional owned TLD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecondLevelDomain {
    host_name: String,
    tld: Option<TopLevelDomain>,
    flags: SldFlags,
}

impl SecondLevelDomain {
    /// Parse a second-level domain string such as `example.com`,
    /// `localhost`, or `bit.ly`.
    ///
    /// Empty and purely numeric input is rejected. When `only_known` is
    /// set, input whose TLD cannot be resolved against the registries is
    /// rejected outright.
    pub fn parse(text: &str, only_known: bool) -> Result<SecondLevelDomain> {
        if text.is_empty() {
            return Err(ParseError::new(text, "empty second-level domain"));
        }
        if is_numeric(text) {
            return Err(ParseError::new(text, "purely numeric input is not a host name"));
        }

        let (host_text, tld, mut flags) = match TopLevelDomain::extract_from_host(text, only_known)
        {
            Ok((tld, rest)) => {
                let flags = SldFlags {
                    reserved: tld.is_reserved(),
                    shortener: is_url_shortener(text),
                    ..SldFlags::default()
                };
                (rest, Some(tld), flags)
            }
            Err(_) => {
                if only_known && text.contains('.') {
                    return Err(ParseError::new(text, "no known top-level domain suffix"));
                }
                if only_known && !TopLevelDomain::ends_with_valid_tld(text) {
                    return Err(ParseError::new(text, "no valid top-level domain suffix"));
                }
                (text, None, SldFlags::default())
            }
        };

        if !HOST_LABEL_RE.is_match(host_text) {
            return Err(ParseError::new(text, "invalid host label"));
        }

        apply_host_flags(&mut flags, text);

        Ok(SecondLevelDomain {
            host_name: host_text.to_string(),
            tld,
            flags,
        })
    }

    /// Extract the second-level domain from a full host string.
    ///
    /// `www.example.com` yields the SLD `example.com` and the remainder
    /// `www`; the remainder is everything left of the second-level label
    /// and becomes the caller's candidate sub-domain text.
    pub fn extract_from_host(host: &str, only_known: bool) -> Result<(SecondLevelDomain, &str)> {
        if host.is_empty() {
            return Err(ParseError::new(host, "empty host string"));
        }

        let final_label = match host.rfind('.') {
            Some(index) => &host[index + 1..],
            None => host,
        };
        if is_numeric(final_label) {
            return Err(ParseError::new(host, "numeric final label"));
        }

        let (after_tld, tld, mut flags) = match TopLevelDomain::extract_from_host(host, only_known)
        {
            Ok((tld, rest)) => {
                let label = match rest.rfind('.') {
                    Some(index) => &rest[index + 1..],
                    None => rest,
                };
                let flags = SldFlags {
                    reserved: tld.is_reserved(),
                    // The table holds unqualified entries, so the root dot
                    // must not take part in the lookup.
                    shortener: is_url_shortener(&format!(
                        "{}.{}",
                        label,
                        tld.to_unqualified_string()
                    )),
                    ..SldFlags::default()
                };
                (rest, Some(tld), flags)
            }
            Err(_) => {
                if only_known && !TopLevelDomain::ends_with_valid_tld(host) {
                    return Err(ParseError::new(host, "no valid top-level domain suffix"));
                }
                (host, None, SldFlags::default())
            }
        };

        let label_re = if tld.is_some() {
            &*SHORT_HOST_LABEL_RE
        } else {
            &*HOST_LABEL_RE
        };
        if !label_re.is_match(after_tld) {
            return Err(ParseError::new(host, "invalid host label"));
        }

        let (remainder, label) = match after_tld.rfind('.') {
            Some(index) => (&after_tld[..index], &after_tld[index + 1..]),
            None => ("", after_tld),
        };

        let sld_string = match &tld {
            Some(tld) => format!("{}.{}", label, tld.to_unqualified_string()),
            None => label.to_string(),
        };
        apply_host_flags(&mut flags, &sld_string);

        Ok((
            SecondLevelDomain {
                host_name: label.to_string(),
                tld,
                flags,
            },
            remainder,
        ))
    }

    /// The host label text. Empty when only a TLD was supplied.
    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    /// The owned TLD, if one was resolved.
    pub fn tld(&self) -> Option<&TopLevelDomain> {
        self.tld.as_ref()
    }

    /// Whether a TLD was resolved.
    pub fn has_tld(&self) -> bool {
        self.tld.is_some()
    }

    /// Whether a host label is present.
    pub fn has_host_name(&self) -> bool {
        !self.host_name.is_empty()
    }

    /// Whether the SLD was written with an explicit root label.
    pub fn is_fully_qualified(&self) -> bool {
        self.tld
            .as_ref()
            .map_or(false, TopLevelDomain::is_fully_qualified)
    }

    /// Whether the TLD is a known country code. `false` without a TLD.
    pub fn is_country(&self) -> bool {
        self.tld.as_ref().map_or(false, TopLevelDomain::is_country)
    }

    /// Whether the TLD is a known generic TLD. `false` without a TLD.
    pub fn is_generic(&self) -> bool {
        self.tld.as_ref().map_or(false, TopLevelDomain::is_generic)
    }

    /// Whether the TLD is a known geographic TLD. `false` without a TLD.
    pub fn is_geographic(&self) -> bool {
        self.tld
            .as_ref()
            .map_or(false, TopLevelDomain::is_geographic)
    }

    /// Whether the TLD is a localized punycode TLD. `false` without a TLD.
    pub fn is_localized(&self) -> bool {
        self.tld
            .as_ref()
            .map_or(false, TopLevelDomain::is_localized)
    }

    /// Whether the SLD or its TLD is reserved (`example.com`, `arpa`, ...).
    pub fn is_reserved(&self) -> bool {
        if self.flags.reserved {
            return true;
        }
        self.tld.as_ref().map_or(false, TopLevelDomain::is_reserved)
    }

    /// Whether the TLD appears in the registries. `false` without a TLD.
    pub fn has_known_tld(&self) -> bool {
        self.tld.as_ref().map_or(false, TopLevelDomain::is_known)
    }

    /// Whether the TLD is a two-label pair. `false` without a TLD.
    pub fn has_double_tld(&self) -> bool {
        self.tld.as_ref().map_or(false, TopLevelDomain::is_double)
    }

    /// Whether the SLD names a local host (`local`, `localhost`,
    /// `localdomain`).
    pub fn is_local(&self) -> bool {
        self.flags.local
    }

    /// Whether the SLD is a known public URL shortener service.
    pub fn is_url_shortener(&self) -> bool {
        self.flags.shortener
    }

    /// Whether the SLD is a known public dynamic-DNS service.
    pub fn is_dynamic(&self) -> bool {
        self.flags.dynamic
    }

    /// Render with the root dot at the TLD level.
    pub fn to_fully_qualified_string(&self) -> String {
        if self.host_name.is_empty() {
            return match &self.tld {
                Some(tld) => tld.to_fully_qualified_string(),
                None => String::new(),
            };
        }
        match &self.tld {
            Some(tld) => format!("{}.{}", self.host_name, tld.to_fully_qualified_string()),
            None => self.host_name.clone(),
        }
    }

    /// Render without the root dot.
    pub fn to_unqualified_string(&self) -> String {
        if self.host_name.is_empty() {
            return match &self.tld {
                Some(tld) => tld.to_unqualified_string(),
                None => String::new(),
            };
        }
        match &self.tld {
            Some(tld) => format!("{}.{}", self.host_name, tld.to_unqualified_string()),
            None => self.host_name.clone(),
        }
    }
}

/// Local, dynamic-DNS, and reserved-host classification shared by both
/// parse entry points. `candidate` is the string the tables are matched
/// against; the two entry points feed it differently.
fn apply_host_flags(flags: &mut SldFlags, candidate: &str) {
    if LOCAL_HOSTS_RE.is_match(candidate) {
        flags.local = true;
        flags.reserved = true;
    } else if DYN_DNS_RE.is_match(candidate) {
        flags.dynamic = true;
    }
    if !flags.reserved && RESERVED_HOSTS_RE.is_match(candidate) {
        flags.reserved = true;
    }
}

impl fmt::Display for SecondLevelDomain {
    /// Renders as parsed; the root dot appears only if the TLD carried it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host_name.is_empty() {
            return match &self.tld {
                Some(tld) => write!(f, "{}", tld),
                None => Ok(()),
            };
        }
        match &self.tld {
            Some(tld) => write!(f, "{}.{}", self.host_name, tld),
            None => f.write_str(&self.host_name),
        }
    }
}
