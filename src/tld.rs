//! Top-level domain classification.
//!
//! A TLD is the rightmost label of a host name (`com` in `www.example.com`),
//! or one of a fixed set of two-label pairs such as `co.uk`. A trailing root
//! dot (`com.`) marks the TLD as fully qualified.
//!
//! Classification runs against fixed registry tables in a strict precedence
//! order: double, generic, reserved, geographic, localized-generic,
//! localized-country, then a final unguarded country test. The tables are
//! compiled once into process-wide regular expressions and never mutated.

use crate::error::ParseError;
use crate::Result;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Single-label TLD shape: an `xn--` punycode label, a plain alphabetic
/// label of 2-12 letters, or the legacy literal `wow64`.
const KNOWN_FORMAT: &str = r"xn--[a-z\d]{3,24}|[a-z]{2,12}|wow64";

const KNOWN_GENERIC: &str = "com|edu|gov|int|mil|net|org";

const KNOWN_RESERVED: &str = "arpa|example|test|tld";

/// Two-letter country codes, grouped by first letter.
const KNOWN_COUNTRY: &str = "a[cdefgilmnoqrstuwxz]|b[abmnorstvwyzd-j]|c[acdrf-ik-ou-z]|d[ejkmoz]|e[cegrstu]|f[ijkmor]|g[abdefghilmnpqrstuwy]|h[kmnrtu]|i[delmnoqrst]|j[emop]|k[eghimnqrwz]|l[abcikrstuvy]|m[acdeghk-z]|n[acefgilopruz]|om|p[aefghklmnrstwy]|qa|r[eosuw]|s[xyza-eg-or-v]|t[cdfghrstvwzj-p]|u[agksyz]|v[aceginu]|w[fs]|y[etu]|z[amrw]";

/// Punycode forms of country TLDs.
const KNOWN_LC_COUNTRY: &str = "xn--(3e0b707e|45brj9c|54b7fta0cc|80ao21a|90a(is|3ac)|clchc0ea0b2g2a9gcd|d1alf|fiq(s8|z9)s|fpcrj9c3d|fzc2c9e2c|gecrj9c|h2brj9c|j1amh|j6w193g|kpr(w13d|y57d)|l1acc|lgbbat1ad8j|mgb(2ddes|9awbf|a3a4f16a|aam7a8h|ai9azgqp6j|ayh7gpa|bh1a71e|c0a9azcg|erp4a5d4ar|pl2fh|tx2b|x4cd0ab|xkc2al3hye2a)|node|o3cw4h|ogbpf8fl|p1ai|pgbs0dh|s9brj9c|wgb(h1c|l6a)|xkc2dl3a5ee0h|yfro4i67o|ygbi2ammx|y9a3aq)";

/// Punycode forms of generic TLDs.
const KNOWN_LC_GENERIC: &str = "xn--(3ds443g|55qx5d|6frz82g|6qq986b3xl|80asehdb|80aswg|c1avg|czr694b|czru2d|d1acj3b|fiq228c5hs|i1b6b1a6a2e|io0a7i|ngbc5azd|nqv7f|mgbab2bd|q9jyb4c|rhqv96g|ses554g)";

const KNOWN_GEOGRAPHIC: &str = "asia|bayern|berlin|brussels|budapest|bzh|cat|cologne|cymru|hamburg|kiwi|koeln|london|moscow|nagoya|nyc|okinawa|paris|ruhr|saarland|tirol|tokyo|vegas|vlaanderen|wales|wien|yokohama|москва|xn--80adxhks";

/// Two-label TLD pairs, enumerated explicitly rather than inferred.
const DOUBLE_TLDS: &str = r"(co|or)\.at|(com|nom|org)\.es|(ac|co|gov|ltd|me|net|nic|nhs|org|plc|sch)\.uk|(biz|com|info|net|org)\.pl|(com|net|org)\.vc|(com|org)\.au|(com|tv|net)\.br";

// Compiled classification tables using lazy_static
lazy_static::lazy_static! {
    static ref VALID_TLD_RE: Regex =
        Regex::new(&format!(r"(?i)^(({})|{})\.?$", DOUBLE_TLDS, KNOWN_FORMAT)).unwrap();

    static ref KNOWN_TLD_RE: Regex = Regex::new(&format!(
        r"(?i)^(({})|{}|{}|{}|{}|{}|{})\.?$",
        DOUBLE_TLDS,
        KNOWN_GENERIC,
        KNOWN_COUNTRY,
        KNOWN_GEOGRAPHIC,
        KNOWN_LC_COUNTRY,
        KNOWN_LC_GENERIC,
        KNOWN_RESERVED
    ))
    .unwrap();

    // The lazy prefix binds the shortest prefix, which hands the longest
    // trailing match to the TLD group: `example.co.uk` always yields
    // `co.uk`, never `uk`.
    static ref EXTRACT_RE: Regex =
        Regex::new(&format!(r"(?i)^(.+?)\.((({})|{})\.?)$", DOUBLE_TLDS, KNOWN_FORMAT)).unwrap();

    static ref EXTRACT_KNOWN_RE: Regex = Regex::new(&format!(
        r"(?i)^(.+?)\.((({})|{}|{}|{}|{}|{}|{})\.?)$",
        DOUBLE_TLDS,
        KNOWN_GENERIC,
        KNOWN_COUNTRY,
        KNOWN_GEOGRAPHIC,
        KNOWN_LC_COUNTRY,
        KNOWN_LC_GENERIC,
        KNOWN_RESERVED
    ))
    .unwrap();

    static ref TLD_SUFFIX_RE: Regex =
        Regex::new(&format!(r"(?i)\.(({})|{})\.?$", DOUBLE_TLDS, KNOWN_FORMAT)).unwrap();

    static ref DOUBLE_RE: Regex =
        Regex::new(&format!(r"(?i)^({})$", DOUBLE_TLDS)).unwrap();
    static ref GENERIC_RE: Regex =
        Regex::new(&format!(r"(?i)^({})$", KNOWN_GENERIC)).unwrap();
    static ref RESERVED_RE: Regex =
        Regex::new(&format!(r"(?i)^({})$", KNOWN_RESERVED)).unwrap();
    static ref GEOGRAPHIC_RE: Regex =
        Regex::new(&format!(r"(?i)^({})$", KNOWN_GEOGRAPHIC)).unwrap();
    static ref LC_GENERIC_RE: Regex =
        Regex::new(&format!(r"(?i)^({})$", KNOWN_LC_GENERIC)).unwrap();
    static ref LC_COUNTRY_RE: Regex =
        Regex::new(&format!(r"(?i)^({})$", KNOWN_LC_COUNTRY)).unwrap();
    static ref COUNTRY_RE: Regex =
        Regex::new(&format!(r"(?i)^({})$", KNOWN_COUNTRY)).unwrap();
}

/// Classification state of a top-level domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
struct TldFlags {
    fully_qualified: bool,
    double: bool,
    generic: bool,
    reserved: bool,
    geographic: bool,
    localized: bool,
    country: bool,
    known: bool,
}

/// A classified top-level domain label.
///
/// Holds the label text with the trailing root dot stripped (qualification
/// is remembered as a flag) together with the classification outcome.
/// Instances are only created by [`TopLevelDomain::parse`] and
/// [`TopLevelDomain::extract_from_host`] and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopLevelDomain {
    value: String,
    flags: TldFlags,
}

impl TopLevelDomain {
    /// Parse a bare TLD string such as `com`, `co.uk`, or `com.`.
    ///
    /// When `only_known` is set, a single label must additionally appear in
    /// one of the enumerated registries (generic, country, geographic,
    /// localized, reserved); the double-label set is always accepted. A
    /// trailing root dot is accepted and recorded as the fully-qualified
    /// state.
    pub fn parse(text: &str, only_known: bool) -> Result<TopLevelDomain> {
        if text.is_empty() {
            return Err(ParseError::new(text, "empty top-level domain"));
        }

        let accepted = if only_known {
            KNOWN_TLD_RE.is_match(text)
        } else {
            VALID_TLD_RE.is_match(text)
        };

        if !accepted {
            return Err(ParseError::new(text, "not a valid top-level domain"));
        }

        Ok(Self::classify(text))
    }

    /// Extract the trailing TLD from a larger host string.
    ///
    /// Returns the classified TLD together with the unconsumed prefix (all
    /// labels before it). At least one preceding label is required, so a
    /// bare TLD does not match this entry point.
    ///
    /// # Arguments
    ///
    /// * `host` - The dot-delimited host string to consume from the right
    /// * `only_known` - Whether single labels must appear in the registries
    pub fn extract_from_host(host: &str, only_known: bool) -> Result<(TopLevelDomain, &str)> {
        if host.is_empty() {
            return Err(ParseError::new(host, "empty host string"));
        }

        let regex = if only_known {
            &*EXTRACT_KNOWN_RE
        } else {
            &*EXTRACT_RE
        };

        let caps = match regex.captures(host) {
            Some(caps) => caps,
            None => return Err(ParseError::new(host, "host has no valid top-level domain")),
        };

        let remainder = caps.get(1).map_or("", |m| m.as_str());
        let tld_text = caps.get(2).map_or("", |m| m.as_str());

        Ok((Self::classify(tld_text), remainder))
    }

    /// Whether `text` ends with a substring usable as a TLD.
    ///
    /// A cheap suffix test for callers that want to reject strings with no
    /// plausible TLD before attempting a full parse.
    pub fn ends_with_valid_tld(text: &str) -> bool {
        TLD_SUFFIX_RE.is_match(text)
    }

    /// Run the ordered classification chain over an accepted TLD string.
    fn classify(raw: &str) -> TopLevelDomain {
        let (value, fully_qualified) = match raw.strip_suffix('.') {
            Some(stripped) => (stripped, true),
            None => (raw, false),
        };

        let mut flags = TldFlags {
            fully_qualified,
            ..TldFlags::default()
        };

        if DOUBLE_RE.is_match(value) {
            flags.double = true;
        }
        if !flags.double && GENERIC_RE.is_match(value) {
            flags.generic = true;
        }
        if !flags.double && !flags.generic && RESERVED_RE.is_match(value) {
            flags.reserved = true;
        }
        if !flags.double && !flags.generic && !flags.reserved && GEOGRAPHIC_RE.is_match(value) {
            flags.geographic = true;
        }
        if !flags.double
            && !flags.generic
            && !flags.reserved
            && !flags.geographic
            && LC_GENERIC_RE.is_match(value)
        {
            flags.generic = true;
            flags.localized = true;
        }
        if !flags.double
            && !flags.generic
            && !flags.reserved
            && !flags.geographic
            && !flags.localized
            && LC_COUNTRY_RE.is_match(value)
        {
            flags.country = true;
            flags.localized = true;
        }
        // The plain country test is not guarded by the earlier classes and
        // can add `country` to a label that already matched one of them.
        if COUNTRY_RE.is_match(value) {
            flags.country = true;
        }

        flags.known =
            flags.double || flags.generic || flags.reserved || flags.geographic || flags.country;

        TopLevelDomain {
            value: value.to_string(),
            flags,
        }
    }

    /// The label text without the trailing root dot.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the TLD was written with an explicit root label (`com.`).
    pub fn is_fully_qualified(&self) -> bool {
        self.flags.fully_qualified
    }

    /// Whether the TLD is a known two-label pair such as `co.uk`.
    pub fn is_double(&self) -> bool {
        self.flags.double
    }

    /// Whether the TLD is a known generic TLD (`com`, `net`, `org`, ...),
    /// including the localized punycode forms.
    pub fn is_generic(&self) -> bool {
        self.flags.generic
    }

    /// Whether the TLD is reserved (`arpa`, `example`, `test`, `tld`).
    pub fn is_reserved(&self) -> bool {
        self.flags.reserved
    }

    /// Whether the TLD is a known geographic TLD (`asia`, `berlin`, ...).
    pub fn is_geographic(&self) -> bool {
        self.flags.geographic
    }

    /// Whether the TLD is a localized punycode TLD (`xn--...`).
    pub fn is_localized(&self) -> bool {
        self.flags.localized
    }

    /// Whether the TLD is a known country code (`de`, `uk`, ...), including
    /// the localized punycode forms.
    pub fn is_country(&self) -> bool {
        self.flags.country
    }

    /// Whether the TLD appears in any of the enumerated registries.
    pub fn is_known(&self) -> bool {
        self.flags.known
    }

    /// Render with the root dot regardless of how the TLD was written.
    pub fn to_fully_qualified_string(&self) -> String {
        format!("{}.", self.value)
    }

    /// Render without the root dot regardless of how the TLD was written.
    pub fn to_unqualified_string(&self) -> String {
        self.value.clone()
    }
}

impl fmt::Display for TopLevelDomain {
    /// Renders the label as parsed: the root dot appears only if the TLD
    /// was fully qualified.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.flags.fully_qualified {
            write!(f, "{}.", self.value)
        } else {
            f.write_str(&self.value)
        }
    }
}
