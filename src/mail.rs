//! Mail address parsing.
//!
//! A mail address pairs a validated local part with an owned [`Domain`].
//! The domain side reuses the full host decomposition engine; this module
//! only adds the local-part grammar and the strictness policy around
//! reserved domains and missing TLDs.

use crate::domain::Domain;
use crate::error::ParseError;
use crate::Result;
use regex::Regex;
use serde::Serialize;
use std::fmt;

lazy_static::lazy_static! {
    // Local-part alphabet. The umlaut letters are admitted for historical
    // compatibility with German mailbox names.
    static ref USER_RE: Regex = Regex::new(r"(?i)^[a-zäöü_][a-zäöüß0-9_.%+-]*$").unwrap();

    // Rough candidate shape for scanning free text. Hits are then run
    // through the normal parse path, which does the real validation.
    static ref CANDIDATE_RE: Regex =
        Regex::new(r"(?i)[a-zäöüß0-9%_.+-]+@[a-z0-9_.-]+").unwrap();
}

/// Strictness options for [`MailAddress::parse_with`].
///
/// The defaults are the strict profile: the domain must carry a known TLD
/// and must not be reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MailAddressOptions {
    /// Whether the domain part must carry a TLD at all.
    pub require_tld: bool,
    /// Whether the TLD must appear in the known registries.
    pub require_known_tld: bool,
    /// Whether reserved hosts, TLDs, and address ranges are acceptable.
    pub allow_reserved: bool,
}

impl Default for MailAddressOptions {
    fn default() -> Self {
        Self {
            require_tld: true,
            require_known_tld: true,
            allow_reserved: false,
        }
    }
}

impl MailAddressOptions {
    /// Require (or not) that the domain part carries a TLD.
    pub fn with_require_tld(mut self, required: bool) -> Self {
        self.require_tld = required;
        self
    }

    /// Require (or not) that the TLD appears in the known registries.
    pub fn with_require_known_tld(mut self, required: bool) -> Self {
        self.require_known_tld = required;
        self
    }

    /// Accept (or not) reserved domains and address ranges.
    pub fn with_allow_reserved(mut self, allowed: bool) -> Self {
        self.allow_reserved = allowed;
        self
    }

    /// The lenient profile used when scanning free text.
    fn lenient() -> Self {
        Self::default()
            .with_require_tld(false)
            .with_require_known_tld(false)
            .with_allow_reserved(true)
    }
}

/// A validated mail address: local part plus owned domain.
///
/// Both parts are lowercased during parsing. Equality compares the stored
/// local parts byte-for-byte and the domains by their default string
/// rendering.
///
/// ```
/// use domain_parts::MailAddress;
///
/// let address = MailAddress::parse("team@github.com").unwrap();
/// assert_eq!(address.user(), "team");
/// assert_eq!(address.to_string(), "team@github.com");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct MailAddress {
    user: String,
    domain: Domain,
}

impl MailAddress {
    /// Parse a mail address under the strict default options.
    pub fn parse(text: &str) -> Result<MailAddress> {
        Self::parse_with(text, MailAddressOptions::default())
    }

    /// Parse a mail address string.
    ///
    /// The string is split at the first `@`; the local part must match the
    /// local-part alphabet, and the remainder must parse as a [`Domain`]
    /// under the requested strictness.
    pub fn parse_with(text: &str, options: MailAddressOptions) -> Result<MailAddress> {
        let at_index = match text.find('@') {
            Some(index) => index,
            None => return Err(ParseError::new(text, "missing '@' separator")),
        };

        let user = text[..at_index].to_lowercase();
        let domain_text = text[at_index + 1..].to_lowercase();

        if !USER_RE.is_match(&user) {
            return Err(ParseError::new(text, "invalid local part"));
        }

        let domain = Domain::parse(
            &domain_text,
            options.require_tld && options.require_known_tld,
        )?;

        if options.require_tld && !domain.has_tld() {
            return Err(ParseError::new(text, "domain part has no top-level domain"));
        }
        if !options.allow_reserved && domain.is_reserved() {
            return Err(ParseError::new(text, "domain part is reserved"));
        }

        Ok(MailAddress { user, domain })
    }

    /// Extract every parsable mail address embedded in free text.
    ///
    /// Candidates are matched loosely and then validated through the
    /// lenient parse profile; anything that fails is skipped.
    pub fn extract_all(text: &str) -> Vec<MailAddress> {
        CANDIDATE_RE
            .find_iter(text)
            .filter_map(|candidate| {
                Self::parse_with(candidate.as_str(), MailAddressOptions::lenient()).ok()
            })
            .collect()
    }

    /// The local part (everything before the first `@`), lowercased.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The domain part.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }
}

impl fmt::Display for MailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.domain.to_unqualified_string())
    }
}

impl PartialEq for MailAddress {
    fn eq(&self, other: &Self) -> bool {
        self.user == other.user && self.domain.to_string() == other.domain.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_address() {
        let address = MailAddress::parse("john.doe@github.com").unwrap();
        assert_eq!(address.user(), "john.doe");
        assert_eq!(address.domain().to_string(), "github.com");
        assert_eq!(address.to_string(), "john.doe@github.com");
    }

    #[test]
    fn test_parse_lowercases_both_parts() {
        let address = MailAddress::parse("John.Doe@GitHub.COM").unwrap();
        assert_eq!(address.user(), "john.doe");
        assert_eq!(address.to_string(), "john.doe@github.com");
    }

    #[test]
    fn test_parse_umlaut_local_part() {
        let address = MailAddress::parse("müller@github.com").unwrap();
        assert_eq!(address.user(), "müller");
    }

    #[test]
    fn test_parse_rejects_missing_at() {
        assert!(MailAddress::parse("john.doe.github.com").is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_local_part() {
        assert!(MailAddress::parse("jo hn@github.com").is_err());
        assert!(MailAddress::parse("@github.com").is_err());
        assert!(MailAddress::parse("9to5@github.com").is_err());
    }

    #[test]
    fn test_parse_rejects_reserved_domain_by_default() {
        assert!(MailAddress::parse("admin@example.com").is_err());

        let options = MailAddressOptions::default().with_allow_reserved(true);
        let address = MailAddress::parse_with("admin@example.com", options).unwrap();
        assert!(address.domain().is_reserved());
    }

    #[test]
    fn test_parse_rejects_unknown_tld_by_default() {
        assert!(MailAddress::parse("dev@host.zz").is_err());

        let options = MailAddressOptions::default().with_require_known_tld(false);
        let address = MailAddress::parse_with("dev@host.zz", options).unwrap();
        assert!(address.domain().has_tld());
        assert!(!address.domain().has_known_tld());
    }

    #[test]
    fn test_parse_requires_tld_by_default() {
        // `myhost` alone resolves with no TLD, which the strict profile
        // rejects before the reserved check even runs.
        let options = MailAddressOptions::default().with_require_known_tld(false);
        assert!(MailAddress::parse_with("root@myhost", options).is_err());

        let lenient = options.with_require_tld(false).with_allow_reserved(true);
        let address = MailAddress::parse_with("root@myhost", lenient).unwrap();
        assert!(!address.domain().has_tld());
    }

    #[test]
    fn test_equality() {
        let first = MailAddress::parse("Team@GitHub.com").unwrap();
        let second = MailAddress::parse("team@github.com").unwrap();
        assert_eq!(first, second);

        let other_user = MailAddress::parse("info@github.com").unwrap();
        assert_ne!(first, other_user);

        let other_domain = MailAddress::parse("team@gitlab.com").unwrap();
        assert_ne!(first, other_domain);
    }

    #[test]
    fn test_extract_all_from_text() {
        let text = "Reach us at sales@orange.fr or support@rust-lang.org. Thanks!";
        let found = MailAddress::extract_all(text);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].user(), "sales");
        assert_eq!(found[0].domain().to_unqualified_string(), "orange.fr");
        assert_eq!(found[1].user(), "support");
    }

    #[test]
    fn test_extract_all_skips_invalid_candidates() {
        // `9` is numeric and `b` is below the host-label minimum, so both
        // candidates fail the real parse.
        let found = MailAddress::extract_all("ping x@9 or a@b here");
        assert!(found.is_empty());
    }
}
