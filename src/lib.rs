//! # Domain Parts
//!
//! A library for decomposing internet host names into their constituent
//! labels — optional sub-domain, second-level domain, top-level domain,
//! and an optional fully-qualified root marker — with a rich set of
//! classification flags attached along the way.
//!
//! Parsing runs right to left: the TLD is classified first, then the label
//! before it becomes the second-level label, and whatever remains is the
//! sub-domain. A string that fails label decomposition can still be
//! accepted as a literal IPv4 or IPv6 address.
//!
//! ## Quick Start
//!
//! ```rust
//! use domain_parts::Domain;
//!
//! fn main() -> domain_parts::Result<()> {
//!     let host = Domain::parse("www.rust-lang.org", false)?;
//!     assert_eq!(host.subdomain_name(), Some("www"));
//!     assert!(host.has_known_tld());
//!     assert!(!host.is_ip_address());
//!
//!     let address = Domain::parse("192.168.1.1", false)?;
//!     assert!(address.is_ipv4_address());
//!     assert!(address.is_local());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Right-to-left decomposition**: TLD, second-level label, sub-domain
//! - **Registry classification**: country, generic, geographic, localized,
//!   reserved, and double TLDs
//! - **Host classification**: local hosts, reserved hosts, dynamic-DNS
//!   providers, URL shortener services
//! - **IP literals**: IPv4/IPv6 recognition with local and special-use
//!   range detection
//! - **Mail addresses**: local-part validation on top of the domain engine

// Re-export main public API types
// This makes them available as domain_parts::TypeName
pub use domain::Domain;
pub use error::ParseError;
pub use mail::{MailAddress, MailAddressOptions};
pub use sld::SecondLevelDomain;
pub use tld::TopLevelDomain;

// Internal modules - only the re-exported types are part of the public API
mod domain;
mod error;
mod mail;
mod sld;
mod tld;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, ParseError>;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
