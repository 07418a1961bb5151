//! Regular expressions for validating user-supplied addresses
//!
//! Only dotted-quad IPv4 is accepted by the manual lookup, so a single
//! anchored pattern is all this module carries.

use once_cell::sync::Lazy;
use regex::Regex;

/// Strict IPv4 regex
/// Matches a whole string made of four octets in 0-255, like 192.168.1.1
pub static IPV4_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$"
    )
    .expect("Failed to compile IPv4 regex")
});

/// Check whether `text` is exactly one dotted-quad IPv4 address
///
/// No trimming happens here; callers trim first.
pub fn is_valid_ipv4(text: &str) -> bool {
    IPV4_RE.is_match(text)
}
