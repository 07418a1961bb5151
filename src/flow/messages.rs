//! Fixed user-visible message triples (ip, location, isp)

use crate::display::Panel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triple {
    pub ip: &'static str,
    pub location: &'static str,
    pub isp: &'static str,
}

impl Triple {
    const fn new(ip: &'static str, location: &'static str, isp: &'static str) -> Self {
        Self { ip, location, isp }
    }

    pub fn to_panel(self) -> Panel {
        Panel::new(self.ip, self.location, self.isp)
    }
}

pub const LOADING: Triple = Triple::new("Loading...", "Loading...", "Loading...");

pub const TIMEOUT: Triple = Triple::new("Request timeout", "Please try again", "Timeout");

pub const SELF_UNAVAILABLE: Triple =
    Triple::new("Service unavailable", "Please check connection", "Error");

pub const LOOKUP_EMPTY: Triple = Triple::new("Please enter an IP", "No input provided", "Error");

pub const LOOKUP_INVALID: Triple =
    Triple::new("Invalid IP format", "Please check IP address", "Invalid");

pub const LOOKUP_FAILED: Triple = Triple::new("Lookup failed", "Service unavailable", "Error");

/// Failure wording used by one flow
#[derive(Debug, Clone, Copy)]
pub struct FailureMessages {
    pub timeout: Triple,
    pub unavailable: Triple,
}

pub const SELF_FAILURES: FailureMessages = FailureMessages {
    timeout: TIMEOUT,
    unavailable: SELF_UNAVAILABLE,
};

pub const LOOKUP_FAILURES: FailureMessages = FailureMessages {
    timeout: TIMEOUT,
    unavailable: LOOKUP_FAILED,
};
