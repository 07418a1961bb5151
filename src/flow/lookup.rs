//! Manual lookup flow: an address typed by the user

use crate::display::Viewport;
use crate::error::CheckError;
use crate::flow::messages::{Triple, LOADING, LOOKUP_EMPTY, LOOKUP_FAILURES, LOOKUP_INVALID};
use crate::flow::App;
use crate::geo::{LookupResult, RequestOutcome};
use crate::regex::is_valid_ipv4;

/// Why user input was rejected before any request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputProblem {
    Empty,
    InvalidFormat,
}

impl InputProblem {
    pub fn message(self) -> &'static str {
        match self {
            InputProblem::Empty => "No input provided",
            InputProblem::InvalidFormat => "Invalid IP format",
        }
    }

    fn triple(self) -> Triple {
        match self {
            InputProblem::Empty => LOOKUP_EMPTY,
            InputProblem::InvalidFormat => LOOKUP_INVALID,
        }
    }
}

impl From<InputProblem> for CheckError {
    fn from(problem: InputProblem) -> Self {
        CheckError::validation(problem.message())
    }
}

/// Trim user input and check it is a dotted-quad IPv4 address
pub fn validate_input(input: &str) -> Result<&str, InputProblem> {
    let ip = input.trim();
    if ip.is_empty() {
        return Err(InputProblem::Empty);
    }
    if !is_valid_ipv4(ip) {
        return Err(InputProblem::InvalidFormat);
    }
    Ok(ip)
}

impl App {
    /// Validate `input`, locate it, and show it in the lookup panel and map
    ///
    /// Rejected input is reported in the panel without any network call.
    pub async fn lookup(&self, input: &str) -> RequestOutcome {
        let ip = match validate_input(input) {
            Ok(ip) => ip,
            Err(problem) => {
                log::warn!("Rejected lookup input {:?}: {}", input, problem.message());
                self.write(Viewport::Lookup, problem.triple().to_panel());
                let rejected: crate::error::Result<LookupResult> = Err(problem.into());
                return rejected.into();
            }
        };

        self.write(Viewport::Lookup, LOADING.to_panel());

        let outcome = self.client.resolve(Some(ip)).await;
        self.apply(Viewport::Lookup, &outcome, LOOKUP_FAILURES);
        outcome
    }
}
