//! Self-lookup flow: the caller's own public address

use crate::display::Viewport;
use crate::flow::messages::{LOADING, SELF_FAILURES};
use crate::flow::App;
use crate::geo::RequestOutcome;

impl App {
    /// Discover the public address, locate it, and show it in the
    /// self-check panel and map
    pub async fn check_self(&self) -> RequestOutcome {
        self.write(Viewport::SelfCheck, LOADING.to_panel());

        let outcome = self.client.resolve(None).await;
        self.apply(Viewport::SelfCheck, &outcome, SELF_FAILURES);
        outcome
    }
}
