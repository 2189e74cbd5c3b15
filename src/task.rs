//! Background breach lookups.
//!
//! Each lookup runs as its own tokio task, tagged with a request id and
//! owning a [`CancellationToken`]. Results travel back over an mpsc channel
//! so the owner of the application state applies them on its own loop.

use secrecy::SecretString;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::breach::{BreachChecker, BreachOutcome};

/// Result of one breach lookup, tagged with the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreachDelivery {
    pub request_id: u64,
    pub outcome: BreachOutcome,
}

/// Handle on a running lookup. The task itself is detached; dropping the
/// handle does not stop it, [`BreachTask::cancel`] does.
#[derive(Debug)]
pub struct BreachTask {
    pub request_id: u64,
    token: CancellationToken,
}

impl BreachTask {
    /// Spawns the lookup on the current tokio runtime.
    pub fn spawn(
        checker: BreachChecker,
        password: SecretString,
        request_id: u64,
        tx: mpsc::Sender<BreachDelivery>,
    ) -> Self {
        let token = CancellationToken::new();
        tokio::spawn(run_breach_lookup(
            checker,
            password,
            request_id,
            token.clone(),
            tx,
        ));
        Self { request_id, token }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Runs one lookup and sends its outcome unless `token` fires first.
pub async fn run_breach_lookup(
    checker: BreachChecker,
    password: SecretString,
    request_id: u64,
    token: CancellationToken,
    tx: mpsc::Sender<BreachDelivery>,
) {
    #[cfg(feature = "tracing")]
    tracing::debug!(request_id, "breach lookup is about to start...");

    let outcome = tokio::select! {
        _ = token.cancelled() => {
            #[cfg(feature = "tracing")]
            tracing::debug!(request_id, "breach lookup cancelled");
            return;
        }
        outcome = checker.check(&password) => outcome,
    };

    // A cancel that lands while the response was being parsed still wins.
    if token.is_cancelled() {
        return;
    }

    if let Err(_e) = tx.send(BreachDelivery { request_id, outcome }).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send breach lookup result: {}", _e);
    }
}
