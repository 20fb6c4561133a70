//! Deadline and cancellation guards for remote calls.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::WayfarerError;

/// Fixed point in time by which a turn must finish.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    /// Deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
            budget,
        }
    }

    /// Time left, zero once expired.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    fn timeout_error(&self) -> WayfarerError {
        WayfarerError::Timeout(self.budget.as_millis() as u64)
    }
}

/// Run `future` unless `cancel` fires or `deadline` passes first.
///
/// Cancellation wins over completion when both are ready.
pub async fn guarded<T>(
    future: impl Future<Output = Result<T, WayfarerError>>,
    deadline: Option<Deadline>,
    cancel: &CancellationToken,
) -> Result<T, WayfarerError> {
    let bounded = async {
        match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline.at, future).await {
                Ok(result) => result,
                Err(_) => Err(deadline.timeout_error()),
            },
            None => future.await,
        }
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(WayfarerError::Canceled),
        result = bounded => result,
    }
}
