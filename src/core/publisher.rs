//! Rate-limited parameter publishing.

use std::time::Duration;

use tracing::debug;

use crate::core::remote::{ParameterKind, ParameterStore};
use crate::core::vars::VarMap;
use crate::error::Result;

/// Pause between consecutive parameter puts.
///
/// SSM throttles put-parameter aggressively, so the publisher waits between
/// calls. The pause is a cooperative tokio sleep, never a blocking one, and
/// tests inject [`RateLimiter::none`] to run at full speed.
#[derive(Debug, Clone, Copy)]
pub struct RateLimiter {
    delay: Duration,
}

impl RateLimiter {
    /// Default spacing between puts.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(250);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// A limiter that never waits.
    pub fn none() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    /// Yield until the next put is allowed.
    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

/// Upsert every entry of an already-filtered map into the parameter store.
///
/// Each name is prefixed before the put. Entries go out in map iteration
/// order with the limiter's pause between consecutive calls. The first
/// failure aborts the rest; prior puts stay in place.
pub async fn publish<S: ParameterStore>(
    store: &S,
    kind: ParameterKind,
    entries: &VarMap,
    prefix: &str,
    limiter: &RateLimiter,
) -> Result<()> {
    for (i, (name, value)) in entries.iter().enumerate() {
        if i > 0 {
            limiter.pause().await;
        }

        let full_name = format!("{}{}", prefix, name);
        match kind {
            ParameterKind::Plain => debug!("putting {} into the parameter store", full_name),
            ParameterKind::Secret => {
                debug!("putting secret {} into the parameter store", full_name)
            }
        }

        store.put(&full_name, value, kind, true).await?;
    }

    Ok(())
}
