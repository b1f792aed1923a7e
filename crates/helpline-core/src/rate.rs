//! Minimum-interval rate gate
//!
//! Serializes calls to an upstream API so that two consecutive requests
//! on the same gate are separated by at least `60 / per_minute` seconds.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Per-instance rate gate guarding a single last-call timestamp.
///
/// Each collaborator owns one gate per operation class. The timestamp is
/// protected by a mutex so concurrent pipeline runs sharing a client
/// instance are serialized through the gate.
pub struct RateGate {
    interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateGate {
    /// Create a gate allowing `per_minute` calls per minute.
    ///
    /// A limit of 0 disables the gate.
    pub fn new(per_minute: u32) -> Self {
        let interval = if per_minute == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(60.0 / f64::from(per_minute))
        };
        Self {
            interval,
            last_call: Mutex::new(None),
        }
    }

    /// Wait until the configured interval since the previous call has
    /// elapsed, then stamp the current time.
    pub async fn wait(&self) {
        if self.interval.is_zero() {
            return;
        }
        let mut last = self.last_call.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.interval {
                let pause = self.interval - elapsed;
                debug!("rate gate: sleeping {:?}", pause);
                tokio::time::sleep(pause).await;
            }
        }
        *last = Some(Instant::now());
    }
}
