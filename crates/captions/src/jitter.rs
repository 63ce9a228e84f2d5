use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Pseudo-random pause taken before each playlist member download.
///
/// The delay is `unit * (1 + now_nanos % 5)`, i.e. one to five units derived
/// from the wall clock. This is jitter to stay under the platform's abuse
/// radar, not a rate limiter: it does not react to throttling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jitter {
    unit: Duration,
}

impl Jitter {
    pub const DEFAULT_UNIT: Duration = Duration::from_secs(1);
    const SPREAD: u128 = 5;

    pub const fn new(unit: Duration) -> Self {
        Self { unit }
    }

    pub const fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_disabled(&self) -> bool {
        self.unit.is_zero()
    }

    pub fn delay_at(&self, now: SystemTime) -> Duration {
        let nanos = now
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        let factor = 1 + (nanos % Self::SPREAD) as u32;
        self.unit.saturating_mul(factor)
    }

    pub fn next_delay(&self) -> Duration {
        self.delay_at(SystemTime::now())
    }

    pub async fn wait(&self) {
        if self.is_disabled() {
            return;
        }
        tokio::time::sleep(self.next_delay()).await;
    }
}

impl Default for Jitter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_UNIT)
    }
}
