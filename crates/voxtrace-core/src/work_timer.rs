use std::convert::TryInto;
use std::time::{Duration, Instant};

/// Accumulates wall time spent in one recurring unit of work, like a render pass.
#[derive(Clone, Debug, Default)]
pub struct WorkTimer {
    total_time: Duration,
    last_time: Duration,
    items_completed: u32,
}

impl WorkTimer {
    pub fn start() -> Self {
        Self::default()
    }

    /// Runs `work` and records how long it took.
    pub fn time<R>(&mut self, work: impl FnOnce() -> R) -> R {
        let start = Instant::now();
        let result = work();
        self.complete_item(start.elapsed());
        result
    }

    pub fn complete_item(&mut self, d: Duration) {
        self.total_time += d;
        self.last_time = d;
        self.items_completed += 1;
    }

    pub fn total_time(&self) -> Duration {
        self.total_time
    }

    pub fn last_time(&self) -> Duration {
        self.last_time
    }

    pub fn items_completed(&self) -> u32 {
        self.items_completed
    }

    pub fn average_time_us(&self) -> u32 {
        let total_time_us: u32 = self.total_time.as_micros().try_into().unwrap_or(u32::MAX);

        total_time_us / self.items_completed.max(1)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
