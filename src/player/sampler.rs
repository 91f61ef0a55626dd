//! Periodic progress sampler

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::audio::EngineEvents;

/// Posts a tick signal every `period` until stopped or dropped.
///
/// The first tick fires one full period after `start` is called.
pub(crate) struct ProgressSampler {
    task: JoinHandle<()>,
}

impl ProgressSampler {
    pub fn start(period: Duration, events: EngineEvents) -> Self {
        let first_tick = Instant::now() + period;
        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !events.tick() {
                    break;
                }
            }
        });
        Self { task }
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for ProgressSampler {
    fn drop(&mut self) {
        self.task.abort();
    }
}
