//! One-shot staggered reveal of marked nodes.

use std::time::Duration;

/// Browsers report ratios a hair under the threshold that triggered them.
const RATIO_SLACK: f64 = 1e-3;

/// Whether a single node has been revealed. Only ever goes false→true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealState {
    revealed: bool,
}

impl RevealState {
    pub const fn new(revealed: bool) -> Self {
        Self { revealed }
    }

    /// Returns `true` only on the transition.
    pub fn reveal(&mut self) -> bool {
        !std::mem::replace(&mut self.revealed, true)
    }
}

/// The delays to hand out, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealPlan {
    pub delays: Vec<Duration>,
}

impl RevealPlan {
    pub fn staggered(count: usize, interval: Duration) -> Self {
        // `Duration * u32`; saturate instead of wrapping for huge groups.
        let delays = (0..count)
            .map(|i| interval.saturating_mul(u32::try_from(i).unwrap_or(u32::MAX)))
            .collect();
        Self { delays }
    }
}

/// Fires the first time a container is visible enough, then never again.
#[derive(Debug, Clone)]
pub struct RevealTrigger {
    threshold: f64,
    interval: Duration,
    fired: bool,
}

impl RevealTrigger {
    pub fn new(threshold: f64, interval: Duration) -> Self {
        Self {
            threshold,
            interval,
            fired: false,
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Feed one intersection notification. Returns the plan for `pending`
    /// nodes on the first notification at or above the threshold.
    pub fn observe(
        &mut self,
        is_intersecting: bool,
        ratio: f64,
        pending: usize,
    ) -> Option<RevealPlan> {
        if self.fired || !is_intersecting || ratio + RATIO_SLACK < self.threshold {
            return None;
        }
        self.fired = true;
        Some(RevealPlan::staggered(pending, self.interval))
    }
}
