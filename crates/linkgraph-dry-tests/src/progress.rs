// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Progress sink that records every report and can request cancellation.

use linkgraph_core::ProgressSink;

/// Records reported fractions; optionally cancels after `n` reports.
#[derive(Debug, Clone, Default)]
pub struct RecordingProgress {
    reports: Vec<f64>,
    cancel_after: Option<usize>,
}

impl RecordingProgress {
    /// Records everything, never cancels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation once `n` reports have been received.
    pub fn cancel_after(n: usize) -> Self {
        Self {
            reports: Vec::new(),
            cancel_after: Some(n),
        }
    }

    /// Fractions received so far, in order.
    pub fn reports(&self) -> &[f64] {
        &self.reports
    }

    /// Whether the reports never decrease and stay within `[0, 1]`.
    pub fn is_monotonic(&self) -> bool {
        self.reports.iter().all(|f| (0.0..=1.0).contains(f))
            && self.reports.windows(2).all(|w| w[0] <= w[1])
    }

    /// Last fraction received.
    pub fn last(&self) -> Option<f64> {
        self.reports.last().copied()
    }
}

impl ProgressSink for RecordingProgress {
    fn report(&mut self, fraction: f64) {
        self.reports.push(fraction);
    }

    fn should_cancel(&self) -> bool {
        self.cancel_after.is_some_and(|n| self.reports.len() >= n)
    }
}
