// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Advisory progress reporting and cooperative cancellation.

use crate::error::{Phase, TableToGraphError};

/// Receives progress in `[0, 1]` and may request cancellation.
///
/// Progress is monotonic within a run. Nothing in the filter depends on what
/// the sink does with it.
pub trait ProgressSink {
    /// Called with the overall fraction completed.
    fn report(&mut self, fraction: f64);

    /// Polled at the same granularity as [`report`](Self::report). Returning
    /// `true` aborts the run with [`TableToGraphError::Cancelled`].
    fn should_cancel(&self) -> bool {
        false
    }
}

/// Sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _fraction: f64) {}
}

impl<F: FnMut(f64)> ProgressSink for F {
    fn report(&mut self, fraction: f64) {
        self(fraction);
    }
}

/// Phase weights: each phase owns a contiguous slice of `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PhaseWeights {
    vertices: f64,
    edges: f64,
    hidden: f64,
}

impl PhaseWeights {
    /// Vertex/edge split is 25/75 without hidden columns; hidden synthesis
    /// dominates otherwise.
    pub(crate) const fn for_spec(has_hidden: bool) -> Self {
        if has_hidden {
            Self {
                vertices: 0.1,
                edges: 0.3,
                hidden: 0.6,
            }
        } else {
            Self {
                vertices: 0.25,
                edges: 0.75,
                hidden: 0.0,
            }
        }
    }

    fn span(&self, phase: Phase) -> (f64, f64) {
        match phase {
            Phase::Vertices => (0.0, self.vertices),
            Phase::Edges => (self.vertices, self.edges),
            Phase::HiddenEdges => (self.vertices + self.edges, self.hidden),
        }
    }
}

/// Maps per-phase `done / total` onto the sink, clamps to monotonic, and
/// polls for cancellation.
pub(crate) struct Progress<'a> {
    sink: &'a mut dyn ProgressSink,
    weights: PhaseWeights,
    stride: usize,
    last: f64,
}

impl<'a> Progress<'a> {
    pub(crate) fn new(sink: &'a mut dyn ProgressSink, weights: PhaseWeights, stride: usize) -> Self {
        Self {
            sink,
            weights,
            stride: stride.max(1),
            last: 0.0,
        }
    }

    /// Whether step `i` of a long loop is a reporting step.
    pub(crate) const fn is_tick(&self, i: usize) -> bool {
        i % self.stride == 0
    }

    /// Reports `done / total` of `phase` and checks for cancellation.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn step(
        &mut self,
        phase: Phase,
        done: usize,
        total: usize,
    ) -> Result<(), TableToGraphError> {
        let (start, width) = self.weights.span(phase);
        let ratio = if total == 0 {
            1.0
        } else {
            done as f64 / total as f64
        };
        self.emit(width.mul_add(ratio, start));
        if self.sink.should_cancel() {
            return Err(TableToGraphError::Cancelled { phase });
        }
        Ok(())
    }

    pub(crate) fn finish(&mut self) {
        self.emit(1.0);
    }

    fn emit(&mut self, fraction: f64) {
        let fraction = fraction.clamp(self.last, 1.0);
        self.last = fraction;
        self.sink.report(fraction);
    }
}
