use crate::data::model::{DatasetSummary, PlotResult};
use crate::data::request::{BuildError, PlotRequest};
use crate::describe::{describe, ChartDescription, RenderError};
use crate::gateway::GatewayError;
use crate::selection::{Selection, SelectionError};

// ---------------------------------------------------------------------------
// Fetch lifecycle
// ---------------------------------------------------------------------------

/// The status of one asynchronous gateway call. A single tagged state per
/// call site rules out impossible combinations like "loading and errored".
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Success(T),
    Error(GatewayError),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            FetchState::Success(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&GatewayError> {
        match self {
            FetchState::Error(e) => Some(e),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// PlotSlot – plot fetches with last-submission-wins ordering
// ---------------------------------------------------------------------------

/// The plot-fetch call site. Overlapping submissions are legal; each one is
/// tagged with a monotonically increasing sequence number and only the
/// latest-issued tag may update the slot. The transport offers no
/// cancellation, so a stale call simply has its response dropped on arrival.
#[derive(Debug, Default)]
pub struct PlotSlot {
    pub fetch: FetchState<PlotResult>,
    /// Request the current `fetch` state belongs to.
    pub request: Option<PlotRequest>,
    latest_seq: u64,
}

impl PlotSlot {
    /// Register a new submission: bump the sequence, remember the request,
    /// and enter `Loading`. Returns the tag the response must carry.
    pub fn begin(&mut self, request: PlotRequest) -> u64 {
        self.latest_seq += 1;
        self.request = Some(request);
        self.fetch = FetchState::Loading;
        self.latest_seq
    }

    /// Whether a response tagged `seq` is still the one we are waiting for.
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest_seq
    }

    /// Apply a response. Returns `true` if it was current and the slot
    /// changed; stale responses are discarded without touching state.
    pub fn resolve(&mut self, seq: u64, outcome: Result<PlotResult, GatewayError>) -> bool {
        if !self.is_current(seq) {
            log::debug!("dropping stale plot response (seq {seq}, latest {})", self.latest_seq);
            return false;
        }
        self.fetch = match outcome {
            Ok(result) => FetchState::Success(result),
            Err(e) => FetchState::Error(e),
        };
        true
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// The dataset-summary call site.
    pub summary: FetchState<DatasetSummary>,

    /// The user's in-progress plot configuration.
    pub selection: Selection,

    /// The plot call site, with submission ordering.
    pub plot: PlotSlot,

    /// Render-ready chart derived from the latest applied plot result.
    pub chart: Option<ChartDescription>,

    /// Why the chart area shows a placeholder instead of a chart.
    pub render_error: Option<RenderError>,

    /// Why the last submission was blocked, shown next to the submit button.
    pub build_error: Option<BuildError>,

    /// Why the last chart-kind pick was rejected, shown next to the selector.
    pub selection_error: Option<SelectionError>,

    /// The in-flight or finished upload, as a status line.
    pub upload: FetchState<String>,

    /// General status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a summary response. A fresh summary replaces the previous one
    /// wholesale and resets the selection so stale column names cannot
    /// survive, along with anything derived from them.
    pub fn apply_summary(&mut self, outcome: Result<DatasetSummary, GatewayError>) {
        match outcome {
            Ok(summary) => {
                log::info!(
                    "summary: {} rows, columns {:?}",
                    summary.len(),
                    summary.column_names
                );
                self.summary = FetchState::Success(summary);
            }
            Err(e) => {
                log::error!("summary fetch failed: {e}");
                self.summary = FetchState::Error(e);
            }
        }
        self.selection.reset();
        self.plot = PlotSlot::default();
        self.chart = None;
        self.render_error = None;
        self.build_error = None;
        self.selection_error = None;
    }

    /// Ingest a plot response. Stale responses (superseded by a later
    /// submission) are dropped; current ones update the slot and rebuild the
    /// chart description.
    pub fn apply_plot(&mut self, seq: u64, outcome: Result<PlotResult, GatewayError>) {
        if !self.plot.resolve(seq, outcome) {
            return;
        }
        self.rebuild_chart();
    }

    /// Recompute the chart description from the current plot slot.
    fn rebuild_chart(&mut self) {
        self.chart = None;
        self.render_error = None;

        let (Some(result), Some(request)) = (self.plot.fetch.success(), self.plot.request.as_ref())
        else {
            return;
        };
        match describe(result, request) {
            Ok(desc) => self.chart = Some(desc),
            Err(e) => {
                log::warn!("cannot render plot result: {e}");
                self.render_error = Some(e);
            }
        }
    }
}
