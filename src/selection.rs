use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Chart kind – the closed set of supported plots
// ---------------------------------------------------------------------------

/// Every plot the backend knows how to compute and the UI knows how to draw.
/// Wire names follow the backend contract (`"polarArea"`, `"horizontalBar"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Doughnut,
    Scatter,
    Radar,
    PolarArea,
    Bubble,
    HorizontalBar,
}

impl ChartKind {
    pub const ALL: [ChartKind; 9] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Doughnut,
        ChartKind::Scatter,
        ChartKind::Radar,
        ChartKind::PolarArea,
        ChartKind::Bubble,
        ChartKind::HorizontalBar,
    ];

    /// Wire name, as sent in the `plot` field of a plot request.
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Doughnut => "doughnut",
            ChartKind::Scatter => "scatter",
            ChartKind::Radar => "radar",
            ChartKind::PolarArea => "polarArea",
            ChartKind::Bubble => "bubble",
            ChartKind::HorizontalBar => "horizontalBar",
        }
    }

    /// Human-readable name for the chart-kind selector.
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Pie => "Pie Chart",
            ChartKind::Doughnut => "Doughnut Chart",
            ChartKind::Scatter => "Scatter Chart",
            ChartKind::Radar => "Radar Chart",
            ChartKind::PolarArea => "Polar Area Chart",
            ChartKind::Bubble => "Bubble Chart",
            ChartKind::HorizontalBar => "Horizontal Bar Chart",
        }
    }
}

// ---------------------------------------------------------------------------
// Selection – the user's in-progress plot configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// A chart kind needs an axis pair; with fewer than two columns picked
    /// there is nothing to plot.
    #[error("select at least two columns before picking a chart type")]
    InvalidTransition,
}

/// Chosen columns (ordered, unique) plus an optional chart kind.
///
/// Order matters downstream: the first column becomes the label axis, the
/// second becomes the plotted series. The only ways in are the four methods
/// below, which uphold two invariants: no duplicate columns, and no chart
/// kind without at least two columns.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Selection {
    columns: Vec<String>,
    chart_kind: Option<ChartKind>,
}

impl Selection {
    /// Columns in first-insertion order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn chart_kind(&self) -> Option<ChartKind> {
        self.chart_kind
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Append a column. Re-adding an existing column is a no-op and never
    /// reorders earlier picks.
    pub fn add_column(&mut self, name: &str) {
        if !self.contains(name) {
            self.columns.push(name.to_string());
        }
    }

    /// Remove a column if present. Dropping the last column also clears the
    /// chart kind: a kind without columns is meaningless.
    pub fn remove_column(&mut self, name: &str) {
        self.columns.retain(|c| c != name);
        if self.columns.is_empty() {
            self.chart_kind = None;
        }
    }

    /// Pick a chart kind. Rejected without state change while fewer than two
    /// columns are selected.
    pub fn set_chart_kind(&mut self, kind: ChartKind) -> Result<(), SelectionError> {
        if self.columns.len() < 2 {
            return Err(SelectionError::InvalidTransition);
        }
        self.chart_kind = Some(kind);
        Ok(())
    }

    /// Clear everything. Called when a new dataset summary replaces the old
    /// one, so stale column references cannot survive.
    pub fn reset(&mut self) {
        self.columns.clear();
        self.chart_kind = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn add_is_idempotent_and_preserves_order() {
        let mut sel = Selection::default();
        sel.add_column("age");
        sel.add_column("income");
        sel.add_column("age");
        assert_eq!(sel.columns(), ["age", "income"]);
    }

    #[test]
    fn chart_kind_needs_two_columns() {
        let mut sel = Selection::default();
        sel.add_column("age");
        let before = sel.clone();
        assert_eq!(
            sel.set_chart_kind(ChartKind::Bar),
            Err(SelectionError::InvalidTransition)
        );
        assert_eq!(sel, before);
        assert_eq!(sel.chart_kind(), None);
    }

    #[test]
    fn removing_last_column_clears_chart_kind() {
        let mut sel = Selection::default();
        sel.add_column("age");
        sel.add_column("income");
        sel.set_chart_kind(ChartKind::Line).unwrap();

        sel.remove_column("age");
        assert_eq!(sel.chart_kind(), Some(ChartKind::Line));

        sel.remove_column("income");
        assert!(sel.columns().is_empty());
        assert_eq!(sel.chart_kind(), None);
    }

    #[test]
    fn removing_unknown_column_is_a_noop() {
        let mut sel = Selection::default();
        sel.add_column("age");
        sel.remove_column("height");
        assert_eq!(sel.columns(), ["age"]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut sel = Selection::default();
        sel.add_column("age");
        sel.add_column("income");
        sel.set_chart_kind(ChartKind::Pie).unwrap();
        sel.reset();
        assert_eq!(sel, Selection::default());
    }

    #[test]
    fn chart_kind_wire_names() {
        assert_eq!(ChartKind::PolarArea.as_str(), "polarArea");
        assert_eq!(ChartKind::HorizontalBar.as_str(), "horizontalBar");
        assert_eq!(ChartKind::Bar.as_str(), "bar");
        assert_eq!(
            serde_json::to_value(ChartKind::PolarArea).unwrap(),
            serde_json::json!("polarArea")
        );
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(String),
        Remove(String),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let name = prop::sample::select(vec!["age", "income", "height", "score", "city"]);
        prop_oneof![
            name.clone().prop_map(|n| Op::Add(n.to_string())),
            name.prop_map(|n| Op::Remove(n.to_string())),
        ]
    }

    proptest! {
        /// Any add/remove sequence leaves the column list duplicate-free and
        /// in first-insertion order.
        #[test]
        fn columns_stay_unique_and_ordered(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut sel = Selection::default();
            let mut reference: Vec<String> = Vec::new();

            for op in ops {
                match op {
                    Op::Add(name) => {
                        sel.add_column(&name);
                        if !reference.contains(&name) {
                            reference.push(name);
                        }
                    }
                    Op::Remove(name) => {
                        sel.remove_column(&name);
                        reference.retain(|c| *c != name);
                    }
                }
                // invariant: no chart kind can outlive the last column
                if sel.columns().is_empty() {
                    prop_assert_eq!(sel.chart_kind(), None);
                }
            }
            prop_assert_eq!(sel.columns(), reference.as_slice());
        }
    }
}
