use serde::Serialize;
use thiserror::Error;

use crate::selection::{ChartKind, Selection};

// ---------------------------------------------------------------------------
// PlotRequest – the validated (columns, chart kind) pair sent to the backend
// ---------------------------------------------------------------------------

/// Body of `POST /plot/`. Immutable once built; a fresh one is built on every
/// submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotRequest {
    pub columns: Vec<String>,
    #[serde(rename = "plot")]
    pub chart_kind: ChartKind,
}

impl PlotRequest {
    /// The label-axis column (first selected).
    pub fn label_column(&self) -> &str {
        &self.columns[0]
    }

    /// The series column (second selected).
    pub fn series_column(&self) -> &str {
        &self.columns[1]
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("select at least two columns (currently {have})")]
    InsufficientColumns { have: usize },
    #[error("select a chart type")]
    MissingChartKind,
}

/// Project a selection into a plot request, or report why that is not yet
/// possible. Pure: never mutates the selection, safe to call on every UI
/// interaction.
pub fn build(selection: &Selection) -> Result<PlotRequest, BuildError> {
    let columns = selection.columns();
    if columns.len() < 2 {
        return Err(BuildError::InsufficientColumns {
            have: columns.len(),
        });
    }
    let chart_kind = selection.chart_kind().ok_or(BuildError::MissingChartKind)?;

    Ok(PlotRequest {
        columns: columns.to_vec(),
        chart_kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Selection {
        let mut sel = Selection::default();
        sel.add_column("age");
        sel.add_column("income");
        sel
    }

    #[test]
    fn builds_from_a_complete_selection() {
        let mut sel = pair();
        sel.set_chart_kind(ChartKind::Bar).unwrap();

        let req = build(&sel).unwrap();
        assert_eq!(req.columns, ["age", "income"]);
        assert_eq!(req.chart_kind, ChartKind::Bar);
    }

    #[test]
    fn too_few_columns() {
        let mut sel = Selection::default();
        assert_eq!(
            build(&sel),
            Err(BuildError::InsufficientColumns { have: 0 })
        );
        sel.add_column("age");
        assert_eq!(
            build(&sel),
            Err(BuildError::InsufficientColumns { have: 1 })
        );
    }

    #[test]
    fn missing_chart_kind() {
        assert_eq!(build(&pair()), Err(BuildError::MissingChartKind));
    }

    #[test]
    fn build_is_pure() {
        let mut sel = pair();
        sel.set_chart_kind(ChartKind::Scatter).unwrap();
        let before = sel.clone();

        let first = build(&sel).unwrap();
        let second = build(&sel).unwrap();
        assert_eq!(first, second);
        assert_eq!(sel, before);
    }

    #[test]
    fn serializes_to_the_wire_shape() {
        let mut sel = pair();
        sel.set_chart_kind(ChartKind::HorizontalBar).unwrap();
        let req = build(&sel).unwrap();

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({
                "columns": ["age", "income"],
                "plot": "horizontalBar",
            })
        );
    }
}
