use thiserror::Error;

use crate::data::model::{humanize, PlotResult};
use crate::data::request::PlotRequest;
use crate::selection::ChartKind;

// ---------------------------------------------------------------------------
// ChartDescription – the render-ready structure derived from a plot result
// ---------------------------------------------------------------------------

/// How the drawing layer lays a chart out. Each of the nine chart kinds maps
/// to exactly one family; kind-specific behaviour beyond the family lives in
/// [`RenderOptions`] flags (a horizontal bar is the `Bar` family with
/// `horizontal` set, a doughnut is `Pie` with a non-zero `cutout`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFamily {
    Bar,
    Line,
    Pie,
    Scatter,
    Radar,
    PolarArea,
    Bubble,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub family: ChartFamily,
    /// `"age vs income"` – derived from the two selected columns.
    pub axis_title: String,
    pub x_label: String,
    pub y_label: String,
    pub show_legend: bool,
    /// Bar family only: flip the index axis.
    pub horizontal: bool,
    /// Pie family only: inner radius as a fraction of the outer radius.
    pub cutout: f32,
}

/// One named numeric sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDesc {
    pub name: String,
    pub values: Vec<f64>,
}

/// Labels, series, and render options for one chart. Derived entirely from a
/// plot result plus the originating request; recomputed whenever either
/// changes, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDescription {
    pub labels: Vec<String>,
    pub series: Vec<SeriesDesc>,
    pub options: RenderOptions,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("cannot render: {reason}")]
    IncompatibleResult { reason: String },
}

fn incompatible(reason: impl Into<String>) -> RenderError {
    RenderError::IncompatibleResult {
        reason: reason.into(),
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Derive a [`ChartDescription`] from a plot result and its originating
/// request. Pure: same inputs always give the same description.
///
/// Labels come from the first requested column in backend order (no
/// re-sorting), the single series from the second. Every record must carry
/// both columns, and the series column must be numeric throughout.
pub fn describe(result: &PlotResult, request: &PlotRequest) -> Result<ChartDescription, RenderError> {
    if request.columns.len() < 2 {
        return Err(incompatible("request names fewer than two columns"));
    }
    if result.records.is_empty() {
        return Err(incompatible("the backend returned no records"));
    }

    let x_col = request.label_column();
    let y_col = request.series_column();

    let mut labels = Vec::with_capacity(result.records.len());
    let mut values = Vec::with_capacity(result.records.len());

    for (i, record) in result.records.iter().enumerate() {
        let label = record
            .get(x_col)
            .ok_or_else(|| incompatible(format!("record {i} is missing column '{x_col}'")))?;
        let value = record
            .get(y_col)
            .ok_or_else(|| incompatible(format!("record {i} is missing column '{y_col}'")))?;
        let value = value.as_f64().ok_or_else(|| {
            incompatible(format!("record {i}: column '{y_col}' is not numeric"))
        })?;

        labels.push(label.to_string());
        values.push(value);
    }

    Ok(ChartDescription {
        labels,
        series: vec![SeriesDesc {
            name: humanize(y_col),
            values,
        }],
        options: options_for(request.chart_kind, x_col, y_col),
    })
}

/// The closed dispatch table over the nine chart kinds. Adding a kind means
/// extending [`ChartKind`] and this match; nothing else branches on kinds.
fn options_for(kind: ChartKind, x_col: &str, y_col: &str) -> RenderOptions {
    let base = RenderOptions {
        family: ChartFamily::Bar,
        axis_title: format!("{} vs {}", humanize(x_col), humanize(y_col)),
        x_label: humanize(x_col),
        y_label: humanize(y_col),
        show_legend: true,
        horizontal: false,
        cutout: 0.0,
    };

    match kind {
        ChartKind::Bar => base,
        ChartKind::HorizontalBar => RenderOptions {
            horizontal: true,
            ..base
        },
        ChartKind::Line => RenderOptions {
            family: ChartFamily::Line,
            ..base
        },
        ChartKind::Pie => RenderOptions {
            family: ChartFamily::Pie,
            ..base
        },
        ChartKind::Doughnut => RenderOptions {
            family: ChartFamily::Pie,
            cutout: 0.5,
            ..base
        },
        ChartKind::Scatter => RenderOptions {
            family: ChartFamily::Scatter,
            ..base
        },
        ChartKind::Radar => RenderOptions {
            family: ChartFamily::Radar,
            ..base
        },
        ChartKind::PolarArea => RenderOptions {
            family: ChartFamily::PolarArea,
            ..base
        },
        ChartKind::Bubble => RenderOptions {
            family: ChartFamily::Bubble,
            ..base
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record};
    use proptest::prelude::*;

    fn record(pairs: &[(&str, CellValue)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn age_income_result() -> PlotResult {
        PlotResult {
            records: vec![
                record(&[
                    ("age", CellValue::Integer(20)),
                    ("income", CellValue::Integer(500)),
                ]),
                record(&[
                    ("age", CellValue::Integer(30)),
                    ("income", CellValue::Integer(700)),
                ]),
            ],
        }
    }

    fn request(kind: ChartKind) -> PlotRequest {
        PlotRequest {
            columns: vec!["age".into(), "income".into()],
            chart_kind: kind,
        }
    }

    #[test]
    fn derives_labels_and_series_in_backend_order() {
        let desc = describe(&age_income_result(), &request(ChartKind::Bar)).unwrap();
        assert_eq!(desc.labels, ["20", "30"]);
        assert_eq!(desc.series.len(), 1);
        assert_eq!(desc.series[0].name, "income");
        assert_eq!(desc.series[0].values, [500.0, 700.0]);
        assert_eq!(desc.options.family, ChartFamily::Bar);
        assert!(!desc.options.horizontal);
    }

    #[test]
    fn axis_title_and_legend_are_always_present() {
        for kind in ChartKind::ALL {
            let desc = describe(&age_income_result(), &request(kind)).unwrap();
            assert_eq!(desc.options.axis_title, "age vs income");
            assert!(desc.options.show_legend);
        }
    }

    #[test]
    fn series_name_renders_underscores_as_spaces() {
        let result = PlotResult {
            records: vec![record(&[
                ("first_name", CellValue::String("ada".into())),
                ("annual_income", CellValue::Float(1.5)),
            ])],
        };
        let req = PlotRequest {
            columns: vec!["first_name".into(), "annual_income".into()],
            chart_kind: ChartKind::Line,
        };
        let desc = describe(&result, &req).unwrap();
        assert_eq!(desc.series[0].name, "annual income");
        assert_eq!(desc.options.axis_title, "first name vs annual income");
    }

    #[test]
    fn horizontal_bar_is_a_flipped_bar() {
        let desc = describe(&age_income_result(), &request(ChartKind::HorizontalBar)).unwrap();
        assert_eq!(desc.options.family, ChartFamily::Bar);
        assert!(desc.options.horizontal);
    }

    #[test]
    fn doughnut_is_a_pie_with_a_hole() {
        let pie = describe(&age_income_result(), &request(ChartKind::Pie)).unwrap();
        let doughnut = describe(&age_income_result(), &request(ChartKind::Doughnut)).unwrap();
        assert_eq!(pie.options.family, ChartFamily::Pie);
        assert_eq!(pie.options.cutout, 0.0);
        assert_eq!(doughnut.options.family, ChartFamily::Pie);
        assert_eq!(doughnut.options.cutout, 0.5);
    }

    #[test]
    fn empty_result_is_incompatible() {
        let err = describe(&PlotResult::default(), &request(ChartKind::Bar)).unwrap_err();
        assert!(matches!(err, RenderError::IncompatibleResult { .. }));
    }

    #[test]
    fn record_missing_a_requested_column_is_incompatible() {
        let result = PlotResult {
            records: vec![record(&[("age", CellValue::Integer(20))])],
        };
        let RenderError::IncompatibleResult { reason } =
            describe(&result, &request(ChartKind::Bar)).unwrap_err();
        assert!(reason.contains("income"));
    }

    #[test]
    fn non_numeric_series_column_is_incompatible() {
        let result = PlotResult {
            records: vec![record(&[
                ("age", CellValue::Integer(20)),
                ("income", CellValue::String("lots".into())),
            ])],
        };
        let RenderError::IncompatibleResult { reason } =
            describe(&result, &request(ChartKind::Bar)).unwrap_err();
        assert!(reason.contains("not numeric"));
    }

    #[test]
    fn extra_record_fields_are_ignored() {
        let result = PlotResult {
            records: vec![record(&[
                ("age", CellValue::Integer(20)),
                ("income", CellValue::Integer(500)),
                ("city", CellValue::String("Oslo".into())),
            ])],
        };
        let desc = describe(&result, &request(ChartKind::Bar)).unwrap();
        assert_eq!(desc.labels, ["20"]);
        assert_eq!(desc.series[0].values, [500.0]);
    }

    fn kind_strategy() -> impl Strategy<Value = ChartKind> {
        prop::sample::select(ChartKind::ALL.to_vec())
    }

    proptest! {
        /// Same (result, kind) input always yields the same description.
        #[test]
        fn describe_is_deterministic(
            kind in kind_strategy(),
            points in prop::collection::vec((any::<i32>(), any::<i32>()), 1..30),
        ) {
            let result = PlotResult {
                records: points
                    .iter()
                    .map(|&(a, b)| record(&[
                        ("age", CellValue::Integer(a as i64)),
                        ("income", CellValue::Integer(b as i64)),
                    ]))
                    .collect(),
            };
            let req = request(kind);
            let first = describe(&result, &req).unwrap();
            let second = describe(&result, &req).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.labels.len(), points.len());
            prop_assert_eq!(first.series[0].values.len(), points.len());
        }
    }
}
