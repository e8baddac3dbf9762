/// UI layer: panels around the chart, and the chart drawing itself.
pub mod chart;
pub mod panels;
