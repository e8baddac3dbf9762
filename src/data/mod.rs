/// Data layer: backend payload types, decoding, and request building.
///
/// Architecture:
/// ```text
///   GET /analytics/          POST /plot/
///        │                        │
///        ▼                        ▼
///   ┌──────────┐            ┌──────────┐
///   │  decode   │ JSON body → DatasetSummary / PlotResult
///   └──────────┘            └──────────┘
///        │                        ▲
///        ▼                        │
///   ┌───────────────┐       ┌──────────┐
///   │ DatasetSummary │──────▶│ request  │  Selection → PlotRequest
///   └───────────────┘ picks └──────────┘
/// ```

pub mod decode;
pub mod model;
pub mod request;
pub mod upload;
