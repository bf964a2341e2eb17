//! Data layer: survey records, loading, normalization, filtering and
//! aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → RawRecord rows
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ normalize  │  RawRecord → SurveyRecord (never fails)
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │  SurveyTable  │  immutable, shared behind Arc
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  FilterSelection → FilteredView (ordered indices)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  usage × plan counts, mood × frequency counts
//!   └───────────┘
//! ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
