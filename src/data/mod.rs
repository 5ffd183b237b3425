/// Data layer: schema, loading, and the aggregate views.
///
/// Architecture:
/// ```text
///  dermatology.data (headerless CSV, `?` = missing)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse → coerce age → drop incomplete rows
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ CleanedDataset │  Vec<Record>, immutable
///   └────────────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  filter   │   │ summary  │  age/class selection, class counts, ranges
///   └──────────┘   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
pub mod summary;
