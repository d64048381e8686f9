/// Data layer: schema, loading, filtering and derived views.
///
/// Architecture:
/// ```text
///   data/wine.csv (compiled in)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → Dataset (validated once)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐      ┌────────────┐
///   │  filter   │ ◄─── │ FilterSpec │  built fresh from the controls
///   └──────────┘      └────────────┘
///        │
///        ▼
///   FilteredView ──► histogram / export / plots / table
/// ```

pub mod export;
pub mod filter;
pub mod histogram;
pub mod loader;
pub mod model;
