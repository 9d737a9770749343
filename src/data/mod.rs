/// Data layer: table model, loading, and presentation.
///
/// Architecture:
/// ```text
///   whitespace text file
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse lines → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  named f64 columns
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  format   │  3-decimal cells, caption, heat map → text / HTML / viewer
///   └──────────┘
/// ```

pub mod format;
pub mod loader;
pub mod model;
