/// Tabular services: validated row types and the operations over them.
///
/// Architecture:
/// ```text
///   CSV text / JSON rows
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse → GradeRow / BeadCatalog
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  GradeRow, BeadCatalog, ProjectLine (validated)
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  grades   │   │ pricing  │  catalog ⋈ project → Quote
///   └──────────┘   └──────────┘
/// ```

pub mod grades;
pub mod loader;
pub mod model;
pub mod pricing;
pub mod seed;
