/// Data layer: listing model, loading, filtering, statistics and export.
///
/// Architecture:
/// ```text
///    listings.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows (codec coercions) → ListingStore
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ ListingStore  │  immutable Vec<Arc<Listing>>
///   └──────────────┘
///        │                       │
///        ▼                       ▼
///   ┌──────────┐          ┌──────────┐
///   │  filter   │ → new   │  stats    │  summary / host rank / describe
///   └──────────┘   store  └──────────┘
///                               │
///                               ▼
///                         ┌──────────┐
///                         │  export   │  three CSV files
///                         └──────────┘
/// ```

pub mod codec;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
