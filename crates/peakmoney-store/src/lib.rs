//! Content storage: the bundled static snapshot, the active dataset, and
//! reference resolution across it.

mod error;
pub use error::StoreError;

pub mod curate;
pub mod dataset;
pub mod refs;
pub mod snapshot;

pub use dataset::{Dataset, QuestionHit};
pub use refs::{Domain, Product, Resolved};
pub use snapshot::Snapshot;
