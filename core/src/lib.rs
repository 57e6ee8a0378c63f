//! covtree-core answers one question about a query: can its predicate and
//! ordering be satisfied by walking a single B-tree index per disjunctive
//! branch, with no in-memory filter or sort pass. The pipeline is pure:
//! normalize the predicate to disjunctive branches, summarize each branch's
//! equality and range constraints, then test each branch against the index
//! catalog under the equality / sort / range discipline.

pub mod dnf;
pub mod error;
pub mod index_spec;
pub mod matcher;
pub mod namespace;
pub mod planner;
pub mod predicate;
pub mod sort;
pub mod traits;

pub use error::{CoverageError, SourceError};
pub use index_spec::{IndexDirection, IndexKeyPart, IndexSpec};
pub use namespace::Namespace;
pub use planner::CoveragePlanner;
pub use predicate::ConjunctAnalysis;
pub use traits::{IndexSource, StaticIndexSource};
