use crate::dnf;
use crate::error::{CoverageError, SourceError};
use crate::matcher;
use crate::namespace::Namespace;
use crate::traits::IndexSource;
use covql::ast::{OrderByItem, Predicate};
use tracing::debug;

/// Decides whether a query can be answered by B-tree index traversal alone.
///
/// The planner holds no state between calls; it is safe to share across
/// threads as long as its source is.
pub struct CoveragePlanner<S> {
    source: S,
}

impl<S: IndexSource> CoveragePlanner<S> {
    pub fn new(source: S) -> Self { Self { source } }

    /// Returns `Ok(true)` iff every disjunctive branch of `predicate` is
    /// perfectly covered by some index on `namespace`, with `order_by`
    /// satisfied by index order itself. Branches are matched independently;
    /// a branch that no index covers fails the whole query.
    pub fn analyze_coverage(&self, predicate: &Predicate, order_by: &[OrderByItem], namespace: &str) -> Result<bool, CoverageError> {
        let namespace: Namespace = namespace.parse()?;

        let conjuncts = dnf::normalize(predicate);
        if conjuncts.iter().any(|conjunct| conjunct.rejected) {
            debug!(namespace = %namespace, "predicate contains a form the analyzer cannot prove covered");
            return Ok(false);
        }

        let indexes = match self.source.lookup(&namespace) {
            Ok(indexes) => indexes,
            Err(SourceError::NotFound(_)) => {
                debug!(namespace = %namespace, "no index catalog for namespace");
                return Ok(false);
            }
            Err(err) => return Err(CoverageError::Source(err)),
        };
        if indexes.is_empty() {
            debug!(namespace = %namespace, "collection has no indexes");
            return Ok(false);
        }

        for conjunct in &conjuncts {
            match indexes.iter().find(|index| matcher::covers(conjunct, order_by, index)) {
                Some(index) => debug!(namespace = %namespace, index = index.name.as_str(), key = %index.describe(), "branch covered"),
                None => {
                    debug!(namespace = %namespace, ?conjunct, "no index covers branch");
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}
