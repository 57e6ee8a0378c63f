use crate::error::SourceError;
use crate::index_spec::IndexSpec;
use crate::namespace::Namespace;
use indexmap::IndexMap;

/// Where the planner gets a collection's index catalog.
///
/// Implementations may fetch over the network, cache, or serve from memory;
/// the planner imposes no policy and never retries. Lookups must be safe to
/// run concurrently. `NotFound` and an empty catalog are equivalent to the
/// planner: nothing can be covered.
pub trait IndexSource: Send + Sync {
    fn lookup(&self, namespace: &Namespace) -> Result<Vec<IndexSpec>, SourceError>;
}

/// In-memory catalog keyed by namespace, for tests and embedders that
/// already hold the metadata.
#[derive(Debug, Clone, Default)]
pub struct StaticIndexSource {
    catalogs: IndexMap<Namespace, Vec<IndexSpec>>,
}

impl StaticIndexSource {
    pub fn new() -> Self { Self::default() }

    pub fn with_collection(mut self, namespace: Namespace, indexes: Vec<IndexSpec>) -> Self {
        self.catalogs.insert(namespace, indexes);
        self
    }
}

impl IndexSource for StaticIndexSource {
    fn lookup(&self, namespace: &Namespace) -> Result<Vec<IndexSpec>, SourceError> {
        match self.catalogs.get(namespace) {
            Some(indexes) => Ok(indexes.clone()),
            None => Err(SourceError::NotFound(namespace.clone())),
        }
    }
}
