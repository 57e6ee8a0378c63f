use crate::error::CoverageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `database.collection` pair identifying one collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace {
    pub database: String,
    pub collection: String,
}

impl Namespace {
    pub fn new(database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self { database: database.into(), collection: collection.into() }
    }
}

impl FromStr for Namespace {
    type Err = CoverageError;

    /// Exactly one `.` separator with non-empty sides after trimming;
    /// anything else is invalid.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(database), Some(collection), None) => {
                let database = database.trim();
                let collection = collection.trim();
                if database.is_empty() || collection.is_empty() {
                    return Err(CoverageError::InvalidNamespace(s.to_string()));
                }
                Ok(Self::new(database, collection))
            }
            _ => Err(CoverageError::InvalidNamespace(s.to_string())),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}.{}", self.database, self.collection) }
}
