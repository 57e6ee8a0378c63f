use covql::ast::OrderDirection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexDirection {
    Asc,
    Desc,
}

impl IndexDirection {
    pub fn reverse(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn is_desc(&self) -> bool { matches!(self, Self::Desc) }

    /// Whether a forward scan of a key in this direction emits rows in
    /// `direction` order.
    pub fn satisfies(&self, direction: OrderDirection) -> bool {
        matches!((self, direction), (Self::Asc, OrderDirection::Asc) | (Self::Desc, OrderDirection::Desc))
    }
}

impl From<OrderDirection> for IndexDirection {
    fn from(direction: OrderDirection) -> Self {
        match direction {
            OrderDirection::Asc => Self::Asc,
            OrderDirection::Desc => Self::Desc,
        }
    }
}

/// One key of a compound index: a (possibly dotted) field path and the
/// direction it is stored in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexKeyPart {
    pub path: String,
    pub direction: IndexDirection,
}

impl IndexKeyPart {
    pub fn new(path: impl Into<String>, direction: IndexDirection) -> Self { Self { path: path.into(), direction } }

    pub fn asc(path: impl Into<String>) -> Self { Self::new(path, IndexDirection::Asc) }

    pub fn desc(path: impl Into<String>) -> Self { Self::new(path, IndexDirection::Desc) }
}

/// A named compound B-tree index. Keypart order is the index prefix order
/// and is semantically significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexSpec {
    pub name: String,
    pub keyparts: Vec<IndexKeyPart>,
}

impl IndexSpec {
    pub fn new(name: impl Into<String>, keyparts: Vec<IndexKeyPart>) -> Self { Self { name: name.into(), keyparts } }

    /// Human-readable key description for diagnostics, e.g.
    /// `user_id asc, created_at desc`.
    pub fn describe(&self) -> String {
        let fields: Vec<String> = self
            .keyparts
            .iter()
            .map(|kp| {
                let dir = match kp.direction {
                    IndexDirection::Asc => "asc",
                    IndexDirection::Desc => "desc",
                };
                format!("{} {}", kp.path, dir)
            })
            .collect();
        fields.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_reverse() {
        assert_eq!(IndexDirection::Asc.reverse(), IndexDirection::Desc);
        assert_eq!(IndexDirection::Desc.reverse(), IndexDirection::Asc);
        assert!(IndexDirection::Desc.is_desc());
    }

    #[test]
    fn test_direction_satisfies() {
        assert!(IndexDirection::Asc.satisfies(OrderDirection::Asc));
        assert!(IndexDirection::Desc.satisfies(OrderDirection::Desc));
        assert!(!IndexDirection::Asc.satisfies(OrderDirection::Desc));
        assert!(!IndexDirection::Desc.satisfies(OrderDirection::Asc));
    }

    #[test]
    fn test_describe() {
        let spec = IndexSpec::new("user_created", vec![IndexKeyPart::asc("user_id"), IndexKeyPart::desc("created_at")]);
        assert_eq!(spec.describe(), "user_id asc, created_at desc");
    }

    #[test]
    fn test_helper_constructors() {
        let kp = IndexKeyPart::asc("a");
        assert_eq!(kp.path, "a");
        assert_eq!(kp.direction, IndexDirection::Asc);

        let kp = IndexKeyPart::desc("b.c");
        assert_eq!(kp.path, "b.c");
        assert_eq!(kp.direction, IndexDirection::Desc);
    }
}
