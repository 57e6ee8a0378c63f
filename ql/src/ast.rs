use serde::{Deserialize, Serialize};

/// A scalar literal on the right-hand side of a field operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    String(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Null,
}

/// One operator form applied to a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldOp {
    Eq(Value),
    In(Vec<Value>),
    Ne(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    Exists(bool),
    /// Sub-predicate over the elements of an array field. Paths inside the
    /// sub-predicate are relative to the array element.
    ElemMatch(Box<Predicate>),
    Regex(String),
    Mod(i64, i64),
    Where(String),
    Expr,
    /// Per-field negation, e.g. `{age: {"$not": {"$gt": 21}}}`.
    Not(Box<FieldOp>),
}

/// A single operator applied to one (possibly dotted) field path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldPredicate {
    pub path: String,
    pub op: FieldOp,
}

impl FieldPredicate {
    pub fn new(path: impl Into<String>, op: FieldOp) -> Self { Self { path: path.into(), op } }
}

/// A predicate tree over field predicates and n-ary logical connectives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    Field(FieldPredicate),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Nor(Vec<Predicate>),
    Not(Box<Predicate>),
    /// Matches every document.
    Empty,
}

impl Predicate {
    pub fn field(path: impl Into<String>, op: FieldOp) -> Self { Self::Field(FieldPredicate::new(path, op)) }

    pub fn and(predicates: Vec<Predicate>) -> Self { Self::And(predicates) }

    pub fn or(predicates: Vec<Predicate>) -> Self { Self::Or(predicates) }

    pub fn nor(predicates: Vec<Predicate>) -> Self { Self::Nor(predicates) }

    pub fn negate(predicate: Predicate) -> Self { Self::Not(Box::new(predicate)) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn reverse(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// One key of an ORDER BY style sort specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderByItem {
    pub path: String,
    pub direction: OrderDirection,
}

impl OrderByItem {
    pub fn asc(path: impl Into<String>) -> Self { Self { path: path.into(), direction: OrderDirection::Asc } }

    pub fn desc(path: impl Into<String>) -> Self { Self { path: path.into(), direction: OrderDirection::Desc } }
}
