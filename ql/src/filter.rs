//! Evaluate a predicate tree against an in-memory document. This is the
//! fallback path for queries that index analysis cannot prove covered, and
//! the reference semantics the normalizer is cross-checked against.

use crate::ast::{FieldOp, Predicate, Value};
use serde_json::Value as Json;
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(&'static str),
}

/// Evaluate `predicate` against `doc`, returning whether the document matches.
///
/// `$regex`, `$where` and `$expr` cannot be evaluated here and surface as
/// [`FilterError::UnsupportedOperator`]; callers route those to the database.
pub fn evaluate_predicate(doc: &Json, predicate: &Predicate) -> Result<bool, FilterError> {
    match predicate {
        Predicate::Empty => Ok(true),
        Predicate::Field(fp) => evaluate_field(doc, &fp.path, &fp.op),
        Predicate::And(ps) => {
            for p in ps {
                if !evaluate_predicate(doc, p)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Predicate::Or(ps) => {
            for p in ps {
                if evaluate_predicate(doc, p)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        Predicate::Nor(ps) => {
            for p in ps {
                if evaluate_predicate(doc, p)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Predicate::Not(p) => Ok(!evaluate_predicate(doc, p)?),
    }
}

fn evaluate_field(doc: &Json, path: &str, op: &FieldOp) -> Result<bool, FilterError> {
    let field = lookup(doc, path);
    Ok(match op {
        FieldOp::Eq(value) => field.map(|j| matches_eq(j, value)).unwrap_or(false),
        // A missing field satisfies $ne, matching server behavior.
        FieldOp::Ne(value) => !field.map(|j| matches_eq(j, value)).unwrap_or(false),
        FieldOp::In(values) => field.map(|j| values.iter().any(|v| matches_eq(j, v))).unwrap_or(false),
        FieldOp::Gt(value) => compare(field, value).map(|o| o == Ordering::Greater).unwrap_or(false),
        FieldOp::Gte(value) => compare(field, value).map(|o| o != Ordering::Less).unwrap_or(false),
        FieldOp::Lt(value) => compare(field, value).map(|o| o == Ordering::Less).unwrap_or(false),
        FieldOp::Lte(value) => compare(field, value).map(|o| o != Ordering::Greater).unwrap_or(false),
        FieldOp::Exists(expected) => field.is_some() == *expected,
        FieldOp::ElemMatch(sub) => match field {
            Some(Json::Array(elements)) => {
                for element in elements {
                    if evaluate_predicate(element, sub)? {
                        return Ok(true);
                    }
                }
                false
            }
            _ => false,
        },
        FieldOp::Mod(divisor, remainder) => match (field.and_then(Json::as_i64), *divisor) {
            (_, 0) => false,
            (Some(n), d) => n % d == *remainder,
            (None, _) => false,
        },
        FieldOp::Not(inner) => !evaluate_field(doc, path, inner)?,
        FieldOp::Regex(_) => return Err(FilterError::UnsupportedOperator("$regex")),
        FieldOp::Where(_) => return Err(FilterError::UnsupportedOperator("$where")),
        FieldOp::Expr => return Err(FilterError::UnsupportedOperator("$expr")),
    })
}

/// Walk a dotted path through nested documents. Array traversal is not
/// attempted outside `$elemMatch`.
fn lookup<'a>(doc: &'a Json, path: &str) -> Option<&'a Json> {
    let mut current = doc;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Equality between a document value and a query literal. An array field
/// matches when any element matches, as on the server.
fn matches_eq(field: &Json, value: &Value) -> bool {
    if let Json::Array(elements) = field {
        return elements.iter().any(|e| scalar_eq(e, value));
    }
    scalar_eq(field, value)
}

fn scalar_eq(field: &Json, value: &Value) -> bool {
    match (field, value) {
        (Json::Null, Value::Null) => true,
        (Json::Bool(a), Value::Boolean(b)) => a == b,
        (Json::String(a), Value::String(b)) => a == b,
        (Json::Number(_), Value::Integer(_) | Value::Double(_)) => numeric(field).zip(numeric_value(value)).map(|(a, b)| a == b).unwrap_or(false),
        _ => false,
    }
}

fn compare(field: Option<&Json>, value: &Value) -> Option<Ordering> {
    match (field?, value) {
        (Json::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        (Json::Bool(a), Value::Boolean(b)) => Some(a.cmp(b)),
        (f @ Json::Number(_), Value::Integer(_) | Value::Double(_)) => numeric(f)?.partial_cmp(&numeric_value(value)?),
        // Cross-type ordering is intentionally undefined; the comparison
        // simply never matches.
        _ => None,
    }
}

fn numeric(value: &Json) -> Option<f64> { value.as_f64() }

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(i) => Some(*i as f64),
        Value::Double(d) => Some(*d),
        _ => None,
    }
}
