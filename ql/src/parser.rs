//! Builds predicate trees from MongoDB-style query documents. This is the
//! adapter between the surface syntax an application holds (a JSON document)
//! and the [`Predicate`] tree the analysis crates consume.

use crate::ast::{FieldOp, FieldPredicate, OrderByItem, OrderDirection, Predicate, Value};
use crate::error::ParseError;
use serde_json::{Map, Value as Json};
use tracing::trace;

/// Parse a query document into a predicate tree.
///
/// `{}` parses to [`Predicate::Empty`]; multiple top-level clauses are an
/// implicit conjunction, as are multiple operators in one operator document.
pub fn parse_document(doc: &Json) -> Result<Predicate, ParseError> {
    trace!("parsing query document");
    parse_predicate(doc)
}

/// Parse a sort document of the form `{"field": 1, "other": -1}`.
/// Document order is preserved; duplicate fields are passed through.
pub fn parse_order_by(doc: &Json) -> Result<Vec<OrderByItem>, ParseError> {
    let obj = as_object(doc)?;
    let mut items = Vec::with_capacity(obj.len());
    for (path, value) in obj {
        let direction = match value.as_i64() {
            Some(1) => OrderDirection::Asc,
            Some(-1) => OrderDirection::Desc,
            _ => return Err(ParseError::InvalidSortDirection { path: path.clone() }),
        };
        items.push(OrderByItem { path: path.clone(), direction });
    }
    Ok(items)
}

fn parse_predicate(doc: &Json) -> Result<Predicate, ParseError> {
    let obj = as_object(doc)?;
    if obj.is_empty() {
        return Ok(Predicate::Empty);
    }

    let mut clauses = Vec::new();
    for (key, value) in obj {
        match key.as_str() {
            "$and" => clauses.push(Predicate::And(parse_logical_list("$and", value)?)),
            "$or" => clauses.push(Predicate::Or(parse_logical_list("$or", value)?)),
            "$nor" => clauses.push(Predicate::Nor(parse_logical_list("$nor", value)?)),
            "$where" => {
                let code = value.as_str().ok_or(ParseError::InvalidOperand { op: "$where", expected: "a javascript string" })?;
                clauses.push(Predicate::field("$where", FieldOp::Where(code.to_string())));
            }
            // The expression body is never inspected; its presence alone makes
            // the predicate opaque to index analysis.
            "$expr" => clauses.push(Predicate::field("$expr", FieldOp::Expr)),
            key if key.starts_with('$') => return Err(ParseError::UnknownOperator(key.to_string())),
            path => parse_field(path, value, &mut clauses)?,
        }
    }
    Ok(collapse_conjunction(clauses))
}

fn collapse_conjunction(mut clauses: Vec<Predicate>) -> Predicate {
    match clauses.len() {
        0 => Predicate::Empty,
        1 => clauses.swap_remove(0),
        _ => Predicate::And(clauses),
    }
}

fn parse_logical_list(op: &'static str, value: &Json) -> Result<Vec<Predicate>, ParseError> {
    let docs = value.as_array().ok_or(ParseError::InvalidOperand { op, expected: "an array of documents" })?;
    if docs.is_empty() {
        return Err(ParseError::EmptyLogicalOperator(op));
    }
    docs.iter().map(parse_predicate).collect()
}

fn parse_field(path: &str, value: &Json, clauses: &mut Vec<Predicate>) -> Result<(), ParseError> {
    match value.as_object() {
        Some(obj) if !obj.is_empty() && obj.keys().all(|k| k.starts_with('$')) => parse_operator_document(path, obj, clauses),
        // Anything else is an equality literal, e.g. `{name: "Alice"}`.
        _ => {
            clauses.push(Predicate::field(path, FieldOp::Eq(parse_scalar(path, value)?)));
            Ok(())
        }
    }
}

fn parse_operator_document(path: &str, obj: &Map<String, Json>, clauses: &mut Vec<Predicate>) -> Result<(), ParseError> {
    for (op_key, operand) in obj {
        match op_key.as_str() {
            "$not" => {
                let inner = operand
                    .as_object()
                    .filter(|o| !o.is_empty() && o.keys().all(|k| k.starts_with('$') && k != "$not"))
                    .ok_or(ParseError::InvalidOperand { op: "$not", expected: "an operator document" })?;
                for (inner_key, inner_operand) in inner {
                    let inner_op = parse_operator(path, inner_key, inner_operand)?;
                    clauses.push(Predicate::field(path, FieldOp::Not(Box::new(inner_op))));
                }
            }
            _ => {
                let op = parse_operator(path, op_key, operand)?;
                clauses.push(Predicate::field(path, op));
            }
        }
    }
    Ok(())
}

fn parse_operator(path: &str, op_key: &str, operand: &Json) -> Result<FieldOp, ParseError> {
    Ok(match op_key {
        "$eq" => FieldOp::Eq(parse_scalar(path, operand)?),
        "$ne" => FieldOp::Ne(parse_scalar(path, operand)?),
        "$gt" => FieldOp::Gt(parse_scalar(path, operand)?),
        "$gte" => FieldOp::Gte(parse_scalar(path, operand)?),
        "$lt" => FieldOp::Lt(parse_scalar(path, operand)?),
        "$lte" => FieldOp::Lte(parse_scalar(path, operand)?),
        "$in" => {
            let values = operand.as_array().ok_or(ParseError::InvalidOperand { op: "$in", expected: "an array of values" })?;
            FieldOp::In(values.iter().map(|v| parse_scalar(path, v)).collect::<Result<_, _>>()?)
        }
        "$exists" => FieldOp::Exists(operand.as_bool().ok_or(ParseError::InvalidOperand { op: "$exists", expected: "a boolean" })?),
        "$elemMatch" => FieldOp::ElemMatch(Box::new(parse_predicate(operand)?)),
        "$regex" => {
            let pattern = operand.as_str().ok_or(ParseError::InvalidOperand { op: "$regex", expected: "a pattern string" })?;
            FieldOp::Regex(pattern.to_string())
        }
        "$mod" => {
            let args = operand
                .as_array()
                .filter(|a| a.len() == 2)
                .and_then(|a| Some((a[0].as_i64()?, a[1].as_i64()?)))
                .ok_or(ParseError::InvalidOperand { op: "$mod", expected: "[divisor, remainder]" })?;
            FieldOp::Mod(args.0, args.1)
        }
        other => return Err(ParseError::UnknownOperator(other.to_string())),
    })
}

fn parse_scalar(path: &str, value: &Json) -> Result<Value, ParseError> {
    match value {
        Json::Null => Ok(Value::Null),
        Json::Bool(b) => Ok(Value::Boolean(*b)),
        Json::String(s) => Ok(Value::String(s.clone())),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Ok(Value::Integer(i)),
            None => n.as_f64().map(Value::Double).ok_or_else(|| ParseError::UnsupportedLiteral(path.to_string())),
        },
        Json::Array(_) | Json::Object(_) => Err(ParseError::UnsupportedLiteral(path.to_string())),
    }
}

fn as_object(doc: &Json) -> Result<&Map<String, Json>, ParseError> {
    doc.as_object().ok_or_else(|| ParseError::NotADocument(json_type_name(doc)))
}

fn json_type_name(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "a document",
    }
}
