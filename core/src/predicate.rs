//! Classifies the field predicates of one conjunctive branch into the
//! index-relevant categories: equality-constrained fields, range-constrained
//! fields, and shapes that defeat index analysis altogether.

use covql::ast::{FieldOp, FieldPredicate, Predicate};
use indexmap::IndexSet;

/// The index-relevant summary of one conjunct. A field may appear in both
/// sets when the conjunct carries an equality and a range operator on the
/// same field. `rejected` is absorbing: once set, the conjunct can never be
/// reported as covered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConjunctAnalysis {
    pub equality: IndexSet<String>,
    pub range: IndexSet<String>,
    pub rejected: bool,
}

impl ConjunctAnalysis {
    pub fn reject() -> Self { Self { rejected: true, ..Self::default() } }
}

/// Fold a conjunct's field predicates into a single analysis.
pub fn analyze_conjunct<'a, I>(leaves: I) -> ConjunctAnalysis
where I: IntoIterator<Item = &'a FieldPredicate> {
    let mut analysis = ConjunctAnalysis::default();
    for leaf in leaves {
        classify(&leaf.path, &leaf.op, &mut analysis);
    }
    analysis
}

fn classify(path: &str, op: &FieldOp, analysis: &mut ConjunctAnalysis) {
    match op {
        FieldOp::Eq(_) | FieldOp::In(_) | FieldOp::Ne(_) => {
            analysis.equality.insert(path.to_string());
        }
        FieldOp::Gt(_) | FieldOp::Gte(_) | FieldOp::Lt(_) | FieldOp::Lte(_) => {
            analysis.range.insert(path.to_string());
        }
        // An existence check walks the same key prefix an equality would.
        FieldOp::Exists(true) => {
            analysis.equality.insert(path.to_string());
        }
        FieldOp::Not(inner) => match inner.as_ref() {
            FieldOp::Eq(_) | FieldOp::In(_) | FieldOp::Ne(_) => {
                analysis.equality.insert(path.to_string());
            }
            FieldOp::Gt(_) | FieldOp::Gte(_) | FieldOp::Lt(_) | FieldOp::Lte(_) => {
                analysis.range.insert(path.to_string());
            }
            _ => analysis.rejected = true,
        },
        FieldOp::ElemMatch(sub) => analyze_elem_match(path, sub, analysis),
        FieldOp::Exists(false) | FieldOp::Regex(_) | FieldOp::Mod(..) | FieldOp::Where(_) | FieldOp::Expr => {
            analysis.rejected = true;
        }
    }
}

/// An `$elemMatch` body is analyzed as a nested conjunct with every produced
/// field re-rooted under the array path. Logical operators other than AND
/// inside the body defeat the analysis, as does a rejected sub-analysis.
fn analyze_elem_match(base: &str, sub: &Predicate, analysis: &mut ConjunctAnalysis) {
    let mut inner = ConjunctAnalysis::default();
    collect_conjunctive(sub, &mut inner);
    if inner.rejected {
        analysis.rejected = true;
        return;
    }
    for field in inner.equality {
        analysis.equality.insert(format!("{}.{}", base, field));
    }
    for field in inner.range {
        analysis.range.insert(format!("{}.{}", base, field));
    }
}

fn collect_conjunctive(predicate: &Predicate, analysis: &mut ConjunctAnalysis) {
    match predicate {
        Predicate::Empty => {}
        Predicate::Field(fp) => classify(&fp.path, &fp.op, analysis),
        Predicate::And(children) => {
            for child in children {
                collect_conjunctive(child, analysis);
            }
        }
        Predicate::Or(_) | Predicate::Nor(_) | Predicate::Not(_) => analysis.rejected = true,
    }
}
