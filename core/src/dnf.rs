//! Rewrites arbitrary AND/OR/NOT trees into disjunctive normal form so each
//! conjunctive branch can be checked against the index catalog on its own.

use crate::predicate::{analyze_conjunct, ConjunctAnalysis};
use covql::ast::{FieldOp, FieldPredicate, Predicate};

/// One conjunctive branch of the normal form: the field predicates that must
/// all hold, plus a poison flag for shapes the rewrite refuses to expand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Branch {
    pub leaves: Vec<FieldPredicate>,
    pub rejected: bool,
}

impl Branch {
    fn leaf(fp: FieldPredicate) -> Self { Self { leaves: vec![fp], rejected: false } }

    fn poison() -> Self { Self { leaves: Vec::new(), rejected: true } }

    fn merge(&self, other: &Branch) -> Branch {
        let mut leaves = self.leaves.clone();
        leaves.extend(other.leaves.iter().cloned());
        Branch { leaves, rejected: self.rejected || other.rejected }
    }
}

/// Expand a predicate tree into its disjunctive branches. Never returns an
/// empty list; a predicate with no constraints yields one empty branch.
pub fn branches(predicate: &Predicate) -> Vec<Branch> {
    match predicate {
        Predicate::Empty => vec![Branch::default()],
        Predicate::Field(fp) => vec![Branch::leaf(fp.clone())],
        Predicate::And(children) => {
            // Cross product over the children's branch lists. A literal child
            // contributes a single branch, so it is copied into every
            // alternative produced by its OR siblings.
            let mut acc = vec![Branch::default()];
            for child in children {
                let child_branches = branches(child);
                let mut next = Vec::with_capacity(acc.len() * child_branches.len());
                for base in &acc {
                    for branch in &child_branches {
                        next.push(base.merge(branch));
                    }
                }
                acc = next;
            }
            acc
        }
        Predicate::Or(children) => {
            // An empty disjunction is unsatisfiable; refuse it rather than
            // break the non-empty output contract.
            if children.is_empty() {
                return vec![Branch::poison()];
            }
            children.iter().flat_map(branches).collect()
        }
        // No De Morgan expansion is attempted for NOR.
        Predicate::Nor(_) => vec![Branch::poison()],
        Predicate::Not(inner) => match inner.as_ref() {
            Predicate::Field(fp) => vec![Branch::leaf(FieldPredicate::new(fp.path.clone(), FieldOp::Not(Box::new(fp.op.clone()))))],
            _ => vec![Branch::poison()],
        },
    }
}

/// Normalize a predicate to the analyses of its disjunctive branches.
pub fn normalize(predicate: &Predicate) -> Vec<ConjunctAnalysis> {
    branches(predicate)
        .into_iter()
        .map(|branch| {
            let mut analysis = analyze_conjunct(branch.leaves.iter());
            analysis.rejected |= branch.rejected;
            analysis
        })
        .collect()
}
