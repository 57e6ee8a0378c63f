//! Decides whether one compound index perfectly covers one conjunct and its
//! ordering: equality fields must fill the index prefix, sort keys must line
//! up contiguously after it (forward or whole-list reversed), and every
//! range field must appear somewhere in the index.

use crate::index_spec::IndexSpec;
use crate::predicate::ConjunctAnalysis;
use covql::ast::OrderByItem;

/// Returns whether `index` can answer the conjunct and ordering with a
/// single traversal and no in-memory filter or sort pass.
pub fn covers(analysis: &ConjunctAnalysis, order_by: &[OrderByItem], index: &IndexSpec) -> bool {
    if analysis.rejected {
        return false;
    }
    let keyparts = &index.keyparts;

    // Equality prefix: consume leading keyparts whose paths carry equality
    // constraints. Every equality field must land inside that prefix; the
    // fields may appear in any order within it.
    let prefix_len = keyparts.iter().take_while(|kp| analysis.equality.contains(kp.path.as_str())).count();
    if !analysis.equality.iter().all(|field| keyparts[..prefix_len].iter().any(|kp| kp.path == *field)) {
        return false;
    }

    // Sort segment: sort keys follow the prefix contiguously. Directions
    // must match the index all-forward or all-reversed; reverse traversal is
    // off the table when any sort field is also range-constrained.
    if !order_by.is_empty() {
        if keyparts.len() - prefix_len < order_by.len() {
            return false;
        }
        let segment = &keyparts[prefix_len..prefix_len + order_by.len()];
        if !segment.iter().zip(order_by).all(|(kp, item)| kp.path == item.path) {
            return false;
        }

        let forward = segment.iter().zip(order_by).all(|(kp, item)| kp.direction.satisfies(item.direction));
        let reverse = segment.iter().zip(order_by).all(|(kp, item)| kp.direction.satisfies(item.direction.reverse()));
        let sorts_a_range_field = order_by.iter().any(|item| analysis.range.contains(item.path.as_str()));
        if !(forward || (reverse && !sorts_a_range_field)) {
            return false;
        }
    }

    // Range fields only need to be present somewhere in the index; a field
    // that is also an equality field was already consumed by the prefix.
    analysis.range.iter().all(|field| keyparts.iter().any(|kp| kp.path == *field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index_spec::IndexKeyPart;
    use indexmap::IndexSet;

    fn index(keyparts: Vec<IndexKeyPart>) -> IndexSpec { IndexSpec::new("test_idx", keyparts) }

    fn fields(names: &[&str]) -> IndexSet<String> { names.iter().map(|n| n.to_string()).collect() }

    fn analysis(equality: &[&str], range: &[&str]) -> ConjunctAnalysis {
        ConjunctAnalysis { equality: fields(equality), range: fields(range), rejected: false }
    }

    #[test]
    fn test_rejected_never_covers() {
        let a = ConjunctAnalysis::reject();
        assert!(!covers(&a, &[], &index(vec![IndexKeyPart::asc("a")])));
    }

    #[test]
    fn test_equality_prefix_any_order() {
        // {a: 1, b: 1} covers equality on {b, a} in either listing order
        let ix = index(vec![IndexKeyPart::asc("a"), IndexKeyPart::asc("b")]);
        assert!(covers(&analysis(&["b", "a"], &[]), &[], &ix));
        assert!(covers(&analysis(&["a", "b"], &[]), &[], &ix));
    }

    #[test]
    fn test_equality_field_outside_prefix_rejects() {
        // {a: 1, c: 1} cannot serve equality on {a, b}
        let ix = index(vec![IndexKeyPart::asc("a"), IndexKeyPart::asc("c")]);
        assert!(!covers(&analysis(&["a", "b"], &[]), &[], &ix));
    }

    #[test]
    fn test_equality_prefix_must_start_at_position_zero() {
        // {x: 1, a: 1} cannot serve equality on {a}: the prefix opens with a
        // field the conjunct does not pin
        let ix = index(vec![IndexKeyPart::asc("x"), IndexKeyPart::asc("a")]);
        assert!(!covers(&analysis(&["a"], &[]), &[], &ix));
    }

    #[test]
    fn test_unused_trailing_fields_are_fine() {
        let ix = index(vec![IndexKeyPart::asc("a"), IndexKeyPart::asc("b"), IndexKeyPart::desc("c")]);
        assert!(covers(&analysis(&["a"], &[]), &[], &ix));
    }

    #[test]
    fn test_sort_follows_equality_prefix() {
        // {u: 1, s: 1, c: -1} with equality {u, s} sorts on c desc
        let ix = index(vec![IndexKeyPart::asc("u"), IndexKeyPart::asc("s"), IndexKeyPart::desc("c")]);
        assert!(covers(&analysis(&["u", "s"], &[]), &[OrderByItem::desc("c")], &ix));
        assert!(!covers(&analysis(&["u", "s"], &[]), &[OrderByItem::desc("x")], &ix));
    }

    #[test]
    fn test_sort_cannot_skip_index_fields() {
        // {a: 1, b: 1, c: 1} with equality {a} cannot sort on c alone
        let ix = index(vec![IndexKeyPart::asc("a"), IndexKeyPart::asc("b"), IndexKeyPart::asc("c")]);
        assert!(!covers(&analysis(&["a"], &[]), &[OrderByItem::asc("c")], &ix));
    }

    #[test]
    fn test_sort_longer_than_index_rejects() {
        let ix = index(vec![IndexKeyPart::asc("a")]);
        assert!(!covers(&analysis(&[], &[]), &[OrderByItem::asc("a"), OrderByItem::asc("b")], &ix));
    }

    #[test]
    fn test_reverse_traversal() {
        // {s: 1, c: -1} serves sort (s desc, c asc) by walking backwards
        let ix = index(vec![IndexKeyPart::asc("s"), IndexKeyPart::desc("c")]);
        assert!(covers(&analysis(&[], &[]), &[OrderByItem::desc("s"), OrderByItem::asc("c")], &ix));
    }

    #[test]
    fn test_mixed_direction_modes_reject() {
        // (s asc, c asc) neither matches {s: 1, c: -1} forward nor reversed
        let ix = index(vec![IndexKeyPart::asc("s"), IndexKeyPart::desc("c")]);
        assert!(!covers(&analysis(&[], &[]), &[OrderByItem::asc("s"), OrderByItem::asc("c")], &ix));
    }

    #[test]
    fn test_reverse_traversal_forbidden_with_range_on_sort_field() {
        // sc >= 80 sorted sc asc against {sc: -1}: reverse walk would serve
        // the order but the range constraint pins the traversal direction
        let ix = index(vec![IndexKeyPart::desc("sc"), IndexKeyPart::asc("c")]);
        assert!(!covers(&analysis(&[], &["sc"]), &[OrderByItem::asc("sc")], &ix));
        // Forward-direction sort on the same shape is fine
        assert!(covers(&analysis(&[], &["sc"]), &[OrderByItem::desc("sc")], &ix));
    }

    #[test]
    fn test_range_field_must_appear_in_index() {
        let ix = index(vec![IndexKeyPart::asc("a"), IndexKeyPart::asc("b")]);
        assert!(covers(&analysis(&["a"], &["b"]), &[], &ix));
        assert!(!covers(&analysis(&["a"], &["z"]), &[], &ix));
    }

    #[test]
    fn test_range_field_position_does_not_matter() {
        // Range on c is satisfied even with sort keys between prefix and c
        let ix = index(vec![IndexKeyPart::asc("a"), IndexKeyPart::asc("b"), IndexKeyPart::asc("c")]);
        assert!(covers(&analysis(&["a"], &["c"]), &[OrderByItem::asc("b")], &ix));
    }

    #[test]
    fn test_equality_and_range_on_same_field_consumes_one_slot() {
        // a == 1 AND a < 9: the equality role fills the prefix, the range
        // role is satisfied by presence
        let ix = index(vec![IndexKeyPart::asc("a"), IndexKeyPart::asc("b")]);
        assert!(covers(&analysis(&["a"], &["a"]), &[OrderByItem::asc("b")], &ix));
    }

    #[test]
    fn test_duplicate_sort_fields_reject() {
        let ix = index(vec![IndexKeyPart::asc("a"), IndexKeyPart::asc("b")]);
        assert!(!covers(&analysis(&[], &[]), &[OrderByItem::asc("a"), OrderByItem::asc("a")], &ix));
    }

    #[test]
    fn test_empty_conjunct_and_sort_covers_any_index() {
        let ix = index(vec![IndexKeyPart::desc("anything")]);
        assert!(covers(&ConjunctAnalysis::default(), &[], &ix));
    }
}
