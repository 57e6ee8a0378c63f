use covql::ast::{OrderByItem, OrderDirection};

/// Convert `(field, token)` pairs into an ordered sort-key list. Tokens `1`
/// and `-1` select ascending and descending; any other token yields `None`.
/// Duplicate fields are passed through; the matcher rejects them naturally.
pub fn order_by_from_tokens<I, S>(pairs: I) -> Option<Vec<OrderByItem>>
where
    I: IntoIterator<Item = (S, i32)>,
    S: Into<String>,
{
    pairs
        .into_iter()
        .map(|(path, token)| {
            let direction = match token {
                1 => OrderDirection::Asc,
                -1 => OrderDirection::Desc,
                _ => return None,
            };
            Some(OrderByItem { path: path.into(), direction })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens() {
        let items = order_by_from_tokens([("score", -1), ("name", 1)]).unwrap();
        assert_eq!(items, vec![OrderByItem::desc("score"), OrderByItem::asc("name")]);
    }

    #[test]
    fn test_empty() {
        assert_eq!(order_by_from_tokens(Vec::<(String, i32)>::new()), Some(vec![]));
    }

    #[test]
    fn test_invalid_token() {
        assert_eq!(order_by_from_tokens([("score", 0)]), None);
        assert_eq!(order_by_from_tokens([("a", 1), ("b", 2)]), None);
    }

    #[test]
    fn test_duplicates_pass_through() {
        let items = order_by_from_tokens([("a", 1), ("a", -1)]).unwrap();
        assert_eq!(items.len(), 2);
    }
}
