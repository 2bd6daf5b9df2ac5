use super::model::Trend;

/// Case-insensitive substring filter over title, summary, explanation and tags.
///
/// The query is trimmed first; a blank query keeps every record. Order is
/// preserved and there is no ranking.
///
/// ```
/// use boomer::trends::{fallback_trends, filter};
///
/// let trends = fallback_trends();
/// let hits = filter(&trends, "  TWITTER ");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, "ratio");
/// ```
pub fn filter<'a>(records: &'a [Trend], query: &str) -> Vec<&'a Trend> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return records.iter().collect();
    }

    records.iter().filter(|t| matches_term(t, &term)).collect()
}

/// `term` must already be lowercased.
pub(crate) fn matches_term(trend: &Trend, term: &str) -> bool {
    let has = |s: &str| s.to_lowercase().contains(term);
    has(&trend.title)
        || has(&trend.short_summary)
        || has(&trend.long_explanation)
        || trend.tags.iter().any(|tag| has(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::fallback::fallback_trends;
    use crate::trends::model::Category;
    use proptest::prelude::*;

    fn ids<'a>(hits: &[&'a Trend]) -> Vec<&'a str> {
        hits.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_blank_query_returns_everything() {
        let trends = fallback_trends();
        assert_eq!(filter(&trends, "").len(), 3);
        assert_eq!(filter(&trends, "   ").len(), 3);
    }

    #[test]
    fn test_matches_each_field() {
        let trends = fallback_trends();
        // title
        assert_eq!(ids(&filter(&trends, "brat")), vec!["brat-summer"]);
        // short summary
        assert_eq!(ids(&filter(&trends, "preset phrases")), vec!["npc-streamer"]);
        // long explanation
        assert_eq!(ids(&filter(&trends, "microtransactions")), vec!["npc-streamer"]);
        // tag only
        assert_eq!(ids(&filter(&trends, "replies")), vec!["ratio"]);
    }

    #[test]
    fn test_example_sentence_is_not_searched() {
        let trends = fallback_trends();
        assert!(filter(&trends, "politician").is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        let trends = fallback_trends();
        assert!(filter(&trends, "skibidi").is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let trends = fallback_trends();
        assert_eq!(
            ids(&filter(&trends, "e")),
            vec!["npc-streamer", "brat-summer", "ratio"]
        );
    }

    fn arb_trend() -> impl Strategy<Value = Trend> {
        (
            "[a-z]{1,6}",
            "[a-zA-Z ]{0,12}",
            "[a-zA-Z ]{0,12}",
            "[a-zA-Z ]{0,20}",
            prop::collection::vec("[a-z]{1,5}", 0..3),
        )
            .prop_map(|(id, title, short_summary, long_explanation, tags)| Trend {
                id,
                title,
                short_summary,
                long_explanation,
                example_sentence: String::new(),
                category: Category::Trend,
                sources: Vec::new(),
                tags,
                published: None,
            })
    }

    proptest! {
        #[test]
        fn prop_empty_query_is_identity(records in prop::collection::vec(arb_trend(), 0..8)) {
            let hits = filter(&records, "");
            prop_assert_eq!(hits.len(), records.len());
            for (hit, record) in hits.iter().zip(records.iter()) {
                prop_assert!(std::ptr::eq(*hit, record));
            }
        }

        #[test]
        fn prop_results_are_ordered_subset_containing_query(
            records in prop::collection::vec(arb_trend(), 0..8),
            query in "[a-zA-Z]{1,3}",
        ) {
            let hits = filter(&records, &query);
            let term = query.to_lowercase();

            // Each hit is one of the inputs, in input order
            let mut cursor = 0;
            for hit in &hits {
                let pos = records[cursor..]
                    .iter()
                    .position(|r| std::ptr::eq(r, *hit));
                prop_assert!(pos.is_some());
                cursor += pos.unwrap_or(0) + 1;
                prop_assert!(matches_term(hit, &term));
            }

            // Nothing matching was dropped
            let expected = records.iter().filter(|r| matches_term(r, &term)).count();
            prop_assert_eq!(hits.len(), expected);
        }
    }
}
