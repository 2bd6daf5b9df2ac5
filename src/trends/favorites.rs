use super::model::Trend;

/// Toggle `id` in an insertion-ordered favorites list.
///
/// Removing keeps the relative order of the rest; adding appends.
pub fn toggle_favorite(favorites: &[String], id: &str) -> Vec<String> {
    if favorites.iter().any(|f| f == id) {
        favorites.iter().filter(|f| *f != id).cloned().collect()
    } else {
        let mut next = favorites.to_vec();
        next.push(id.to_string());
        next
    }
}

pub fn is_favorite(favorites: &[String], id: &str) -> bool {
    favorites.iter().any(|f| f == id)
}

/// Trends of `records` whose ids are favorites, in snapshot order.
///
/// Ids with no matching trend in the snapshot are silently skipped.
pub fn favorite_trends<'a>(records: &'a [Trend], favorites: &[String]) -> Vec<&'a Trend> {
    records
        .iter()
        .filter(|t| is_favorite(favorites, &t.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::fallback::fallback_trends;
    use proptest::prelude::*;

    fn owned(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let once = toggle_favorite(&[], "ratio");
        assert_eq!(once, owned(&["ratio"]));
        assert!(toggle_favorite(&once, "ratio").is_empty());
    }

    #[test]
    fn test_remove_keeps_order() {
        let favs = owned(&["a", "b", "c"]);
        assert_eq!(toggle_favorite(&favs, "b"), owned(&["a", "c"]));
    }

    #[test]
    fn test_favorite_trends_follow_snapshot_order() {
        let trends = fallback_trends();
        let favs = owned(&["ratio", "npc-streamer"]);
        let hits: Vec<_> = favorite_trends(&trends, &favs)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(hits, vec!["npc-streamer", "ratio"]);
    }

    #[test]
    fn test_stale_ids_are_skipped() {
        let trends = fallback_trends();
        let favs = owned(&["gone-from-snapshot"]);
        assert!(favorite_trends(&trends, &favs).is_empty());
    }

    proptest! {
        #[test]
        fn prop_double_toggle_restores_membership(
            favs in prop::collection::hash_set("[a-z]{1,4}", 0..6),
            id in "[a-z]{1,4}",
        ) {
            let favs: Vec<String> = favs.into_iter().collect();
            let twice = toggle_favorite(&toggle_favorite(&favs, &id), &id);

            let mut before = favs.clone();
            let mut after = twice.clone();
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);
        }
    }
}
