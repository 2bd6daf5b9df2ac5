use super::model::{Category, Source, Trend};

/// The bundled list shown before (or instead of) any remote content.
///
/// Always non-empty.
pub fn fallback_trends() -> Vec<Trend> {
    vec![
        Trend {
            id: "npc-streamer".into(),
            title: "NPC Streamer".into(),
            short_summary:
                "Streamers acting like 'non-player characters' replying with preset phrases for tips."
                    .into(),
            long_explanation: "Some livestreamers roleplay as video-game NPCs, responding with fixed \
                phrases or actions when viewers send paid tips or prompts. It\u{2019}s performative, \
                meme-y, and built around microtransactions."
                .into(),
            example_sentence:
                "My niece watches an NPC streamer who says the same line every time someone tips."
                    .into(),
            category: Category::Trend,
            sources: vec![Source::new("Know Your Meme", "https://knowyourmeme.com")],
            tags: vec!["tiktok".into(), "streaming".into(), "npc".into()],
            published: None,
        },
        Trend {
            id: "brat-summer".into(),
            title: "Brat Summer".into(),
            short_summary: "A tongue-in-cheek vibe of carefree confidence and messy fun.".into(),
            long_explanation: "Borrowed from pop culture, 'brat' in this context is playful \
                self-confidence: doing your thing, not overthinking, and embracing a slightly \
                chaotic summer energy."
                .into(),
            example_sentence: "They're calling it 'brat summer'\u{2014}basically giving yourself \
                permission to be a little silly."
                .into(),
            category: Category::Slang,
            sources: vec![Source::new("News explainer", "https://www.apple.com/newsroom/")],
            tags: vec!["slang".into(), "summer".into(), "pop".into()],
            published: None,
        },
        Trend {
            id: "ratio".into(),
            title: "Ratio".into(),
            short_summary: "When replies outnumber likes\u{2014}used as a dunk to show disapproval."
                .into(),
            long_explanation: "On social platforms, if a post has far more reply comments than \
                likes or reposts, people say it\u{2019}s 'ratioed'\u{2014}a quick way to signal the \
                audience doesn\u{2019}t agree."
                .into(),
            example_sentence: "That politician\u{2019}s post got ratioed\u{2014}more replies than likes."
                .into(),
            category: Category::Platform,
            sources: vec![Source::new(
                "OutOfTheLoop",
                "https://www.reddit.com/r/OutOfTheLoop/",
            )],
            tags: vec!["twitter".into(), "x".into(), "replies".into()],
            published: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fallback_is_non_empty_with_unique_ids() {
        let trends = fallback_trends();
        assert_eq!(trends.len(), 3);
        let ids: HashSet<_> = trends.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), trends.len());
    }

    #[test]
    fn test_fallback_order_and_categories() {
        let trends = fallback_trends();
        let summary: Vec<_> = trends.iter().map(|t| (t.id.as_str(), t.category)).collect();
        assert_eq!(
            summary,
            vec![
                ("npc-streamer", Category::Trend),
                ("brat-summer", Category::Slang),
                ("ratio", Category::Platform),
            ]
        );
    }

    #[test]
    fn test_every_fallback_trend_has_a_source_and_example() {
        for trend in fallback_trends() {
            assert!(trend.primary_source().is_some(), "{} has no source", trend.id);
            assert!(!trend.example_sentence.is_empty(), "{} has no example", trend.id);
            assert!(trend.published.is_none());
        }
    }

    #[test]
    fn test_continuation_lines_join_with_single_spaces() {
        for trend in fallback_trends() {
            assert!(!trend.long_explanation.contains("  "), "{}", trend.id);
        }
    }
}
