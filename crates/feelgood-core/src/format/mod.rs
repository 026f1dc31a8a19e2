//! Reply formatting and message chunking.
//!
//! The chat platform rejects messages over its size limit, so replies are
//! rendered into one text block and then cut into chunks. The cut is a hard
//! character cutoff: chunks concatenate back to the exact original text.

use std::fmt::Write;

use feelgood_types::config::PLATFORM_MESSAGE_LIMIT;
use feelgood_types::recommendation::RecommendationSet;

/// Render the full, unsplit reply for a mood request.
pub fn render(mood: &str, results: &RecommendationSet) -> String {
    let mut out = format!("Here are some recommendations for your **{mood}** mood:\n");

    for (category, items) in results.sections() {
        let _ = write!(out, "\n**{}**\n", category.heading());
        if items.is_empty() {
            out.push_str(category.empty_line());
            out.push('\n');
            continue;
        }
        for (i, item) in items.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. [{}]({})",
                i + 1,
                escape_link_text(&item.title),
                escape_link_target(&item.url)
            );
        }
    }

    out
}

/// Escape characters that would end the link text early.
fn escape_link_text(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for ch in title.chars() {
        if matches!(ch, '\\' | '[' | ']') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Percent-encode characters that would end the link target early.
fn escape_link_target(url: &str) -> String {
    url.replace(' ', "%20").replace('(', "%28").replace(')', "%29")
}

/// Split text into chunks of at most `max_chars` characters.
///
/// Never splits inside a UTF-8 code point. Empty input yields no chunks.
/// A `max_chars` of zero is treated as one.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for ch in text.chars() {
        if count == max_chars {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(ch);
        count += 1;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Render and chunk a mood reply for the platform limit.
pub fn format_recommendations(mood: &str, results: &RecommendationSet) -> Vec<String> {
    format_recommendations_with_limit(mood, results, PLATFORM_MESSAGE_LIMIT)
}

/// Render and chunk a mood reply with an explicit chunk size.
pub fn format_recommendations_with_limit(
    mood: &str,
    results: &RecommendationSet,
    max_chars: usize,
) -> Vec<String> {
    split_message(&render(mood, results), max_chars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use feelgood_types::recommendation::RecommendationItem;

    fn item(title: &str, url: &str) -> RecommendationItem {
        RecommendationItem::new(title, url)
    }

    #[test]
    fn render_lists_items_per_section() {
        let results = RecommendationSet {
            music: vec![item("Happy Hits", "https://open.spotify.com/playlist/1")],
            movies: vec![
                item("Airplane!", "https://www.themoviedb.org/movie/813"),
                item("Hot Fuzz", "https://www.themoviedb.org/movie/4638"),
            ],
            videos: vec![item("Pharrell - Happy", "https://www.youtube.com/watch?v=abc")],
        };

        let text = render("happy", &results);

        assert!(text.starts_with("Here are some recommendations for your **happy** mood:\n"));
        assert!(text.contains("**Music**\n1. [Happy Hits](https://open.spotify.com/playlist/1)\n"));
        assert!(text.contains(
            "**Movies**\n1. [Airplane!](https://www.themoviedb.org/movie/813)\n2. [Hot Fuzz](https://www.themoviedb.org/movie/4638)\n"
        ));
        assert!(text.contains("**Videos**\n1. [Pharrell - Happy](https://www.youtube.com/watch?v=abc)\n"));
    }

    #[test]
    fn render_escapes_link_breaking_characters() {
        let results = RecommendationSet {
            music: vec![item("Hits] @everyone [x", "https://example.com/a (b)")],
            ..Default::default()
        };

        let text = render("happy", &results);

        assert!(
            text.contains("1. [Hits\\] @everyone \\[x](https://example.com/a%20%28b%29)\n"),
            "unexpected render: {text}"
        );
    }

    #[test]
    fn render_leaves_plain_titles_untouched() {
        assert_eq!(escape_link_text("Hot Fuzz (2007)"), "Hot Fuzz (2007)");
        assert_eq!(escape_link_text(r"a\b"), r"a\\b");
        assert_eq!(
            escape_link_target("https://www.youtube.com/watch?v=abc"),
            "https://www.youtube.com/watch?v=abc"
        );
    }

    #[test]
    fn empty_sections_render_no_result_lines() {
        let text = render("sad", &RecommendationSet::default());
        assert!(text.contains("**Music**\nNo playlist found.\n"));
        assert!(text.contains("**Movies**\nNo movie found.\n"));
        assert!(text.contains("**Videos**\nNo video found.\n"));
    }

    #[test]
    fn split_short_text_is_single_chunk() {
        let chunks = split_message("hello", 2000);
        assert_eq!(chunks, vec!["hello".to_string()]);
    }

    #[test]
    fn split_empty_text_is_no_chunks() {
        assert!(split_message("", 2000).is_empty());
    }

    #[test]
    fn split_exact_multiple_has_no_empty_tail() {
        let text = "a".repeat(4000);
        let chunks = split_message(&text, 2000);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.chars().count() == 2000));
    }

    #[test]
    fn split_respects_limit_and_reassembles_exactly() {
        let text: String = (0..5_321)
            .map(|i| match i % 7 {
                0 => '\n',
                1 => 'é',
                2 => '🎵',
                _ => 'x',
            })
            .collect();

        for limit in [1, 7, 1999, 2000] {
            let chunks = split_message(&text, limit);
            assert!(chunks.iter().all(|c| c.chars().count() <= limit));
            assert_eq!(chunks.concat(), text);
        }
    }

    #[test]
    fn split_zero_limit_behaves_like_one() {
        let chunks = split_message("abc", 0);
        assert_eq!(chunks, vec!["a", "b", "c"]);
    }

    #[test]
    fn long_reply_is_chunked_under_platform_limit() {
        let long_title = "t".repeat(700);
        let results = RecommendationSet {
            music: (0..3).map(|i| item(&long_title, &format!("https://m/{i}"))).collect(),
            movies: (0..3).map(|i| item(&long_title, &format!("https://f/{i}"))).collect(),
            videos: Vec::new(),
        };

        let chunks = format_recommendations("happy", &results);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= PLATFORM_MESSAGE_LIMIT));
        assert_eq!(chunks.concat(), render("happy", &results));
    }
}
