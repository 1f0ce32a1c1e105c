use crate::domain::model::BlogPost;
use regex::Regex;
use std::sync::OnceLock;

pub const FALLBACK_TITLE: &str = "Generated Sermon";

fn heading_marker() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| Regex::new(r"^#{1,6}\s*").expect("heading pattern is valid"))
}

/// Splits completion text into a title line and a body.
///
/// The model is asked to open with a title, but nothing enforces it: when the
/// trimmed text has fewer than two lines the whole raw text becomes the body
/// under [`FALLBACK_TITLE`].
pub fn parse_sermon(text: &str) -> BlogPost {
    let lines: Vec<&str> = text.trim().split('\n').collect();
    if lines.len() < 2 {
        return BlogPost::new(FALLBACK_TITLE, text);
    }

    let title = heading_marker().replace(lines[0], "").trim().to_string();
    let body = lines[1..].join("\n").trim().to_string();

    BlogPost::new(title, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_heading_marker_is_stripped() {
        let post = parse_sermon("## The Serpent's Bite\nBeloved seekers, ...\n");
        assert_eq!(post.title, "The Serpent's Bite");
        assert_eq!(post.body, "Beloved seekers, ...");
    }

    #[test]
    fn test_title_without_marker_is_kept() {
        let post = parse_sermon("Finding True Safety Within\n\nParagraph one.\n\nParagraph two.");
        assert_eq!(post.title, "Finding True Safety Within");
        assert_eq!(post.body, "Paragraph one.\n\nParagraph two.");
    }

    #[test]
    fn test_other_heading_levels_are_stripped() {
        assert_eq!(parse_sermon("# Title\nbody").title, "Title");
        assert_eq!(parse_sermon("###   Title  \nbody").title, "Title");
    }

    #[test]
    fn test_leading_blank_lines_are_ignored() {
        let post = parse_sermon("\n\n  ## Awakening\n  body line  \n\n");
        assert_eq!(post.title, "Awakening");
        assert_eq!(post.body, "body line");
    }

    #[test]
    fn test_single_line_falls_back() {
        let raw = "Only one line of sermon\n";
        let post = parse_sermon(raw);
        assert_eq!(post.title, FALLBACK_TITLE);
        assert_eq!(post.body, raw);
    }

    #[test]
    fn test_empty_response_falls_back() {
        let post = parse_sermon("");
        assert_eq!(post.title, FALLBACK_TITLE);
        assert_eq!(post.body, "");

        let blank = parse_sermon("  \n \n");
        assert_eq!(blank.title, FALLBACK_TITLE);
        assert_eq!(blank.body, "  \n \n");
    }
}
