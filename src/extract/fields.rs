//! Field-level transforms shared by the extractors.

use scraper::{ElementRef, Node, Selector};

use crate::error::{AppError, Result};
use crate::models::PhoneListItem;

/// Compile a CSS selector, mapping failures to [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Concatenated text content of an element, trimmed.
pub fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Text content split at `<br>` elements, each segment trimmed, empty
/// segments dropped.
pub fn text_segments(el: &ElementRef<'_>) -> Vec<String> {
    let mut segments = vec![String::new()];
    for node in el.descendants() {
        match node.value() {
            Node::Text(text) => {
                if let Some(current) = segments.last_mut() {
                    current.push_str(text);
                }
            }
            Node::Element(e) if e.name() == "br" => segments.push(String::new()),
            _ => {}
        }
    }

    segments
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Name variants separated by `<br>` flattened into one space-joined string.
///
/// Falls back to the plain trimmed text when the flattened form is empty.
pub fn flattened_text(el: &ElementRef<'_>) -> String {
    let flat = text_segments(el).join(" ");
    if flat.is_empty() {
        element_text(el)
    } else {
        flat
    }
}

/// Parse a counter such as `"12,345"`.
///
/// Thousands separators are ignored and trailing garbage after the leading
/// digits is dropped. Anything unparsable yields 0.
pub fn parse_count(text: &str) -> u64 {
    let digits: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

/// Number kept items 1..=N in their current order.
pub fn assign_ranks(items: Vec<PhoneListItem>) -> Vec<PhoneListItem> {
    items
        .into_iter()
        .zip(1u32..)
        .map(|(mut item, rank)| {
            item.rank = Some(rank);
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    fn first<'a>(doc: &'a Html, sel: &str) -> ElementRef<'a> {
        doc.select(&parse_selector(sel).unwrap()).next().unwrap()
    }

    #[test]
    fn test_parse_selector_valid() {
        assert!(parse_selector(".makers ul li").is_ok());
        assert!(parse_selector("th a").is_ok());
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(matches!(
            parse_selector("[[invalid"),
            Err(AppError::Selector { .. })
        ));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("12,345"), 12345);
        assert_eq!(parse_count(" 1,234,567 "), 1234567);
        assert_eq!(parse_count("42 hits"), 42);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("n/a"), 0);
        assert_eq!(parse_count("-5"), 0);
    }

    #[test]
    fn test_flattened_text_joins_variants() {
        let doc = Html::parse_fragment("<span>Apple<br>iPhone 15<br/> A3090 </span>");
        let span = first(&doc, "span");
        assert_eq!(flattened_text(&span), "Apple iPhone 15 A3090");
        assert_eq!(element_text(&span), "AppleiPhone 15 A3090");
    }

    #[test]
    fn test_flattened_text_without_markup_matches_plain() {
        let doc = Html::parse_fragment("<span>  Galaxy S24 Ultra </span>");
        let span = first(&doc, "span");
        assert_eq!(flattened_text(&span), element_text(&span));
    }

    #[test]
    fn test_text_segments_includes_nested_text() {
        let doc = Html::parse_fragment(
            "<table><tr><td>6.1 inches<br><b>~86%</b> ratio</td></tr></table>",
        );
        let td = first(&doc, "td");
        assert_eq!(text_segments(&td), vec!["6.1 inches", "~86% ratio"]);
    }

    #[test]
    fn test_assign_ranks_is_dense() {
        let item = |slug: &str| PhoneListItem {
            rank: None,
            name: slug.to_uppercase(),
            slug: slug.to_string(),
            image_url: None,
            hits: Some(0),
            detail_url: format!("/{slug}"),
        };
        let ranked = assign_ranks(vec![item("a"), item("b"), item("c")]);
        let ranks: Vec<_> = ranked.iter().map(|i| i.rank).collect();
        assert_eq!(ranks, vec![Some(1), Some(2), Some(3)]);
    }
}
