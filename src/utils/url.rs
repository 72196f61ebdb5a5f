// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

use crate::error::Result;

/// Derive a catalog slug from a link target.
///
/// Strips the first matching trailing page extension. Leading slashes are
/// dropped so that absolute and relative links map to the same slug.
///
/// # Examples
/// ```
/// use catalog::utils::url::slug_from_href;
///
/// let exts = vec![".php".to_string()];
/// assert_eq!(slug_from_href("apple_iphone_15-12559.php", &exts), "apple_iphone_15-12559");
/// ```
pub fn slug_from_href(href: &str, extensions: &[String]) -> String {
    let href = href.trim().trim_start_matches('/');
    let stripped = extensions
        .iter()
        .find_map(|ext| href.strip_suffix(ext.as_str()))
        .unwrap_or(href);
    stripped.to_string()
}

/// Join a page path onto the catalog base URL.
pub fn page_url(base: &Url, path: &str) -> Result<Url> {
    Ok(base.join(path)?)
}

/// Build the quick-search URL for a free-text query.
pub fn search_url(base: &Url, path: &str, query: &str) -> Result<Url> {
    let mut url = page_url(base, path)?;
    url.query_pairs_mut()
        .append_pair("sQuickSearch", "yes")
        .append_pair("sName", query);
    Ok(url)
}

/// Check that a slug is safe to splice into a page path.
///
/// Slugs carry no extension, so `.` is rejected along with path separators.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        vec![".php3".to_string(), ".php".to_string()]
    }

    #[test]
    fn test_slug_strips_extension() {
        assert_eq!(slug_from_href("samsung-phones-9.php", &exts()), "samsung-phones-9");
        assert_eq!(slug_from_href("new.php3", &exts()), "new");
    }

    #[test]
    fn test_slug_only_strips_trailing_extension() {
        assert_eq!(slug_from_href("a.phpx-1.php", &exts()), "a.phpx-1");
        assert_eq!(slug_from_href("no-extension", &exts()), "no-extension");
    }

    #[test]
    fn test_slug_drops_leading_slash() {
        assert_eq!(slug_from_href("/nokia_3310-1.php", &exts()), "nokia_3310-1");
    }

    #[test]
    fn test_search_url_encodes_query() {
        let base = Url::parse("https://www.gsmarena.com").unwrap();
        let url = search_url(&base, "results.php3", "galaxy s24 & co").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.gsmarena.com/results.php3?sQuickSearch=yes&sName=galaxy+s24+%26+co"
        );
    }

    #[test]
    fn test_page_url() {
        let base = Url::parse("https://www.gsmarena.com/").unwrap();
        let url = page_url(&base, "apple-phones-48.php").unwrap();
        assert_eq!(url.as_str(), "https://www.gsmarena.com/apple-phones-48.php");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("apple-phones-48"));
        assert!(is_valid_slug("apple_iphone_15-12559"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("../etc/passwd"));
        assert!(!is_valid_slug("a b"));
        assert!(!is_valid_slug("apple.php"));
        assert!(!is_valid_slug("a.b"));
    }
}
