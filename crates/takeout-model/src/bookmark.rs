/// A single bookmark taken from a Pocket export.
///
/// Only `title` ever changes after extraction, and only for placeholder
/// records (see [`Bookmark::apply_resolved_title`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    title: String,
    pub url: String,
    /// Raw comma-joined tag string, exactly as exported.
    pub tags: String,
    /// Date the bookmark was added, formatted `YYYY/MM/DD`.
    pub added_at: String,
    title_is_placeholder: bool,
}

impl Bookmark {
    /// Build a record. The placeholder flag is fixed here, from `title == url`.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        tags: impl Into<String>,
        added_at: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let url = url.into();
        let title_is_placeholder = title == url;
        Self {
            title,
            url,
            tags: tags.into(),
            added_at: added_at.into(),
            title_is_placeholder,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// True when no real title was captured at export time (title equals URL).
    pub fn title_is_placeholder(&self) -> bool {
        self.title_is_placeholder
    }

    /// Replace the placeholder title with one fetched from the page.
    ///
    /// Returns `false` and leaves the record untouched when the record is not
    /// a placeholder or `title` is empty.
    pub fn apply_resolved_title(&mut self, title: String) -> bool {
        if !self.title_is_placeholder || title.is_empty() {
            return false;
        }
        self.title = title;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_flag() {
        let b = Bookmark::new("http://x", "http://x", "t1,t2", "1970/01/01");
        assert!(b.title_is_placeholder());

        let b = Bookmark::new("Example", "http://x", "", "1970/01/01");
        assert!(!b.title_is_placeholder());
    }

    #[test]
    fn test_placeholder_compare_is_exact() {
        // Trailing slash and case both make it a real title
        assert!(!Bookmark::new("http://x/", "http://x", "", "").title_is_placeholder());
        assert!(!Bookmark::new("HTTP://X", "http://x", "", "").title_is_placeholder());
    }

    #[test]
    fn test_flag_follows_title_and_url() {
        let cases = [
            ("", "", true),
            ("http://a.test/", "http://a.test/", true),
            ("A Title", "http://a.test/", false),
            ("", "http://a.test/", false),
        ];
        for (title, url, placeholder) in cases {
            let b = Bookmark::new(title, url, "", "");
            assert_eq!(b.title_is_placeholder(), placeholder, "title={title:?} url={url:?}");
        }
    }

    #[test]
    fn test_apply_resolved_title() {
        let mut b = Bookmark::new("http://x", "http://x", "", "");
        assert!(b.apply_resolved_title("My Page".into()));
        assert_eq!(b.title(), "My Page");
        assert_eq!(b.url, "http://x");
        // The flag records extraction-time state and does not flip
        assert!(b.title_is_placeholder());
    }

    #[test]
    fn test_apply_resolved_title_rejects_empty() {
        let mut b = Bookmark::new("http://x", "http://x", "", "");
        assert!(!b.apply_resolved_title(String::new()));
        assert_eq!(b.title(), "http://x");
    }

    #[test]
    fn test_real_title_is_never_overwritten() {
        let mut b = Bookmark::new("Kept", "http://x", "", "");
        assert!(!b.apply_resolved_title("Fetched".into()));
        assert_eq!(b.title(), "Kept");
    }
}
