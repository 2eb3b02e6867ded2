//! Domain label helpers.

/// True if `label` can be stored as a site domain: one DNS label, no scheme,
/// no path, no dots.
pub fn validate_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        && !label.starts_with('-')
        && !label.ends_with('-')
}

/// Label after the last `.` of the URL's host, if it is a valid label.
///
/// `https://www.example.co/path` → `co`.
pub fn extract_label(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let label = host.rsplit('.').next()?.to_ascii_lowercase();
    validate_label(&label).then_some(label)
}

/// Search query for a base URL: its last `/` segment.
///
/// `https://uhdmovies` → `uhdmovies`.
pub fn search_query(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_from_url() {
        assert_eq!(extract_label("https://example.co").as_deref(), Some("co"));
        assert_eq!(
            extract_label("https://www.site.example.TO/a/b?c=d").as_deref(),
            Some("to")
        );
        assert_eq!(
            extract_label("http://localhost:8080/").as_deref(),
            Some("localhost")
        );
    }

    #[test]
    fn label_rejects_unusable_hosts() {
        assert_eq!(extract_label("not a url"), None);
        assert_eq!(extract_label("https://example.com./"), None);
        assert_eq!(extract_label("file:///tmp/x"), None);
    }

    #[test]
    fn label_validation() {
        assert!(validate_label("to"));
        assert!(validate_label("xn--p1ai"));
        assert!(!validate_label(""));
        assert!(!validate_label("example.com"));
        assert!(!validate_label("https://to"));
        assert!(!validate_label("to/path"));
        assert!(!validate_label("-to"));
    }

    #[test]
    fn query_is_last_segment() {
        assert_eq!(search_query("https://uhdmovies"), "uhdmovies");
        assert_eq!(search_query("https://uhdmovies/"), "uhdmovies");
        assert_eq!(search_query("streamsite"), "streamsite");
    }
}
