use once_cell::sync::Lazy;
use regex::Regex;

/// Shown when the host could not supply a tab URL at all.
pub const NO_TAB_URL_LABEL: &str = "Cannot access tab URL.";
/// Shown when a tab URL exists but no hostname could be picked out of it.
pub const NO_HOST_LABEL: &str = "Cannot get URL";

// Scheme, userinfo and a leading `www.` are optional; the host runs up to the
// first `:`, `/`, `?` or newline.
static HOST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^(?:https?://)?(?:[^@\n]+@)?(?:www\.)?([^:/\n?]+)")
        .expect("host pattern compiles")
});

/// Short label for the active tab: its hostname, or a placeholder.
pub fn display_host(tab_url: Option<&str>) -> String {
    let Some(url) = tab_url.filter(|url| !url.is_empty()) else {
        return NO_TAB_URL_LABEL.to_string();
    };
    HOST_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|host| host.as_str().to_string())
        .unwrap_or_else(|| NO_HOST_LABEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scheme_www_port_and_path() {
        assert_eq!(
            display_host(Some("https://www.example.com:8443/login?next=/")),
            "example.com"
        );
        assert_eq!(display_host(Some("http://sub.example.org/a/b")), "sub.example.org");
    }

    #[test]
    fn strips_userinfo() {
        assert_eq!(
            display_host(Some("https://user:pw@bank.example.com/")),
            "bank.example.com"
        );
    }

    #[test]
    fn scheme_is_optional_and_case_insensitive() {
        assert_eq!(display_host(Some("example.net/path")), "example.net");
        assert_eq!(display_host(Some("HTTPS://WWW.Example.com")), "Example.com");
    }

    #[test]
    fn missing_url_uses_placeholder() {
        assert_eq!(display_host(None), NO_TAB_URL_LABEL);
        assert_eq!(display_host(Some("")), NO_TAB_URL_LABEL);
    }

    #[test]
    fn unmatched_url_uses_fallback() {
        assert_eq!(display_host(Some("://nowhere")), NO_HOST_LABEL);
    }
}
