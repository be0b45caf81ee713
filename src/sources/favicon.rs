use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::FaviconAsset;
use crate::errors::{DashboardError, DashboardResult};
use crate::fetch::FetchResponse;

/// Smallest body accepted as a real icon; anything shorter is usually a 1x1
/// tracking pixel or an error page served with an image content type.
pub const MIN_ICON_BYTES: usize = 100;

const MAX_HOSTNAME_LEN: usize = 253;

static DOMAIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("domain pattern is valid")
});

/// Reject anything that is not a plain public hostname before it reaches a URL
pub fn validate_domain(domain: &str) -> DashboardResult<&str> {
    if domain.len() > MAX_HOSTNAME_LEN || !DOMAIN_PATTERN.is_match(domain) {
        return Err(DashboardError::InvalidInput(format!(
            "invalid domain: {}",
            domain
        )));
    }
    Ok(domain)
}

/// Icon locations to probe, best quality first
pub fn candidate_urls(domain: &str) -> Vec<String> {
    vec![
        format!("https://{}/apple-touch-icon.png", domain),
        format!("https://{}/apple-touch-icon-precomposed.png", domain),
        format!("https://{}/favicon-32x32.png", domain),
        format!("https://{}/favicon.png", domain),
        format!("https://icons.duckduckgo.com/ip3/{}.ico", domain),
        format!("https://{}/favicon.ico", domain),
    ]
}

/// Turn a probe response into an icon if it looks like a real image
pub fn accept(response: FetchResponse) -> Option<FaviconAsset> {
    if !response.is_success() || response.body.len() < MIN_ICON_BYTES {
        return None;
    }

    let content_type = response
        .content_type
        .filter(|ct| ct.trim_start().to_ascii_lowercase().starts_with("image/"))?;

    Some(FaviconAsset::new(response.body, content_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_domains() {
        for domain in ["example.com", "sub.example.co.uk", "my-site.io", "a1.dev"] {
            assert!(validate_domain(domain).is_ok(), "{} should be valid", domain);
        }
    }

    #[test]
    fn test_invalid_domains() {
        let invalid = [
            "",
            "localhost",
            "127.0.0.1",
            "example",
            "example.c",
            "example.com/path",
            "example.com:8080",
            "user@example.com",
            "exa mple.com",
            "../etc/passwd",
            "example.com?x=1",
            "example.123",
        ];

        for domain in invalid {
            assert!(
                matches!(validate_domain(domain), Err(DashboardError::InvalidInput(_))),
                "{} should be rejected",
                domain
            );
        }
    }

    #[test]
    fn test_overlong_domain_rejected() {
        let domain = format!("{}.com", "a".repeat(260));
        assert!(validate_domain(&domain).is_err());
    }

    #[test]
    fn test_candidate_order() {
        let urls = candidate_urls("example.com");

        assert_eq!(urls.len(), 6);
        assert_eq!(urls[0], "https://example.com/apple-touch-icon.png");
        assert_eq!(urls[3], "https://example.com/favicon.png");
        assert_eq!(urls[4], "https://icons.duckduckgo.com/ip3/example.com.ico");
        assert_eq!(urls[5], "https://example.com/favicon.ico");
        assert!(urls.iter().all(|u| u.starts_with("https://")));
    }

    #[test]
    fn test_accept_minimum_size() {
        let small = FetchResponse::new(200, Some("image/png"), vec![0u8; 50]);
        assert!(accept(small).is_none());

        let exact = FetchResponse::new(200, Some("image/png"), vec![0u8; MIN_ICON_BYTES]);
        let icon = accept(exact).unwrap();
        assert_eq!(icon.bytes.len(), 100);
        assert_eq!(icon.content_type, "image/png");
    }

    #[test]
    fn test_accept_requires_image_content_type() {
        let html = FetchResponse::new(200, Some("text/html; charset=utf-8"), vec![b'<'; 500]);
        assert!(accept(html).is_none());

        let missing = FetchResponse::new(200, None, vec![0u8; 500]);
        assert!(accept(missing).is_none());

        let icon = FetchResponse::new(200, Some("image/x-icon"), vec![0u8; 500]);
        assert_eq!(accept(icon).unwrap().content_type, "image/x-icon");
    }

    #[test]
    fn test_accept_requires_success() {
        let not_found = FetchResponse::new(404, Some("image/png"), vec![0u8; 500]);
        assert!(accept(not_found).is_none());
    }
}
