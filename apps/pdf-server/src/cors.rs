//! Cross-origin policy
//!
//! Only listed browser origins may call the API, and only with `POST`
//! (plus the `OPTIONS` preflight) and a `Content-Type` header.

use axum::http::{header, request::Parts, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::CorsConfig;

/// One allow-list entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginPattern {
    Exact(String),
    /// `scheme://*.domain`: any subdomain of `domain`
    Subdomain { prefix: String, suffix: String },
}

impl OriginPattern {
    pub fn parse(entry: &str) -> Self {
        let entry = entry.trim().trim_end_matches('/');

        match entry.split_once("://*.") {
            Some((scheme, domain)) => Self::Subdomain {
                prefix: format!("{}://", scheme),
                suffix: format!(".{}", domain),
            },
            None => Self::Exact(entry.to_string()),
        }
    }

    pub fn matches(&self, origin: &str) -> bool {
        match self {
            Self::Exact(allowed) => allowed == origin,
            Self::Subdomain { prefix, suffix } => origin
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_suffix(suffix.as_str()))
                .is_some_and(|label| {
                    !label.is_empty()
                        && !label.starts_with('.')
                        && label
                            .chars()
                            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
                }),
        }
    }
}

/// Build the CORS layer for `config`
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let patterns: Vec<OriginPattern> = config
        .allowed_origins
        .iter()
        .map(|entry| OriginPattern::parse(entry))
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|origin| patterns.iter().any(|pattern| pattern.matches(origin)))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_origin() {
        let pattern = OriginPattern::parse("http://localhost:3000");

        assert!(pattern.matches("http://localhost:3000"));
        assert!(!pattern.matches("http://localhost:3001"));
        assert!(!pattern.matches("https://localhost:3000"));
    }

    #[test]
    fn test_subdomain_wildcard() {
        let pattern = OriginPattern::parse("https://*.vercel.app");

        assert!(pattern.matches("https://app.vercel.app"));
        assert!(pattern.matches("https://my-app-git-main.team.vercel.app"));
        assert!(!pattern.matches("https://vercel.app"));
        assert!(!pattern.matches("http://app.vercel.app"));
        assert!(!pattern.matches("https://vercel.app.evil.com"));
        assert!(!pattern.matches("https://evil.com/x.vercel.app"));
    }

    #[test]
    fn test_trailing_slash_is_ignored_in_entries() {
        assert_eq!(
            OriginPattern::parse("http://127.0.0.1:3000/"),
            OriginPattern::Exact("http://127.0.0.1:3000".to_string())
        );
    }
}
