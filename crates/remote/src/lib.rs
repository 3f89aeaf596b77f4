//! Remote collaborator wrappers
//!
//! Thin request/response clients over the three backend endpoints:
//! - `GET /translate-langs`: [`LanguageCatalog`]
//! - `POST /translate`: [`HttpTranslator`]
//! - `POST /query`: [`HttpQueryClient`]
//!
//! All three share one `reqwest::Client` handed in by the caller; each call
//! is an independent one-shot request. Catalog and translation failures
//! degrade locally and are never surfaced; only query failures propagate,
//! as [`assistant_core::QueryError`].

pub mod catalog;
pub mod query;
pub mod translate;

pub use catalog::LanguageCatalog;
pub use query::HttpQueryClient;
pub use translate::HttpTranslator;

/// Join a base URL and an endpoint path without doubling slashes
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_join() {
        assert_eq!(
            endpoint_url("http://127.0.0.1:5000", "query"),
            "http://127.0.0.1:5000/query"
        );
        assert_eq!(
            endpoint_url("http://127.0.0.1:5000/", "/query"),
            "http://127.0.0.1:5000/query"
        );
    }
}
