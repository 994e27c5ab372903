//! Unique payload generation
//!
//! Original URLs are a fixed base followed by a fresh random token, so no
//! two invocations ever submit the same URL. The shortener answers 409 for a
//! URL it already knows, which would turn a throughput run into a
//! conflict-path run.

use types::api::{BatchItem, ShortenRequest};
use types::ids::{CorrelationId, UrlToken};

/// Base for single shorten requests.
pub const SHORTEN_URL_BASE: &str = "https://ya.ru/";

/// Base for batch entries; the token lands in the query string.
pub const BATCH_URL_BASE: &str = "https://ya.ru/?";

/// Number of entries in every batch request.
pub const BATCH_SIZE: usize = 1000;

/// Build a unique original URL from `base`.
pub fn unique_url(base: &str) -> String {
    format!("{}{}", base, UrlToken::new())
}

/// Body for one `POST /api/shorten`.
pub fn shorten_request() -> ShortenRequest {
    ShortenRequest {
        url: unique_url(SHORTEN_URL_BASE),
    }
}

/// Body for one `POST /api/shorten/batch`.
///
/// URL and correlation id are drawn independently for every entry.
pub fn batch_request(size: usize) -> Vec<BatchItem> {
    (0..size)
        .map(|_| BatchItem {
            original_url: unique_url(BATCH_URL_BASE),
            correlation_id: CorrelationId::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_shorten_request_prefix() {
        let req = shorten_request();
        assert!(req.url.starts_with(SHORTEN_URL_BASE));
        assert!(req.url.len() > SHORTEN_URL_BASE.len());
    }

    #[test]
    fn test_batch_has_exact_size_and_unique_entries() {
        let batch = batch_request(BATCH_SIZE);
        assert_eq!(batch.len(), 1000);

        let urls: HashSet<&str> = batch.iter().map(|i| i.original_url.as_str()).collect();
        let ids: HashSet<CorrelationId> = batch.iter().map(|i| i.correlation_id).collect();
        assert_eq!(urls.len(), BATCH_SIZE);
        assert_eq!(ids.len(), BATCH_SIZE);
        assert!(batch.iter().all(|i| i.original_url.starts_with(BATCH_URL_BASE)));
    }

    #[test]
    fn test_empty_batch() {
        assert!(batch_request(0).is_empty());
    }

    proptest! {
        #[test]
        fn prop_shorten_urls_unique(n in 1usize..3_000) {
            let urls: HashSet<String> = (0..n).map(|_| shorten_request().url).collect();
            prop_assert_eq!(urls.len(), n);
        }
    }
}
