//! Waiting for elements and reading numeric tokens out of them.

use std::time::Duration;

use pricewatch_core::ExtractedField;

use crate::browser::PageDriver;
use crate::error::ScraperError;
use crate::parse::first_numeric_token;

/// Polls `page` until an element matching `selector` is visible.
///
/// Returns `Ok(None)` once `timeout` elapses without a match. Driver errors
/// abort the wait immediately.
pub async fn wait_for_visible<P: PageDriver>(
    page: &P,
    selector: &str,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<Option<P::Element>, ScraperError> {
    let poll = async {
        loop {
            if let Some(element) = page.find_visible(selector).await? {
                return Ok::<_, ScraperError>(element);
            }
            tokio::time::sleep(poll_interval).await;
        }
    };

    match tokio::time::timeout(timeout, poll).await {
        Ok(Ok(element)) => Ok(Some(element)),
        Ok(Err(e)) => Err(e),
        Err(_) => {
            tracing::debug!(selector, ?timeout, "element did not become visible");
            Ok(None)
        }
    }
}

/// Reads one numeric field from the page.
#[derive(Debug, Clone, Copy)]
pub struct TextExtractor {
    timeout: Duration,
    poll_interval: Duration,
}

impl TextExtractor {
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Waits for `selector`, trims its text and returns the first numeric token.
    ///
    /// An element that never becomes visible yields an absent field.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::MalformedContent`] if the element is found but its
    ///   text contains no number.
    /// - Any driver error raised while probing or reading the element.
    pub async fn extract<P: PageDriver>(
        &self,
        page: &P,
        selector: &str,
    ) -> Result<ExtractedField, ScraperError> {
        let Some(element) = wait_for_visible(page, selector, self.timeout, self.poll_interval).await?
        else {
            return Ok(ExtractedField::absent());
        };

        let text = page.text_content(&element).await?;
        let text = text.trim();

        match first_numeric_token(text) {
            Some(token) => Ok(ExtractedField::value(token)),
            None => Err(ScraperError::MalformedContent {
                selector: selector.to_string(),
                text: text.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakePage;

    fn extractor() -> TextExtractor {
        TextExtractor::new(Duration::from_millis(50), Duration::from_millis(5))
    }

    #[tokio::test]
    async fn missing_element_is_absent() {
        let page = FakePage::new();
        let field = extractor().extract(&page, ".price").await.unwrap();
        assert!(field.is_absent());
    }

    #[tokio::test]
    async fn missing_element_is_probed_more_than_once() {
        let page = FakePage::new();
        extractor().extract(&page, ".price").await.unwrap();
        assert!(page.probe_count(".price") > 1);
    }

    #[tokio::test]
    async fn hidden_element_is_absent() {
        let page = FakePage::new();
        page.add_hidden(".price", "$12.50");
        let field = extractor().extract(&page, ".price").await.unwrap();
        assert!(field.is_absent());
    }

    #[tokio::test]
    async fn returns_first_numeric_token() {
        let page = FakePage::new();
        page.add(".price", "  Now $19.99 (was $29)\n");
        let field = extractor().extract(&page, ".price").await.unwrap();
        assert_eq!(field.as_deref(), Some("19.99"));
    }

    #[tokio::test]
    async fn text_without_digits_is_malformed() {
        let page = FakePage::new();
        page.add(".rating", "  No reviews yet ");
        let err = extractor().extract(&page, ".rating").await.unwrap_err();
        assert!(
            matches!(
                err,
                ScraperError::MalformedContent { ref selector, ref text }
                    if selector == ".rating" && text == "No reviews yet"
            ),
            "got: {err:?}"
        );
    }

    #[tokio::test]
    async fn extraction_is_idempotent() {
        let page = FakePage::new();
        page.add(".reviews", "128 reviews");
        let first = extractor().extract(&page, ".reviews").await.unwrap();
        let second = extractor().extract(&page, ".reviews").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.as_deref(), Some("128"));
    }

    #[tokio::test]
    async fn failed_query_is_an_error_not_an_absent_field() {
        let page = FakePage::new().with_broken_selector("div[");
        let err = extractor().extract(&page, "div[").await.unwrap_err();
        assert!(matches!(err, ScraperError::Driver { .. }), "got: {err:?}");
        assert_eq!(page.probe_count("div["), 1);
    }

    #[tokio::test]
    async fn wait_for_visible_returns_first_match() {
        let page = FakePage::new();
        let first = page.add(".item", "one");
        page.add(".item", "two");
        let element = wait_for_visible(
            &page,
            ".item",
            Duration::from_millis(50),
            Duration::from_millis(5),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(element.id, first);
    }
}
