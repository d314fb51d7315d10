use serde::{Deserialize, Serialize};

use crate::CoreError;

/// What to scrape: a product page and the delivery region to select on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    target_url: String,
    region_name: String,
}

impl ScrapeRequest {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRequest`] if either value is blank.
    pub fn new(
        target_url: impl Into<String>,
        region_name: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let target_url = target_url.into();
        let region_name = region_name.into();

        if target_url.trim().is_empty() {
            return Err(CoreError::InvalidRequest(
                "target URL must be non-empty".to_string(),
            ));
        }
        if region_name.trim().is_empty() {
            return Err(CoreError::InvalidRequest(
                "region name must be non-empty".to_string(),
            ));
        }

        Ok(Self {
            target_url,
            region_name,
        })
    }

    #[must_use]
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// Region name as given; matching against entries is exact.
    #[must_use]
    pub fn region_name(&self) -> &str {
        &self.region_name
    }
}

/// One scraped data point: the first numeric token of an element's text, or
/// absent when the element never appeared.
///
/// The token is kept as text (`"19.99"`, `"128"`), never converted to a number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedField(Option<String>);

impl ExtractedField {
    #[must_use]
    pub fn absent() -> Self {
        Self(None)
    }

    #[must_use]
    pub fn value(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl std::fmt::Display for ExtractedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(token) => f.write_str(token),
            None => f.write_str("absent"),
        }
    }
}

/// The four-field record produced by one scrape run.
///
/// Any field may be absent; the record is still a successful result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    price: ExtractedField,
    price_old: ExtractedField,
    rating: ExtractedField,
    review_count: ExtractedField,
}

impl ProductSnapshot {
    #[must_use]
    pub fn new(
        price: ExtractedField,
        price_old: ExtractedField,
        rating: ExtractedField,
        review_count: ExtractedField,
    ) -> Self {
        Self {
            price,
            price_old,
            rating,
            review_count,
        }
    }

    #[must_use]
    pub fn price(&self) -> &ExtractedField {
        &self.price
    }

    #[must_use]
    pub fn price_old(&self) -> &ExtractedField {
        &self.price_old
    }

    #[must_use]
    pub fn rating(&self) -> &ExtractedField {
        &self.rating
    }

    #[must_use]
    pub fn review_count(&self) -> &ExtractedField {
        &self.review_count
    }
}
