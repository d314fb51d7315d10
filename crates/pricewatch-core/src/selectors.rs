//! Semantic field name -> CSS selector mapping, loaded from YAML.
//!
//! Retail pages ship generated class-name suffixes that change between
//! deploys, so selectors live in a config file rather than in code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Selectors that drive the region picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSelectors {
    /// Element whose visibility means the picker is ready to open.
    pub control: String,
    /// Clickable container that opens the region list.
    pub trigger: String,
    /// The list overlay.
    pub list: String,
    /// One element per region entry, in document order.
    pub entries: String,
}

/// Selectors for the scraped product fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelectors {
    /// Discounted price in the "on sale" layout.
    pub price: String,
    /// Regular price in the "not on sale" layout, tried when `price` is absent.
    #[serde(default)]
    pub price_fallback: Option<String>,
    pub price_old: String,
    pub rating: String,
    pub review_count: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorMap {
    pub region: RegionSelectors,
    pub fields: FieldSelectors,
}

impl SelectorMap {
    /// Parse and validate a selector map from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the YAML is malformed or any selector is blank.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let map: SelectorMap = serde_yaml::from_str(content)?;
        map.validate()?;
        Ok(map)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("region.control", &self.region.control),
            ("region.trigger", &self.region.trigger),
            ("region.list", &self.region.list),
            ("region.entries", &self.region.entries),
            ("fields.price", &self.fields.price),
            ("fields.price_old", &self.fields.price_old),
            ("fields.rating", &self.fields.rating),
            ("fields.review_count", &self.fields.review_count),
        ];

        for (name, selector) in required {
            if selector.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "selector '{name}' must be non-empty"
                )));
            }
        }

        if let Some(fallback) = &self.fields.price_fallback {
            if fallback.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "selector 'fields.price_fallback' must be non-empty when set".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Load and validate the selector map from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_selectors(path: &Path) -> Result<SelectorMap, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SelectorsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    SelectorMap::from_yaml(&content)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const VALID: &str = r#"
region:
  control: ".Region > span:nth-child(2)"
  trigger: ".Region"
  list: ".RegionList"
  entries: ".RegionList li.item"
fields:
  price: ".buy > span:nth-child(2)"
  price_fallback: ".buy > span:nth-child(1)"
  price_old: ".buy > div > span"
  rating: ".reviews:nth-child(6) div"
  review_count: ".reviews:nth-child(7) div"
"#;

    #[test]
    fn parses_valid_map() {
        let map = SelectorMap::from_yaml(VALID).unwrap();
        assert_eq!(map.region.trigger, ".Region");
        assert_eq!(map.region.entries, ".RegionList li.item");
        assert_eq!(map.fields.price, ".buy > span:nth-child(2)");
        assert_eq!(
            map.fields.price_fallback.as_deref(),
            Some(".buy > span:nth-child(1)")
        );
        assert_eq!(map.fields.review_count, ".reviews:nth-child(7) div");
    }

    #[test]
    fn price_fallback_is_optional() {
        let yaml = VALID.replace("  price_fallback: \".buy > span:nth-child(1)\"\n", "");
        let map = SelectorMap::from_yaml(&yaml).unwrap();
        assert!(map.fields.price_fallback.is_none());
    }

    #[test]
    fn blank_selector_fails_validation() {
        let yaml = VALID.replace("rating: \".reviews:nth-child(6) div\"", "rating: \"  \"");
        let err = SelectorMap::from_yaml(&yaml).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("fields.rating")),
            "got: {err:?}"
        );
    }

    #[test]
    fn blank_fallback_fails_validation() {
        let yaml = VALID.replace(
            "price_fallback: \".buy > span:nth-child(1)\"",
            "price_fallback: \"\"",
        );
        let err = SelectorMap::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "got: {err:?}");
    }

    #[test]
    fn missing_section_fails_parse() {
        let err = SelectorMap::from_yaml("fields:\n  price: \".p\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::SelectorsFileParse(_)), "got: {err:?}");
    }

    #[test]
    fn load_selectors_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();
        let map = load_selectors(file.path()).unwrap();
        assert_eq!(map.region.list, ".RegionList");
    }

    #[test]
    fn load_selectors_missing_file() {
        let err = load_selectors(Path::new("/nonexistent/selectors.yaml")).unwrap_err();
        assert!(
            matches!(err, ConfigError::SelectorsFileIo { ref path, .. } if path == "/nonexistent/selectors.yaml"),
            "got: {err:?}"
        );
    }

    #[test]
    fn bundled_selectors_file_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/selectors.yaml");
        let map = load_selectors(&path).unwrap();
        assert!(map.fields.price_fallback.is_some());
    }
}
