//! Myntra search links

use std::sync::LazyLock;

use regex::Regex;

use crate::traits::{Retailer, RetailerConfig};

static NON_SLUG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

/// Lowercases and hyphenates a phrase: `"Leather Jacket for male"` becomes `"leather-jacket-for-male"`
pub fn slugify(phrase: &str) -> String {
    let lowered = phrase.trim().to_lowercase();
    NON_SLUG_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Fashion marketplace, the slug is both the path and the `rawQuery` value
#[derive(Debug, Clone)]
pub struct MyntraRetailer {
    config: RetailerConfig,
}

impl MyntraRetailer {
    pub fn new() -> Self {
        let config = RetailerConfig {
            name: "Myntra".to_string(),
            search_url_pattern: "https://www.myntra.com/{query}?rawQuery={query}".to_string(),
            link_label: "Shop Myntra".to_string(),
        };

        Self { config }
    }
}

impl Default for MyntraRetailer {
    fn default() -> Self {
        Self::new()
    }
}

impl Retailer for MyntraRetailer {
    fn config(&self) -> &RetailerConfig {
        &self.config
    }

    fn search_query(&self, phrase: &str) -> String {
        slugify(phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_path_and_raw_query() {
        let url = MyntraRetailer::new().build_search_url("Leather Jacket for male");
        assert_eq!(
            url,
            "https://www.myntra.com/leather-jacket-for-male?rawQuery=leather-jacket-for-male"
        );
    }

    #[test]
    fn runs_collapse_and_edges_trim() {
        assert_eq!(slugify("  --Navy/Blue  Blazer!! for male "), "navy-blue-blazer-for-male");
        assert_eq!(slugify("Café Shirt"), "caf-shirt");
        assert_eq!(slugify("!!!"), "");
    }
}
