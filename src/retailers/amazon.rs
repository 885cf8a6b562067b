//! Amazon.in search links

use crate::traits::{Retailer, RetailerConfig};

/// Broad marketplace, phrase goes percent-encoded into the `k` parameter
#[derive(Debug, Clone)]
pub struct AmazonRetailer {
    config: RetailerConfig,
}

impl AmazonRetailer {
    pub fn new() -> Self {
        let config = RetailerConfig {
            name: "Amazon".to_string(),
            search_url_pattern: "https://www.amazon.in/s?k={query}".to_string(),
            link_label: "Shop Amazon".to_string(),
        };

        Self { config }
    }
}

impl Default for AmazonRetailer {
    fn default() -> Self {
        Self::new()
    }
}

impl Retailer for AmazonRetailer {
    fn config(&self) -> &RetailerConfig {
        &self.config
    }
}
