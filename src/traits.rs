//! Traits and interfaces for retailer-agnostic search links

/// Configuration for a retailer's search page
#[derive(Debug, Clone)]
pub struct RetailerConfig {
    /// Display name for the retailer
    pub name: String,
    /// Search URL pattern, every `{query}` placeholder is replaced
    pub search_url_pattern: String,
    /// Caption on the card's link button
    pub link_label: String,
}

/// Trait for retailer-specific search URL builders
pub trait Retailer: Send + Sync {
    /// Get the configuration for this retailer
    fn config(&self) -> &RetailerConfig;

    /// Turn a search phrase into this retailer's query text
    ///
    /// # Arguments
    /// * `phrase` - Base phrase such as `"Leather Jacket for male"`
    ///
    /// # Returns
    /// * `String` - Text substituted into the URL pattern
    fn search_query(&self, phrase: &str) -> String {
        urlencoding::encode(phrase).into_owned()
    }

    /// Process a search phrase to create the search URL
    ///
    /// # Arguments
    /// * `phrase` - The phrase to search for
    ///
    /// # Returns
    /// * `String` - The complete search URL
    fn build_search_url(&self, phrase: &str) -> String {
        let query = self.search_query(phrase);
        self.config().search_url_pattern.replace("{query}", &query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PatternOnly(RetailerConfig);

    impl Retailer for PatternOnly {
        fn config(&self) -> &RetailerConfig {
            &self.0
        }
    }

    #[test]
    fn search_url_comes_from_the_pattern_alone() {
        let retailer = PatternOnly(RetailerConfig {
            name: "Boutique".to_string(),
            search_url_pattern: "https://shop.example/find/{query}?again={query}".to_string(),
            link_label: "Shop Boutique".to_string(),
        });

        assert_eq!(
            retailer.build_search_url("red scarf for female"),
            "https://shop.example/find/red%20scarf%20for%20female?again=red%20scarf%20for%20female"
        );
    }
}
