//! Shopping link synthesis
//!
//! Recommended items arrive as free text written by a language model, so they
//! may carry stray markup. Each item is cleaned, turned into a search phrase
//! (`"<item> for <gender>"`) and given one search link per retailer. Cards keep
//! the input order and nothing is deduplicated.

use maud::html;
use scraper::Html;
use tracing::{debug, info};

use crate::models::{Recommendations, ShoppingItem, ShoppingLink};
use crate::traits::Retailer;

/// Cleaned items shorter than this, in UTF-16 code units, are noise and get no card
const MIN_ITEM_UNITS: usize = 3;

/// Strips markup tags and surrounding whitespace from an item
pub fn clean_item(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let text: String = fragment.root_element().text().collect();
    text.trim().to_string()
}

/// Shopping terms followed by the first accessory, if any
pub fn shopping_items(recommendations: &Recommendations) -> Vec<String> {
    let mut items = recommendations.shopping_terms.clone();
    if let Some(first) = recommendations.accessories.first() {
        items.push(first.clone());
    }
    items
}

/// Builds one shopping card per usable item
pub fn synthesize(items: &[String], gender: &str, retailers: &[Box<dyn Retailer>]) -> Vec<ShoppingItem> {
    let gender = gender.to_lowercase();

    let cards: Vec<ShoppingItem> = items
        .iter()
        .filter_map(|raw| {
            let display_text = clean_item(raw);
            if display_text.encode_utf16().count() < MIN_ITEM_UNITS {
                debug!("Skipping shopping item {:?}", raw);
                return None;
            }

            let search_phrase = format!("{display_text} for {gender}");
            let links = retailers
                .iter()
                .map(|retailer| ShoppingLink {
                    retailer: retailer.config().name.clone(),
                    label: retailer.config().link_label.clone(),
                    url: retailer.build_search_url(&search_phrase),
                })
                .collect();

            Some(ShoppingItem {
                display_text,
                search_phrase,
                links,
            })
        })
        .collect();

    info!("Built {} shopping cards from {} items", cards.len(), items.len());
    cards
}

/// Markup for one card in the shopping grid
pub fn card_html(item: &ShoppingItem) -> String {
    html! {
        div.shop-card {
            h4 style="text-transform: capitalize;" { (item.display_text) }
            @for link in &item.links {
                a.shop-link data-retailer=(link.retailer) href=(link.url) target="_blank" rel="noopener" {
                    (link.label)
                }
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColorPalette;
    use crate::retailers::default_retailers;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn recommendations(terms: &[&str], accessories: &[&str]) -> Recommendations {
        Recommendations {
            outfit_description: None,
            outfit: Some("jeans".to_string()),
            color_palette: ColorPalette {
                primary: "navy".to_string(),
                secondary: "white".to_string(),
                accent: "gold".to_string(),
            },
            hairstyle: "crop".to_string(),
            accessories: strings(accessories),
            why_it_works: "contrast".to_string(),
            shopping_terms: strings(terms),
        }
    }

    #[test]
    fn cleaning_strips_tags_and_whitespace() {
        assert_eq!(clean_item("<b>Red Scarf</b>  "), "Red Scarf");
        assert_eq!(clean_item("<i></i>"), "");
        assert_eq!(clean_item("  tan loafers "), "tan loafers");
        assert_eq!(clean_item("Tom &amp; Jerry tee"), "Tom & Jerry tee");
    }

    #[test]
    fn merge_appends_first_accessory_only() {
        let recs = recommendations(&["leather jacket", "ankle boots"], &["Gold Hoop Earrings", "Tote"]);
        assert_eq!(
            shopping_items(&recs),
            strings(&["leather jacket", "ankle boots", "Gold Hoop Earrings"])
        );
    }

    #[test]
    fn merge_keeps_duplicates() {
        let recs = recommendations(&["watch"], &["watch"]);
        assert_eq!(shopping_items(&recs), strings(&["watch", "watch"]));
    }

    #[test]
    fn cards_follow_input_order() {
        let recs = recommendations(&["leather jacket", "ankle boots"], &["Gold Hoop Earrings"]);
        let cards = synthesize(&shopping_items(&recs), "Female", &default_retailers());

        let names: Vec<_> = cards.iter().map(|c| c.display_text.as_str()).collect();
        assert_eq!(names, ["leather jacket", "ankle boots", "Gold Hoop Earrings"]);
        assert_eq!(cards[2].search_phrase, "Gold Hoop Earrings for female");
    }

    #[test]
    fn noise_items_produce_no_cards() {
        let cards = synthesize(&strings(&["<i></i>", "ab", " x ", ""]), "male", &default_retailers());
        assert!(cards.is_empty());
        assert!(synthesize(&[], "male", &default_retailers()).is_empty());
    }

    #[test]
    fn length_cutoff_counts_utf16_units() {
        // U+1F45C is a surrogate pair, so this item is three units long
        let cards = synthesize(&strings(&["\u{1F45C}x", "éx"]), "female", &default_retailers());
        let names: Vec<_> = cards.iter().map(|c| c.display_text.as_str()).collect();
        assert_eq!(names, ["\u{1F45C}x"]);
    }

    #[test]
    fn each_card_links_to_both_retailers() {
        let cards = synthesize(&strings(&["Leather Jacket"]), "Male", &default_retailers());
        let card = &cards[0];

        assert_eq!(card.search_phrase, "Leather Jacket for male");
        assert_eq!(
            card.link("Myntra").map(|l| l.url.as_str()),
            Some("https://www.myntra.com/leather-jacket-for-male?rawQuery=leather-jacket-for-male")
        );
        assert_eq!(
            card.link("Amazon").map(|l| l.url.as_str()),
            Some("https://www.amazon.in/s?k=Leather%20Jacket%20for%20male")
        );
    }

    #[test]
    fn card_html_escapes_text_and_opens_new_tab() {
        let cards = synthesize(&strings(&["Tom &amp; Jerry tee"]), "male", &default_retailers());
        let html = card_html(&cards[0]);

        assert!(html.contains("Tom &amp; Jerry tee"));
        assert_eq!(html.matches(r#"target="_blank""#).count(), 2);
        assert!(html.contains("Shop Myntra"));
    }

    #[test]
    fn card_markup_in_items_stays_inert() {
        let item = ShoppingItem {
            display_text: r#"<a href="javascript:x">bag</a>"#.to_string(),
            search_phrase: "bag for female".to_string(),
            links: vec![ShoppingLink {
                retailer: "Shop\"A".to_string(),
                label: "<b>Go</b>".to_string(),
                url: "https://shop.example/s?k=a&b=c".to_string(),
            }],
        };
        let document = Html::parse_fragment(&card_html(&item));

        let heading = scraper::Selector::parse("h4").unwrap();
        assert_eq!(
            document.select(&heading).next().unwrap().text().collect::<String>(),
            r#"<a href="javascript:x">bag</a>"#
        );
        let anchors = scraper::Selector::parse("a").unwrap();
        let links: Vec<_> = document.select(&anchors).collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].value().attr("href"), Some("https://shop.example/s?k=a&b=c"));
        assert_eq!(links[0].value().attr("data-retailer"), Some("Shop\"A"));
        assert_eq!(links[0].text().collect::<String>(), "<b>Go</b>");
    }
}
