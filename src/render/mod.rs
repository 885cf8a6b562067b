//! Result rendering: a pure payload to view-model step, then page mutation

use std::fmt;

use chrono::NaiveDateTime;
use maud::html;
use tracing::info;

use crate::models::{RecommendationPayload, ShoppingItem};
use crate::page::Page;
use crate::shopping::{card_html, shopping_items, synthesize};
use crate::traits::Retailer;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything the results section shows, independent of any markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub skin_tone: String,
    pub gender: String,
    pub occasion: String,
    pub outfit: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub hairstyle: String,
    pub accessories: Vec<String>,
    pub rationale: String,
    pub shopping: Vec<ShoppingItem>,
    pub generated_at: Option<NaiveDateTime>,
}

impl ResultView {
    /// `occasion` is the value the request was submitted with
    pub fn build(payload: &RecommendationPayload, occasion: &str, retailers: &[Box<dyn Retailer>]) -> Self {
        let recs = &payload.recommendations;

        let outfit = recs
            .outfit_description
            .clone()
            .or_else(|| recs.outfit.clone())
            .unwrap_or_default();

        let generated_at = payload
            .timestamp
            .as_deref()
            .and_then(|ts| NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).ok());

        Self {
            skin_tone: payload.skin_tone.clone(),
            gender: payload.gender.clone(),
            occasion: occasion.to_string(),
            outfit,
            primary: recs.color_palette.primary.clone(),
            secondary: recs.color_palette.secondary.clone(),
            accent: recs.color_palette.accent.clone(),
            hairstyle: recs.hairstyle.clone(),
            accessories: recs.accessories.clone(),
            rationale: recs.why_it_works.clone(),
            shopping: synthesize(&shopping_items(recs), &payload.gender, retailers),
            generated_at,
        }
    }

    pub fn skin_tone_html(&self) -> String {
        html! {
            strong { "Detected Tone:" } " " (self.skin_tone) " " br; " "
            strong { "Styling for:" } " " (self.gender) " (" (self.occasion) ")"
        }
        .into_string()
    }

    pub fn colors_html(&self) -> String {
        html! {
            strong { "Primary:" } " " (self.primary) " " br; " "
            strong { "Secondary:" } " " (self.secondary) " " br; " "
            strong { "Accent:" } " " (self.accent)
        }
        .into_string()
    }

    pub fn accessories_html(&self) -> String {
        html! {
            strong { "Hair:" } " " (self.hairstyle) " " br; br; " "
            strong { "Accessories:" } br; " - "
            @for (i, accessory) in self.accessories.iter().enumerate() {
                @if i > 0 { br; " - " }
                (accessory)
            }
        }
        .into_string()
    }
}

/// Hides the upload section and fills the results section from `view`
pub fn render(page: &mut Page, view: &ResultView) {
    page.upload_visible = false;
    page.results_visible = true;

    page.results.skin_tone = view.skin_tone_html();
    page.results.outfit = html! { (view.outfit) }.into_string();
    page.results.colors = view.colors_html();
    page.results.accessories = view.accessories_html();
    page.results.reason = html! { (view.rationale) }.into_string();

    page.shopping_grid = view.shopping.iter().map(card_html).collect();

    info!(
        "Rendered recommendations for {} skin tone with {} shopping cards",
        view.skin_tone,
        view.shopping.len()
    );
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Detected tone: {}", self.skin_tone)?;
        writeln!(f, "Styling for:   {} ({})", self.gender, self.occasion)?;
        writeln!(f)?;
        writeln!(f, "Outfit")?;
        writeln!(f, "  {}", self.outfit)?;
        writeln!(f)?;
        writeln!(f, "Colour palette")?;
        writeln!(f, "  Primary:   {}", self.primary)?;
        writeln!(f, "  Secondary: {}", self.secondary)?;
        writeln!(f, "  Accent:    {}", self.accent)?;
        writeln!(f)?;
        writeln!(f, "Hair: {}", self.hairstyle)?;
        writeln!(f, "Accessories")?;
        for accessory in &self.accessories {
            writeln!(f, "  - {accessory}")?;
        }
        writeln!(f)?;
        writeln!(f, "Why it works")?;
        writeln!(f, "  {}", self.rationale)?;

        if !self.shopping.is_empty() {
            writeln!(f)?;
            writeln!(f, "Shop the look")?;
            for item in &self.shopping {
                writeln!(f, "  {}", item.title())?;
                for link in &item.links {
                    writeln!(f, "    {}: {}", link.label, link.url)?;
                }
            }
        }

        if let Some(generated_at) = self.generated_at {
            writeln!(f)?;
            writeln!(f, "Generated at {generated_at}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColorPalette, Recommendations};
    use crate::retailers::default_retailers;

    fn payload() -> RecommendationPayload {
        RecommendationPayload {
            skin_tone: "Olive".to_string(),
            gender: "Female".to_string(),
            recommendations: Recommendations {
                outfit_description: Some("A flowing emerald midi dress".to_string()),
                outfit: Some("Dress".to_string()),
                color_palette: ColorPalette {
                    primary: "Emerald".to_string(),
                    secondary: "Cream".to_string(),
                    accent: "Gold".to_string(),
                },
                hairstyle: "Loose waves".to_string(),
                accessories: vec!["Gold Hoop Earrings".to_string(), "Clutch".to_string()],
                why_it_works: "Green flatters olive undertones".to_string(),
                shopping_terms: vec!["leather jacket".to_string(), "ankle boots".to_string()],
            },
            timestamp: Some("2025-03-01 18:30:00".to_string()),
        }
    }

    #[test]
    fn long_outfit_description_wins() {
        let view = ResultView::build(&payload(), "Wedding", &default_retailers());
        assert_eq!(view.outfit, "A flowing emerald midi dress");
    }

    #[test]
    fn short_outfit_is_the_fallback() {
        let mut payload = payload();
        payload.recommendations.outfit_description = None;
        let view = ResultView::build(&payload, "Wedding", &default_retailers());
        assert_eq!(view.outfit, "Dress");
    }

    #[test]
    fn shopping_includes_first_accessory_last() {
        let view = ResultView::build(&payload(), "Wedding", &default_retailers());
        let names: Vec<_> = view.shopping.iter().map(|s| s.display_text.as_str()).collect();
        assert_eq!(names, ["leather jacket", "ankle boots", "Gold Hoop Earrings"]);
    }

    #[test]
    fn timestamp_is_parsed_when_well_formed() {
        let view = ResultView::build(&payload(), "Wedding", &default_retailers());
        assert_eq!(
            view.generated_at.map(|t| t.to_string()),
            Some("2025-03-01 18:30:00".to_string())
        );

        let mut odd = payload();
        odd.timestamp = Some("yesterday".to_string());
        assert!(ResultView::build(&odd, "Wedding", &default_retailers()).generated_at.is_none());
    }

    #[test]
    fn render_fills_every_region() {
        let mut page = Page::default();
        let view = ResultView::build(&payload(), "Wedding", &default_retailers());
        render(&mut page, &view);

        assert!(!page.upload_visible);
        assert!(page.results_visible);
        assert!(page.results.skin_tone.contains("Olive"));
        assert!(page.results.skin_tone.contains("Female (Wedding)"));
        assert!(page.results.colors.contains("Emerald"));
        assert!(page.results.accessories.contains("Loose waves"));
        assert!(page.results.accessories.contains("Gold Hoop Earrings<br> - Clutch"));
        assert_eq!(page.results.reason, "Green flatters olive undertones");
        assert_eq!(page.shopping_grid.len(), 3);
    }

    #[test]
    fn payload_markup_is_escaped_in_every_region() {
        let mut payload = payload();
        payload.skin_tone = "<b>Olive</b>".to_string();
        payload.recommendations.why_it_works = "<script>alert(1)</script>".to_string();
        payload.recommendations.hairstyle = "Waves & curls".to_string();
        payload.recommendations.accessories = vec!["<img src=x onerror=alert(1)>".to_string()];

        let mut page = Page::default();
        render(&mut page, &ResultView::build(&payload, "Black Tie", &default_retailers()));

        assert!(page.results.skin_tone.contains("&lt;b&gt;Olive&lt;/b&gt;"));
        assert_eq!(page.results.reason, "&lt;script&gt;alert(1)&lt;/script&gt;");
        assert!(page.results.accessories.contains("Waves &amp; curls"));
        assert!(!page.results.accessories.contains("<img"));
        assert!(!page.to_html().contains("<script>"));
    }

    #[test]
    fn terminal_output_lists_links() {
        let view = ResultView::build(&payload(), "Wedding", &default_retailers());
        let text = view.to_string();
        assert!(text.contains("Gold Hoop Earrings"));
        assert!(text.contains("Leather Jacket"));
        assert!(text.contains("Shop Amazon: https://www.amazon.in/s?k=leather%20jacket%20for%20female"));
    }
}
