//! # Page Document Model
//!
//! In-memory stand-in for the browser page the workflow drives. Every region
//! the original markup exposes by a fixed element id has a field here, so the
//! controller and renderer can be exercised without a live document, and the
//! whole page can be serialised to HTML for viewing in a browser.
//!
//! ## Regions
//!
//! - **Upload section**: drop zone with its status label, hidden file input,
//!   gender radio group, occasion select, submit button and busy indicator
//! - **Results section**: five result regions plus the shopping grid
//! - **Notices**: blocking user notices, oldest first

use maud::{DOCTYPE, PreEscaped, html};

use crate::input::DropZone;
use crate::models::Gender;

/// Fixed element identifiers of the page
pub mod ids {
    pub const UPLOAD_SECTION: &str = "uploadSection";
    pub const DROP_ZONE: &str = "uploadArea";
    pub const STATUS_LABEL: &str = "uploadStatus";
    pub const FILE_INPUT: &str = "fileInput";
    pub const BROWSE_BUTTON: &str = "browseBtn";
    pub const SUBMIT_BUTTON: &str = "submitBtn";
    pub const BUSY_INDICATOR: &str = "loadingSpinner";
    pub const OCCASION_SELECT: &str = "occasionSelect";
    pub const RESULTS: &str = "results";
    pub const SKIN_TONE: &str = "skinToneResult";
    pub const OUTFIT: &str = "outfitResult";
    pub const COLORS: &str = "colorResult";
    pub const ACCESSORIES: &str = "accResult";
    pub const REASON: &str = "reasonResult";
    pub const SHOPPING_GRID: &str = "shoppingGrid";
    pub const RESET_BUTTON: &str = "resetBtn";
}

/// Status label text before any photo is chosen
pub const INITIAL_PROMPT: &str = "Drag & Drop Your Photo";

/// Choices offered by the occasion select
pub const OCCASIONS: [&str; 7] = [
    "Casual",
    "Formal",
    "Business",
    "Wedding",
    "Party",
    "Date Night",
    "Festive",
];

/// A button's enabled flag and its visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub enabled: bool,
    pub visible: bool,
}

/// Inner HTML of the result regions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRegions {
    pub skin_tone: String,
    pub outfit: String,
    pub colors: String,
    pub accessories: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub status_label: String,
    /// Name shown by the native file input
    pub file_input_value: Option<String>,
    pub drop_zone: DropZone,
    pub gender: Option<Gender>,
    pub occasion: Option<String>,
    pub submit: Control,
    pub busy_visible: bool,
    pub upload_visible: bool,
    pub results_visible: bool,
    pub results: ResultRegions,
    /// Card markup, in display order
    pub shopping_grid: Vec<String>,
    pub notices: Vec<String>,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            status_label: INITIAL_PROMPT.to_string(),
            file_input_value: None,
            drop_zone: DropZone::default(),
            gender: None,
            occasion: None,
            submit: Control {
                enabled: false,
                visible: true,
            },
            busy_visible: false,
            upload_visible: true,
            results_visible: false,
            results: ResultRegions::default(),
            shopping_grid: Vec::new(),
            notices: Vec::new(),
        }
    }
}

impl Page {
    /// Page with the gender radio and occasion select preset
    pub fn with_preferences(gender: Gender, occasion: impl Into<String>) -> Self {
        Self {
            gender: Some(gender),
            occasion: Some(occasion.into()),
            ..Self::default()
        }
    }

    /// Returns every region to the upload view. Form preferences and notices survive.
    pub fn reset_ui(&mut self) {
        self.file_input_value = None;
        self.status_label = INITIAL_PROMPT.to_string();
        self.submit = Control {
            enabled: false,
            visible: true,
        };
        self.busy_visible = false;
        self.results_visible = false;
        self.upload_visible = true;
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
    }

    /// Drains queued notices
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Serialises the page to a standalone HTML document
    pub fn to_html(&self) -> String {
        let hidden = |visible: bool| (!visible).then_some("display: none;");

        let mut occasions: Vec<&str> = OCCASIONS.to_vec();
        if let Some(current) = self.occasion.as_deref()
            && !occasions.contains(&current)
        {
            occasions.push(current);
        }

        let markup = html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="utf-8";
                    title { "Outfit Finder" }
                }
                body {
                    section.upload-section id=(ids::UPLOAD_SECTION) style=[hidden(self.upload_visible)] {
                        div.upload-area.dragover[self.drop_zone.is_highlighted()] id=(ids::DROP_ZONE) {
                            h3 id=(ids::STATUS_LABEL) { (self.status_label) }
                            input type="file" id=(ids::FILE_INPUT)
                                accept="image/jpeg,image/png,image/jpg,image/webp"
                                data-value=(self.file_input_value.as_deref().unwrap_or_default());
                            button type="button" id=(ids::BROWSE_BUTTON) { "Browse" }
                        }
                        div.gender-group {
                            @for gender in [Gender::Male, Gender::Female, Gender::Other] {
                                label {
                                    input type="radio" name="gender" value=(gender.as_str())
                                        checked[self.gender == Some(gender)];
                                    " " (gender.as_str())
                                }
                            }
                        }
                        select id=(ids::OCCASION_SELECT) {
                            @for occasion in &occasions {
                                option value=(occasion) selected[self.occasion.as_deref() == Some(*occasion)] {
                                    (occasion)
                                }
                            }
                        }
                        button type="submit" id=(ids::SUBMIT_BUTTON)
                            disabled[!self.submit.enabled]
                            style=[hidden(self.submit.visible)] { "Get My Style" }
                        div id=(ids::BUSY_INDICATOR) style=[hidden(self.busy_visible)] {
                            "Analyzing your photo..."
                        }
                    }
                    section id=(ids::RESULTS) style=[hidden(self.results_visible)] {
                        p id=(ids::SKIN_TONE) { (PreEscaped(&self.results.skin_tone)) }
                        p id=(ids::OUTFIT) { (PreEscaped(&self.results.outfit)) }
                        p id=(ids::COLORS) { (PreEscaped(&self.results.colors)) }
                        p id=(ids::ACCESSORIES) { (PreEscaped(&self.results.accessories)) }
                        p id=(ids::REASON) { (PreEscaped(&self.results.reason)) }
                        div id=(ids::SHOPPING_GRID) {
                            @for card in &self.shopping_grid {
                                (PreEscaped(card))
                            }
                        }
                        button type="button" id=(ids::RESET_BUTTON) { "Try Another Photo" }
                    }
                }
            }
        };

        markup.into_string()
    }
}
