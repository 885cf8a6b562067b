//! Data models for photo uploads, prediction payloads and shopping cards

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// A file offered by the user, before MIME validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// The accepted photo, owned by the submission controller until reset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Gender preference sent with the photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Form value as the backend expects it
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown gender '{other}' (expected male, female or other)")),
        }
    }
}

/// Everything that goes into the multipart body of `POST /predict`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictRequest {
    pub file: SelectedFile,
    pub gender: Gender,
    pub occasion: String,
}

/// Raw JSON body returned by the prediction endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub skin_tone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub recommendations: Option<Recommendations>,
    /// Backend generation time, `%Y-%m-%d %H:%M:%S`
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Styling bundle inside a successful response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Recommendations {
    #[serde(default)]
    pub outfit_description: Option<String>,
    #[serde(default)]
    pub outfit: Option<String>,
    pub color_palette: ColorPalette,
    pub hairstyle: String,
    pub accessories: Vec<String>,
    pub why_it_works: String,
    #[serde(default)]
    pub shopping_terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

/// The parsed payload of a successful prediction, handed to the result renderer
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationPayload {
    pub skin_tone: String,
    pub gender: String,
    pub recommendations: Recommendations,
    pub timestamp: Option<String>,
}

/// One outbound retailer search link on a shopping card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingLink {
    pub retailer: String,
    pub label: String,
    pub url: String,
}

/// A shopping card derived from a recommended item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingItem {
    /// Item text with markup and surrounding whitespace removed
    pub display_text: String,
    /// `"<item> for <gender>"`
    pub search_phrase: String,
    pub links: Vec<ShoppingLink>,
}

impl ShoppingItem {
    /// Display text with every word capitalised
    pub fn title(&self) -> String {
        self.display_text
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn link(&self, retailer: &str) -> Option<&ShoppingLink> {
        self.links.iter().find(|link| link.retailer == retailer)
    }
}
