//! Error taxonomy for the styling workflow

use thiserror::Error;

/// Why a candidate file was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unsupported file type '{mime_type}'")]
    UnsupportedType { mime_type: String },

    #[error("file is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend answered with `success: false`
    #[error("prediction failed: {message}")]
    Submission { message: String },

    /// Network failure or an unreadable response body
    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("cannot submit yet: {missing}")]
    NotReady { missing: &'static str },
}

impl StyleError {
    /// Text shown to the user in a blocking notice
    pub fn notice(&self) -> String {
        match self {
            Self::Validation(ValidationError::UnsupportedType { .. }) => {
                "Please upload a valid image file (JPG, PNG, WEBP).".to_string()
            }
            Self::Validation(ValidationError::TooLarge { limit, .. }) => {
                format!("Please upload an image smaller than {} MB.", limit / (1024 * 1024))
            }
            Self::Submission { message } => format!("Error: {message}"),
            Self::Transport { .. } => {
                "An error occurred. Please ensure the styling server is running.".to_string()
            }
            Self::NotReady { missing } => format!("Please choose {missing} first."),
        }
    }
}

impl From<reqwest::Error> for StyleError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_notice_carries_backend_message() {
        let err = StyleError::Submission {
            message: "no face detected".to_string(),
        };
        assert_eq!(err.notice(), "Error: no face detected");
    }

    #[test]
    fn too_large_notice_reports_megabytes() {
        let err = StyleError::from(ValidationError::TooLarge {
            size: 20 * 1024 * 1024,
            limit: 10 * 1024 * 1024,
        });
        assert!(err.notice().contains("10 MB"));
    }
}
