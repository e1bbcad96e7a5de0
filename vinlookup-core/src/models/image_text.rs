//! Text recognized in an image.

use serde::{Deserialize, Serialize};

/// A text fragment extracted from an image by OCR.
///
/// The API returns an ordered array of these; extra fields such as bounding
/// boxes are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageText {
    /// The extracted text.
    pub text: String,
}

impl ImageText {
    /// Creates a new text fragment.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
