//! Error types for the library layer.

use std::fmt;

use crate::scrape::ScrapeError;

/// Errors produced by the card pipeline, wrapping portal transport errors
/// and adding scraping and input validation failures.
#[derive(Debug)]
pub enum BipCardError {
    /// The outbound call to the portal failed.
    Portal(bipcard_portal::Error),
    /// A portal page did not have the expected shape, or a field did not coerce.
    Scrape(ScrapeError),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl BipCardError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Portal(_))
    }
}

impl fmt::Display for BipCardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portal(e) => write!(f, "Portal error: {}", e),
            Self::Scrape(e) => write!(f, "{}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for BipCardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Portal(e) => Some(e),
            Self::Scrape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bipcard_portal::Error> for BipCardError {
    fn from(e: bipcard_portal::Error) -> Self {
        Self::Portal(e)
    }
}

impl From<ScrapeError> for BipCardError {
    fn from(e: ScrapeError) -> Self {
        Self::Scrape(e)
    }
}
