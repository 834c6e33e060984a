//! Library layer for the BipCard API: card pipeline, scraping, and validation.
//!
//! Wraps the `bipcard_portal` transport with the HTML extractors that turn
//! PortalCAE pages into [`CardInfo`] and [`CardMovement`] records.

pub mod client;
pub mod error;
pub mod scrape;
pub mod types;
pub mod validation;

pub use bipcard_portal;
pub use bipcard_portal::{PortalConfig, Transport};

pub use client::BipCardClient;
pub use error::BipCardError;
pub use scrape::{CoercionPolicy, ScrapeError, Scraper};
pub use types::{CardInfo, CardMovement};
