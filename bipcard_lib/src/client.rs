//! Card pipeline: validates input, drives the portal, and scrapes the pages.

use bipcard_portal::{
    BalanceForm, HttpTransport, MovementsForm, PortalClient, PortalConfig, Transport,
};
use chrono::{DateTime, Utc};

use crate::error::BipCardError;
use crate::scrape::{CoercionPolicy, Scraper};
use crate::types::{CardInfo, CardMovement};
use crate::validation::validate_card_number;

/// Stateless client for card info and movements.
///
/// Nothing is carried between calls: every call fetches a fresh balance page,
/// and movements re-derive their KSI token from it. The compiled patterns and
/// the underlying HTTP client are the only shared state, and both are
/// immutable, so one instance can serve concurrent requests.
pub struct BipCardClient<T = HttpTransport> {
    portal: PortalClient<T>,
    scraper: Scraper,
}

impl BipCardClient<HttpTransport> {
    pub fn with_config(config: PortalConfig, policy: CoercionPolicy) -> Result<Self, BipCardError> {
        Ok(Self {
            portal: PortalClient::with_config(config)?,
            scraper: Scraper::new(policy)?,
        })
    }
}

impl<T: Transport> BipCardClient<T> {
    /// Creates a client over an arbitrary transport.
    pub fn with_transport(
        config: PortalConfig,
        transport: T,
        policy: CoercionPolicy,
    ) -> Result<Self, BipCardError> {
        Ok(Self {
            portal: PortalClient::with_transport(config, transport),
            scraper: Scraper::new(policy)?,
        })
    }

    /// Fetches the balance page and extracts the card summary.
    pub async fn card_info(&self, card_number: &str) -> Result<CardInfo, BipCardError> {
        let card_number = validate_card_number(card_number)?;
        let html = self.balance_page(&card_number).await?;
        let info = self.scraper.card_info(&html)?;
        tracing::debug!(card = %card_number, "card info scraped");
        Ok(info)
    }

    /// Fetches the movements page, authorized by a fresh KSI token.
    pub async fn card_movements(
        &self,
        card_number: &str,
    ) -> Result<Vec<CardMovement>, BipCardError> {
        self.card_movements_at(card_number, Utc::now()).await
    }

    /// Same as [`card_movements`](Self::card_movements) with an explicit
    /// request timestamp for the movements form.
    pub async fn card_movements_at(
        &self,
        card_number: &str,
        requested_at: DateTime<Utc>,
    ) -> Result<Vec<CardMovement>, BipCardError> {
        let card_number = validate_card_number(card_number)?;
        let html = self.balance_page(&card_number).await?;
        // A drifted balance page is not trusted to carry a usable token.
        self.scraper.check_balance_page(&html)?;
        let ksi = self.scraper.session_token(&html)?;

        let form = MovementsForm::new(&ksi, requested_at);
        let html = self.portal.submit_html(&form).await?;
        let movements = self.scraper.movements(&html)?;
        tracing::debug!(card = %card_number, count = movements.len(), "card movements scraped");
        Ok(movements)
    }

    async fn balance_page(&self, card_number: &str) -> Result<String, BipCardError> {
        let html = self.portal.submit_html(&BalanceForm::new(card_number)).await?;
        Ok(html)
    }
}
