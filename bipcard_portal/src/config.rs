//! Upstream portal configuration: base URL, endpoints, and request timeout.

use std::time::Duration;

use url::Url;

use crate::Error;

/// Production base URL of the PortalCAE web module.
pub const DEFAULT_BASE_URL: &str = "http://pocae.tstgo.cl/PortalCAE-WAR-MODULE";

/// Default timeout for a single outbound call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The two servlets the pipeline posts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Session servlet. Serves the balance page, which also carries the KSI token.
    Session,
    /// Commercial servlet. Serves the movements page for a KSI token.
    Commercial,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Session => "SesionPortalServlet",
            Endpoint::Commercial => "ComercialesPortalServlet",
        }
    }
}

/// Connection settings for the portal. Injected into the transport and client
/// so tests can point them at a mock server.
#[derive(Clone, Debug)]
pub struct PortalConfig {
    /// Base URL the servlet paths are appended to.
    pub base_url: String,
    /// Timeout applied to every outbound request.
    pub timeout: Duration,
    /// Fixed user agent. `None` picks a random browser user agent.
    pub user_agent: Option<String>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }
}

impl PortalConfig {
    /// Creates a config with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves the full URL of an endpoint.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, Error> {
        let base = self.base_url.trim_end_matches('/');
        Url::parse(format!("{}/{}", base, endpoint.path()).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(format!("{}: {}", base, e))
        })
    }
}
