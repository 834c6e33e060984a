//! Client that resolves portal endpoints and submits request forms.

use crate::{
    config::PortalConfig,
    form::Form,
    transport::{HttpTransport, Transport},
    Error,
};

/// Low-level portal client.
///
/// Holds the endpoint configuration and a [`Transport`]. Each call posts a
/// single form and hands back the page as text; it keeps no session state.
pub struct PortalClient<T = HttpTransport> {
    config: PortalConfig,
    transport: T,
}

impl PortalClient<HttpTransport> {
    /// Creates a client with a custom configuration. Used for testing with wiremock.
    pub fn with_config(config: PortalConfig) -> Result<Self, Error> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> PortalClient<T> {
    /// Creates a client over an arbitrary transport.
    pub fn with_transport(config: PortalConfig, transport: T) -> Self {
        Self { config, transport }
    }


    /// Posts the form to its endpoint and returns the raw response bytes.
    pub async fn submit<F: Form>(&self, form: &F) -> Result<Vec<u8>, Error> {
        let url = self.config.endpoint_url(form.endpoint())?;
        self.transport.post(&url, &form.to_form_body()).await
    }

    /// Posts the form and decodes the response as HTML text.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected; the portal
    /// does not declare a reliable charset.
    pub async fn submit_html<F: Form>(&self, form: &F) -> Result<String, Error> {
        let bytes = self.submit(form).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
