//! Command-line and environment configuration for the server.

use std::net::SocketAddr;
use std::time::Duration;

use bipcard_lib::bipcard_portal::DEFAULT_BASE_URL;
use bipcard_lib::{CoercionPolicy, PortalConfig};
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "bipcard-server")]
#[command(about = "Serve bip! card balance and movements scraped from PortalCAE")]
pub struct ServerArgs {
    /// Address to listen on
    #[arg(long, env = "BIPCARD_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Base URL of the PortalCAE web module
    #[arg(long, env = "BIPCARD_PORTAL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub portal_base_url: String,

    /// Timeout for each portal request, in seconds
    #[arg(long, env = "BIPCARD_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Turn unreadable numbers and dates into zero values instead of failing
    #[arg(long, env = "BIPCARD_LENIENT_COERCION")]
    pub lenient_coercion: bool,
}

impl ServerArgs {
    pub fn portal_config(&self) -> PortalConfig {
        PortalConfig::with_base_url(&self.portal_base_url)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    pub fn coercion_policy(&self) -> CoercionPolicy {
        if self.lenient_coercion {
            CoercionPolicy::Lenient
        } else {
            CoercionPolicy::Strict
        }
    }
}
