mod client;
mod config;
mod errors;
mod form;
mod transport;
mod user_agent;
pub use self::client::PortalClient;
pub use self::config::{Endpoint, PortalConfig, DEFAULT_BASE_URL};
pub use self::errors::Error;
pub use self::form::{BalanceForm, Form, MovementsForm};
pub use self::transport::{HttpTransport, Transport};
pub use url::Url;
