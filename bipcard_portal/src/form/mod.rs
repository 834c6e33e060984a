//! Request form builders: the [`Form`] trait and the two portal request bodies.

mod balance;
pub use self::balance::BalanceForm;

mod movements;
pub use self::movements::MovementsForm;

use crate::config::Endpoint;

/// Trait implemented by all portal request forms. A form knows which servlet
/// it targets and how to serialize itself as a URL-encoded body.
pub trait Form {
    /// The servlet this form is posted to.
    fn endpoint(&self) -> Endpoint;

    /// Serializes the form in the exact field order the portal expects.
    fn to_form_body(&self) -> String;
}
