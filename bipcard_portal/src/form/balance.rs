use crate::config::Endpoint;

use super::Form;

/// Balance page request for a card number.
///
/// The card number is substituted verbatim. Callers validate it first.
#[derive(Clone, Debug)]
pub struct BalanceForm {
    card_number: String,
}

impl BalanceForm {
    pub fn new(card_number: &str) -> Self {
        Self {
            card_number: card_number.to_string(),
        }
    }
}

impl Form for BalanceForm {
    fn endpoint(&self) -> Endpoint {
        Endpoint::Session
    }

    fn to_form_body(&self) -> String {
        format!(
            "accion=6&NumDistribuidor=99&NomUsuario=usuInternet&NomHost=AFT&NomDominio=aft.cl&Trx=&RutUsuario=0&NumTarjeta={}&bloqueable=",
            self.card_number
        )
    }
}
