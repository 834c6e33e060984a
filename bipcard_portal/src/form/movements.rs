use chrono::{DateTime, Utc};

use crate::config::Endpoint;

use super::Form;

/// Days of history requested from the portal.
const HISTORY_DAYS: u32 = 90;
/// Maximum number of rows the portal is asked to render.
const MAX_ITEMS: u32 = 3000;

/// Movements page request, authorized by the KSI token from a balance page.
///
/// `FechaInicioMovimientos` and `fechalogeo` are both derived from the
/// instant the form is built, in UTC.
#[derive(Clone, Debug)]
pub struct MovementsForm {
    ksi: String,
    requested_at: DateTime<Utc>,
}

impl MovementsForm {
    pub fn new(ksi: &str, requested_at: DateTime<Utc>) -> Self {
        Self {
            ksi: ksi.to_string(),
            requested_at,
        }
    }

    /// Builds the form stamped with the current time.
    pub fn now(ksi: &str) -> Self {
        Self::new(ksi, Utc::now())
    }

    pub fn ksi(&self) -> &str {
        &self.ksi
    }

    pub fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }
}

impl Form for MovementsForm {
    fn endpoint(&self) -> Endpoint {
        Endpoint::Commercial
    }

    fn to_form_body(&self) -> String {
        format!(
            "accion=1&KSI={}&DiasMov={}&FechaInicioMovimientos={}&itemms={}&item=2&fechalogeo={}&cboSeleccion={}",
            self.ksi,
            HISTORY_DAYS,
            self.requested_at.format("%Y%m%d"),
            MAX_ITEMS,
            self.requested_at.format("%Y%m%d%H%M%S"),
            HISTORY_DAYS,
        )
    }
}
