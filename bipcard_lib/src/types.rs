//! Records extracted from portal pages. Built fresh per request and never persisted.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Card summary from the balance page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
    pub card_number: String,
    pub contract_status: String,
    /// Balance in whole pesos.
    pub card_balance: i64,
    /// Portal-local time of the balance snapshot, without offset.
    pub card_balance_date: NaiveDateTime,
}

/// One transaction row from the movements page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMovement {
    pub movement_id: i64,
    pub type_movement: String,
    pub date_time: NaiveDateTime,
    pub place: String,
    pub amount: i64,
    /// Card balance after this movement.
    pub balance: i64,
}
