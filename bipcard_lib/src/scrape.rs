//! HTML scraping of PortalCAE balance and movements pages.
//!
//! The portal renders plain table markup with no stable ids beyond a CSS class
//! and a `fila_` row prefix, so data is pulled out positionally with regexes.
//! Each extraction point declares the number of matches it expects ([`Arity`]);
//! anything else means the page layout drifted and the request fails.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::types::{CardInfo, CardMovement};

const CARD_INFO_CELL_PATTERN: &str = r#"<td.*class="verdanabold-ckc">(?P<value>.*)</td>"#;
const SESSION_TOKEN_PATTERN: &str =
    r#"<input\s*type="hidden"\s*id="KSI"\s*name="KSI"\s*value="(?P<ksi>[^"]*)"\s*/?>"#;
const MOVEMENT_ROW_PATTERN: &str = r#"<tr id="fila_[\s\S]*?</tr>"#;
const MOVEMENT_CELL_PATTERN: &str = r#"<td[\s\S]*?>(?P<value>.*)</td>"#;

const PORTAL_DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Highlighted cells on the balance page: four label/value pairs.
pub const CARD_INFO_CELLS: Arity = Arity::Exactly(8);
pub const SESSION_TOKENS: Arity = Arity::AtLeast(1);
pub const MOVEMENT_ROWS: Arity = Arity::AtLeast(1);
/// A leading selector cell plus the six movement columns.
pub const MOVEMENT_CELLS: Arity = Arity::AtLeast(7);

#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("scraping error: unexpected changes in webpage ({what}: expected {expected} matches, found {found})")]
    UnexpectedShape {
        what: &'static str,
        expected: Arity,
        found: usize,
    },
    #[error("scraping error: unreadable fields in {record}: {}", describe_failures(.failures))]
    FieldCoercion {
        record: String,
        failures: Vec<FieldFailure>,
    },
    #[error("{0}")]
    Pattern(String),
}

impl ScrapeError {
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::UnexpectedShape { .. })
    }
}

/// A single field whose text could not be coerced to its type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldFailure {
    pub field: &'static str,
    pub raw: String,
    pub expected: &'static str,
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:?} (expected {})", self.field, self.raw, self.expected)
    }
}

fn describe_failures(failures: &[FieldFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Number of matches an extraction point accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn admits(self, found: usize) -> bool {
        match self {
            Arity::Exactly(n) => found == n,
            Arity::AtLeast(n) => found >= n,
        }
    }

    /// Smallest cell count the contract accepts.
    pub fn min(self) -> usize {
        match self {
            Arity::Exactly(n) | Arity::AtLeast(n) => n,
        }
    }

    fn check(self, what: &'static str, found: usize) -> Result<(), ScrapeError> {
        if self.admits(found) {
            return Ok(());
        }
        tracing::warn!(what, expected = %self, found, "portal page shape changed");
        Err(ScrapeError::UnexpectedShape {
            what,
            expected: self,
            found,
        })
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// Named positions of the [`CardInfo`] values among the balance page cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardInfoField {
    CardNumber,
    ContractStatus,
    CardBalance,
    CardBalanceDate,
}

impl CardInfoField {
    pub const ALL: [CardInfoField; 4] = [
        CardInfoField::CardNumber,
        CardInfoField::ContractStatus,
        CardInfoField::CardBalance,
        CardInfoField::CardBalanceDate,
    ];

    /// Cell index of the value; the preceding cell holds its label.
    pub const fn cell_index(self) -> usize {
        match self {
            CardInfoField::CardNumber => 1,
            CardInfoField::ContractStatus => 3,
            CardInfoField::CardBalance => 5,
            CardInfoField::CardBalanceDate => 7,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CardInfoField::CardNumber => "card_number",
            CardInfoField::ContractStatus => "contract_status",
            CardInfoField::CardBalance => "card_balance",
            CardInfoField::CardBalanceDate => "card_balance_date",
        }
    }
}

/// Named positions of the [`CardMovement`] columns within a `fila_` row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementField {
    MovementId,
    TypeMovement,
    DateTime,
    Place,
    Amount,
    Balance,
}

impl MovementField {
    pub const ALL: [MovementField; 6] = [
        MovementField::MovementId,
        MovementField::TypeMovement,
        MovementField::DateTime,
        MovementField::Place,
        MovementField::Amount,
        MovementField::Balance,
    ];

    pub const fn cell_index(self) -> usize {
        match self {
            MovementField::MovementId => 1,
            MovementField::TypeMovement => 2,
            MovementField::DateTime => 3,
            MovementField::Place => 4,
            MovementField::Amount => 5,
            MovementField::Balance => 6,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            MovementField::MovementId => "movement_id",
            MovementField::TypeMovement => "type_movement",
            MovementField::DateTime => "date_time",
            MovementField::Place => "place",
            MovementField::Amount => "amount",
            MovementField::Balance => "balance",
        }
    }
}

/// What happens when a numeric or date cell does not parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoercionPolicy {
    /// The record fails with every unreadable field listed.
    #[default]
    Strict,
    /// Unreadable integers become 0 and dates become `0001-01-01T00:00:00`.
    Lenient,
}

/// Decoded, trimmed cell texts in document order.
struct Cells(Vec<String>);

impl Cells {
    fn capture(re: &Regex, haystack: &str) -> Self {
        Cells(
            re.captures_iter(haystack)
                .filter_map(|cap| cap.name("value").map(|m| clean_cell(m.as_str())))
                .collect(),
        )
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn at(&self, index: usize) -> &str {
        self.0.get(index).map(String::as_str).unwrap_or_default()
    }
}

/// Collects coercion failures for one record according to the policy.
struct FieldCoercer {
    policy: CoercionPolicy,
    record: String,
    failures: Vec<FieldFailure>,
}

impl FieldCoercer {
    fn new(policy: CoercionPolicy, record: impl Into<String>) -> Self {
        Self {
            policy,
            record: record.into(),
            failures: Vec::new(),
        }
    }

    fn integer(&mut self, field: &'static str, raw: &str, parse: fn(&str) -> Option<i64>) -> i64 {
        match parse(raw) {
            Some(value) => value,
            None => {
                self.reject(field, raw, "integer");
                0
            }
        }
    }

    fn datetime(&mut self, field: &'static str, raw: &str) -> NaiveDateTime {
        match parse_portal_datetime(raw) {
            Some(value) => value,
            None => {
                self.reject(field, raw, "DD/MM/YYYY HH:MM");
                zero_datetime()
            }
        }
    }

    fn reject(&mut self, field: &'static str, raw: &str, expected: &'static str) {
        match self.policy {
            CoercionPolicy::Lenient => {
                tracing::warn!(
                    record = %self.record,
                    field,
                    raw,
                    "unreadable field coerced to zero"
                );
            }
            CoercionPolicy::Strict => self.failures.push(FieldFailure {
                field,
                raw: raw.to_string(),
                expected,
            }),
        }
    }

    fn finish(self) -> Result<(), ScrapeError> {
        if self.failures.is_empty() {
            return Ok(());
        }
        Err(ScrapeError::FieldCoercion {
            record: self.record,
            failures: self.failures,
        })
    }
}

/// Compiled extraction patterns plus the coercion policy.
///
/// Immutable once built; share one instance across requests.
#[derive(Debug)]
pub struct Scraper {
    card_info_cell: Regex,
    session_token: Regex,
    movement_row: Regex,
    movement_cell: Regex,
    policy: CoercionPolicy,
}

impl Scraper {
    pub fn new(policy: CoercionPolicy) -> Result<Self, ScrapeError> {
        Ok(Self {
            card_info_cell: compile(CARD_INFO_CELL_PATTERN)?,
            session_token: compile(SESSION_TOKEN_PATTERN)?,
            movement_row: compile(MOVEMENT_ROW_PATTERN)?,
            movement_cell: compile(MOVEMENT_CELL_PATTERN)?,
            policy,
        })
    }

    /// Extracts the card summary from a balance page.
    pub fn card_info(&self, html: &str) -> Result<CardInfo, ScrapeError> {
        let cells = Cells::capture(&self.card_info_cell, html);
        CARD_INFO_CELLS.check("card info cells", cells.len())?;

        let value = |field: CardInfoField| cells.at(field.cell_index());
        let mut coercer = FieldCoercer::new(self.policy, "card info");

        let info = CardInfo {
            card_number: value(CardInfoField::CardNumber).to_string(),
            contract_status: value(CardInfoField::ContractStatus).to_string(),
            card_balance: coercer.integer(
                CardInfoField::CardBalance.name(),
                value(CardInfoField::CardBalance),
                parse_currency,
            ),
            card_balance_date: coercer.datetime(
                CardInfoField::CardBalanceDate.name(),
                value(CardInfoField::CardBalanceDate),
            ),
        };
        coercer.finish()?;
        Ok(info)
    }

    /// Verifies the balance page layout without coercing any field.
    pub fn check_balance_page(&self, html: &str) -> Result<(), ScrapeError> {
        let found = self.card_info_cell.captures_iter(html).count();
        CARD_INFO_CELLS.check("card info cells", found)
    }

    /// Extracts the KSI session token from a balance page. The first hidden
    /// input wins.
    pub fn session_token(&self, html: &str) -> Result<String, ScrapeError> {
        let tokens: Vec<&str> = self
            .session_token
            .captures_iter(html)
            .filter_map(|cap| cap.name("ksi").map(|m| m.as_str()))
            .collect();
        SESSION_TOKENS.check("KSI session token", tokens.len())?;
        Ok(tokens[0].to_string())
    }

    /// Extracts every `fila_` row of a movements page, in document order.
    pub fn movements(&self, html: &str) -> Result<Vec<CardMovement>, ScrapeError> {
        let rows: Vec<&str> = self
            .movement_row
            .find_iter(html)
            .map(|m| m.as_str())
            .collect();
        MOVEMENT_ROWS.check("movement rows", rows.len())?;

        rows.iter()
            .enumerate()
            .map(|(i, row)| self.movement(i + 1, row))
            .collect()
    }

    fn movement(&self, row_number: usize, row: &str) -> Result<CardMovement, ScrapeError> {
        let cells = Cells::capture(&self.movement_cell, row);
        MOVEMENT_CELLS.check("movement row cells", cells.len())?;

        let value = |field: MovementField| cells.at(field.cell_index());
        let mut coercer = FieldCoercer::new(self.policy, format!("movement row {}", row_number));

        let movement = CardMovement {
            movement_id: coercer.integer(
                MovementField::MovementId.name(),
                value(MovementField::MovementId),
                parse_int,
            ),
            type_movement: value(MovementField::TypeMovement).to_string(),
            date_time: coercer.datetime(
                MovementField::DateTime.name(),
                value(MovementField::DateTime),
            ),
            place: value(MovementField::Place).to_string(),
            amount: coercer.integer(
                MovementField::Amount.name(),
                value(MovementField::Amount),
                parse_grouped_int,
            ),
            balance: coercer.integer(
                MovementField::Balance.name(),
                value(MovementField::Balance),
                parse_grouped_int,
            ),
        };
        coercer.finish()?;
        Ok(movement)
    }
}

fn compile(pattern: &str) -> Result<Regex, ScrapeError> {
    Regex::new(pattern).map_err(|e| ScrapeError::Pattern(format!("regex compile error: {}", e)))
}

fn clean_cell(raw: &str) -> String {
    html_escape::decode_html_entities(raw).trim().to_string()
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

/// Parses a peso amount such as `$1.234.567`.
pub fn parse_currency(raw: &str) -> Option<i64> {
    raw.replace(['$', '.'], "").parse().ok()
}

/// Parses an integer with `.` thousands separators, such as `-1.500`.
pub fn parse_grouped_int(raw: &str) -> Option<i64> {
    raw.replace('.', "").parse().ok()
}

/// Parses the portal's `DD/MM/YYYY HH:MM` timestamps.
pub fn parse_portal_datetime(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, PORTAL_DATETIME_FORMAT).ok()
}

/// Zero timestamp used by lenient coercion.
pub fn zero_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}
