// Internal offer representation and the uniform result contract of the public operations
use crate::error::{FlightError, Result};
use crate::supplier::RawOffer;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A priced itinerary derived from a raw API offer.
///
/// Every derived field is computed once in [`Offer::from_raw`]; there are no setters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Offer {
    id: String,
    total_amount: Decimal,
    currency: String,
    airline_code: String,
    airline_name: String,
    num_segments: usize,
    departure_time: DateTime<FixedOffset>,
    arrival_time: DateTime<FixedOffset>,
    cabin_class: Option<String>,
    raw_offer: RawOffer,
}

impl Offer {
    pub fn from_raw(raw: RawOffer) -> Result<Self> {
        let malformed = |reason: &str| FlightError::MalformedOffer {
            offer_id: raw.id.clone(),
            reason: reason.to_string(),
        };

        let total_amount = Decimal::from_str(raw.total_amount.trim())
            .map_err(|_| malformed(&format!("invalid total amount '{}'", raw.total_amount)))?;

        let first_slice = raw.slices.first().ok_or_else(|| malformed("no slices"))?;
        let first_segment = first_slice
            .segments
            .first()
            .ok_or_else(|| malformed("first slice has no segments"))?;
        let last_segment = raw
            .slices
            .last()
            .and_then(|slice| slice.segments.last())
            .ok_or_else(|| malformed("last slice has no segments"))?;

        let departure_time = parse_timestamp(&first_segment.departing_at)
            .ok_or_else(|| malformed("unparseable departure time"))?;
        let arrival_time = parse_timestamp(&last_segment.arriving_at)
            .ok_or_else(|| malformed("unparseable arrival time"))?;

        let num_segments = first_slice.segments.len();
        let cabin_class = first_segment
            .passengers
            .first()
            .and_then(|p| p.cabin_class.clone());

        Ok(Self {
            id: raw.id.clone(),
            total_amount,
            currency: raw.total_currency.clone(),
            airline_code: raw.owner.iata_code.clone().unwrap_or_default(),
            airline_name: raw.owner.name.clone(),
            num_segments,
            departure_time,
            arrival_time,
            cabin_class,
            raw_offer: raw,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn airline_code(&self) -> &str {
        &self.airline_code
    }

    pub fn airline_name(&self) -> &str {
        &self.airline_name
    }

    pub fn num_segments(&self) -> usize {
        self.num_segments
    }

    pub fn departure_time(&self) -> DateTime<FixedOffset> {
        self.departure_time
    }

    pub fn arrival_time(&self) -> DateTime<FixedOffset> {
        self.arrival_time
    }

    pub fn cabin_class(&self) -> Option<&str> {
        self.cabin_class.as_deref()
    }

    pub fn raw_offer(&self) -> &RawOffer {
        &self.raw_offer
    }
}

// Offset-less timestamps are airport wall-clock times; they get a zero offset so the
// wall-clock reading survives unchanged.
fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset);
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

pub fn map_offers(raw_offers: Vec<RawOffer>) -> Result<Vec<Offer>> {
    raw_offers.into_iter().map(Offer::from_raw).collect()
}

/// Uniform result of the public operations: exactly one of a value or an error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Success { value: T },
    Failure { error_message: String },
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Outcome::Success { value }
    }

    pub fn failure(error_message: impl Into<String>) -> Self {
        Outcome::Failure {
            error_message: error_message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success { value } => Some(value),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure { error_message } => Some(error_message),
        }
    }

    pub fn into_result(self) -> std::result::Result<T, String> {
        match self {
            Outcome::Success { value } => Ok(value),
            Outcome::Failure { error_message } => Err(error_message),
        }
    }
}

impl<T, E: Display> From<std::result::Result<T, E>> for Outcome<T> {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::success(value),
            Err(e) => Outcome::failure(e.to_string()),
        }
    }
}
