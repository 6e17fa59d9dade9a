// Error types shared by the offer pipeline
use thiserror::Error;

// Search parameters attached to a failed call against the flight-search API
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "Flight search API error: {error_message} for trip from {departure_city} to {destination_city} on {departure_date}, cabin class: {cabin_class}"
)]
pub struct ApiErrorContext {
    pub departure_city: String,
    pub destination_city: String,
    pub departure_date: String,
    pub cabin_class: String,
    pub error_message: String,
}

impl ApiErrorContext {
    pub fn new(
        departure_city: &str,
        destination_city: &str,
        departure_date: &str,
        cabin_class: Option<&str>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            departure_city: departure_city.to_string(),
            destination_city: destination_city.to_string(),
            departure_date: departure_date.to_string(),
            cabin_class: cabin_class
                .filter(|c| !c.trim().is_empty())
                .unwrap_or("Not Specified")
                .to_string(),
            error_message: error_message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlightError {
    // The message is user-facing as-is
    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    ExternalApi(#[from] ApiErrorContext),

    #[error("No offers available to select from")]
    EmptyOfferSet,

    #[error("{0}")]
    DateParse(String),

    #[error("Malformed offer {offer_id}: {reason}")]
    MalformedOffer { offer_id: String, reason: String },
}

pub type Result<T> = std::result::Result<T, FlightError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Initialization error: {0}")]
    InitError(String),
}
