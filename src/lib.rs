// Best-offer picker over a third-party flight-search API

pub mod client;
pub mod config;
pub mod date;
pub mod error;
pub mod filter;
pub mod logging;
pub mod manager;
pub mod offer;
pub mod scoring;
pub mod selector;
pub mod supplier;
pub mod time_of_day;

// Re-export key types for convenience
pub use client::{ApiError, ClientConfig, DuffelClient, FlightSearchClient, OfferSort};
pub use config::AppConfig;
pub use date::{resolve_date, DateParser, RelativeDateParser, INVALID_DATE_FORMAT};
pub use error::{ApiErrorContext, ClientError, FlightError};
pub use filter::{filter_by_airline, filter_by_time_of_day, FilterCriteria};
pub use manager::{FlightOfferManager, OfferQuery};
pub use offer::{map_offers, Offer, Outcome};
pub use scoring::{normalize, OfferScorer, ScoreBounds};
pub use selector::OfferSelector;
pub use supplier::RawOffer;
pub use time_of_day::{matches, HeuristicMode, TimeOfDay};
