// Search orchestration: submit the search, list and map offers, select the best one
use crate::client::{ApiError, FlightSearchClient, OfferRequestParams, OfferSort};
use crate::error::{ApiErrorContext, FlightError, Result};
use crate::filter::FilterCriteria;
use crate::offer::{map_offers, Offer, Outcome};
use crate::selector::OfferSelector;
use crate::time_of_day::HeuristicMode;
use tracing::{error, info};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferQuery {
    pub departure_city: String,
    pub destination_city: String,
    pub departure_date: String,
    pub time_of_day: Option<String>,
    pub airline: Option<String>,
    pub cabin_class: Option<String>,
}

impl OfferQuery {
    pub fn new(departure_city: &str, destination_city: &str, departure_date: &str) -> Self {
        Self {
            departure_city: departure_city.to_string(),
            destination_city: destination_city.to_string(),
            departure_date: departure_date.to_string(),
            ..Default::default()
        }
    }

    pub fn time_of_day(mut self, time_of_day: &str) -> Self {
        self.time_of_day = Some(time_of_day.to_string());
        self
    }

    pub fn airline(mut self, airline: &str) -> Self {
        self.airline = Some(airline.to_string());
        self
    }

    pub fn cabin_class(mut self, cabin_class: &str) -> Self {
        self.cabin_class = Some(cabin_class.to_string());
        self
    }

    fn api_error(&self, err: ApiError) -> FlightError {
        FlightError::ExternalApi(ApiErrorContext::new(
            &self.departure_city,
            &self.destination_city,
            &self.departure_date,
            specified(self.cabin_class.as_deref()),
            err.to_string(),
        ))
    }
}

// Blank optional parameters count as not given
fn specified(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Drives one search against the injected client and picks the best resulting offer.
pub struct FlightOfferManager<C> {
    client: C,
    selector: OfferSelector,
}

impl<C: FlightSearchClient> FlightOfferManager<C> {
    pub fn new(client: C, mode: HeuristicMode) -> Self {
        Self {
            client,
            selector: OfferSelector::new(mode),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Submits the search and returns the offer request id.
    pub async fn search(&self, query: &OfferQuery) -> Result<String> {
        info!(
            departure_city = %query.departure_city,
            destination_city = %query.destination_city,
            departure_date = %query.departure_date,
            "Calling flight search API"
        );

        let request = OfferRequestParams {
            origin: query.departure_city.clone(),
            destination: query.destination_city.clone(),
            departure_date: query.departure_date.clone(),
            cabin_class: specified(query.cabin_class.as_deref()).map(str::to_string),
        };

        self.client
            .create_offer_request(&request)
            .await
            .map_err(|e| query.api_error(e))
    }

    pub async fn find_best_offer(&self, query: &OfferQuery) -> Result<Offer> {
        // Reject a bad day-part label before spending a network round-trip
        let criteria = FilterCriteria::new(query.airline.as_deref(), query.time_of_day.as_deref())?;

        let offer_request_id = self.search(query).await?;
        let raw_offers = self
            .client
            .list_offers(&offer_request_id, OfferSort::TotalAmount)
            .await
            .map_err(|e| query.api_error(e))?;

        let offers = map_offers(raw_offers)?;
        self.selector.select_with(offers, &criteria)
    }

    /// Every failure is logged and reported as `Outcome::Failure`.
    pub async fn get_offer(&self, query: &OfferQuery) -> Outcome<Offer> {
        info!(
            departure_city = %query.departure_city,
            destination_city = %query.destination_city,
            departure_date = %query.departure_date,
            time_of_day = ?query.time_of_day,
            airline = ?query.airline,
            cabin_class = ?query.cabin_class,
            "Getting offer"
        );

        match self.find_best_offer(query).await {
            Ok(offer) => {
                info!(
                    offer_id = offer.id(),
                    total_amount = %offer.total_amount(),
                    airline = offer.airline_code(),
                    "Returning best offer"
                );
                Outcome::success(offer)
            }
            Err(e) => {
                error!(error = %e, "Failed to get offer");
                Outcome::failure(e.to_string())
            }
        }
    }
}
