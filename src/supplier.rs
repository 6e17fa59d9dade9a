// Wire structures for the flight-search API (JSON bodies wrapped in a "data" envelope)
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Deserialize, Serialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

// Offer request submission
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OfferRequestBody {
    pub slices: Vec<SliceRequest>,
    pub passengers: Vec<PassengerRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cabin_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SliceRequest {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PassengerRequest {
    #[serde(rename = "type")]
    pub passenger_type: String,
}

impl PassengerRequest {
    pub fn adult() -> Self {
        Self {
            passenger_type: "adult".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OfferRequestCreated {
    pub id: String,
}

// Offer listing, one page at a time
#[derive(Debug, Deserialize, Serialize)]
pub struct OfferPage {
    pub data: Vec<RawOffer>,
    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PageMeta {
    #[serde(default)]
    pub after: Option<String>,
}

// Raw records keep every field the API sends so they can be handed on to booking untouched
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawOffer {
    pub id: String,
    pub total_amount: String,
    #[serde(default)]
    pub total_currency: String,
    pub owner: RawAirline,
    #[serde(default)]
    pub slices: Vec<RawSlice>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawAirline {
    #[serde(default)]
    pub iata_code: Option<String>,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawSlice {
    #[serde(default)]
    pub segments: Vec<RawSegment>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawSegment {
    pub departing_at: String,
    pub arriving_at: String,
    #[serde(default)]
    pub passengers: Vec<RawSegmentPassenger>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawSegmentPassenger {
    #[serde(default)]
    pub cabin_class: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Error body returned with non-2xx responses
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    // Joins the individual messages, falling back to titles
    pub fn summary(&self) -> Option<String> {
        let messages: Vec<&str> = self
            .errors
            .iter()
            .filter_map(|e| e.message.as_deref().or(e.title.as_deref()))
            .collect();

        if messages.is_empty() {
            None
        } else {
            Some(messages.join("; "))
        }
    }
}
