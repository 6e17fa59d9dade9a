// Flight-search API client: the trait the manager depends on and its HTTP implementation
use crate::error::ClientError;
use crate::supplier::{
    DataEnvelope, ErrorBody, OfferPage, OfferRequestBody, OfferRequestCreated, PassengerRequest,
    RawOffer, SliceRequest,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.duffel.com";
pub const DEFAULT_API_VERSION: &str = "v2";
pub const MAX_PAGE_SIZE: u32 = 200;
pub const MAX_PAGES: usize = 500;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("API error: {status_code} - {message}")]
    ApiResponseError { status_code: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_version: String,
    pub timeout_ms: u64,
    pub page_size: u32,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_ms: 30_000,
            page_size: 50,
        }
    }
}

// One-way, single adult search
#[derive(Debug, Clone, PartialEq)]
pub struct OfferRequestParams {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub cabin_class: Option<String>,
}

impl From<&OfferRequestParams> for OfferRequestBody {
    fn from(params: &OfferRequestParams) -> Self {
        OfferRequestBody {
            slices: vec![SliceRequest {
                origin: params.origin.clone(),
                destination: params.destination.clone(),
                departure_date: params.departure_date.clone(),
            }],
            passengers: vec![PassengerRequest::adult()],
            cabin_class: params.cabin_class.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OfferSort {
    #[default]
    TotalAmount,
    TotalDuration,
}

impl OfferSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferSort::TotalAmount => "total_amount",
            OfferSort::TotalDuration => "total_duration",
        }
    }
}

#[async_trait]
pub trait FlightSearchClient: Send + Sync {
    // Submits a search and returns the offer request id
    async fn create_offer_request(&self, request: &OfferRequestParams) -> Result<String, ApiError>;

    // All offers of an offer request, every page, in the requested order
    async fn list_offers(
        &self,
        offer_request_id: &str,
        sort: OfferSort,
    ) -> Result<Vec<RawOffer>, ApiError>;
}

pub struct DuffelClient {
    client: Client,
    config: ClientConfig,
}

impl DuffelClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        if config.api_key.trim().is_empty() {
            return Err(ClientError::ConfigError("API key is empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| ClientError::ConfigError(format!("invalid API key: {}", e)))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("duffel-version"),
            HeaderValue::from_str(&config.api_version)
                .map_err(|e| ClientError::ConfigError(format!("invalid API version: {}", e)))?,
        );

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::InitError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.config.timeout_ms)
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }

    // Turns non-2xx responses into ApiResponseError carrying the API's own messages
    async fn check_status(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!(status = status.as_u16(), error = %e, "Failed to read error response body");
                String::new()
            }
        };
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.summary())
            .unwrap_or_else(|| {
                if text.is_empty() {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                } else {
                    text
                }
            });

        warn!(status = status.as_u16(), %message, "Flight search API returned an error");
        Err(ApiError::ApiResponseError {
            status_code: status.as_u16(),
            message,
        })
    }

    async fn fetch_page(
        &self,
        offer_request_id: &str,
        sort: OfferSort,
        after: Option<&str>,
    ) -> Result<OfferPage, ApiError> {
        let limit = self.config.page_size.clamp(1, MAX_PAGE_SIZE).to_string();
        let mut query = vec![
            ("offer_request_id", offer_request_id),
            ("sort", sort.as_str()),
            ("limit", limit.as_str()),
        ];
        if let Some(cursor) = after {
            query.push(("after", cursor));
        }

        let response = self
            .client
            .get(self.url("/air/offers"))
            .query(&query)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.check_status(response)
            .await?
            .json::<OfferPage>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl FlightSearchClient for DuffelClient {
    async fn create_offer_request(&self, request: &OfferRequestParams) -> Result<String, ApiError> {
        info!(
            origin = %request.origin,
            destination = %request.destination,
            departure_date = %request.departure_date,
            "Creating offer request"
        );

        let body = DataEnvelope {
            data: OfferRequestBody::from(request),
        };

        let response = self
            .client
            .post(self.url("/air/offer_requests"))
            .query(&[("return_offers", "false")])
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let created: DataEnvelope<OfferRequestCreated> = self
            .check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        debug!(offer_request_id = %created.data.id, "Offer request created");
        Ok(created.data.id)
    }

    async fn list_offers(
        &self,
        offer_request_id: &str,
        sort: OfferSort,
    ) -> Result<Vec<RawOffer>, ApiError> {
        let mut offers = Vec::new();
        let mut after: Option<String> = None;
        let mut seen_cursors = HashSet::new();

        for page_number in 1..=MAX_PAGES {
            let page = self
                .fetch_page(offer_request_id, sort, after.as_deref())
                .await?;
            debug!(page_number, page_size = page.data.len(), "Fetched offer page");
            offers.extend(page.data);

            let cursor = match page.meta.after {
                Some(cursor) if !cursor.is_empty() => cursor,
                _ => {
                    info!(offer_request_id, count = offers.len(), "Listed offers");
                    return Ok(offers);
                }
            };

            // A cursor seen before would replay pages forever
            if !seen_cursors.insert(cursor.clone()) {
                warn!(offer_request_id, %cursor, "Pagination cursor repeated");
                return Err(ApiError::InvalidResponse(format!(
                    "pagination cursor '{}' repeated",
                    cursor
                )));
            }
            after = Some(cursor);
        }

        warn!(offer_request_id, max_pages = MAX_PAGES, "Offer listing exceeded page limit");
        Err(ApiError::InvalidResponse(format!(
            "offer listing exceeded {} pages",
            MAX_PAGES
        )))
    }
}
