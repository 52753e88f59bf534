//! The remote pricing/booking API and its reqwest-backed client.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::UserId,
    error::ErrorBody,
    protocol::{BookingConfirmation, BookingDraft, BookingRecord, HealthStatus, PriceQuote},
};
use tracing::{debug, warn};
use url::Url;

use crate::{config::validate_api_url, error::BookingError};

#[async_trait]
pub trait PricingService: Send + Sync {
    /// Prices a draft without persisting anything.
    async fn preview(&self, draft: &BookingDraft) -> Result<PriceQuote, BookingError>;
    /// Persists the booking and returns its reference.
    async fn commit(&self, draft: &BookingDraft) -> Result<BookingConfirmation, BookingError>;
    async fn user_bookings(&self, user_id: &UserId) -> Result<Vec<BookingRecord>, BookingError>;
    async fn health(&self) -> Result<HealthStatus, BookingError>;
}

pub struct HttpPricingService {
    http: Client,
    api_url: Url,
}

impl HttpPricingService {
    pub fn new(api_url: &str) -> anyhow::Result<Self> {
        Self::with_client(Client::new(), api_url)
    }

    pub fn with_client(http: Client, api_url: &str) -> anyhow::Result<Self> {
        validate_api_url(api_url)?;
        let api_url = Url::parse(api_url)
            .with_context(|| format!("invalid booking api url '{api_url}'"))?;
        Ok(Self { http, api_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, BookingError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                BookingError::Transport(format!("api url '{}' cannot be a base", self.api_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn post_booking<T: DeserializeOwned>(
        &self,
        draft: &BookingDraft,
    ) -> Result<T, BookingError> {
        let url = self.endpoint(&["bookings"])?;
        debug!(
            %url,
            room_id = draft.room_id.0,
            date = %draft.date,
            preview = draft.preview,
            "posting booking draft"
        );
        let res = self.http.post(url).json(draft).send().await?;
        read_json(res).await
    }
}

/// Any 2xx decodes as `T`; everything else becomes an application error
/// carrying the backend's `{error}` message when it sent one.
async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T, BookingError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json::<T>().await?);
    }

    let body = res.bytes().await?;
    let message = match serde_json::from_slice::<ErrorBody>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) => BookingError::fallback_message(status.as_u16()),
    };
    warn!(status = status.as_u16(), %message, "booking service rejected request");
    Err(BookingError::Application {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl PricingService for HttpPricingService {
    async fn preview(&self, draft: &BookingDraft) -> Result<PriceQuote, BookingError> {
        self.post_booking(draft).await
    }

    async fn commit(&self, draft: &BookingDraft) -> Result<BookingConfirmation, BookingError> {
        self.post_booking(draft).await
    }

    async fn user_bookings(&self, user_id: &UserId) -> Result<Vec<BookingRecord>, BookingError> {
        let url = self.endpoint(&["bookings", "user", user_id.as_str()])?;
        let res = self.http.get(url).send().await?;
        read_json(res).await
    }

    async fn health(&self) -> Result<HealthStatus, BookingError> {
        let url = self.endpoint(&["health"])?;
        let res = self.http.get(url).send().await?;
        read_json(res).await
    }
}

#[cfg(test)]
#[path = "tests/pricing_tests.rs"]
mod tests;
